use tracing::{debug, info, warn};

use crate::config::{Config, PresentationConfig, TimingConfig};
use crate::latex;
use crate::render::{Animation, SceneBackend, TextStyle};
use crate::scene::dispatcher::{DispatchOutcome, VisualElementDispatcher};
use crate::scene::fallback::{FallbackLabel, FallbackPolicy, LEGACY_MATH_KIND};
use crate::scene::state::SceneState;
use crate::scene::strategy::StrategyContext;
use crate::script::{LegacyStep, Narration, Script, ScriptBody, Section};

// Introduction / conclusion
pub const NARRATION_REVEAL: f64 = 2.0;
pub const NARRATION_HOLD_FLOOR: f64 = 1.0;
pub const INTRODUCTION_HOLD_OFFSET: f64 = 4.0;
pub const CONCLUSION_HOLD_OFFSET: f64 = 2.0;

// Legacy steps
pub const LEGACY_TEXT_REVEAL: f64 = 1.5;
pub const LEGACY_MATH_REVEAL: f64 = 2.0;
pub const LEGACY_MATH_EMPHASIS: f64 = 1.0;
pub const LEGACY_USED_TEXT_AND_MATH: f64 = 4.5;
pub const LEGACY_USED_ONE: f64 = 3.0;
pub const LEGACY_USED_NONE: f64 = 1.0;
pub const LEGACY_HOLD_FLOOR: f64 = 0.5;

/// One stop in the scene's node sequence
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'s> {
    Title(String),
    Introduction(&'s Narration),
    Section { index: usize, section: &'s Section },
    Conclusion(&'s Narration),
    Step { index: usize, step: &'s LegacyStep },
    FinalPad,
}

/// `Title → [Introduction] → Sections → [Conclusion] → FinalPad`, or
/// `Title → Steps → FinalPad` for legacy scripts
pub fn node_sequence(script: &Script) -> Vec<Node<'_>> {
    let mut nodes = vec![Node::Title(script.display_title())];

    match &script.body {
        ScriptBody::Structured(body) => {
            nodes.extend(body.introduction.iter().map(Node::Introduction));
            nodes.extend(
                body.sections
                    .iter()
                    .enumerate()
                    .map(|(index, section)| Node::Section { index, section }),
            );
            nodes.extend(body.conclusion.iter().map(Node::Conclusion));
        }
        ScriptBody::Legacy(body) => {
            nodes.extend(
                body.steps
                    .iter()
                    .enumerate()
                    .map(|(index, step)| Node::Step { index, step }),
            );
        }
    }

    nodes.push(Node::FinalPad);
    nodes
}

/// Summary of one scheduler run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleReport {
    /// Sum of declared node durations, title included
    pub nominal_duration: f64,
    /// Seconds actually emitted to the backend, pad included
    pub scheduled_duration: f64,
    /// Trailing wait added to reach the script's total
    pub final_pad: f64,
    /// Visual elements (or legacy steps) scheduled
    pub elements: usize,
    /// How many of them were replaced by a placeholder
    pub fallbacks: usize,
}

/// Walks a script's nodes in order and drives the backend through them
pub struct SectionScheduler {
    timing: TimingConfig,
    presentation: PresentationConfig,
    dispatcher: VisualElementDispatcher,
}

impl SectionScheduler {
    pub fn new(config: &Config) -> Self {
        Self {
            timing: config.timing.clone(),
            presentation: config.presentation.clone(),
            dispatcher: VisualElementDispatcher::new(),
        }
    }

    /// Use a dispatcher with custom strategies registered
    pub fn with_dispatcher(mut self, dispatcher: VisualElementDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn dispatcher(&self) -> &VisualElementDispatcher {
        &self.dispatcher
    }

    /// Schedule `script` onto `backend`. Element failures are absorbed by
    /// fallbacks, so a run always completes.
    pub fn run(&self, script: &Script, backend: &mut dyn SceneBackend) -> ScheduleReport {
        let mut state = SceneState::new(self.timing.clear_fade);
        let mut report = ScheduleReport::default();

        info!(
            "Scheduling '{}' on {} ({} form, {} element(s), target {:.1}s)",
            script.title,
            backend.name(),
            if script.is_structured() { "structured" } else { "legacy" },
            script.element_count(),
            script.total_duration
        );

        for node in node_sequence(script) {
            let mut ctx = StrategyContext::new(&mut *backend, &mut state.clutter, &self.presentation);

            let declared = match node {
                Node::Title(title) => {
                    self.render_title(&mut ctx, &title);
                    self.timing.title_duration()
                }
                Node::Introduction(narration) => {
                    let hold = NARRATION_HOLD_FLOOR.max(narration.duration - INTRODUCTION_HOLD_OFFSET);
                    self.render_narration(&mut ctx, narration, &self.presentation.introduction, hold);
                    narration.duration
                }
                Node::Section { index, section } => {
                    let past_title = state.timeline.current_time() > self.timing.title_duration();
                    if index > 0 || past_title {
                        ctx.clear();
                    }
                    self.render_section(&mut ctx, section, &mut report);
                    section.duration
                }
                Node::Conclusion(narration) => {
                    ctx.clear();
                    let hold = NARRATION_HOLD_FLOOR.max(narration.duration - CONCLUSION_HOLD_OFFSET);
                    self.render_narration(&mut ctx, narration, &self.presentation.conclusion, hold);
                    narration.duration
                }
                Node::Step { index, step } => {
                    if index > 0 {
                        ctx.clear();
                    }
                    self.render_legacy_step(&mut ctx, step, &mut report);
                    step.duration
                }
                Node::FinalPad => {
                    let pad = state.timeline.finalize(script.total_duration);
                    ctx.wait(pad);
                    report.final_pad = pad;
                    0.0
                }
            };

            report.scheduled_duration += ctx.spent();
            state.timeline.advance(declared);
        }

        report.nominal_duration = state.timeline.current_time();
        info!(
            "Scheduled {:.1}s (nominal {:.1}s, pad {:.1}s, {} fallback(s))",
            report.scheduled_duration, report.nominal_duration, report.final_pad, report.fallbacks
        );
        report
    }

    /// Title card: written in, held, faded out on its own
    fn render_title(&self, ctx: &mut StrategyContext<'_>, title: &str) {
        match ctx.backend().text(title, &self.presentation.title) {
            Ok(id) => {
                ctx.play(&[Animation::reveal(id)], self.timing.title_reveal);
                ctx.wait(self.timing.title_hold);
                ctx.play(&[Animation::fade_out(id)], self.timing.title_fade);
            }
            Err(e) => {
                warn!("Title could not be created ({}); holding instead", e);
                ctx.wait(self.timing.title_duration());
            }
        }
    }

    fn render_narration(
        &self,
        ctx: &mut StrategyContext<'_>,
        narration: &Narration,
        style: &TextStyle,
        hold: f64,
    ) {
        if narration.text.is_empty() {
            return;
        }
        match ctx.backend().text(&narration.text, style) {
            Ok(id) => {
                ctx.show(id);
                ctx.play(&[Animation::reveal(id)], NARRATION_REVEAL);
                ctx.wait(hold);
            }
            Err(e) => {
                warn!("Narration could not be created ({}); holding instead", e);
                ctx.wait(NARRATION_REVEAL + hold);
            }
        }
    }

    fn render_section(&self, ctx: &mut StrategyContext<'_>, section: &Section, report: &mut ScheduleReport) {
        debug!(
            "Section '{}' ({:.1}s, {} element(s))",
            section.title,
            section.duration,
            section.visual_sequence.len()
        );

        for (i, element) in section.visual_sequence.iter().enumerate() {
            if i > 0 {
                ctx.clear();
            }
            let budget = element.display_budget(self.timing.element_cap);
            report.elements += 1;
            if self.dispatcher.dispatch(ctx, element, budget) == DispatchOutcome::FellBack {
                report.fallbacks += 1;
            }
        }
    }

    fn render_legacy_step(&self, ctx: &mut StrategyContext<'_>, step: &LegacyStep, report: &mut ScheduleReport) {
        let has_text = !step.text.is_empty();
        let has_math = !step.math.is_empty();
        report.elements += 1;

        if has_text {
            match ctx.backend().text(&step.text, &self.presentation.legacy_text) {
                Ok(id) => {
                    ctx.show(id);
                    ctx.play(&[Animation::reveal(id)], LEGACY_TEXT_REVEAL);
                }
                Err(e) => {
                    warn!("Step text could not be created ({}); holding instead", e);
                    ctx.wait(LEGACY_TEXT_REVEAL);
                }
            }
        }

        if has_math {
            let latex = latex::normalize(&step.math);
            match ctx.backend().math(&latex, &self.presentation.legacy_math) {
                Ok(id) => {
                    ctx.show(id);
                    ctx.play(&[Animation::reveal(id)], LEGACY_MATH_REVEAL);
                    ctx.play(
                        &[Animation::emphasize(id, self.presentation.math_emphasis)],
                        LEGACY_MATH_EMPHASIS,
                    );
                }
                Err(e) => {
                    warn!("Step math failed ({}); falling back", e);
                    let label = FallbackLabel::for_kind(LEGACY_MATH_KIND, &step.math);
                    FallbackPolicy::render_fallback(
                        ctx,
                        &label,
                        &self.presentation.legacy_fallback,
                        LEGACY_MATH_REVEAL + LEGACY_MATH_EMPHASIS,
                    );
                    report.fallbacks += 1;
                }
            }
        }

        let used = match (has_text, has_math) {
            (true, true) => LEGACY_USED_TEXT_AND_MATH,
            (true, false) | (false, true) => LEGACY_USED_ONE,
            (false, false) => LEGACY_USED_NONE,
        };
        ctx.wait(LEGACY_HOLD_FLOOR.max(step.duration - used));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScriptDefaults;
    use crate::render::{ObjectKind, Op, PlanRecorder};

    fn parse(json: &str) -> Script {
        Script::from_json_str(json, &ScriptDefaults::default()).unwrap()
    }

    fn durations(recorder: &PlanRecorder) -> Vec<f64> {
        recorder.ops().iter().map(|op| op.duration()).collect()
    }

    #[test]
    fn test_node_sequence_order() {
        let script = parse(
            r#"{
                "title": "Limits_and__more",
                "introduction": {"text": "Hi", "duration": 10},
                "sections": [{"title": "A"}, {"title": "B"}],
                "conclusion": {"text": "Bye"}
            }"#,
        );
        let nodes = node_sequence(&script);
        assert_eq!(nodes.len(), 6);
        assert_eq!(nodes[0], Node::Title("Limits and more".to_string()));
        assert!(matches!(nodes[1], Node::Introduction(_)));
        assert!(matches!(nodes[3], Node::Section { index: 1, .. }));
        assert!(matches!(nodes[4], Node::Conclusion(_)));
        assert_eq!(nodes[5], Node::FinalPad);
    }

    #[test]
    fn test_structured_math_section() {
        let script = parse(
            r#"{
                "title": "Quadratics",
                "totalDuration": 60,
                "sections": [{
                    "title": "S1",
                    "duration": 56,
                    "visualSequence": [{"type": "math_equation", "content": "$x^2+1=0$", "timing": [0, 10]}]
                }]
            }"#,
        );
        let scheduler = SectionScheduler::new(&Config::default());
        let mut recorder = PlanRecorder::new();
        let report = scheduler.run(&script, &mut recorder);

        // title 2/1/1, then math 2/7/1, no clear directly after the title
        assert_eq!(durations(&recorder), vec![2.0, 1.0, 1.0, 2.0, 7.0, 1.0]);
        assert_eq!(report.final_pad, 0.0);
        assert_eq!(report.nominal_duration, 60.0);
        assert_eq!(report.scheduled_duration, 14.0);
        assert_eq!(report.elements, 1);
        assert_eq!(report.fallbacks, 0);

        match &recorder.objects()[1].kind {
            ObjectKind::Math { latex, .. } => assert_eq!(latex, "x^2+1=0"),
            other => panic!("unexpected object {:?}", other),
        }
    }

    #[test]
    fn test_legacy_text_only_step() {
        let script = parse(r#"{"title": "T", "duration": 30, "steps": [{"text": "Hi", "math": "", "duration": 20}]}"#);
        let scheduler = SectionScheduler::new(&Config::default());
        let mut recorder = PlanRecorder::new();
        let report = scheduler.run(&script, &mut recorder);

        assert_eq!(durations(&recorder), vec![2.0, 1.0, 1.0, 1.5, 17.0, 6.0]);
        assert_eq!(report.final_pad, 6.0);
        assert_eq!(report.nominal_duration, 24.0);
    }

    #[test]
    fn test_legacy_math_fallback_keeps_step_length() {
        let script = parse(
            r#"{"duration": 24, "steps": [{"text": "Fractions", "math": "\\frac{1}{2", "duration": 20}]}"#,
        );
        let scheduler = SectionScheduler::new(&Config::default());
        let mut recorder = PlanRecorder::new();
        let report = scheduler.run(&script, &mut recorder);

        assert_eq!(report.fallbacks, 1);
        // text 1.5, placeholder 1.5 + 1.5, hold 20 - 4.5
        assert_eq!(&durations(&recorder)[3..], &[1.5, 1.5, 1.5, 15.5]);
        assert!(recorder.objects().iter().any(|o| matches!(
            &o.kind,
            ObjectKind::Text { content, .. } if content.starts_with("Math: ")
        )));
    }

    #[test]
    fn test_failed_element_keeps_budget() {
        let script = parse(
            r#"{
                "totalDuration": 20,
                "sections": [{
                    "duration": 16,
                    "visualSequence": [{"type": "math_equation", "content": "\\sqrt{x", "timing": [2, 10]}]
                }]
            }"#,
        );
        let scheduler = SectionScheduler::new(&Config::default());
        let mut recorder = PlanRecorder::new();
        let report = scheduler.run(&script, &mut recorder);

        assert_eq!(report.fallbacks, 1);
        assert_eq!(&durations(&recorder)[3..], &[4.0, 4.0]);
    }

    #[test]
    fn test_sections_clear_after_introduction() {
        let script = parse(
            r#"{
                "totalDuration": 60,
                "introduction": {"text": "Welcome", "duration": 10},
                "sections": [{
                    "duration": 20,
                    "visualSequence": [
                        {"type": "text_display", "content": "one", "timing": [0, 5]},
                        {"type": "text_display", "content": "two", "timing": [5, 10]}
                    ]
                }]
            }"#,
        );
        let scheduler = SectionScheduler::new(&Config::default());
        let mut recorder = PlanRecorder::new();
        let report = scheduler.run(&script, &mut recorder);

        // title 4, intro 2 + 6, clear 0.5, text 5, clear 0.5, text 5, pad 26
        assert_eq!(report.final_pad, 26.0);
        assert_eq!(report.scheduled_duration, 49.0);

        let fades = recorder
            .ops()
            .iter()
            .filter(|op| op.start >= 4.0)
            .filter(|op| matches!(
                &op.op,
                Op::Play { animations } if matches!(animations[0], Animation::FadeOut { .. })
            ))
            .count();
        assert_eq!(fades, 2);
    }

    #[test]
    fn test_empty_sections_render_narration_only() {
        let script = parse(
            r#"{
                "totalDuration": 20,
                "introduction": {"text": "Hi", "duration": 10},
                "sections": [],
                "conclusion": {"text": "Bye", "duration": 5}
            }"#,
        );
        let scheduler = SectionScheduler::new(&Config::default());
        let mut recorder = PlanRecorder::new();
        let report = scheduler.run(&script, &mut recorder);

        assert_eq!(report.elements, 0);
        assert_eq!(report.nominal_duration, 19.0);
        assert_eq!(report.final_pad, 1.0);
        // conclusion clears the introduction first
        assert_eq!(report.scheduled_duration, 4.0 + 8.0 + 0.5 + 5.0 + 1.0);
    }

    #[test]
    fn test_overrun_gets_no_pad() {
        let script = parse(r#"{"duration": 10, "steps": [{"text": "a", "duration": 20}]}"#);
        let scheduler = SectionScheduler::new(&Config::default());
        let mut recorder = PlanRecorder::new();
        let report = scheduler.run(&script, &mut recorder);

        assert_eq!(report.final_pad, 0.0);
        assert_eq!(report.nominal_duration, 24.0);
    }

    #[test]
    fn test_each_run_starts_fresh() {
        let script = parse(r#"{"steps": [{"text": "a"}, {"text": "b", "math": "x=1"}]}"#);
        let scheduler = SectionScheduler::new(&Config::default());

        let mut first = PlanRecorder::new();
        let mut second = PlanRecorder::new();
        let a = scheduler.run(&script, &mut first);
        let b = scheduler.run(&script, &mut second);

        assert_eq!(a, b);
        assert_eq!(first.ops(), second.ops());
        // 43 s emitted against 44 s declared, then a 256 s pad
        assert_eq!(a.scheduled_duration, 299.0);
    }
}
