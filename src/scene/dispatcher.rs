use std::collections::HashMap;

use tracing::{debug, warn};

use crate::scene::fallback::{FallbackLabel, FallbackPolicy};
use crate::scene::strategies;
use crate::scene::strategy::{ElementStrategy, StrategyContext};
use crate::script::VisualElement;

/// Tag used for elements whose type nothing else handles
pub const DEFAULT_STRATEGY: &str = "text_display";

/// How an element ended up on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Rendered,
    FellBack,
}

/// Routes each visual element to the strategy registered for its tag.
///
/// Dispatch is total: a failing strategy is replaced by a fallback
/// placeholder that spends whatever is left of the element's budget.
pub struct VisualElementDispatcher {
    strategies: HashMap<String, Box<dyn ElementStrategy>>,
}

impl VisualElementDispatcher {
    /// Create a dispatcher with all built-in strategies
    pub fn new() -> Self {
        let mut dispatcher = Self {
            strategies: HashMap::new(),
        };
        for strategy in strategies::builtin() {
            dispatcher.register(strategy);
        }
        dispatcher
    }

    /// Register a strategy under its own name, replacing any previous one
    pub fn register(&mut self, strategy: Box<dyn ElementStrategy>) {
        self.strategies.insert(strategy.name().to_string(), strategy);
    }

    /// Strategy that will handle `tag`, after the unknown-tag default is applied
    pub fn strategy_for(&self, tag: &str) -> Option<&dyn ElementStrategy> {
        self.strategies
            .get(tag)
            .or_else(|| self.strategies.get(DEFAULT_STRATEGY))
            .map(|s| s.as_ref())
    }

    pub fn has_strategy(&self, tag: &str) -> bool {
        self.strategies.contains_key(tag)
    }

    /// Get all registered tags, sorted
    pub fn available_strategies(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.strategies.keys().cloned().collect();
        tags.sort();
        tags
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Render `element` within `budget` seconds. Never fails.
    pub fn dispatch(
        &self,
        ctx: &mut StrategyContext<'_>,
        element: &VisualElement,
        budget: f64,
    ) -> DispatchOutcome {
        let tag = element.kind.as_str();
        let Some(strategy) = self.strategy_for(tag) else {
            warn!("No strategy for '{}' and no default; showing placeholder", tag);
            let style = &ctx.presentation().fallback;
            FallbackPolicy::render_fallback(ctx, &FallbackLabel::plain(&element.content), style, budget);
            return DispatchOutcome::FellBack;
        };

        if strategy.name() != tag {
            debug!("Unknown element type '{}', using {}", tag, strategy.name());
        }

        let before = ctx.spent();
        match strategy.render(ctx, &element.content, budget) {
            Ok(()) => DispatchOutcome::Rendered,
            Err(e) => {
                let remaining = (budget - (ctx.spent() - before)).max(0.0);
                warn!(
                    "{} failed ({}); falling back for the remaining {:.2}s",
                    strategy.name(),
                    e,
                    remaining
                );
                let style = &ctx.presentation().fallback;
                let label = strategy.fallback_label(&element.content);
                FallbackPolicy::render_fallback(ctx, &label, style, remaining);
                DispatchOutcome::FellBack
            }
        }
    }
}

impl Default for VisualElementDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PresentationConfig;
    use crate::error::RenderError;
    use crate::render::{Animation, ObjectKind, PlanRecorder, RenderResult};
    use crate::scene::clutter::ClutterManager;
    use crate::script::ElementKind;
    use crate::testing::FailingBackend;

    struct HalfThenFail;

    impl ElementStrategy for HalfThenFail {
        fn name(&self) -> &str {
            "half_then_fail"
        }

        fn description(&self) -> &str {
            "Waits half the budget, then fails"
        }

        fn render(&self, ctx: &mut StrategyContext<'_>, _content: &str, budget: f64) -> RenderResult<()> {
            ctx.wait(budget / 2.0);
            Err(RenderError::Backend {
                reason: "gave up".to_string(),
            })
        }
    }

    #[test]
    fn test_builtin_strategies_available() {
        let dispatcher = VisualElementDispatcher::new();
        for tag in [
            "text_display",
            "math_equation",
            "graph_plot",
            "step_by_step",
            "highlight_parts",
            "real_world_example",
        ] {
            assert!(dispatcher.has_strategy(tag), "missing {}", tag);
        }
        assert_eq!(dispatcher.len(), 6);
        assert!(!dispatcher.is_empty());
    }

    #[test]
    fn test_unknown_tag_routes_to_text() {
        let dispatcher = VisualElementDispatcher::new();
        let strategy = dispatcher.strategy_for("pie_chart").unwrap();
        assert_eq!(strategy.name(), DEFAULT_STRATEGY);

        let presentation = PresentationConfig::default();
        let mut unknown = PlanRecorder::new();
        let mut text = PlanRecorder::new();

        for (tag, recorder) in [("pie_chart", &mut unknown), ("text_display", &mut text)] {
            let mut clutter = ClutterManager::default();
            let mut ctx = StrategyContext::new(recorder, &mut clutter, &presentation);
            let element = VisualElement::new(ElementKind::from_tag(tag), "Slices", (0.0, 10.0));
            assert_eq!(dispatcher.dispatch(&mut ctx, &element, 10.0), DispatchOutcome::Rendered);
            assert_eq!(ctx.spent(), 10.0);
        }

        assert!(!unknown.ops().is_empty());
        assert_eq!(unknown.ops(), text.ops());
        assert_eq!(unknown.objects(), text.objects());
    }

    #[test]
    fn test_malformed_math_falls_back_with_full_budget() {
        let dispatcher = VisualElementDispatcher::new();
        let presentation = PresentationConfig::default();
        let mut recorder = PlanRecorder::new();
        let mut clutter = ClutterManager::default();
        let mut ctx = StrategyContext::new(&mut recorder, &mut clutter, &presentation);

        let element = VisualElement::new(ElementKind::MathEquation, r"\frac{1}{2", (0.0, 10.0));
        assert_eq!(dispatcher.dispatch(&mut ctx, &element, 10.0), DispatchOutcome::FellBack);
        assert_eq!(ctx.spent(), 10.0);

        let durations: Vec<f64> = recorder.ops().iter().map(|op| op.duration()).collect();
        assert_eq!(durations, vec![5.0, 5.0]);
        match &recorder.objects()[0].kind {
            ObjectKind::Text { content, .. } => assert_eq!(content, r"Equation: \frac{1}{2"),
            other => panic!("unexpected object {:?}", other),
        }
    }

    #[test]
    fn test_fallback_gets_unspent_budget() {
        let mut dispatcher = VisualElementDispatcher::new();
        dispatcher.register(Box::new(HalfThenFail));
        assert_eq!(dispatcher.len(), 7);

        let presentation = PresentationConfig::default();
        let mut recorder = PlanRecorder::new();
        let mut clutter = ClutterManager::default();
        let mut ctx = StrategyContext::new(&mut recorder, &mut clutter, &presentation);

        let element = VisualElement::new(ElementKind::from_tag("half_then_fail"), "x", (0.0, 8.0));
        assert_eq!(dispatcher.dispatch(&mut ctx, &element, 8.0), DispatchOutcome::FellBack);
        assert_eq!(ctx.spent(), 8.0);
    }

    #[test]
    fn test_dispatch_is_total() {
        let dispatcher = VisualElementDispatcher::new();
        let presentation = PresentationConfig::default();
        let kinds = [
            "text_display",
            "math_equation",
            "graph_plot",
            "step_by_step",
            "highlight_parts",
            "real_world_example",
            "mystery",
        ];

        let backends: Vec<fn() -> FailingBackend> = vec![
            FailingBackend::default,
            FailingBackend::failing_text,
            FailingBackend::failing_math,
            FailingBackend::failing_plot,
        ];

        for make in backends {
            for tag in kinds {
                let mut backend = make();
                let mut clutter = ClutterManager::default();
                let mut ctx = StrategyContext::new(&mut backend, &mut clutter, &presentation);
                let element = VisualElement::new(ElementKind::from_tag(tag), "a = b | c", (0.0, 6.0));

                dispatcher.dispatch(&mut ctx, &element, 6.0);
                assert!(ctx.spent() > 0.0, "{} spent nothing", tag);
            }
        }
    }

    #[test]
    fn test_fallback_placeholder_is_revealed() {
        let dispatcher = VisualElementDispatcher::new();
        let presentation = PresentationConfig::default();
        let mut backend = FailingBackend::failing_plot();
        let mut clutter = ClutterManager::default();
        let mut ctx = StrategyContext::new(&mut backend, &mut clutter, &presentation);

        let element = VisualElement::new(ElementKind::GraphPlot, "sine wave", (0.0, 6.0));
        assert_eq!(dispatcher.dispatch(&mut ctx, &element, 6.0), DispatchOutcome::FellBack);
        assert_eq!(ctx.active_count(), 1);

        let reveal = Animation::reveal(backend.inner.objects()[0].id);
        assert!(backend.inner.ops().iter().any(|op| matches!(
            &op.op,
            crate::render::Op::Play { animations } if animations[0] == reveal
        )));
    }
}
