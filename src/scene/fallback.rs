use tracing::warn;

use crate::render::{Animation, Color, TextStyle};
use crate::scene::strategy::StrategyContext;
use crate::timing::DurationAllocator;

/// Kind name used for math inside legacy steps
pub const LEGACY_MATH_KIND: &str = "legacy_math";

/// Text and colour override of a fallback placeholder
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackLabel {
    pub text: String,
    pub color: Option<Color>,
}

impl FallbackLabel {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }

    /// Placeholder wording for a failed element of `kind`
    pub fn for_kind(kind: &str, content: &str) -> Self {
        match kind {
            "math_equation" => Self::plain(format!("Equation: {}", content)),
            "graph_plot" => Self::colored("Graph visualization", Color::Yellow),
            "highlight_parts" => Self::colored("Concept breakdown", Color::Yellow),
            LEGACY_MATH_KIND => Self::plain(format!("Math: {}", content)),
            _ => Self::plain(content),
        }
    }
}

/// Last line of defence: a plain text placeholder that fills the same budget
pub struct FallbackPolicy;

impl FallbackPolicy {
    /// Show `label` for exactly `budget` seconds: half reveal, half hold.
    ///
    /// If the backend cannot even create the text, the budget is spent as a
    /// wait so the timeline stays in step.
    pub fn render_fallback(
        ctx: &mut StrategyContext<'_>,
        label: &FallbackLabel,
        style: &TextStyle,
        budget: f64,
    ) {
        let budget = DurationAllocator::fallback(budget);
        let style = match label.color {
            Some(color) => style.clone().with_color(color),
            None => style.clone(),
        };

        match ctx.backend().text(&label.text, &style) {
            Ok(id) => {
                ctx.show(id);
                ctx.play(&[Animation::reveal(id)], budget.reveal);
                ctx.wait(budget.hold);
            }
            Err(e) => {
                warn!("Fallback text could not be created ({}); holding instead", e);
                ctx.wait(budget.reveal + budget.hold);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PresentationConfig;
    use crate::render::{ObjectKind, PlanRecorder};
    use crate::scene::clutter::ClutterManager;
    use crate::testing::FailingBackend;

    #[test]
    fn test_labels_by_kind() {
        assert_eq!(FallbackLabel::for_kind("math_equation", "x^2").text, "Equation: x^2");
        assert_eq!(FallbackLabel::for_kind("graph_plot", "y=x").color, Some(Color::Yellow));
        assert_eq!(FallbackLabel::for_kind("highlight_parts", "a").text, "Concept breakdown");
        assert_eq!(FallbackLabel::for_kind(LEGACY_MATH_KIND, "1+1").text, "Math: 1+1");
        assert_eq!(FallbackLabel::for_kind("text_display", "hi"), FallbackLabel::plain("hi"));
    }

    #[test]
    fn test_fallback_fills_budget() {
        let presentation = PresentationConfig::default();
        let mut recorder = PlanRecorder::new();
        let mut clutter = ClutterManager::default();
        let mut ctx = StrategyContext::new(&mut recorder, &mut clutter, &presentation);

        let label = FallbackLabel::for_kind("graph_plot", "ignored");
        FallbackPolicy::render_fallback(&mut ctx, &label, &presentation.fallback, 9.0);
        assert_eq!(ctx.spent(), 9.0);
        assert_eq!(ctx.active_count(), 1);

        assert_eq!(recorder.clock(), 9.0);
        assert_eq!(recorder.ops()[0].duration(), 4.5);
        match &recorder.objects()[0].kind {
            ObjectKind::Text { content, style } => {
                assert_eq!(content, "Graph visualization");
                assert_eq!(style.color, Color::Yellow);
            }
            other => panic!("unexpected object {:?}", other),
        }
    }

    #[test]
    fn test_fallback_survives_text_failure() {
        let presentation = PresentationConfig::default();
        let mut backend = FailingBackend::failing_text();
        let mut clutter = ClutterManager::default();
        let mut ctx = StrategyContext::new(&mut backend, &mut clutter, &presentation);

        FallbackPolicy::render_fallback(&mut ctx, &FallbackLabel::plain("x"), &presentation.fallback, 6.0);
        assert_eq!(ctx.spent(), 6.0);
        assert_eq!(ctx.active_count(), 0);
    }
}
