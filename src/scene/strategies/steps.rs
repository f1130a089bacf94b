use crate::{
    render::{Animation, RenderResult},
    scene::strategy::{ElementStrategy, StrategyContext},
    timing::DurationAllocator,
};

/// Separator between sub-steps in the element content
pub const STEP_SEPARATOR: char = '|';

/// `|`-separated sub-steps shown one at a time, clearing in between
pub struct StepByStep;

impl StepByStep {
    pub fn new() -> Self {
        Self
    }

    /// `"a | b"` becomes `["Step 1: a", "Step 2: b"]`
    pub fn labels(content: &str) -> Vec<String> {
        content
            .split(STEP_SEPARATOR)
            .enumerate()
            .map(|(i, step)| format!("Step {}: {}", i + 1, step.trim()))
            .collect()
    }
}

impl Default for StepByStep {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStrategy for StepByStep {
    fn name(&self) -> &str {
        "step_by_step"
    }

    fn description(&self) -> &str {
        "Numbered steps revealed one after another"
    }

    fn render(&self, ctx: &mut StrategyContext<'_>, content: &str, budget: f64) -> RenderResult<()> {
        let labels = Self::labels(content);
        let budget = DurationAllocator::steps(budget, labels.len());
        let style = &ctx.presentation().step;

        let ids = labels
            .iter()
            .map(|label| ctx.backend().text(label, style))
            .collect::<RenderResult<Vec<_>>>()?;

        for (i, id) in ids.into_iter().enumerate() {
            if i > 0 {
                ctx.clear();
            }
            ctx.show(id);
            ctx.play(&[Animation::reveal(id)], budget.reveal);
            ctx.wait(budget.hold);
        }
        Ok(())
    }
}
