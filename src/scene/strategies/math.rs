use crate::{
    latex,
    render::{Animation, RenderResult},
    scene::strategy::{ElementStrategy, StrategyContext},
    timing::DurationAllocator,
};

/// A single typeset equation, written in, held, then emphasized once
pub struct MathEquation;

impl MathEquation {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MathEquation {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStrategy for MathEquation {
    fn name(&self) -> &str {
        "math_equation"
    }

    fn description(&self) -> &str {
        "Centered equation with a closing emphasis"
    }

    fn render(&self, ctx: &mut StrategyContext<'_>, content: &str, budget: f64) -> RenderResult<()> {
        let budget = DurationAllocator::math(budget);
        let presentation = ctx.presentation();
        let latex = latex::normalize(content);
        let id = ctx.backend().math(&latex, &presentation.math_equation)?;

        ctx.show(id);
        ctx.play(&[Animation::reveal(id)], budget.reveal);
        ctx.wait(budget.hold);
        ctx.play(&[Animation::emphasize(id, presentation.math_emphasis)], budget.highlight);
        Ok(())
    }
}
