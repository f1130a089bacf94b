use crate::{
    render::{Animation, RenderResult},
    scene::strategy::{ElementStrategy, StrategyContext},
    timing::DurationAllocator,
};

/// Heading shown above every real-world example
pub const EXAMPLE_HEADING: &str = "Real-world application:";

/// A heading at the top of the frame with the example text below it
pub struct RealWorldExample;

impl RealWorldExample {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealWorldExample {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStrategy for RealWorldExample {
    fn name(&self) -> &str {
        "real_world_example"
    }

    fn description(&self) -> &str {
        "Application heading followed by the example text"
    }

    fn render(&self, ctx: &mut StrategyContext<'_>, content: &str, budget: f64) -> RenderResult<()> {
        let budget = DurationAllocator::example(budget);
        let presentation = ctx.presentation();
        let heading = ctx.backend().text(EXAMPLE_HEADING, &presentation.example_label)?;
        let body = ctx.backend().text(content, &presentation.example_body)?;

        ctx.show(heading);
        ctx.show(body);
        ctx.play(&[Animation::reveal(heading)], budget.label_reveal);
        ctx.play(&[Animation::reveal(body)], budget.body_reveal);
        ctx.wait(budget.hold);
        Ok(())
    }
}
