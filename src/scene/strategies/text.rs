use crate::{
    render::{Animation, RenderResult},
    scene::strategy::{ElementStrategy, StrategyContext},
    timing::DurationAllocator,
};

/// Centered plain text. Also handles tags nothing else claims.
pub struct TextDisplay;

impl TextDisplay {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStrategy for TextDisplay {
    fn name(&self) -> &str {
        "text_display"
    }

    fn description(&self) -> &str {
        "Centered text written in, then held"
    }

    fn render(&self, ctx: &mut StrategyContext<'_>, content: &str, budget: f64) -> RenderResult<()> {
        let budget = DurationAllocator::text(budget);
        let style = &ctx.presentation().text_display;
        let id = ctx.backend().text(content, style)?;

        ctx.show(id);
        ctx.play(&[Animation::reveal(id)], budget.reveal);
        ctx.wait(budget.hold);
        Ok(())
    }
}
