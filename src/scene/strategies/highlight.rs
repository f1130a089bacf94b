use crate::{
    latex,
    render::{Animation, RenderResult, Target},
    scene::strategy::{ElementStrategy, StrategyContext},
    timing::DurationAllocator,
};

/// An equation whose leading parts are emphasized in turn
pub struct HighlightParts;

impl HighlightParts {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighlightParts {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStrategy for HighlightParts {
    fn name(&self) -> &str {
        "highlight_parts"
    }

    fn description(&self) -> &str {
        "Equation with its first parts emphasized one by one"
    }

    fn render(&self, ctx: &mut StrategyContext<'_>, content: &str, budget: f64) -> RenderResult<()> {
        let presentation = ctx.presentation();
        let latex = latex::normalize(content);
        let id = ctx.backend().math(&latex, &presentation.highlight_parts)?;
        let parts = ctx.backend().part_count(id);
        let budget = DurationAllocator::highlight(budget, parts);

        ctx.show(id);
        ctx.play(&[Animation::reveal(id)], budget.reveal);
        for (index, seconds) in budget.emphasis.iter().enumerate() {
            let part = Target::Part { id, index };
            ctx.play(&[Animation::emphasize(part, presentation.highlight_emphasis)], *seconds);
        }
        ctx.wait(budget.hold);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PresentationConfig;
    use crate::render::{Op, PlanRecorder};
    use crate::scene::clutter::ClutterManager;

    #[test]
    fn test_parts_emphasized_in_order() {
        let presentation = PresentationConfig::default();
        let mut recorder = PlanRecorder::new();
        let mut clutter = ClutterManager::default();
        let mut ctx = StrategyContext::new(&mut recorder, &mut clutter, &presentation);

        HighlightParts::new().render(&mut ctx, "a = b = c = d", 10.0).unwrap();
        // reveal 2, then three emphases of 1 s each; four parts but only three are shown
        assert_eq!(ctx.spent(), 5.0);

        let targets: Vec<Target> = recorder.ops()[1..]
            .iter()
            .filter_map(|op| match &op.op {
                Op::Play { animations } => Some(animations[0].target()),
                Op::Wait => None,
            })
            .collect();
        assert_eq!(targets.len(), 3);
        assert_eq!(targets[2], Target::Part { id: targets[0].id(), index: 2 });
    }

    #[test]
    fn test_two_parts_and_single_part() {
        let presentation = PresentationConfig::default();
        let mut recorder = PlanRecorder::new();
        let mut clutter = ClutterManager::default();
        let mut ctx = StrategyContext::new(&mut recorder, &mut clutter, &presentation);

        HighlightParts::new().render(&mut ctx, "E = mc^2", 4.0).unwrap();
        // reveal 1.2 leaves 2.8; each of the two parts gets min(1, 1.4)
        assert!((ctx.spent() - 3.2).abs() < 1e-9);

        let mut recorder = PlanRecorder::new();
        let mut clutter = ClutterManager::default();
        let mut ctx = StrategyContext::new(&mut recorder, &mut clutter, &presentation);
        HighlightParts::new().render(&mut ctx, "x^2", 4.0).unwrap();
        assert!((ctx.spent() - 4.0).abs() < 1e-9);
    }
}
