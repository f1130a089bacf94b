use crate::{
    render::{Animation, AxesSpec, PlotFunction, RenderResult, PLOT_X_RANGE},
    scene::strategy::{ElementStrategy, StrategyContext},
    timing::DurationAllocator,
};

/// Axes with one curve picked from keywords in the content
pub struct GraphPlot {
    axes: AxesSpec,
}

impl GraphPlot {
    pub fn new() -> Self {
        Self {
            axes: AxesSpec::default(),
        }
    }

    pub fn with_axes(axes: AxesSpec) -> Self {
        Self { axes }
    }
}

impl Default for GraphPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStrategy for GraphPlot {
    fn name(&self) -> &str {
        "graph_plot"
    }

    fn description(&self) -> &str {
        "Coordinate axes, then a curve drawn on them"
    }

    fn render(&self, ctx: &mut StrategyContext<'_>, content: &str, budget: f64) -> RenderResult<()> {
        let budget = DurationAllocator::graph(budget);
        let function = PlotFunction::from_content(content);

        let backend = ctx.backend();
        let axes = backend.axes(&self.axes)?;
        let labels = backend.axis_labels(axes, "x", "y")?;
        let curve = backend.plot(axes, function, PLOT_X_RANGE)?;

        ctx.show(axes);
        ctx.show(labels);
        ctx.show(curve);

        ctx.play(&[Animation::reveal(axes), Animation::reveal(labels)], budget.axes_reveal);
        ctx.play(&[Animation::reveal(curve)], budget.curve_reveal);
        ctx.wait(budget.hold);
        Ok(())
    }
}
