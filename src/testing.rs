//! Test backends shared by the scene tests

use crate::error::RenderError;
use crate::render::{
    Animation, AxesSpec, ObjectId, PlanRecorder, Plotter, PlotFunction, RenderResult, Renderer,
    TextStyle,
};

/// A [`PlanRecorder`] that rejects selected kinds of construction
#[derive(Debug, Default)]
pub struct FailingBackend {
    pub inner: PlanRecorder,
    fail_text: bool,
    fail_math: bool,
    fail_plot: bool,
}

impl FailingBackend {
    pub fn failing_text() -> Self {
        Self {
            inner: PlanRecorder::new(),
            fail_text: true,
            ..Self::default()
        }
    }

    pub fn failing_math() -> Self {
        Self {
            inner: PlanRecorder::new(),
            fail_math: true,
            ..Self::default()
        }
    }

    pub fn failing_plot() -> Self {
        Self {
            inner: PlanRecorder::new(),
            fail_plot: true,
            ..Self::default()
        }
    }

    fn rejected(what: &str) -> RenderError {
        RenderError::Backend {
            reason: format!("{} disabled", what),
        }
    }
}

impl Renderer for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    fn text(&mut self, content: &str, style: &TextStyle) -> RenderResult<ObjectId> {
        if self.fail_text {
            return Err(Self::rejected("text"));
        }
        self.inner.text(content, style)
    }

    fn math(&mut self, latex: &str, style: &TextStyle) -> RenderResult<ObjectId> {
        if self.fail_math {
            return Err(Self::rejected("math"));
        }
        self.inner.math(latex, style)
    }

    fn part_count(&self, id: ObjectId) -> usize {
        self.inner.part_count(id)
    }

    fn play(&mut self, animations: &[Animation], run_time: f64) {
        self.inner.play(animations, run_time)
    }

    fn wait(&mut self, seconds: f64) {
        self.inner.wait(seconds)
    }
}

impl Plotter for FailingBackend {
    fn axes(&mut self, spec: &AxesSpec) -> RenderResult<ObjectId> {
        if self.fail_plot {
            return Err(Self::rejected("axes"));
        }
        self.inner.axes(spec)
    }

    fn axis_labels(&mut self, axes: ObjectId, x_label: &str, y_label: &str) -> RenderResult<ObjectId> {
        self.inner.axis_labels(axes, x_label, y_label)
    }

    fn plot(
        &mut self,
        axes: ObjectId,
        function: PlotFunction,
        x_range: (f64, f64),
    ) -> RenderResult<ObjectId> {
        if self.fail_plot {
            return Err(Self::rejected("plot"));
        }
        self.inner.plot(axes, function, x_range)
    }
}
