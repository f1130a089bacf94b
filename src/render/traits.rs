use crate::error::RenderError;
use crate::render::types::{Animation, AxesSpec, ObjectId, PlotFunction, TextStyle};

pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Text and math capability of an animation backend
///
/// Construction is the only fallible step: a backend rejects content it cannot
/// lay out (for example malformed math markup) when the object is created.
/// Timed operations never fail and must honour the requested duration.
pub trait Renderer {
    /// Returns the name of this backend
    fn name(&self) -> &str;

    /// Create a plain text object
    fn text(&mut self, content: &str, style: &TextStyle) -> RenderResult<ObjectId>;

    /// Create a typeset math object from already-normalized markup
    fn math(&mut self, latex: &str, style: &TextStyle) -> RenderResult<ObjectId>;

    /// Number of addressable sub-parts of an object (1 for atomic objects)
    fn part_count(&self, id: ObjectId) -> usize;

    /// Run all `animations` together over `run_time` seconds
    fn play(&mut self, animations: &[Animation], run_time: f64);

    /// Hold the current frame for `seconds`
    fn wait(&mut self, seconds: f64);
}

/// Coordinate-plot capability
pub trait Plotter {
    fn axes(&mut self, spec: &AxesSpec) -> RenderResult<ObjectId>;

    fn axis_labels(&mut self, axes: ObjectId, x_label: &str, y_label: &str) -> RenderResult<ObjectId>;

    /// Create a curve of `function` over `x_range` on existing axes
    fn plot(
        &mut self,
        axes: ObjectId,
        function: PlotFunction,
        x_range: (f64, f64),
    ) -> RenderResult<ObjectId>;
}

/// Everything the scheduler needs from a backend
pub trait SceneBackend: Renderer + Plotter {}

impl<T: Renderer + Plotter + ?Sized> SceneBackend for T {}
