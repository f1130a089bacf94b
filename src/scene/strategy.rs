use crate::config::PresentationConfig;
use crate::render::{Animation, ObjectId, RenderResult, SceneBackend};
use crate::scene::clutter::ClutterManager;
use crate::scene::fallback::FallbackLabel;

/// A way of putting one kind of visual element on screen
pub trait ElementStrategy: Send + Sync {
    /// The type tag this strategy handles
    fn name(&self) -> &str;

    /// Returns a human-readable description of this strategy
    fn description(&self) -> &str;

    /// Render `content` within `budget` seconds.
    ///
    /// Create every object before the first animation where possible: an
    /// error after animations were emitted leaves only the unspent budget for
    /// the fallback placeholder.
    fn render(&self, ctx: &mut StrategyContext<'_>, content: &str, budget: f64) -> RenderResult<()>;

    /// Placeholder used when [`render`](Self::render) fails
    fn fallback_label(&self, content: &str) -> FallbackLabel {
        FallbackLabel::for_kind(self.name(), content)
    }
}

/// Everything a strategy may touch while rendering, plus a running count of
/// the seconds it has emitted.
pub struct StrategyContext<'a> {
    backend: &'a mut dyn SceneBackend,
    clutter: &'a mut ClutterManager,
    presentation: &'a PresentationConfig,
    spent: f64,
}

impl<'a> StrategyContext<'a> {
    pub fn new(
        backend: &'a mut dyn SceneBackend,
        clutter: &'a mut ClutterManager,
        presentation: &'a PresentationConfig,
    ) -> Self {
        Self {
            backend,
            clutter,
            presentation,
            spent: 0.0,
        }
    }

    /// Object construction goes straight to the backend
    pub fn backend(&mut self) -> &mut dyn SceneBackend {
        &mut *self.backend
    }

    pub fn presentation(&self) -> &'a PresentationConfig {
        self.presentation
    }

    /// Mark an object as on screen so the next clear removes it
    pub fn show(&mut self, id: ObjectId) {
        self.clutter.track(id);
    }

    pub fn play(&mut self, animations: &[Animation], run_time: f64) {
        let run_time = run_time.max(0.0);
        self.backend.play(animations, run_time);
        self.spent += run_time;
    }

    pub fn wait(&mut self, seconds: f64) {
        if seconds > 0.0 {
            self.backend.wait(seconds);
            self.spent += seconds;
        }
    }

    /// Clear the active display set
    pub fn clear(&mut self) {
        self.spent += self.clutter.clear(&mut *self.backend);
    }

    /// Seconds emitted through this context so far
    pub fn spent(&self) -> f64 {
        self.spent
    }

    pub fn active_count(&self) -> usize {
        self.clutter.len()
    }
}
