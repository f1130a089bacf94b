use tracing::debug;

use crate::render::{Animation, ObjectId, Renderer};

/// Default fade used by [`ClutterManager::clear`] (seconds)
pub const CLEAR_FADE: f64 = 0.5;

/// Owns the set of objects currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct ClutterManager {
    active: Vec<ObjectId>,
    fade: f64,
}

impl Default for ClutterManager {
    fn default() -> Self {
        Self::new(CLEAR_FADE)
    }
}

impl ClutterManager {
    pub fn new(fade: f64) -> Self {
        Self {
            active: Vec::new(),
            fade: fade.max(0.0),
        }
    }

    /// Record that `id` is now visible. Insertion order is kept; duplicates are ignored.
    pub fn track(&mut self, id: ObjectId) {
        if !self.active.contains(&id) {
            self.active.push(id);
        }
    }

    /// Fade out everything on screen in one concurrent animation.
    ///
    /// Returns the seconds consumed: the fade duration, or 0 when nothing was
    /// visible (no animation is emitted in that case).
    pub fn clear<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> f64 {
        if self.active.is_empty() {
            return 0.0;
        }

        let fades: Vec<Animation> = self.active.iter().map(|&id| Animation::fade_out(id)).collect();
        debug!("Clearing {} object(s)", fades.len());
        renderer.play(&fades, self.fade);
        self.active.clear();
        self.fade
    }

    pub fn active(&self) -> &[ObjectId] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn fade(&self) -> f64 {
        self.fade
    }
}
