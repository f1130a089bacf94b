use crate::scene::clutter::ClutterManager;
use crate::timing::TimelineAccumulator;

/// Mutable state of one render. Each scheduler run starts from a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    pub clutter: ClutterManager,
    pub timeline: TimelineAccumulator,
}

impl SceneState {
    pub fn new(clear_fade: f64) -> Self {
        Self {
            clutter: ClutterManager::new(clear_fade),
            timeline: TimelineAccumulator::new(),
        }
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            clutter: ClutterManager::default(),
            timeline: TimelineAccumulator::new(),
        }
    }
}
