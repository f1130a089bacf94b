//! # Render Capability
//!
//! The scheduler never draws anything itself. It talks to a backend through
//! the [`Renderer`] and [`Plotter`] traits: create an object, then play timed
//! animations on it. [`PlanRecorder`] is the built-in backend; it records the
//! timed operations so they can be written out as a display plan and handed
//! to an animation engine.
//!
//! ## Usage
//!
//! ```rust
//! use mathreel::render::{Animation, Color, PlanRecorder, Renderer, TextStyle};
//!
//! let mut recorder = PlanRecorder::new();
//! let id = recorder.text("Hello", &TextStyle::new(36.0, Color::White)).unwrap();
//! recorder.play(&[Animation::reveal(id)], 1.5);
//! recorder.wait(2.0);
//! assert_eq!(recorder.clock(), 3.5);
//! ```

pub mod recorder;
pub mod traits;
pub mod types;

pub use recorder::{DisplayObject, ObjectKind, Op, PlanRecorder, RecordedTimeline, TimedOp};
pub use traits::{Plotter, RenderResult, Renderer, SceneBackend};
pub use types::{
    Animation, AxesSpec, Color, ObjectId, Placement, PlotFunction, Target, TextStyle, Weight,
    PLOT_X_RANGE,
};
