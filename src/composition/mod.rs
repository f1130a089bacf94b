//! # Composition Engine
//!
//! The composition engine loads a lesson script, schedules it onto the
//! recording backend and writes the resulting display plan.

pub mod engine;

// Re-exports for convenience
pub use engine::{CompositionEngine, DisplayPlan};
