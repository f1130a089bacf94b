//! # mathreel
//!
//! Turn JSON lesson scripts into precisely timed display plans for math
//! explainer videos.
//!
//! A script (title, introduction, sections of visual elements, conclusion)
//! is scheduled onto an animation backend: every element gets a duration
//! budget, the budget is split into reveal / hold / highlight phases, the
//! screen is cleared between elements, and an element that cannot be
//! rendered is replaced by a text placeholder of the same length.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mathreel::{composition::CompositionEngine, config::Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let engine = CompositionEngine::new(Config::default());
//! let plan = engine.compose("lesson.json", "plan.json").await?;
//! println!("{} ops over {:.1}s", plan.ops.len(), plan.scheduled_duration);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`script`] - Script parsing and the two accepted script forms
//! - [`latex`] - Math markup cleanup and validation
//! - [`timing`] - Per-element budgets and the nominal timeline
//! - [`render`] - Backend capability traits and the recording backend
//! - [`scene`] - Scheduler, element strategies, clutter and fallback handling
//! - [`composition`] - End-to-end engine
//! - [`mux`] - Narration audio muxing through ffmpeg
//! - [`config`] - Configuration management
//!
//! ## Custom Element Strategies
//!
//! New visual element types are added by implementing
//! [`ElementStrategy`](scene::ElementStrategy) and registering it:
//!
//! ```rust,no_run
//! use mathreel::render::{Animation, RenderResult};
//! use mathreel::scene::{ElementStrategy, StrategyContext, VisualElementDispatcher};
//!
//! struct Callout;
//!
//! impl ElementStrategy for Callout {
//!     fn name(&self) -> &str {
//!         "callout"
//!     }
//!
//!     fn description(&self) -> &str {
//!         "Large text, revealed quickly"
//!     }
//!
//!     fn render(&self, ctx: &mut StrategyContext<'_>, content: &str, budget: f64) -> RenderResult<()> {
//!         let style = &ctx.presentation().title;
//!         let id = ctx.backend().text(content, style)?;
//!         ctx.show(id);
//!         ctx.play(&[Animation::reveal(id)], 0.5);
//!         ctx.wait(budget - 0.5);
//!         Ok(())
//!     }
//! }
//!
//! let mut dispatcher = VisualElementDispatcher::new();
//! dispatcher.register(Box::new(Callout));
//! ```

pub mod composition;
pub mod config;
pub mod error;
pub mod latex;
pub mod mux;
pub mod render;
pub mod scene;
pub mod script;
pub mod timing;

#[cfg(test)]
mod testing;

// Re-export commonly used types for convenience
pub use crate::{
    composition::{CompositionEngine, DisplayPlan},
    config::Config,
    error::{MathreelError, Result},
    scene::{ElementStrategy, SectionScheduler},
    script::Script,
};
