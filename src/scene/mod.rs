//! # Scene Scheduling
//!
//! Turns a resolved [`Script`](crate::script::Script) into timed operations
//! on a [`SceneBackend`](crate::render::SceneBackend).
//!
//! - [`SectionScheduler`] walks the node sequence and keeps the nominal timeline
//! - [`VisualElementDispatcher`] routes each element to an [`ElementStrategy`]
//! - [`ClutterManager`] fades out whatever is on screen between elements
//! - [`FallbackPolicy`] replaces a failed element with a text placeholder of
//!   the same length
//!
//! ## Usage
//!
//! ```rust
//! use mathreel::{config::Config, render::PlanRecorder, scene::SectionScheduler, script::Script};
//!
//! let config = Config::default();
//! let json = r#"{"title": "T", "duration": 30, "steps": [{"text": "Hi", "duration": 20}]}"#;
//! let script = Script::from_json_str(json, &config.defaults).unwrap();
//!
//! let mut recorder = PlanRecorder::new();
//! let report = SectionScheduler::new(&config).run(&script, &mut recorder);
//! assert_eq!(report.final_pad, 6.0);
//! ```

pub mod clutter;
pub mod dispatcher;
pub mod fallback;
pub mod scheduler;
pub mod state;
pub mod strategies;
pub mod strategy;

pub use clutter::ClutterManager;
pub use dispatcher::{DispatchOutcome, VisualElementDispatcher};
pub use fallback::{FallbackLabel, FallbackPolicy};
pub use scheduler::{node_sequence, Node, ScheduleReport, SectionScheduler};
pub use state::SceneState;
pub use strategy::{ElementStrategy, StrategyContext};
