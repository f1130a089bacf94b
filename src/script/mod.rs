//! # Lesson Scripts
//!
//! A script arrives as JSON in one of two shapes:
//!
//! - **structured**: `introduction`, `sections[].visualSequence[]`, `conclusion`
//! - **legacy**: a flat `steps[]` list of text/math pairs
//!
//! The shape is decided once, when the script is parsed, and is carried as
//! [`ScriptBody`]. Missing fields are filled from [`ScriptDefaults`](crate::config::ScriptDefaults).
//!
//! ## Usage
//!
//! ```rust
//! use mathreel::{config::ScriptDefaults, script::Script};
//!
//! let json = r#"{"title": "T", "duration": 30, "steps": [{"text": "Hi", "duration": 20}]}"#;
//! let script = Script::from_json_str(json, &ScriptDefaults::default()).unwrap();
//! assert!(!script.is_structured());
//! ```

mod parse;
pub mod types;

pub use types::{
    ElementKind, LegacyScript, LegacyStep, Narration, Script, ScriptBody, Section, StructuredScript,
    VisualElement,
};
