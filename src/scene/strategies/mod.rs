//! # Built-in Element Strategies
//!
//! One strategy per visual element tag:
//!
//! - **text_display**: centered text (also the default for unknown tags)
//! - **math_equation**: typeset equation with a closing emphasis
//! - **graph_plot**: axes plus a keyword-selected curve
//! - **step_by_step**: `|`-separated steps shown one at a time
//! - **highlight_parts**: equation whose first parts are emphasized in turn
//! - **real_world_example**: heading and example text

mod example;
mod graph;
mod highlight;
mod math;
mod steps;
mod text;

pub use example::{RealWorldExample, EXAMPLE_HEADING};
pub use graph::GraphPlot;
pub use highlight::HighlightParts;
pub use math::MathEquation;
pub use steps::{StepByStep, STEP_SEPARATOR};
pub use text::TextDisplay;

use crate::scene::strategy::ElementStrategy;

/// Every built-in strategy, one per known tag
pub fn builtin() -> Vec<Box<dyn ElementStrategy>> {
    vec![
        Box::new(TextDisplay::new()),
        Box::new(MathEquation::new()),
        Box::new(GraphPlot::new()),
        Box::new(StepByStep::new()),
        Box::new(HighlightParts::new()),
        Box::new(RealWorldExample::new()),
    ]
}
