use serde::{Deserialize, Serialize};

/// Named colours understood by every backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Blue,
    Yellow,
    Green,
    Red,
    Orange,
}

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weight {
    #[default]
    Normal,
    Bold,
}

/// Where an object is placed on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Center,
    /// Pinned to the top edge, `edge_buff` units below it
    Top,
}

/// Style parameters for text and math objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: f32,
    pub color: Color,
    #[serde(default)]
    pub weight: Weight,
    #[serde(default)]
    pub placement: Placement,
    #[serde(default)]
    pub edge_buff: f32,
}

impl TextStyle {
    /// Centered, normal-weight text
    pub fn new(font_size: f32, color: Color) -> Self {
        Self {
            font_size,
            color,
            weight: Weight::Normal,
            placement: Placement::Center,
            edge_buff: 0.0,
        }
    }

    pub fn weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    /// Pin to the top edge with the given buffer
    pub fn at_top(mut self, buff: f32) -> Self {
        self.placement = Placement::Top;
        self.edge_buff = buff;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Handle to an object created by a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

/// What an animation acts on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum Target {
    Whole { id: ObjectId },
    /// A sub-part of a math object, see [`Renderer::part_count`](super::Renderer::part_count)
    Part { id: ObjectId, index: usize },
}

impl Target {
    pub fn id(&self) -> ObjectId {
        match self {
            Target::Whole { id } | Target::Part { id, .. } => *id,
        }
    }
}

impl From<ObjectId> for Target {
    fn from(id: ObjectId) -> Self {
        Target::Whole { id }
    }
}

/// A single animation; several may share one `play` call and run together
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Animation {
    /// Write-in / create
    Reveal { target: Target },
    /// Brief pulse on something already visible
    Emphasize { target: Target, color: Color },
    FadeOut { target: Target },
}

impl Animation {
    pub fn reveal(target: impl Into<Target>) -> Self {
        Animation::Reveal { target: target.into() }
    }

    pub fn emphasize(target: impl Into<Target>, color: Color) -> Self {
        Animation::Emphasize { target: target.into(), color }
    }

    pub fn fade_out(target: impl Into<Target>) -> Self {
        Animation::FadeOut { target: target.into() }
    }

    pub fn target(&self) -> Target {
        match self {
            Animation::Reveal { target }
            | Animation::Emphasize { target, .. }
            | Animation::FadeOut { target } => *target,
        }
    }
}

/// Coordinate system parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxesSpec {
    /// (min, max, step)
    pub x_range: (f64, f64, f64),
    pub y_range: (f64, f64, f64),
    pub x_length: f64,
    pub y_length: f64,
    pub color: Color,
    pub stroke_width: f64,
}

impl Default for AxesSpec {
    fn default() -> Self {
        Self {
            x_range: (-4.0, 4.0, 1.0),
            y_range: (-3.0, 3.0, 1.0),
            x_length: 8.0,
            y_length: 6.0,
            color: Color::Blue,
            stroke_width: 2.0,
        }
    }
}

/// Domain plotted for every curve
pub const PLOT_X_RANGE: (f64, f64) = (-3.0, 3.0);

/// Curve chosen for a graph element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotFunction {
    /// `0.2 x²`
    Quadratic,
    /// `0.5 x`
    Linear,
    Sine,
    Identity,
}

impl PlotFunction {
    /// Pick a function by case-insensitive keyword match, first hit wins
    pub fn from_content(content: &str) -> Self {
        let content = content.to_lowercase();
        if content.contains("quadratic") || content.contains("parabola") {
            PlotFunction::Quadratic
        } else if content.contains("linear") {
            PlotFunction::Linear
        } else if content.contains("sin") {
            PlotFunction::Sine
        } else {
            PlotFunction::Identity
        }
    }

    pub fn eval(&self, x: f64) -> f64 {
        match self {
            PlotFunction::Quadratic => 0.2 * x * x,
            PlotFunction::Linear => 0.5 * x,
            PlotFunction::Sine => x.sin(),
            PlotFunction::Identity => x,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            PlotFunction::Quadratic => Color::Yellow,
            PlotFunction::Linear => Color::Green,
            PlotFunction::Sine => Color::Red,
            PlotFunction::Identity => Color::Orange,
        }
    }
}
