use serde::Serialize;

/// A lesson script, resolved and immutable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Script {
    pub title: String,

    /// Requested length of the final video (seconds)
    pub total_duration: f64,

    pub body: ScriptBody,
}

impl Script {
    /// `true` for the introduction / sections / conclusion form
    pub fn is_structured(&self) -> bool {
        matches!(self.body, ScriptBody::Structured(_))
    }

    /// Title as shown on screen: underscores become spaces, double spaces collapse
    pub fn display_title(&self) -> String {
        self.title.replace('_', " ").replace("  ", " ")
    }

    /// Number of visual elements (structured) or steps (legacy)
    pub fn element_count(&self) -> usize {
        match &self.body {
            ScriptBody::Structured(s) => s.sections.iter().map(|sec| sec.visual_sequence.len()).sum(),
            ScriptBody::Legacy(l) => l.steps.len(),
        }
    }

    /// Sum of the declared durations of every node after the title
    pub fn declared_content_duration(&self) -> f64 {
        match &self.body {
            ScriptBody::Structured(s) => {
                s.introduction.as_ref().map_or(0.0, |n| n.duration)
                    + s.sections.iter().map(|sec| sec.duration).sum::<f64>()
                    + s.conclusion.as_ref().map_or(0.0, |n| n.duration)
            }
            ScriptBody::Legacy(l) => l.steps.iter().map(|step| step.duration).sum(),
        }
    }
}

/// The two accepted script shapes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum ScriptBody {
    Structured(StructuredScript),
    Legacy(LegacyScript),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructuredScript {
    pub introduction: Option<Narration>,
    pub sections: Vec<Section>,
    pub conclusion: Option<Narration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LegacyScript {
    pub steps: Vec<LegacyStep>,
}

/// Introduction or conclusion: a single block of text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Narration {
    pub text: String,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    pub duration: f64,
    pub visual_sequence: Vec<VisualElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualElement {
    pub kind: ElementKind,
    pub content: String,
    /// `(start, end)` in seconds, relative to the section
    pub timing: (f64, f64),
}

impl VisualElement {
    pub fn new(kind: ElementKind, content: impl Into<String>, timing: (f64, f64)) -> Self {
        Self {
            kind,
            content: content.into(),
            timing,
        }
    }

    /// Display time: the timing window, capped at `cap`, never negative
    pub fn display_budget(&self, cap: f64) -> f64 {
        let (start, end) = self.timing;
        (end - start).min(cap).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegacyStep {
    pub text: String,
    pub math: String,
    pub duration: f64,
}

/// Visual element type tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum ElementKind {
    TextDisplay,
    MathEquation,
    GraphPlot,
    StepByStep,
    HighlightParts,
    RealWorldExample,
    /// Any other tag, kept verbatim
    Unknown(String),
}

impl ElementKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text_display" => ElementKind::TextDisplay,
            "math_equation" => ElementKind::MathEquation,
            "graph_plot" => ElementKind::GraphPlot,
            "step_by_step" => ElementKind::StepByStep,
            "highlight_parts" => ElementKind::HighlightParts,
            "real_world_example" => ElementKind::RealWorldExample,
            other => ElementKind::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ElementKind::TextDisplay => "text_display",
            ElementKind::MathEquation => "math_equation",
            ElementKind::GraphPlot => "graph_plot",
            ElementKind::StepByStep => "step_by_step",
            ElementKind::HighlightParts => "highlight_parts",
            ElementKind::RealWorldExample => "real_world_example",
            ElementKind::Unknown(tag) => tag,
        }
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
