use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ScriptDefaults;
use crate::error::{Result, ScriptError};
use crate::script::types::{
    ElementKind, LegacyScript, LegacyStep, Narration, Script, ScriptBody, Section, StructuredScript,
    VisualElement,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScript {
    title: Option<String>,
    total_duration: Option<f64>,
    duration: Option<f64>,
    introduction: Option<RawNarration>,
    sections: Option<Vec<RawSection>>,
    conclusion: Option<RawNarration>,
    steps: Option<Vec<RawStep>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawNarration {
    text: Option<String>,
    duration: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSection {
    title: Option<String>,
    duration: Option<f64>,
    visual_sequence: Option<Vec<RawVisual>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawVisual {
    #[serde(rename = "type")]
    kind: Option<String>,
    content: Option<String>,
    timing: Option<(f64, f64)>,
}

#[derive(Debug, Default, Deserialize)]
struct RawStep {
    text: Option<String>,
    math: Option<String>,
    duration: Option<f64>,
}

impl Script {
    /// Parse a script from JSON text
    pub fn from_json_str(json: &str, defaults: &ScriptDefaults) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| ScriptError::ParseFailed { reason: e.to_string() })?;
        Self::from_value(value, defaults)
    }

    /// Read and parse a script file
    pub fn from_file<P: AsRef<Path>>(path: P, defaults: &ScriptDefaults) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|_| ScriptError::ReadFailed { path: path.display().to_string() })?;
        Self::from_json_str(&json, defaults)
    }

    /// Resolve a parsed JSON document.
    ///
    /// The structured form is chosen whenever a `sections` key exists, even
    /// if legacy `steps` are present too.
    pub fn from_value(value: Value, defaults: &ScriptDefaults) -> Result<Self> {
        if !value.is_object() {
            return Err(ScriptError::ParseFailed {
                reason: "script must be a JSON object".to_string(),
            }
            .into());
        }
        let structured = value.get("sections").is_some();
        let narration = NarrationKeys {
            introduction: is_present(&value, "introduction"),
            conclusion: is_present(&value, "conclusion"),
        };

        let raw: RawScript = serde_json::from_value(value)
            .map_err(|e| ScriptError::ParseFailed { reason: e.to_string() })?;

        let title = raw.title.clone().unwrap_or_else(|| defaults.title.clone());

        let script = if structured {
            if raw.steps.is_some() {
                debug!("Script has both 'sections' and 'steps'; ignoring legacy steps");
            }
            Script {
                title,
                total_duration: raw
                    .total_duration
                    .or(raw.duration)
                    .unwrap_or(defaults.total_duration),
                body: ScriptBody::Structured(resolve_structured(raw, narration, defaults)),
            }
        } else {
            Script {
                title,
                total_duration: raw.duration.unwrap_or(defaults.total_duration),
                body: ScriptBody::Legacy(resolve_legacy(raw, defaults)),
            }
        };

        Ok(script)
    }
}

/// Which narration keys hold something other than `null` or `{}`
struct NarrationKeys {
    introduction: bool,
    conclusion: bool,
}

fn is_present(value: &Value, key: &str) -> bool {
    match value.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Object(map)) => !map.is_empty(),
        Some(_) => true,
    }
}

fn resolve_structured(raw: RawScript, present: NarrationKeys, defaults: &ScriptDefaults) -> StructuredScript {
    let sections = raw
        .sections
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, section)| resolve_section(index, section, defaults))
        .collect();

    StructuredScript {
        introduction: resolve_narration(raw.introduction, present.introduction, defaults.introduction_duration),
        sections,
        conclusion: resolve_narration(raw.conclusion, present.conclusion, defaults.conclusion_duration),
    }
}

/// An empty object counts as absent; any other object is a narration,
/// even if it has neither `text` nor `duration`
fn resolve_narration(raw: Option<RawNarration>, present: bool, default_duration: f64) -> Option<Narration> {
    let raw = raw.filter(|_| present)?;
    Some(Narration {
        text: raw.text.unwrap_or_default(),
        duration: raw.duration.unwrap_or(default_duration),
    })
}

fn resolve_section(index: usize, raw: RawSection, defaults: &ScriptDefaults) -> Section {
    let title = raw.title.unwrap_or_else(|| format!("Section {}", index + 1));
    let visual_sequence = raw
        .visual_sequence
        .unwrap_or_default()
        .into_iter()
        .map(|visual| {
            let timing = visual.timing.unwrap_or(defaults.element_timing);
            if timing.1 < timing.0 {
                warn!(
                    "Element in '{}' ends before it starts ({:?}); it gets no display time",
                    title, timing
                );
            }
            VisualElement {
                kind: ElementKind::from_tag(visual.kind.as_deref().unwrap_or_default()),
                content: visual.content.unwrap_or_default(),
                timing,
            }
        })
        .collect();

    Section {
        duration: raw.duration.unwrap_or(defaults.section_duration),
        title,
        visual_sequence,
    }
}

fn resolve_legacy(raw: RawScript, defaults: &ScriptDefaults) -> LegacyScript {
    let steps = raw
        .steps
        .unwrap_or_default()
        .into_iter()
        .map(|step| LegacyStep {
            text: step.text.unwrap_or_default(),
            math: step.math.unwrap_or_default(),
            duration: step.duration.unwrap_or(defaults.step_duration),
        })
        .collect();

    LegacyScript { steps }
}
