use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    render::{Color, TextStyle, Weight},
};

/// Main configuration for mathreel
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Values used when a script omits a field
    pub defaults: ScriptDefaults,

    /// Fixed scene timings
    pub timing: TimingConfig,

    /// Text styles per node and element kind
    pub presentation: PresentationConfig,

    /// Recording backend behaviour
    pub recorder: RecorderConfig,

    /// Audio muxing settings
    pub mux: MuxConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.defaults.validate()?;
        self.timing.validate()?;
        self.presentation.validate()?;
        self.mux.validate()?;
        Ok(())
    }
}

fn invalid(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Fallback values for fields a script leaves out
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptDefaults {
    /// Title shown when the script has none
    pub title: String,

    /// Target video length (seconds)
    pub total_duration: f64,

    /// Introduction length (seconds)
    pub introduction_duration: f64,

    /// Section length (seconds)
    pub section_duration: f64,

    /// Conclusion length (seconds)
    pub conclusion_duration: f64,

    /// Legacy step length (seconds)
    pub step_duration: f64,

    /// Element timing window `(start, end)` in seconds
    pub element_timing: (f64, f64),
}

impl Default for ScriptDefaults {
    fn default() -> Self {
        Self {
            title: "MathVideo".to_string(),
            total_duration: 300.0,
            introduction_duration: 30.0,
            section_duration: 45.0,
            conclusion_duration: 20.0,
            step_duration: 20.0,
            element_timing: (0.0, 10.0),
        }
    }
}

impl ScriptDefaults {
    fn validate(&self) -> Result<()> {
        let durations = [
            ("defaults.total_duration", self.total_duration),
            ("defaults.introduction_duration", self.introduction_duration),
            ("defaults.section_duration", self.section_duration),
            ("defaults.conclusion_duration", self.conclusion_duration),
            ("defaults.step_duration", self.step_duration),
        ];
        for (key, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(key, value).into());
            }
        }

        let (start, end) = self.element_timing;
        if end < start {
            return Err(invalid("defaults.element_timing", format!("[{}, {}]", start, end)).into());
        }

        Ok(())
    }
}

/// Fixed timings that are not part of the per-element allocation rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Fade used when clearing the active display set (seconds)
    pub clear_fade: f64,

    /// Upper bound on a single element's display budget (seconds)
    pub element_cap: f64,

    /// Title write-in time (seconds)
    pub title_reveal: f64,

    /// Title hold time (seconds)
    pub title_hold: f64,

    /// Title fade-out time (seconds)
    pub title_fade: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            clear_fade: 0.5,
            element_cap: 15.0,
            title_reveal: 2.0,
            title_hold: 1.0,
            title_fade: 1.0,
        }
    }
}

impl TimingConfig {
    /// Time the title card occupies on the timeline
    pub fn title_duration(&self) -> f64 {
        self.title_reveal + self.title_hold + self.title_fade
    }

    fn validate(&self) -> Result<()> {
        if !(self.element_cap > 0.0) {
            return Err(invalid("timing.element_cap", self.element_cap).into());
        }

        let phases = [
            ("timing.clear_fade", self.clear_fade),
            ("timing.title_reveal", self.title_reveal),
            ("timing.title_hold", self.title_hold),
            ("timing.title_fade", self.title_fade),
        ];
        for (key, value) in phases {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(key, value).into());
            }
        }

        Ok(())
    }
}

/// Text styles for every kind of on-screen text
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub title: TextStyle,
    pub introduction: TextStyle,
    pub conclusion: TextStyle,
    pub text_display: TextStyle,
    pub math_equation: TextStyle,
    pub math_emphasis: Color,
    pub highlight_parts: TextStyle,
    pub highlight_emphasis: Color,
    pub step: TextStyle,
    pub example_label: TextStyle,
    pub example_body: TextStyle,
    pub legacy_text: TextStyle,
    pub legacy_math: TextStyle,
    pub legacy_fallback: TextStyle,
    pub fallback: TextStyle,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            title: TextStyle::new(44.0, Color::Blue).weight(Weight::Bold),
            introduction: TextStyle::new(36.0, Color::White),
            conclusion: TextStyle::new(32.0, Color::Blue).weight(Weight::Bold),
            text_display: TextStyle::new(36.0, Color::White),
            math_equation: TextStyle::new(48.0, Color::White),
            math_emphasis: Color::Blue,
            highlight_parts: TextStyle::new(44.0, Color::White),
            highlight_emphasis: Color::Yellow,
            step: TextStyle::new(28.0, Color::White),
            example_label: TextStyle::new(32.0, Color::Green)
                .weight(Weight::Bold)
                .at_top(1.5),
            example_body: TextStyle::new(28.0, Color::White),
            legacy_text: TextStyle::new(32.0, Color::White).at_top(1.0),
            legacy_math: TextStyle::new(44.0, Color::White),
            legacy_fallback: TextStyle::new(28.0, Color::Blue),
            fallback: TextStyle::new(32.0, Color::Blue),
        }
    }
}

impl PresentationConfig {
    fn validate(&self) -> Result<()> {
        let styles = [
            ("presentation.title", &self.title),
            ("presentation.introduction", &self.introduction),
            ("presentation.conclusion", &self.conclusion),
            ("presentation.text_display", &self.text_display),
            ("presentation.math_equation", &self.math_equation),
            ("presentation.highlight_parts", &self.highlight_parts),
            ("presentation.step", &self.step),
            ("presentation.example_label", &self.example_label),
            ("presentation.example_body", &self.example_body),
            ("presentation.legacy_text", &self.legacy_text),
            ("presentation.legacy_math", &self.legacy_math),
            ("presentation.legacy_fallback", &self.legacy_fallback),
            ("presentation.fallback", &self.fallback),
        ];
        for (key, style) in styles {
            if !(style.font_size > 0.0) {
                return Err(invalid(&format!("{}.font_size", key), style.font_size).into());
            }
        }
        Ok(())
    }
}

/// Settings for the in-process recording backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Reject math markup that fails structural validation
    pub reject_malformed_math: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            reject_malformed_math: true,
        }
    }
}

/// External ffmpeg settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MuxConfig {
    /// ffmpeg executable name or path
    pub ffmpeg: String,

    /// Audio codec for the muxed output
    pub audio_codec: String,
}

impl Default for MuxConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            audio_codec: "aac".to_string(),
        }
    }
}

impl MuxConfig {
    fn validate(&self) -> Result<()> {
        if self.ffmpeg.trim().is_empty() {
            return Err(invalid("mux.ffmpeg", &self.ffmpeg).into());
        }
        if self.audio_codec.trim().is_empty() {
            return Err(invalid("mux.audio_codec", &self.audio_codec).into());
        }
        Ok(())
    }
}
