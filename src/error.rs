use thiserror::Error;

/// Main error type for the mathreel library
#[derive(Error, Debug)]
pub enum MathreelError {
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Mux error: {0}")]
    Mux(#[from] MuxError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Script loading errors
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Failed to read script file: {path}")]
    ReadFailed { path: String },

    #[error("Failed to parse script: {reason}")]
    ParseFailed { reason: String },
}

/// Content rendering errors raised by a backend.
///
/// These never escape the dispatcher; they are turned into fallback
/// placeholders of the same duration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Malformed math markup '{content}': {reason}")]
    MalformedMarkup { content: String, reason: String },

    #[error("Unknown object id: {id}")]
    UnknownObject { id: u32 },

    #[error("Plot failed: {reason}")]
    PlotFailed { reason: String },

    #[error("Backend failure: {reason}")]
    Backend { reason: String },
}

/// Audio/video muxing errors
#[derive(Error, Debug)]
pub enum MuxError {
    #[error("ffmpeg not found: {binary}")]
    FfmpegMissing { binary: String },

    #[error("Input file not found: {path}")]
    InputMissing { path: String },

    #[error("Muxing failed: {reason}")]
    Failed { reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using MathreelError
pub type Result<T> = std::result::Result<T, MathreelError>;

impl MathreelError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Script(ScriptError::ReadFailed { .. }) => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Script(ScriptError::ReadFailed { path }) => {
                format!("Could not read script '{}'. Please check the file exists.", path)
            }
            Self::Script(ScriptError::ParseFailed { reason }) => {
                format!("The script is not valid JSON for a lesson: {}", reason)
            }
            Self::Mux(MuxError::FfmpegMissing { binary }) => {
                format!("'{}' was not found on PATH. Please install FFmpeg.", binary)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
