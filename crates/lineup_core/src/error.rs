use thiserror::Error;

#[derive(Error, Debug)]
pub enum LineupError {
    #[error("Unknown formation scheme: {0}")]
    UnknownScheme(String),

    #[error("Invalid player {id}: {source}")]
    InvalidPlayer {
        id: String,
        #[source]
        source: validator::ValidationErrors,
    },

    #[error("Invalid player {id}: confidence interval low {low} exceeds high {high}")]
    InvertedInterval { id: String, low: f32, high: f32 },

    #[error("Invalid JSON request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("Unsupported schema version: {found} (expected {expected})")]
    UnsupportedSchemaVersion { found: u8, expected: u8 },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LineupError {
    /// Errors caused by the caller's payload rather than by the environment.
    pub fn is_input_error(&self) -> bool {
        match self {
            LineupError::UnknownScheme(_)
            | LineupError::InvalidPlayer { .. }
            | LineupError::InvertedInterval { .. }
            | LineupError::InvalidRequest(_)
            | LineupError::UnsupportedSchemaVersion { .. } => true,
            LineupError::Config(_) | LineupError::ConfigParse(_) | LineupError::Io(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, LineupError>;
