use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Transport error: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    #[error("Unexpected response status {status}: {body}")]
    Response { status: u16, body: String },

    #[error("Malformed payload: {0}")]
    Parse(String),

    #[error("Insufficient history: need {required} observations, have {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ScanError {
    fn from(err: serde_json::Error) -> Self {
        ScanError::Parse(err.to_string())
    }
}

impl ScanError {
    /// Short stable label used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::Transport { .. } => "transport",
            ScanError::Response { .. } => "response",
            ScanError::Parse(_) => "parse",
            ScanError::InsufficientHistory { .. } => "insufficient_history",
            ScanError::Config(_) => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
