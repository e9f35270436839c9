use thiserror::Error;

pub const FALLBACK_CONVERSION_MESSAGE: &str =
    "Failed to convert video. Please check the ID and try again.";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TuneError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("empty video reference")]
    EmptyInput,
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("no video id in reference")]
    MissingVideoId,
    #[error("network error: {0}")]
    Network(String),
    #[error("api error: status={status}")]
    Api { status: u16 },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("conversion failed upstream: {0}")]
    Upstream(String),
}

impl TuneError {
    /// Message shown to the person who submitted the form.
    pub fn user_message(&self) -> String {
        match self {
            TuneError::Config(_) => {
                "API configuration error. Please contact the administrator.".to_string()
            }
            TuneError::EmptyInput => "Please enter a valid video reference".to_string(),
            TuneError::InvalidUrl(_) => "Invalid URL format".to_string(),
            TuneError::MissingVideoId => "Could not extract video ID".to_string(),
            TuneError::Network(_) | TuneError::Parse(_) => {
                "Error contacting the conversion service. Please try again later.".to_string()
            }
            TuneError::Api { status } => format!("API error: {status}"),
            TuneError::Upstream(msg) => msg.clone(),
        }
    }

    /// True for failures caused by what the user typed rather than by the service.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TuneError::EmptyInput | TuneError::InvalidUrl(_) | TuneError::MissingVideoId
        )
    }
}

pub type TuneResult<T> = Result<T, TuneError>;
