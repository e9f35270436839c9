use serde::Serialize;

use crate::TuneError;

/// Outcome of one conversion request, handed to the page renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    song_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    song_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

impl ConversionResult {
    pub fn success(title: Option<String>, link: impl Into<String>) -> Self {
        Self {
            success: true,
            song_title: title,
            song_link: Some(link.into()),
            error_message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            song_title: None,
            song_link: None,
            error_message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn song_title(&self) -> Option<&str> {
        self.song_title.as_deref()
    }

    pub fn song_link(&self) -> Option<&str> {
        self.song_link.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

impl From<TuneError> for ConversionResult {
    fn from(err: TuneError) -> Self {
        Self::failure(err.user_message())
    }
}
