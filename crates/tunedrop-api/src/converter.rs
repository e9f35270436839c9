use std::sync::Arc;

use log::{error, info, warn};
use tunedrop_config::ApiCredentials;
use tunedrop_core::{
    ConversionResult, FALLBACK_CONVERSION_MESSAGE, TuneError, TuneResult, extract_video_id,
};

use crate::api::{ConversionApi, ConversionResponse};

const STATUS_OK: &str = "ok";

/// Turns one submitted video reference into a [`ConversionResult`].
#[derive(Clone)]
pub struct Mp3Converter {
    api: Arc<dyn ConversionApi>,
}

impl Mp3Converter {
    pub fn new(api: Arc<dyn ConversionApi>) -> Self {
        Self { api }
    }

    /// Runs a single conversion. Every failure is folded into the returned
    /// result; the upstream is contacted at most once and only when the
    /// credentials and reference are usable.
    pub async fn convert(
        &self,
        reference: Option<&str>,
        credentials: Option<&ApiCredentials>,
    ) -> ConversionResult {
        match self.try_convert(reference, credentials).await {
            Ok(result) => result,
            Err(err) => {
                if err.is_input_error() {
                    warn!("rejected video reference {reference:?}: {err}");
                } else {
                    error!("conversion failed: {err}");
                }
                ConversionResult::from(err)
            }
        }
    }

    async fn try_convert(
        &self,
        reference: Option<&str>,
        credentials: Option<&ApiCredentials>,
    ) -> TuneResult<ConversionResult> {
        let credentials = credentials
            .filter(|credentials| credentials.is_complete())
            .ok_or_else(|| TuneError::Config("api key or host is not set".to_string()))?;
        let reference = reference
            .filter(|reference| !reference.is_empty())
            .ok_or(TuneError::EmptyInput)?;

        let video_id = extract_video_id(reference)?;
        info!("requesting conversion for video id {video_id}");

        let response = self.api.fetch_conversion(&video_id, credentials).await?;
        interpret_response(response)
    }
}

fn interpret_response(response: ConversionResponse) -> TuneResult<ConversionResult> {
    let ConversionResponse {
        status,
        link,
        title,
        msg,
        ..
    } = response;

    match link {
        Some(link) if status.as_deref() == Some(STATUS_OK) && !link.is_empty() => {
            Ok(ConversionResult::success(title, link))
        }
        _ => Err(TuneError::Upstream(
            msg.filter(|msg| !msg.is_empty())
                .unwrap_or_else(|| FALLBACK_CONVERSION_MESSAGE.to_string()),
        )),
    }
}
