use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tunedrop_config::ApiCredentials;
use tunedrop_core::{TuneError, TuneResult};

use super::ConversionApi;

const DOWNLOAD_PATH: &str = "/dl";
const HOST_HEADER: &str = "x-rapidapi-host";
const KEY_HEADER: &str = "x-rapidapi-key";

#[derive(Debug, Clone)]
pub struct RapidApiClient {
    client: Client,
    base_url: Option<String>,
}

impl RapidApiClient {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: None,
        }
    }

    /// Sends requests to `base_url` instead of `https://<host>`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    fn endpoint(&self, credentials: &ApiCredentials) -> String {
        match &self.base_url {
            Some(base) => format!("{base}{DOWNLOAD_PATH}"),
            None => format!("https://{}{DOWNLOAD_PATH}", credentials.host),
        }
    }
}

#[async_trait]
impl ConversionApi for RapidApiClient {
    async fn fetch_conversion(
        &self,
        video_id: &str,
        credentials: &ApiCredentials,
    ) -> TuneResult<ConversionResponse> {
        let response = self
            .client
            .get(self.endpoint(credentials))
            .query(&[("id", video_id)])
            .header(HOST_HEADER, credentials.host.as_str())
            .header(KEY_HEADER, credentials.key.as_str())
            .send()
            .await
            .map_err(|err| TuneError::Network(format!("conversion request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TuneError::Api {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| TuneError::Network(format!("conversion response read failed: {err}")))?;
        debug!(
            "conversion api response: {}",
            String::from_utf8_lossy(&body).chars().take(200).collect::<String>()
        );

        serde_json::from_slice::<ConversionResponse>(&body)
            .map_err(|err| TuneError::Parse(format!("conversion response parse failed: {err}")))
    }
}

/// Fields of the upstream body that decide the outcome. Everything else the
/// service sends is ignored, and scalars of any JSON type are read as text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConversionResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub msg: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}
