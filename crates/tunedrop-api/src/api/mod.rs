pub mod rapidapi;

use async_trait::async_trait;
use tunedrop_config::ApiCredentials;
use tunedrop_core::TuneResult;

pub use rapidapi::{ConversionResponse, RapidApiClient};

/// Upstream service that turns a video id into a downloadable audio link.
#[async_trait]
pub trait ConversionApi: Send + Sync {
    async fn fetch_conversion(
        &self,
        video_id: &str,
        credentials: &ApiCredentials,
    ) -> TuneResult<ConversionResponse>;
}
