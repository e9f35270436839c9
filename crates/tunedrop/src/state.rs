use std::sync::Arc;

use tunedrop_api::Mp3Converter;
use tunedrop_config::Settings;

pub struct AppState {
    pub converter: Mp3Converter,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(converter: Mp3Converter, settings: Settings) -> Self {
        Self {
            converter,
            settings: Arc::new(settings),
        }
    }
}
