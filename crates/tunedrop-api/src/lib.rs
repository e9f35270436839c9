pub mod api;
mod converter;

pub use api::{ConversionApi, ConversionResponse, RapidApiClient};
pub use converter::Mp3Converter;
