mod error;
mod result;
mod video_id;

pub use error::{FALLBACK_CONVERSION_MESSAGE, TuneError, TuneResult};
pub use result::ConversionResult;
pub use video_id::extract_video_id;
