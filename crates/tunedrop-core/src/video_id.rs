use url::Url;

use crate::{TuneError, TuneResult};

const WATCH_HOST: &str = "youtube.com";
const SHORT_HOST: &str = "youtu.be";

/// Normalizes a video reference into a bare video id.
///
/// Watch URLs yield their first `v` query parameter and short links yield
/// everything in the path after the leading slash. Anything that mentions
/// neither host is taken as an id as-is.
pub fn extract_video_id(reference: &str) -> TuneResult<String> {
    let video_id = if reference.contains(WATCH_HOST) {
        let url = parse_reference(reference)?;
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default()
    } else if reference.contains(SHORT_HOST) {
        let url = parse_reference(reference)?;
        let path = url.path();
        path.strip_prefix('/').unwrap_or(path).to_string()
    } else {
        reference.to_string()
    };

    if video_id.is_empty() {
        return Err(TuneError::MissingVideoId);
    }
    Ok(video_id)
}

fn parse_reference(reference: &str) -> TuneResult<Url> {
    Url::parse(reference).map_err(|err| TuneError::InvalidUrl(format!("{reference}: {err}")))
}
