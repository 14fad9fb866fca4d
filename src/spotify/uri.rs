use crate::{Result, SpotifyError};

const TRACK_URI_PREFIX: &str = "spotify:track:";
const TRACK_URL_PREFIX: &str = "https://open.spotify.com/track/";
const TRACK_ID_LEN: usize = 22;

/// Turns a track reference into a canonical `spotify:track:ID` URI.
///
/// Accepted forms:
/// - `spotify:track:ID` (returned unchanged)
/// - `https://open.spotify.com/track/ID`, optionally followed by `?query`
/// - a bare 22 character alphanumeric `ID`
///
/// # Errors
///
/// [`SpotifyError::InvalidUri`] for anything else.
///
/// # Example
///
/// ```
/// let uri = normalize_track_uri("https://open.spotify.com/track/4iV5W9uYEdYUVa79Axb7Rh?si=abc")?;
/// assert_eq!(uri, "spotify:track:4iV5W9uYEdYUVa79Axb7Rh");
/// ```
pub fn normalize_track_uri(track: &str) -> Result<String> {
    if track.starts_with(TRACK_URI_PREFIX) {
        return Ok(track.to_string());
    }

    if let Some(rest) = track.strip_prefix(TRACK_URL_PREFIX) {
        let id = rest.split('?').next().unwrap_or_default();
        if !id.is_empty() {
            return Ok(format!("{}{}", TRACK_URI_PREFIX, id));
        }
    }

    if is_track_id(track) {
        return Ok(format!("{}{}", TRACK_URI_PREFIX, track));
    }

    Err(SpotifyError::InvalidUri("Invalid track URI format".to_string()))
}

fn is_track_id(candidate: &str) -> bool {
    candidate.len() == TRACK_ID_LEN && candidate.chars().all(|c| c.is_ascii_alphanumeric())
}
