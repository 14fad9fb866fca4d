use reqwest::StatusCode;

use crate::{
    Result, SpotifyError,
    spotify::{SpotifyClient, normalize_track_uri},
    types::{Acknowledgement, Credential, PlaybackState, StartPlaybackRequest},
    warning,
};

impl SpotifyClient {
    /// Retrieves the track currently playing on the user's account.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when nothing is playing: the API answers `204 No Content`,
    /// an empty body, or a state without an `item` (e.g. during an ad).
    pub async fn currently_playing(&self, token: &Credential) -> Result<Option<PlaybackState>> {
        const OPERATION: &str = "get currently playing track";

        let response = self
            .send(self.get(token, "me/player/currently-playing"), OPERATION)
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SpotifyError::transport(OPERATION, e))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let state: PlaybackState =
            serde_json::from_slice(&body).map_err(|e| SpotifyError::Upstream {
                status: None,
                message: format!("Failed to {}: {}", OPERATION, e),
            })?;

        Ok(state.item.is_some().then_some(state))
    }

    /// Pauses playback on the user's active device.
    ///
    /// # Errors
    ///
    /// [`SpotifyError::NoActiveDevice`] when the account has no device to
    /// pause, besides the usual classification.
    pub async fn pause_playback(&self, token: &Credential) -> Result<Acknowledgement> {
        self.send(self.put(token, "me/player/pause"), "pause playback")
            .await
            .map_err(SpotifyError::into_playback)?;

        Ok(Acknowledgement {
            success: true,
            message: "Playback paused".to_string(),
        })
    }

    /// Starts playing a single track on the user's active device.
    ///
    /// `track_uri` may be any form [`normalize_track_uri`] accepts; a
    /// malformed reference fails before any request is made.
    pub async fn start_playback(&self, token: &Credential, track_uri: &str) -> Result<Acknowledgement> {
        let uri = normalize_track_uri(track_uri).inspect_err(|e| warning!("{}", e))?;

        let request = self
            .put(token, "me/player/play")
            .json(&StartPlaybackRequest { uris: vec![uri] });

        self.send(request, "start playback")
            .await
            .map_err(SpotifyError::into_playback)?;

        Ok(Acknowledgement {
            success: true,
            message: "Playback started".to_string(),
        })
    }
}
