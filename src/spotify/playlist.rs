use crate::{
    Result,
    spotify::{SpotifyClient, normalize_track_uri},
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        Credential, Playlist,
    },
};

pub const DEFAULT_DESCRIPTION: &str = "Playlist created via API";

impl SpotifyClient {
    /// Creates an empty playlist owned by the current user.
    ///
    /// An empty `description` is left out of the request entirely.
    pub async fn create_playlist(
        &self,
        token: &Credential,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<Playlist> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            public,
        };

        self.send_json(self.post(token, "me/playlists").json(&body), "create playlist")
            .await
    }

    /// Appends tracks to a playlist.
    ///
    /// Each reference is normalized to a `spotify:track:` URI; references that
    /// cannot be normalized are sent unchanged and left for the API to judge.
    pub async fn add_tracks_to_playlist(
        &self,
        token: &Credential,
        playlist_id: &str,
        track_uris: &[String],
    ) -> Result<AddTrackToPlaylistResponse> {
        let uris = track_uris
            .iter()
            .map(|uri| normalize_track_uri(uri).unwrap_or_else(|_| uri.clone()))
            .collect();

        let request = self
            .post(token, &format!("playlists/{}/tracks", playlist_id))
            .json(&AddTrackToPlaylistRequest { uris });

        self.send_json(request, "add tracks to playlist").await
    }

    /// Creates a playlist and fills it with `track_uris`.
    ///
    /// The two calls are not atomic: if adding the tracks fails, the freshly
    /// created playlist stays behind, empty, and the add error is returned.
    pub async fn create_playlist_with_tracks(
        &self,
        token: &Credential,
        name: &str,
        track_uris: &[String],
        description: &str,
        public: bool,
    ) -> Result<Playlist> {
        let playlist = self.create_playlist(token, name, description, public).await?;

        if !track_uris.is_empty() {
            self.add_tracks_to_playlist(token, &playlist.id, track_uris)
                .await?;
        }

        Ok(playlist)
    }
}
