use crate::{
    Result,
    spotify::SpotifyClient,
    types::{Artist, Credential, FollowedArtistsResponse},
};

/// Page size for followed artists. Only the first page is ever fetched.
pub const FOLLOWED_ARTISTS_LIMIT: u64 = 50;

impl SpotifyClient {
    /// Retrieves the artists the user follows.
    ///
    /// Requires the `user-follow-read` scope. Returns the first page of up to
    /// [`FOLLOWED_ARTISTS_LIMIT`] artists; the `after` cursor the API hands
    /// back is ignored.
    pub async fn followed_artists(&self, token: &Credential) -> Result<Vec<Artist>> {
        let request = self.get(token, "me/following").query(&[
            ("type", "artist".to_string()),
            ("limit", FOLLOWED_ARTISTS_LIMIT.to_string()),
        ]);

        let res: FollowedArtistsResponse =
            self.send_json(request, "get followed artists").await?;

        Ok(res.artists.items)
    }
}
