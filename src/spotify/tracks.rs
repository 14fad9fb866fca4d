use crate::{
    Result,
    spotify::SpotifyClient,
    types::{Credential, TopTracksResponse, Track},
};

pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 50;

/// Bounds a requested page size to what the API accepts.
pub fn clamp_limit(limit: i64) -> usize {
    limit.clamp(MIN_LIMIT, MAX_LIMIT) as usize
}

impl SpotifyClient {
    /// Retrieves the user's top tracks.
    ///
    /// Requires the `user-top-read` scope.
    ///
    /// # Arguments
    ///
    /// * `token` - Access token for Spotify API authentication
    /// * `limit` - Number of tracks wanted; silently clamped to 1..=50
    /// * `time_range` - `short_term`, `medium_term` or `long_term`. Passed
    ///   through as-is, the API rejects unknown values itself.
    ///
    /// # Returns
    ///
    /// At most `clamp_limit(limit)` tracks, in the order the API ranks them.
    pub async fn top_tracks(
        &self,
        token: &Credential,
        limit: i64,
        time_range: &str,
    ) -> Result<Vec<Track>> {
        let limit = clamp_limit(limit);
        let request = self
            .get(token, "me/top/tracks")
            .query(&[("limit", limit.to_string()), ("time_range", time_range.to_string())]);

        let mut res: TopTracksResponse = self.send_json(request, "get top tracks").await?;
        res.items.truncate(limit);

        Ok(res.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_clamped() {
        assert_eq!(clamp_limit(-5), 1);
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(1), 1);
        assert_eq!(clamp_limit(10), 10);
        assert_eq!(clamp_limit(50), 50);
        assert_eq!(clamp_limit(51), 50);
        assert_eq!(clamp_limit(i64::MAX), 50);
        assert_eq!(clamp_limit(i64::MIN), 1);
    }
}
