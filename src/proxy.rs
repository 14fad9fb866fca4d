//! Action routing for `/api/spotify`.
//!
//! [`SpotifyProxy`] turns one inbound request into one upstream operation (or
//! the three-way aggregate read) and always answers with a [`Reply`]. Errors
//! never escape: every [`SpotifyError`] is matched to a status code and
//! wrapped into a failure envelope here.

use std::str::FromStr;

use axum::http::StatusCode;
use serde_json::json;

use crate::{
    Result, SpotifyError,
    config::TokenProvider,
    envelope::{ApiResponse, Reply},
    spotify::{SpotifyClient, playlist::DEFAULT_DESCRIPTION},
    types::{Credential, MutationRequest, ReadQuery},
};

pub const DEFAULT_TOP_TRACKS_LIMIT: i64 = 10;
pub const DEFAULT_TIME_RANGE: &str = "short_term";

/// Read operations selected by `GET /api/spotify?action=...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadAction {
    TopTracks,
    User,
    NowPlaying,
    FollowedArtists,
    TestToken,
    /// No (or an unrecognised) action: top tracks, now playing and followed
    /// artists in one answer.
    Aggregate,
}

impl ReadAction {
    pub fn parse(action: Option<&str>) -> Self {
        match action {
            Some("top-tracks") => Self::TopTracks,
            Some("user") | Some("user-info") => Self::User,
            Some("now-playing") => Self::NowPlaying,
            Some("followed-artists") => Self::FollowedArtists,
            Some("test-token") => Self::TestToken,
            _ => Self::Aggregate,
        }
    }
}

/// Mutations selected by the `action` field of `POST /api/spotify`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationAction {
    /// `stop` and `pause` both land here.
    Pause,
    Play,
    CreatePlaylist,
}

impl FromStr for MutationAction {
    type Err = SpotifyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "stop" | "pause" => Ok(Self::Pause),
            "play" => Ok(Self::Play),
            "create-playlist" => Ok(Self::CreatePlaylist),
            _ => Err(SpotifyError::Validation(
                "Invalid action. Must be one of: stop, pause, play, create-playlist".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpotifyProxy {
    client: SpotifyClient,
    tokens: TokenProvider,
}

impl SpotifyProxy {
    pub fn new(client: SpotifyClient, tokens: TokenProvider) -> Self {
        Self { client, tokens }
    }

    /// Handles `GET /api/spotify`.
    ///
    /// `test-token` is special cased: whatever goes wrong, including a missing
    /// token, the caller gets a 401 meaning "credential rejected".
    pub async fn handle_read(&self, query: &ReadQuery) -> Reply {
        let action = ReadAction::parse(query.action.as_deref());

        match self.read(action, query).await {
            Ok(reply) => reply,
            Err(err) if action == ReadAction::TestToken => {
                Reply::error(StatusCode::UNAUTHORIZED, format!("Token error: {}", err))
            }
            Err(err) => Reply::from(err),
        }
    }

    /// Handles `POST /api/spotify`.
    ///
    /// The body is validated completely before the credential is resolved or
    /// any upstream call is made.
    pub async fn handle_mutation(&self, body: &MutationRequest) -> Reply {
        self.mutate(body).await.unwrap_or_else(Reply::from)
    }

    async fn read(&self, action: ReadAction, query: &ReadQuery) -> Result<Reply> {
        let token = self.tokens.access_token()?;

        match action {
            ReadAction::TopTracks => {
                let limit = parse_limit(query.limit.as_deref());
                let time_range = query
                    .time_range
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .unwrap_or(DEFAULT_TIME_RANGE);

                let tracks = self.client.top_tracks(&token, limit, time_range).await?;
                Ok(Reply::ok(
                    "Top tracks retrieved successfully",
                    json!({ "tracks": tracks }),
                ))
            }
            ReadAction::User => {
                let user = self.client.current_user(&token).await?;
                Ok(Reply::ok(
                    "User info retrieved successfully",
                    json!({ "user": user }),
                ))
            }
            ReadAction::NowPlaying => {
                let playing = self.client.currently_playing(&token).await?;
                Ok(Reply::ok(
                    "Currently playing track retrieved successfully",
                    json!({ "playing": playing }),
                ))
            }
            ReadAction::FollowedArtists => {
                let artists = self.client.followed_artists(&token).await?;
                Ok(Reply::ok(
                    "Followed artists retrieved successfully",
                    json!({ "artists": artists }),
                ))
            }
            ReadAction::TestToken => {
                let user = self.client.current_user(&token).await?;
                Ok(Reply::ok(
                    "Token is valid",
                    json!({ "user": user.display_name }),
                ))
            }
            ReadAction::Aggregate => Ok(self.aggregate(&token).await),
        }
    }

    /// Runs the three dashboard reads concurrently.
    ///
    /// Each branch is captured on its own: a failed branch degrades to an
    /// empty list or `null` and its message is listed under `errors`, while
    /// the envelope still reports success. No branch is ever issued twice.
    async fn aggregate(&self, token: &Credential) -> Reply {
        let (tracks, playing, artists) = tokio::join!(
            self.client
                .top_tracks(token, DEFAULT_TOP_TRACKS_LIMIT, DEFAULT_TIME_RANGE),
            self.client.currently_playing(token),
            self.client.followed_artists(token),
        );

        let mut errors = Vec::new();
        let tracks = degrade(tracks, &mut errors);
        let playing = degrade(playing, &mut errors);
        let artists = degrade(artists, &mut errors);

        let message = if errors.is_empty() {
            "Spotify data retrieved successfully"
        } else {
            "Spotify data retrieved with some errors"
        };

        Reply {
            status: StatusCode::OK,
            body: ApiResponse::new(
                true,
                message,
                Some(json!({
                    "topTracks": tracks,
                    "nowPlaying": playing,
                    "followedArtists": artists,
                })),
                (!errors.is_empty()).then_some(errors),
            ),
        }
    }

    async fn mutate(&self, body: &MutationRequest) -> Result<Reply> {
        let action: MutationAction = body.action.as_deref().unwrap_or_default().parse()?;

        match action {
            MutationAction::Pause => {
                let token = self.tokens.access_token()?;
                let result = self.client.pause_playback(&token).await?;
                Ok(Reply::ok(result.message.clone(), json!({ "result": result })))
            }
            MutationAction::Play => {
                let track_uri = required(
                    body.track_uri.as_deref(),
                    "trackUri is required for play action",
                )?;

                let token = self.tokens.access_token()?;
                let result = self.client.start_playback(&token, track_uri).await?;
                Ok(Reply::ok(result.message.clone(), json!({ "result": result })))
            }
            MutationAction::CreatePlaylist => {
                let name = required(
                    body.name.as_deref(),
                    "name is required for create-playlist action",
                )?;
                let track_uris = match body.track_uris.as_deref() {
                    Some(uris) if !uris.is_empty() => uris,
                    _ => {
                        return Err(SpotifyError::Validation(
                            "trackUris must be a non-empty array for create-playlist action"
                                .to_string(),
                        ));
                    }
                };
                let description = body.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION);
                let public = body.public.unwrap_or(false);

                let token = self.tokens.access_token()?;
                let playlist = self
                    .client
                    .create_playlist_with_tracks(&token, name, track_uris, description, public)
                    .await?;

                Ok(Reply::ok(
                    "Playlist created successfully",
                    json!({ "playlist": playlist }),
                ))
            }
        }
    }
}

/// Parses the `limit` query parameter.
///
/// Reads an optional sign and the leading digits, ignoring whatever follows
/// (`"12.7"` is 12). Values beyond `i64` saturate so clamping in the client
/// still applies. No digits at all means the default.
fn parse_limit(limit: Option<&str>) -> i64 {
    let Some(raw) = limit.map(str::trim) else {
        return DEFAULT_TOP_TRACKS_LIMIT;
    };

    let (negative, rest) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];

    if digits.is_empty() {
        return DEFAULT_TOP_TRACKS_LIMIT;
    }

    match digits.parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    }
}

fn required<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| SpotifyError::Validation(message.to_string()))
}

fn degrade<T: Default>(result: Result<T>, errors: &mut Vec<String>) -> T {
    result.unwrap_or_else(|err| {
        errors.push(err.to_string());
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spotify::clamp_limit;

    #[test]
    fn read_actions() {
        assert_eq!(ReadAction::parse(Some("top-tracks")), ReadAction::TopTracks);
        assert_eq!(ReadAction::parse(Some("user")), ReadAction::User);
        assert_eq!(ReadAction::parse(Some("user-info")), ReadAction::User);
        assert_eq!(ReadAction::parse(Some("now-playing")), ReadAction::NowPlaying);
        assert_eq!(
            ReadAction::parse(Some("followed-artists")),
            ReadAction::FollowedArtists
        );
        assert_eq!(ReadAction::parse(Some("test-token")), ReadAction::TestToken);
        assert_eq!(ReadAction::parse(None), ReadAction::Aggregate);
        assert_eq!(ReadAction::parse(Some("bogus")), ReadAction::Aggregate);
        assert_eq!(ReadAction::parse(Some("")), ReadAction::Aggregate);
    }

    #[test]
    fn mutation_actions() {
        assert_eq!("stop".parse::<MutationAction>().unwrap(), MutationAction::Pause);
        assert_eq!("pause".parse::<MutationAction>().unwrap(), MutationAction::Pause);
        assert_eq!("play".parse::<MutationAction>().unwrap(), MutationAction::Play);
        assert_eq!(
            "create-playlist".parse::<MutationAction>().unwrap(),
            MutationAction::CreatePlaylist
        );

        let err = "skip".parse::<MutationAction>().unwrap_err();
        assert!(matches!(err, SpotifyError::Validation(_)));
        assert!(err.to_string().contains("stop, pause, play, create-playlist"));
        assert!("".parse::<MutationAction>().is_err());
    }

    #[test]
    fn limit_parsing() {
        assert_eq!(parse_limit(None), DEFAULT_TOP_TRACKS_LIMIT);
        assert_eq!(parse_limit(Some("25")), 25);
        assert_eq!(parse_limit(Some(" 7 ")), 7);
        assert_eq!(parse_limit(Some("-3")), -3);
        assert_eq!(parse_limit(Some("ten")), DEFAULT_TOP_TRACKS_LIMIT);
        assert_eq!(parse_limit(Some("")), DEFAULT_TOP_TRACKS_LIMIT);
        assert_eq!(parse_limit(Some("-")), DEFAULT_TOP_TRACKS_LIMIT);
        assert_eq!(parse_limit(Some("+20")), 20);
        assert_eq!(parse_limit(Some("12.7")), 12);
        assert_eq!(parse_limit(Some("30abc")), 30);
    }

    #[test]
    fn out_of_range_limits_saturate() {
        assert_eq!(parse_limit(Some("99999999999999999999")), i64::MAX);
        assert_eq!(parse_limit(Some("-99999999999999999999")), i64::MIN);
        assert_eq!(clamp_limit(parse_limit(Some("99999999999999999999"))), 50);
        assert_eq!(clamp_limit(parse_limit(Some("-99999999999999999999"))), 1);
    }

    #[test]
    fn degrade_collects_errors() {
        let mut errors = Vec::new();
        let ok: Vec<u8> = degrade(Ok(vec![1]), &mut errors);
        let failed: Vec<u8> = degrade(Err(SpotifyError::Auth), &mut errors);
        let none: Option<u8> = degrade(Err(SpotifyError::NoActiveDevice), &mut errors);

        assert_eq!(ok, vec![1]);
        assert!(failed.is_empty());
        assert_eq!(none, None);
        assert_eq!(errors.len(), 2);
    }

    #[tokio::test]
    async fn play_without_track_is_rejected_without_a_token() {
        let proxy = SpotifyProxy::new(
            SpotifyClient::new("http://127.0.0.1:9"),
            TokenProvider::new(None),
        );
        let reply = proxy
            .handle_mutation(&MutationRequest {
                action: Some("play".into()),
                ..MutationRequest::default()
            })
            .await;

        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.body.message, "trackUri is required for play action");
    }

    #[tokio::test]
    async fn missing_token_is_a_server_error_except_for_test_token() {
        let proxy = SpotifyProxy::new(
            SpotifyClient::new("http://127.0.0.1:9"),
            TokenProvider::new(None),
        );

        let reply = proxy.handle_read(&ReadQuery::default()).await;
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!reply.body.success);

        let reply = proxy
            .handle_read(&ReadQuery {
                action: Some("test-token".into()),
                ..ReadQuery::default()
            })
            .await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
        assert!(reply.body.message.starts_with("Token error: "));
    }
}
