//! # API Module
//!
//! HTTP handlers of the spotdash server, built on [Axum](https://docs.rs/axum).
//!
//! ## Endpoints
//!
//! - [`spotify::read`] - `GET /api/spotify`, one read action or the aggregate
//!   dashboard read, selected by the `action` query parameter
//! - [`spotify::mutate`] - `POST /api/spotify`, playback control and playlist
//!   creation, selected by the `action` field of the JSON body
//! - [`health`] - `GET /health`, status and version for monitoring
//! - [`dashboard`] - `GET /`, the static dashboard page
//!
//! The `/api/spotify` handlers are thin: they extract the request and hand it
//! to [`crate::proxy::SpotifyProxy`], which always produces an envelope. A body
//! that is not valid JSON is answered with a 400 envelope instead of axum's
//! default plain-text rejection.

mod dashboard;
mod health;
pub mod spotify;

pub use dashboard::dashboard;
pub use health::health;
