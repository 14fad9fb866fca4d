//! Spotify Dashboard Proxy Library
//!
//! This library provides a small HTTP facade over the Spotify Web API. A single
//! statically configured access token is used to forward a handful of read and
//! playback-control operations, and every result is reshaped into a uniform
//! JSON envelope that the bundled dashboard page renders.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the proxy endpoint, health check and dashboard
//! - `config` - Configuration management and the access token provider
//! - `envelope` - The uniform success/failure response envelope
//! - `error` - Error taxonomy shared by the client and the router
//! - `proxy` - Action routing from inbound requests to upstream operations
//! - `server` - Local HTTP server wiring
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use spotdash::{config, server};
//!
//! #[tokio::main]
//! async fn main() {
//!     config::load_env().await.ok();
//!     let config = config::Config::from_env();
//!     server::start_api_server(&config).await;
//! }
//! ```

pub mod api;
pub mod config;
pub mod envelope;
pub mod error;
pub mod proxy;
pub mod server;
pub mod spotify;
pub mod types;

pub use error::{Result, SpotifyError};

/// Prints an informational message with a blue bullet point.
///
/// Used for general information and status updates such as the address the
/// server listens on.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Access token acquired");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for unrecoverable startup failures. Request handling never
/// calls this; failures there are turned into failure envelopes instead.
///
/// # Example
///
/// ```
/// error!("Failed to bind {}", addr);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, most notably upstream failures that are
/// about to be reported back to the caller as a failure envelope.
///
/// # Example
///
/// ```
/// warning!("Failed to get top tracks: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
