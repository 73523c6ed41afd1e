//! Mood based track recommendations on top of the Spotify Web API
//!
//! This library provides a small HTTP backend that signs in to Spotify with the
//! authorization-code flow, proxies a handful of listening-data endpoints and
//! derives recommendations from the averaged audio features of seed tracks,
//! nudged toward mood and activity presets.
//!
//! # Modules
//!
//! - `api` - HTTP handlers of the backend
//! - `cli` - Command-line helpers of the `moodrec` binary
//! - `config` - Configuration, environment loading and weight presets
//! - `error` - Error taxonomy and its mapping onto HTTP responses
//! - `management` - Token lifecycle and the recommendation engine
//! - `server` - Router assembly and server start-up
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use moodrec::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> moodrec::Res<()> {
//!     config::load_env().await?;
//!     server::start_api_server(config::Config::from_env()).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;

/// A convenient Result type alias for process level operations that may fail.
///
/// Request handling uses [`error::ApiError`] instead; this alias covers
/// start-up plumbing such as binding the listener.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
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
/// success!("Authenticated with Spotify");
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
/// Only meant for fatal start-up failures. Request handlers never call it;
/// they log with [`warning!`] and answer with an error response.
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
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Unknown mood '{}', ignoring", mood);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
