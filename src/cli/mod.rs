//! # CLI Module
//!
//! Command implementations of the `moodrec` binary.
//!
//! - [`serve`] - runs the HTTP backend, optionally opening the login page
//! - [`auth_url`] - prints the Spotify authorization URL
//! - [`presets`] - lists the mood and activity presets
//! - [`show_config`] - shows the effective configuration, secrets masked
//!
//! ```bash
//! moodrec serve --open
//! moodrec presets
//! ```

mod auth;
mod info;
mod serve;

pub use auth::auth_url;
pub use info::presets;
pub use info::show_config;
pub use serve::serve;
