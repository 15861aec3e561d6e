//! Application configuration module.
//!
//! Manages the TOML config file holding the TMDB API key and lookup
//! defaults, and picks the credential used for requests.

#[allow(clippy::module_inception)]
mod config;
mod credentials;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, TmdbConfig};
pub use credentials::{ApiCredential, KEY_ENV, TOKEN_ENV, resolve_credential};
pub use paths::resolve_config_path;
