//! TMDB credential resolution from environment and config.

use anyhow::{Result, bail};

use super::config::AppConfig;

/// Environment variable holding a v4 bearer token.
pub const TOKEN_ENV: &str = "TMDB_API_TOKEN";

/// Environment variable holding a v3 API key.
pub const KEY_ENV: &str = "TMDB_API_KEY";

/// Credential picked for the TMDB client.
#[derive(PartialEq, Eq)]
pub enum ApiCredential {
    /// v4 bearer token.
    Token(String),
    /// v3 API key.
    Key(String),
}

impl std::fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Token(<redacted>)"),
            Self::Key(_) => f.write_str("Key(<redacted>)"),
        }
    }
}

/// Picks the credential: bearer token env, then API key env, then config.
///
/// Empty values are skipped.
///
/// # Errors
///
/// Returns an error if no source provides a non-empty credential.
pub fn resolve_credential(
    token_env: Option<String>,
    key_env: Option<String>,
    config: &AppConfig,
) -> Result<ApiCredential> {
    if let Some(token) = token_env.filter(|t| !t.is_empty()) {
        return Ok(ApiCredential::Token(token));
    }
    if let Some(key) = key_env.filter(|k| !k.is_empty()) {
        return Ok(ApiCredential::Key(key));
    }
    if let Some(key) = config.tmdb.api_key.as_ref().filter(|k| !k.is_empty()) {
        return Ok(ApiCredential::Key(key.clone()));
    }
    bail!("no TMDB credential: set {TOKEN_ENV}, {KEY_ENV}, or tmdb.api_key in config.toml")
}
