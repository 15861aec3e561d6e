//! `TmdbClient` - TMDB API client implementation.

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::LocalTmdbApi;
use super::error::TmdbError;
use super::types::{
    SearchMovieParams, SearchTvParams, TmdbErrorResponse, TmdbGenreList, TmdbMovieDetails,
    TmdbSearchMovieResponse, TmdbSearchTvResponse, effective_language,
};
use crate::normalize::transliterate;

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// User-Agent sent when the builder is not given one.
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Searches only ever request the first page.
const FIRST_PAGE: u32 = 1;

/// How requests are authenticated.
#[derive(Clone)]
enum Credentials {
    /// v3 API key, sent as the `api_key` query parameter.
    ApiKey(String),
    /// v4 read access token, sent as `Authorization: Bearer`.
    BearerToken(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Self::BearerToken(_) => f.write_str("BearerToken(<redacted>)"),
        }
    }
}

/// TMDB API client.
///
/// Holds no mutable state; one client can serve concurrent callers.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key or bearer token.
    credentials: Credentials,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    api_token: Option<String>,
    user_agent: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            api_token: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the v3 API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the v4 bearer token. Takes precedence over `api_key`.
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (default: `themovie-api/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - neither `api_key` nor `api_token` is set (or both are empty).
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_token = self.api_token.filter(|t| !t.is_empty());
        let api_key = self.api_key.filter(|k| !k.is_empty());
        let credentials = match (api_token, api_key) {
            (Some(token), _) => Credentials::BearerToken(token),
            (None, Some(key)) => Credentials::ApiKey(key),
            (None, None) => bail!("api_key or api_token is required"),
        };

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            credentials,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Sends one GET request with credentials and query params, then decodes
    /// the JSON body.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        tracing::debug!(path, ?query, "TMDB API request");

        let builder = self.http_client.get(url).query(query);
        let builder = match &self.credentials {
            Credentials::ApiKey(key) => builder.query(&[("api_key", key.as_str())]),
            Credentials::BearerToken(token) => builder.bearer_auth(token),
        };
        let request = builder
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        let response =
            self.http_client
                .execute(request)
                .await
                .map_err(|e| TmdbError::Transport {
                    path: String::from(path),
                    message: e.to_string(),
                })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            tracing::warn!(%status, path, "TMDB API returned an error status");
            let error = match serde_json::from_str::<TmdbErrorResponse>(&body) {
                Ok(error_response) => TmdbError::Status {
                    status: status.as_u16(),
                    code: Some(error_response.status_code),
                    message: error_response.status_message,
                },
                Err(_) => TmdbError::Status {
                    status: status.as_u16(),
                    code: None,
                    message: body,
                },
            };
            return Err(error.into());
        }

        let body = response.text().await.map_err(|e| TmdbError::Transport {
            path: String::from(path),
            message: e.to_string(),
        })?;
        let parsed = serde_json::from_str(&body).map_err(|e| TmdbError::Decode {
            path: String::from(path),
            message: e.to_string(),
        })?;
        Ok(parsed)
    }
}

/// Rejects search bodies that decoded but do not describe a result page.
fn ensure_first_page(path: &str, page: u32) -> Result<()> {
    if page == 0 {
        return Err(TmdbError::InvalidResponse {
            path: String::from(path),
            reason: String::from("page is 0"),
        }
        .into());
    }
    Ok(())
}

impl LocalTmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbSearchMovieResponse> {
        const PATH: &str = "search/movie";

        let mut query: Vec<(&str, String)> = vec![
            ("query", transliterate(&params.query, params.transliteration)),
            (
                "language",
                String::from(effective_language(&params.language)),
            ),
            ("page", FIRST_PAGE.to_string()),
        ];
        if let Some(year) = params.year {
            query.push(("year", year.to_string()));
        }

        let response: TmdbSearchMovieResponse = self.get_json(PATH, &query).await?;
        ensure_first_page(PATH, response.page)?;
        tracing::debug!(
            total_results = response.total_results,
            "TMDB search/movie completed"
        );
        Ok(response)
    }

    #[instrument(skip_all)]
    async fn search_tv(&self, params: &SearchTvParams) -> Result<TmdbSearchTvResponse> {
        const PATH: &str = "search/tv";

        let mut query: Vec<(&str, String)> = vec![
            ("query", transliterate(&params.query, params.transliteration)),
            (
                "language",
                String::from(effective_language(&params.language)),
            ),
            ("page", FIRST_PAGE.to_string()),
        ];
        if let Some(year) = params.first_air_date_year {
            query.push(("first_air_date_year", year.to_string()));
        }

        let response: TmdbSearchTvResponse = self.get_json(PATH, &query).await?;
        ensure_first_page(PATH, response.page)?;
        tracing::debug!(
            total_results = response.total_results,
            "TMDB search/tv completed"
        );
        Ok(response)
    }

    #[instrument(skip_all)]
    async fn movie_details(&self, movie_id: u64, language: &str) -> Result<TmdbMovieDetails> {
        let path = format!("movie/{movie_id}");
        let query = [("language", String::from(effective_language(language)))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn movie_genres(&self, language: &str) -> Result<TmdbGenreList> {
        let query = [("language", String::from(effective_language(language)))];
        let list: TmdbGenreList = self.get_json("genre/movie/list", &query).await?;
        if list.genres.is_empty() {
            tracing::warn!("TMDB genre/movie/list returned no genres");
        }
        Ok(list)
    }
}
