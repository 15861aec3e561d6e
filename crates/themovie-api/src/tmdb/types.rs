//! TMDB API response types and search parameters.

use serde::Deserialize;

use crate::normalize::Transliteration;

/// Language used when the caller passes an empty tag.
pub const DEFAULT_LANGUAGE: &str = "de-DE";

/// Returns `language`, or [`DEFAULT_LANGUAGE`] when it is empty.
#[must_use]
pub fn effective_language(language: &str) -> &str {
    if language.trim().is_empty() {
        DEFAULT_LANGUAGE
    } else {
        language
    }
}

// --- Search Movie ---

/// Response from `search/movie` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchMovieResponse {
    /// Current page number.
    pub page: u32,
    /// Search results.
    pub results: Vec<TmdbMovieSearchResult>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

impl TmdbSearchMovieResponse {
    /// Whether the search matched nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A single movie search result.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieSearchResult {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    pub original_title: String,
    /// Original language (ISO 639-1).
    pub original_language: String,
    /// Release date (YYYY-MM-DD or null).
    pub release_date: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Popularity score.
    pub popularity: f64,
    /// Vote average.
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
    /// Video flag.
    #[serde(default)]
    pub video: bool,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

// --- Search TV ---

/// Response from `search/tv` endpoint.
///
/// Fields TMDB adds in the future are rejected rather than ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TmdbSearchTvResponse {
    /// Current page number.
    pub page: u32,
    /// Search results.
    pub results: Vec<TmdbTvSearchResult>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

impl TmdbSearchTvResponse {
    /// Whether the search matched nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A single TV series search result.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TmdbTvSearchResult {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub name: String,
    /// Original name.
    pub original_name: String,
    /// Original language (ISO 639-1).
    pub original_language: String,
    /// Origin countries (ISO 3166-1).
    #[serde(default)]
    pub origin_country: Vec<String>,
    /// First air date (YYYY-MM-DD or null).
    pub first_air_date: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Popularity score.
    pub popularity: f64,
    /// Vote average.
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

// --- Movie Details ---

/// Response from `movie/{movie_id}` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// IMDb ID (e.g. "tt6467266").
    pub imdb_id: Option<String>,
    /// Localized title.
    pub title: String,
    /// Original title.
    pub original_title: String,
    /// Original language (ISO 639-1).
    pub original_language: String,
    /// Tagline.
    pub tagline: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Release date.
    pub release_date: Option<String>,
    /// Release status (e.g., "Released", "Post Production").
    pub status: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Budget in USD (0 when unknown).
    #[serde(default)]
    pub budget: u64,
    /// Revenue in USD (0 when unknown).
    #[serde(default)]
    pub revenue: u64,
    /// Homepage URL.
    pub homepage: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Collection this movie belongs to.
    pub belongs_to_collection: Option<TmdbCollection>,
    /// Production companies.
    #[serde(default)]
    pub production_companies: Vec<TmdbProductionCompany>,
    /// Production countries.
    #[serde(default)]
    pub production_countries: Vec<TmdbProductionCountry>,
    /// Spoken languages.
    #[serde(default)]
    pub spoken_languages: Vec<TmdbSpokenLanguage>,
    /// Popularity score.
    pub popularity: f64,
    /// Vote average.
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
    /// Video flag.
    #[serde(default)]
    pub video: bool,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

/// Collection summary within movie details.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCollection {
    /// TMDB collection ID.
    pub id: u64,
    /// Collection name.
    pub name: String,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

/// Production company within movie details.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbProductionCompany {
    /// TMDB company ID.
    pub id: u64,
    /// Company name.
    pub name: String,
    /// Logo image path.
    pub logo_path: Option<String>,
    /// Origin country (ISO 3166-1, may be empty).
    #[serde(default)]
    pub origin_country: String,
}

/// Production country within movie details.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbProductionCountry {
    /// ISO 3166-1 code.
    pub iso_3166_1: String,
    /// Country name.
    pub name: String,
}

/// Spoken language within movie details.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSpokenLanguage {
    /// ISO 639-1 code.
    pub iso_639_1: String,
    /// Native name.
    pub name: String,
    /// English name.
    #[serde(default)]
    pub english_name: Option<String>,
}

// --- Genres ---

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Response from `genre/movie/list` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenreList {
    /// All movie genres in the requested language.
    pub genres: Vec<TmdbGenre>,
}

impl TmdbGenreList {
    /// Looks up a genre name by ID.
    #[must_use]
    pub fn name_of(&self, id: u32) -> Option<&str> {
        self.genres
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.name.as_str())
    }
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}

// --- Search Parameters ---

/// Parameters for `search/movie` endpoint.
///
/// Only the first result page is ever requested.
#[derive(Debug, Clone)]
pub struct SearchMovieParams {
    /// Search query (required). Umlauts are transliterated before sending.
    pub query: String,
    /// Response language (empty: [`DEFAULT_LANGUAGE`]).
    pub language: String,
    /// Filter by release year.
    pub year: Option<u32>,
    /// How umlauts in `query` are spelled.
    pub transliteration: Transliteration,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from(DEFAULT_LANGUAGE),
            year: None,
            transliteration: Transliteration::default(),
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the umlaut transliteration style.
    #[must_use]
    pub const fn transliteration(mut self, style: Transliteration) -> Self {
        self.transliteration = style;
        self
    }
}

/// Parameters for `search/tv` endpoint.
///
/// Only the first result page is ever requested.
#[derive(Debug, Clone)]
pub struct SearchTvParams {
    /// Search query (required). Umlauts are transliterated before sending.
    pub query: String,
    /// Response language (empty: [`DEFAULT_LANGUAGE`]).
    pub language: String,
    /// Filter by first air date year.
    pub first_air_date_year: Option<u32>,
    /// How umlauts in `query` are spelled.
    pub transliteration: Transliteration,
}

impl SearchTvParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from(DEFAULT_LANGUAGE),
            first_air_date_year: None,
            transliteration: Transliteration::default(),
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the first air date year filter.
    #[must_use]
    pub const fn first_air_date_year(mut self, year: u32) -> Self {
        self.first_air_date_year = Some(year);
        self
    }

    /// Sets the umlaut transliteration style.
    #[must_use]
    pub const fn transliteration(mut self, style: Transliteration) -> Self {
        self.transliteration = style;
        self
    }
}
