//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 endpoints and retrieves
//! movie search, TV search, movie details and genre data.

mod api;
mod client;
mod error;
mod image;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::TmdbError;
pub use image::{IMAGE_BASE_URL, ImageSize, image_url};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    DEFAULT_LANGUAGE, SearchMovieParams, SearchTvParams, TmdbCollection, TmdbErrorResponse,
    TmdbGenre, TmdbGenreList, TmdbMovieDetails, TmdbMovieSearchResult, TmdbProductionCompany,
    TmdbProductionCountry, TmdbSearchMovieResponse, TmdbSearchTvResponse, TmdbSpokenLanguage,
    TmdbTvSearchResult, effective_language,
};
