//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{
    SearchMovieParams, SearchTvParams, TmdbGenreList, TmdbMovieDetails, TmdbSearchMovieResponse,
    TmdbSearchTvResponse,
};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
///
/// Every method issues exactly one GET request. A search that matches
/// nothing is `Ok` with an empty result list.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Searches for movies (first result page only).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails, or if the
    /// response reports page 0.
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbSearchMovieResponse>;

    /// Searches for TV series (first result page only).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails, if the
    /// response carries fields this crate does not know, or if it reports
    /// page 0.
    async fn search_tv(&self, params: &SearchTvParams) -> Result<TmdbSearchTvResponse>;

    /// Fetches movie details.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64, language: &str) -> Result<TmdbMovieDetails>;

    /// Fetches the movie genre list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_genres(&self, language: &str) -> Result<TmdbGenreList>;
}
