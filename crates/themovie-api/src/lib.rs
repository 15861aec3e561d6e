//! API client library for themovie.
//!
//! Provides the TMDB API client and the umlaut normalizer used to
//! sanitize search queries.

/// German umlaut transliteration for search queries.
pub mod normalize;

/// TMDB API client.
pub mod tmdb;
