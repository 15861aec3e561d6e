//! TMDB image URL construction.

/// Base URL of the TMDB image CDN.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Supported image widths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageSize {
    /// 200px wide.
    W200,
    /// 300px wide.
    W300,
    /// 400px wide.
    W400,
    /// 500px wide.
    #[default]
    W500,
}

impl ImageSize {
    /// All sizes, smallest first.
    pub const ALL: [Self; 4] = [Self::W200, Self::W300, Self::W400, Self::W500];

    /// Parses a size token, falling back to [`ImageSize::W500`] for anything
    /// that is not one of `w200`, `w300`, `w400`, `w500`.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "w200" => Self::W200,
            "w300" => Self::W300,
            "w400" => Self::W400,
            _ => Self::W500,
        }
    }

    /// URL path segment for this size.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W200 => "w200",
            Self::W300 => "w300",
            Self::W400 => "w400",
            Self::W500 => "w500",
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the full image URL for a poster/backdrop path.
///
/// Returns an empty string when `image_path` is empty. Unknown size tokens
/// fall back to `w500`.
///
/// # Examples
///
/// ```
/// use themovie_api::tmdb::image_url;
///
/// assert_eq!(
///     image_url("/aGx7hRWPEdDaymaPxFKtBJ4gj8i.jpg", "w200"),
///     "https://image.tmdb.org/t/p/w200/aGx7hRWPEdDaymaPxFKtBJ4gj8i.jpg"
/// );
/// assert_eq!(image_url("", "w200"), "");
/// ```
#[must_use]
pub fn image_url(image_path: &str, size: &str) -> String {
    if image_path.is_empty() {
        return String::new();
    }
    let size = ImageSize::from_token(size);
    let path = image_path.strip_prefix('/').unwrap_or(image_path);
    format!("{IMAGE_BASE_URL}/{size}/{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tokens_are_kept() {
        for size in ImageSize::ALL {
            // Act
            let url = image_url("/poster.jpg", size.as_str());

            // Assert
            assert_eq!(url, format!("https://image.tmdb.org/t/p/{size}/poster.jpg"));
            assert!(url.contains(size.as_str()));
        }
    }

    #[test]
    fn test_unknown_token_falls_back_to_w500() {
        assert_eq!(
            image_url("/poster.jpg", "original"),
            "https://image.tmdb.org/t/p/w500/poster.jpg"
        );
        assert_eq!(
            image_url("/poster.jpg", ""),
            "https://image.tmdb.org/t/p/w500/poster.jpg"
        );
        assert_eq!(
            image_url("/poster.jpg", "W200"),
            "https://image.tmdb.org/t/p/w500/poster.jpg"
        );
    }

    #[test]
    fn test_empty_path_returns_empty_string() {
        assert_eq!(image_url("", "w300"), "");
        assert_eq!(image_url("", "bogus"), "");
    }

    #[test]
    fn test_path_without_leading_slash() {
        assert_eq!(
            image_url("poster.jpg", "w400"),
            "https://image.tmdb.org/t/p/w400/poster.jpg"
        );
    }

    #[test]
    fn test_from_token_round_trips_valid_sizes() {
        for size in ImageSize::ALL {
            assert_eq!(ImageSize::from_token(size.as_str()), size);
        }
        assert_eq!(ImageSize::default(), ImageSize::W500);
    }
}
