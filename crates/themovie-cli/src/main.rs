//! themovie - TMDB movie and TV lookup CLI.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{
    ApiCredential, AppConfig, KEY_ENV, TOKEN_ENV, TmdbConfig, resolve_config_path,
    resolve_credential,
};
use themovie_api::normalize::{Transliteration, transliterate};
use themovie_api::tmdb::{
    ImageSize, LocalTmdbApi, SearchMovieParams, SearchTvParams, TmdbClient, image_url,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Transliterate German umlauts the way search queries are sent.
    Normalize(NormalizeArgs),
    /// Build a TMDB image URL from a poster/backdrop path.
    ImageUrl(ImageUrlArgs),
    /// Search for movies on TMDB.
    SearchMovie(SearchMovieArgs),
    /// Search for TV series on TMDB.
    SearchTv(SearchTvArgs),
    /// Get movie details from TMDB.
    MovieDetails(MovieDetailsArgs),
    /// List TMDB movie genres.
    Genres(GenresArgs),
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Umlaut spelling selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    /// `ö` becomes `oe`.
    Digraph,
    /// `ö` becomes `o`.
    BaseLetter,
}

impl From<StyleArg> for Transliteration {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Digraph => Self::Digraph,
            StyleArg::BaseLetter => Self::BaseLetter,
        }
    }
}

/// Arguments for the `normalize` subcommand.
#[derive(clap::Args)]
struct NormalizeArgs {
    /// Text to normalize (e.g. "Die Schöne und das Biest").
    text: String,
    /// Umlaut spelling.
    #[arg(long, value_enum, default_value_t = StyleArg::Digraph)]
    style: StyleArg,
}

/// Arguments for the `image-url` subcommand.
#[derive(clap::Args)]
struct ImageUrlArgs {
    /// Image path as returned by TMDB (e.g. "/4n8QNNdk4BOX9Dslfbz5Dy6j1HK.jpg").
    #[arg(long, required = true)]
    path: String,
    /// Size token: w200, w300, w400 or w500. Unknown tokens fall back to w500.
    #[arg(long)]
    size: Option<String>,
}

/// Arguments for the `search-movie` subcommand.
#[derive(clap::Args)]
struct SearchMovieArgs {
    /// Search query (e.g. "Die Schöne und das Biest").
    #[arg(long, required = true)]
    query: String,
    /// Response language (default: config, then "de-DE").
    #[arg(long)]
    language: Option<String>,
    /// Filter by release year.
    #[arg(long)]
    year: Option<u32>,
    /// Umlaut spelling used for the query.
    #[arg(long, value_enum, default_value_t = StyleArg::Digraph)]
    style: StyleArg,
}

/// Arguments for the `search-tv` subcommand.
#[derive(clap::Args)]
struct SearchTvArgs {
    /// Search query (e.g. "Dark").
    #[arg(long, required = true)]
    query: String,
    /// Response language (default: config, then "de-DE").
    #[arg(long)]
    language: Option<String>,
    /// Filter by first air date year.
    #[arg(long)]
    year: Option<u32>,
    /// Umlaut spelling used for the query.
    #[arg(long, value_enum, default_value_t = StyleArg::Digraph)]
    style: StyleArg,
}

/// Arguments for the `movie-details` subcommand.
#[derive(clap::Args)]
struct MovieDetailsArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
    /// Response language (default: config, then "de-DE").
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `genres` subcommand.
#[derive(clap::Args)]
struct GenresArgs {
    /// Response language (default: config, then "de-DE").
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a config file with the given API key.
    Init(ConfigInitArgs),
}

/// Arguments for the `config init` subcommand.
#[derive(clap::Args)]
struct ConfigInitArgs {
    /// TMDB v3 API key.
    #[arg(long, required = true)]
    api_key: String,
    /// Default response language (e.g. "de-DE").
    #[arg(long)]
    language: Option<String>,
    /// Default image size token.
    #[arg(long)]
    image_size: Option<String>,
}

/// Loads the config file from `--dir` or the default location.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file is malformed.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Picks the request language: CLI flag, then config, then the API default.
fn resolve_language(arg: Option<&str>, config: &AppConfig) -> String {
    arg.filter(|l| !l.is_empty())
        .or_else(|| config.language())
        .map_or_else(String::new, String::from)
}

/// Builds a `TmdbClient` from the environment or the config file.
///
/// # Errors
///
/// Returns an error if no credential is available or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let credential = resolve_credential(
        std::env::var(TOKEN_ENV).ok(),
        std::env::var(KEY_ENV).ok(),
        config,
    )?;

    let builder = TmdbClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    let builder = match credential {
        ApiCredential::Token(token) => builder.api_token(token),
        ApiCredential::Key(key) => builder.api_key(key),
    };
    builder.build().context("failed to build TMDB client")
}

/// Runs the `normalize` subcommand.
fn run_normalize(text: &str, style: Transliteration) -> String {
    let normalized = transliterate(text, style);
    tracing::info!("{}", normalized);
    normalized
}

/// Runs the `image-url` subcommand.
///
/// # Errors
///
/// Returns an error if the image path is empty.
fn run_image_url(args: &ImageUrlArgs, config: &AppConfig) -> Result<()> {
    if args.path.is_empty() {
        bail!("image path must not be empty");
    }
    let size = args
        .size
        .as_deref()
        .or(config.tmdb.image_size.as_deref())
        .unwrap_or(ImageSize::default().as_str());
    if ImageSize::from_token(size).as_str() != size {
        tracing::warn!("Unknown image size '{}', using {}", size, ImageSize::default());
    }
    tracing::info!("{}", image_url(&args.path, size));
    Ok(())
}

/// Runs the `search-movie` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_search_movie(args: &SearchMovieArgs, config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;

    let mut params = SearchMovieParams::new(&args.query)
        .language(resolve_language(args.language.as_deref(), config))
        .transliteration(args.style.into());
    if let Some(year) = args.year {
        params = params.year(year);
    }

    let response = client
        .search_movie(&params)
        .await
        .context("TMDB search/movie request failed")?;

    if response.is_empty() {
        tracing::info!("No movies found for '{}'", args.query);
        return Ok(());
    }

    tracing::info!("Total results: {}", response.total_results);
    tracing::info!("ID\tTitle\t\t\tOrigTitle\t\tReleaseDate");
    for result in &response.results {
        tracing::info!(
            "{}\t{}\t{}\t\t{}",
            result.id,
            result.title,
            result.original_title,
            result.release_date.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}

/// Runs the `search-tv` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_search_tv(args: &SearchTvArgs, config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;

    let mut params = SearchTvParams::new(&args.query)
        .language(resolve_language(args.language.as_deref(), config))
        .transliteration(args.style.into());
    if let Some(year) = args.year {
        params = params.first_air_date_year(year);
    }

    let response = client
        .search_tv(&params)
        .await
        .context("TMDB search/tv request failed")?;

    if response.is_empty() {
        tracing::info!("No TV series found for '{}'", args.query);
        return Ok(());
    }

    tracing::info!("Total results: {}", response.total_results);
    tracing::info!("ID\tName\t\t\tOrigLang\tCountry\t\tFirstAirDate");
    for result in &response.results {
        tracing::info!(
            "{}\t\t{}\t{}\t\t{}\t\t{}",
            result.id,
            result.name,
            result.original_language,
            result.origin_country.join(","),
            result.first_air_date.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}

/// Runs the `movie-details` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_movie_details(args: &MovieDetailsArgs, config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;
    let language = resolve_language(args.language.as_deref(), config);

    let details = client
        .movie_details(args.id, &language)
        .await
        .context("TMDB movie details request failed")?;

    let size = config.tmdb.image_size.as_deref().unwrap_or("w500");
    let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();

    tracing::info!("ID: {}", details.id);
    tracing::info!("Title: {}", details.title);
    tracing::info!("Original Title: {}", details.original_title);
    tracing::info!("Tagline: {}", details.tagline.as_deref().unwrap_or("-"));
    tracing::info!(
        "Release Date: {}",
        details.release_date.as_deref().unwrap_or("-")
    );
    tracing::info!("Status: {}", details.status.as_deref().unwrap_or("-"));
    tracing::info!(
        "Runtime: {}",
        details
            .runtime
            .map_or_else(|| String::from("-"), |r| format!("{r}min"))
    );
    tracing::info!("Genres: {}", genres.join(", "));
    if let Some(collection) = &details.belongs_to_collection {
        tracing::info!("Collection: {} ({})", collection.name, collection.id);
    }
    tracing::info!("Budget: {}", details.budget);
    tracing::info!("Revenue: {}", details.revenue);
    tracing::info!(
        "Votes: {:.1} ({} votes)",
        details.vote_average,
        details.vote_count
    );
    tracing::info!(
        "Poster: {}",
        image_url(details.poster_path.as_deref().unwrap_or_default(), size)
    );

    Ok(())
}

/// Runs the `genres` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_genres(args: &GenresArgs, config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(config)?;
    let language = resolve_language(args.language.as_deref(), config);

    let list = client
        .movie_genres(&language)
        .await
        .context("TMDB genre list request failed")?;

    tracing::info!("ID\tName");
    for genre in &list.genres {
        tracing::info!("{}\t{}", genre.id, genre.name);
    }
    tracing::info!("Total: {} genres", list.genres.len());

    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or written.
fn run_config_init(args: &ConfigInitArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig {
        tmdb: TmdbConfig {
            api_key: Some(args.api_key.clone()),
            language: args.language.clone(),
            image_size: args.image_size.clone(),
        },
    };
    config.save(&config_path).context("failed to save config")?;
    tracing::info!("Wrote {}", config_path.display());
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Normalize(args) => {
            run_normalize(&args.text, args.style.into());
            Ok(())
        }
        Commands::ImageUrl(args) => run_image_url(&args, &load_config(dir)?),
        Commands::SearchMovie(args) => run_search_movie(&args, &load_config(dir)?).await,
        Commands::SearchTv(args) => run_search_tv(&args, &load_config(dir)?).await,
        Commands::MovieDetails(args) => run_movie_details(&args, &load_config(dir)?).await,
        Commands::Genres(args) => run_genres(&args, &load_config(dir)?).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Init(args) => run_config_init(&args, dir),
        },
    }
}

#[cfg(test)]
mod tests {
    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    use super::*;

    #[test]
    fn test_run_normalize_digraph() {
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().with_fields(expect::msg("Die Schoene und das Biest")))
            .only()
            .run_with_handle();

        with_default(subscriber, || {
            run_normalize("Die Sch\u{00F6}ne und das Biest", Transliteration::Digraph);
        });

        handle.assert_finished();
    }

    #[test]
    fn test_run_normalize_base_letter() {
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().with_fields(expect::msg("Die Schone und das Biest")))
            .only()
            .run_with_handle();

        with_default(subscriber, || {
            run_normalize(
                "Die Sch\u{00F6}ne und das Biest",
                Transliteration::BaseLetter,
            );
        });

        handle.assert_finished();
    }

    #[test]
    fn test_run_normalize_returns_text() {
        let normalized = run_normalize("Gr\u{00FC}\u{00DF}e", Transliteration::Digraph);
        assert_eq!(normalized, "Gruesse");
    }

    #[test]
    fn test_style_arg_conversion() {
        assert_eq!(
            Transliteration::from(StyleArg::Digraph),
            Transliteration::Digraph
        );
        assert_eq!(
            Transliteration::from(StyleArg::BaseLetter),
            Transliteration::BaseLetter
        );
    }

    #[test]
    fn test_resolve_language_precedence() {
        // Arrange
        let empty = AppConfig::default();
        let configured = AppConfig {
            tmdb: TmdbConfig {
                language: Some(String::from("en-US")),
                ..TmdbConfig::default()
            },
        };

        // Act & Assert
        assert_eq!(resolve_language(Some("fr-FR"), &configured), "fr-FR");
        assert_eq!(resolve_language(None, &configured), "en-US");
        assert_eq!(resolve_language(Some(""), &configured), "en-US");
        assert_eq!(resolve_language(None, &empty), "");
    }
}
