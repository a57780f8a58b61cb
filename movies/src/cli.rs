//! Command-line front end for the movie data layer.
//!
//! The `movies` binary parses [`Cli`], wires adapters, and delegates to
//! [`run`], which only depends on the [`MoviesQuery`] port so it can be
//! exercised in tests without network or disk.

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use thiserror::Error;
use url::Url;

use crate::domain::ports::{ConnectivityProbe, FixedConnectivity, MoviesQuery};
use crate::domain::{FetchError, Movie};

/// `movies` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "movies",
    about = "List cached or remote movies, falling back to the local snapshot when offline",
    version
)]
pub struct Cli {
    /// Treat the device as offline and read from the local snapshot.
    #[arg(long, global = true)]
    pub offline: bool,
    /// Emit log lines as JSON.
    #[arg(long, global = true)]
    pub json_logs: bool,
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Connectivity answer implied by the flags.
    #[must_use]
    pub const fn connectivity(&self) -> FixedConnectivity {
        if self.offline {
            FixedConnectivity::offline()
        } else {
            FixedConnectivity::online()
        }
    }
}

/// Supported operations.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print every movie, one per line.
    List,
    /// Print one movie in detail.
    Show {
        /// Movie identifier.
        id: i64,
    },
}

/// Errors surfaced by [`run`].
#[derive(Debug, Error)]
pub enum CliError {
    /// The repository could not produce a result.
    #[error("could not load movies: {0}")]
    Fetch(#[from] FetchError),
    /// Writing output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Execute `command` against `query` and write the result to `out`.
///
/// # Errors
///
/// Returns [`CliError::Fetch`] when the repository fails and
/// [`CliError::Output`] when `out` rejects a write.
pub async fn run(
    command: &Command,
    query: &dyn MoviesQuery,
    probe: &dyn ConnectivityProbe,
    poster_base_url: &Url,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let is_online = probe.is_online();
    match command {
        Command::List => {
            let movies = query.get_movies(is_online).await?;
            if movies.is_empty() {
                writeln!(out, "no movies")?;
            }
            for movie in &movies {
                writeln!(out, "{}", list_line(movie))?;
            }
        }
        Command::Show { id } => {
            let movie = query.get_movie(*id, is_online).await?;
            write_detail(out, &movie, poster_base_url)?;
        }
    }
    Ok(())
}

/// Join the image host prefix and a movie's poster path.
///
/// # Examples
/// ```
/// use movies::cli::poster_url;
/// use url::Url;
///
/// let base = Url::parse("https://image.tmdb.org/t/p/w500").expect("url");
/// assert_eq!(poster_url(&base, "/abc.jpg"), "https://image.tmdb.org/t/p/w500/abc.jpg");
/// ```
#[must_use]
pub fn poster_url(base: &Url, poster_path: &str) -> String {
    let prefix = base.as_str().trim_end_matches('/');
    if poster_path.starts_with('/') {
        format!("{prefix}{poster_path}")
    } else {
        format!("{prefix}/{poster_path}")
    }
}

fn list_line(movie: &Movie) -> String {
    format!("{:>4}  {}", movie.id(), movie.title())
}

fn write_detail(out: &mut dyn Write, movie: &Movie, poster_base_url: &Url) -> io::Result<()> {
    writeln!(out, "{} (#{})", movie.title(), movie.id())?;
    writeln!(out, "poster: {}", poster_url(poster_base_url, movie.poster_path()))?;
    writeln!(out)?;
    writeln!(out, "{}", movie.description())
}
