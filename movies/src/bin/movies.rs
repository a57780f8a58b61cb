//! `movies` binary: lists or shows movies from the catalogue, serving the
//! local snapshot when run with `--offline`.

use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig as _;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use movies::cli::{self, Cli};
use movies::config::MoviesSettings;
use movies::domain::MovieRepository;
use movies::outbound::http::HttpMovieSource;
use movies::outbound::store::FileMovieStore;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();
    init_tracing(args.json_logs);

    // Flags belong to clap; settings come from defaults, files and env.
    let settings = MoviesSettings::load_from_iter([OsString::from("movies")])
        .map_err(|err| eyre!("failed to load movies settings: {err}"))?;

    let mut source = HttpMovieSource::new(settings.api_base_url()?, settings.request_timeout()?)
        .wrap_err("failed to build HTTP client")?;
    if let Some(token) = settings.api_token() {
        source = source.with_bearer_token(token);
    }
    let cache_dir = settings.cache_dir();
    let store = FileMovieStore::open(&cache_dir)
        .wrap_err_with(|| format!("failed to open cache directory {}", cache_dir.display()))?;
    let repository = MovieRepository::new(Arc::new(source), Arc::new(store))
        .with_online_failure_policy(settings.online_failure_policy());
    let poster_base_url = settings.poster_base_url()?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build movies runtime")?;

    let mut buffer = Vec::new();
    runtime.block_on(cli::run(
        &args.command,
        &repository,
        &args.connectivity(),
        &poster_base_url,
        &mut buffer,
    ))?;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout.write_all(&buffer).and_then(|()| stdout.flush()) {
        drop(err);
    }
    Ok(())
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
