//! quakemap - USGS earthquakes and tectonic-plate boundaries on a Leaflet map.
//!
//! Fetches the earthquake and plate-boundary GeoJSON feeds concurrently and
//! renders them as a single interactive page, either written to a file or
//! served over HTTP.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

mod cli;
mod client;
mod errors;
mod layers;
mod map;
mod models;
mod render;
mod server;
mod style;

use cli::{Cli, Command};
use client::FeedClient;
use map::MapConfig;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    let runtime = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;

    match cli.command {
        Command::Render(args) => runtime.block_on(cmd_render(args)),
        Command::Serve(args) => runtime.block_on(cmd_serve(args)),
    }
}

/// Initialize tracing subscriber.
fn init_tracing(verbose: bool, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Execute the `render` command - one-shot fetch and write the page.
async fn cmd_render(args: cli::RenderArgs) -> Result<()> {
    let config = MapConfig::new(resolve_token(args.token)?);
    let client = build_client(args.usgs_url, args.plates_url)?;

    let doc = map::compose(&client, args.feed, config).await;
    let html = render::render_page(&doc).context("failed to render map page")?;

    std::fs::write(&args.out, html)
        .with_context(|| format!("failed to write {}", args.out.display()))?;

    tracing::info!(
        "wrote {} ({} markers, {} fault lines)",
        args.out.display(),
        doc.markers.len(),
        doc.fault_paths.len()
    );
    println!("Map written to {}", args.out.display());

    Ok(())
}

/// Execute the `serve` command - start the web server.
async fn cmd_serve(args: cli::ServeArgs) -> Result<()> {
    let config = server::ServerConfig {
        host: args.host,
        port: args.port,
        feed: args.feed,
        map: MapConfig::new(resolve_token(args.token)?),
    };
    let client = build_client(args.usgs_url, args.plates_url)?;

    server::run_server(config, client).await
}

/// Build the feed client, applying the optional feed URL overrides.
fn build_client(usgs_url: Option<String>, plates_url: Option<String>) -> Result<FeedClient> {
    let mut client = FeedClient::new().context("failed to create feed client")?;
    if let Some(url) = usgs_url {
        client = client.with_base_url(url);
    }
    if let Some(url) = plates_url {
        client = client.with_plates_url(url);
    }
    Ok(client)
}

/// Resolve the Mapbox token from the flag or the environment.
fn resolve_token(flag: Option<String>) -> Result<String> {
    flag.or_else(|| std::env::var("MAPBOX_TOKEN").ok())
        .context("a Mapbox access token is required (pass --token or set MAPBOX_TOKEN)")
}
