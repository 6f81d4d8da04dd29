//! Command-line interface definitions.
//!
//! Uses clap derive API for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::client::FeedSpec;

/// Render USGS earthquake and tectonic-plate feeds as an interactive map.
#[derive(Parser, Debug)]
#[command(name = "quakemap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    pub quiet: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch both feeds once and write the map page to a file
    Render(RenderArgs),

    /// Serve the map page over HTTP, refetching on each request
    Serve(ServeArgs),
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// USGS summary feed to map (band_window, e.g. all_week, 2.5_day)
    #[arg(long, default_value = "all_week", value_parser = parse_feed)]
    pub feed: FeedSpec,

    /// Mapbox access token (falls back to $MAPBOX_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Override the USGS base URL (e.g. a mirror)
    #[arg(long)]
    pub usgs_url: Option<String>,

    /// Override the plate-boundary feed URL
    #[arg(long)]
    pub plates_url: Option<String>,

    /// Output file for the rendered page
    #[arg(long, short = 'o', default_value = "quakemap.html")]
    pub out: PathBuf,
}

/// Arguments for the `serve` command.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short = 'p', default_value = "8080")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// USGS summary feed to map (band_window, e.g. all_week, 2.5_day)
    #[arg(long, default_value = "all_week", value_parser = parse_feed)]
    pub feed: FeedSpec,

    /// Mapbox access token (falls back to $MAPBOX_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Override the USGS base URL (e.g. a mirror)
    #[arg(long)]
    pub usgs_url: Option<String>,

    /// Override the plate-boundary feed URL
    #[arg(long)]
    pub plates_url: Option<String>,
}

/// Parse a feed spec from string.
fn parse_feed(s: &str) -> Result<FeedSpec, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_defaults() {
        let cli = Cli::parse_from(["quakemap", "render"]);
        match cli.command {
            Command::Render(args) => {
                assert_eq!(args.feed, FeedSpec::ALL_WEEK);
                assert_eq!(args.out, PathBuf::from("quakemap.html"));
                assert!(args.token.is_none());
            }
            Command::Serve(_) => panic!("expected render"),
        }
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::parse_from([
            "quakemap", "serve", "--port", "9090", "--feed", "2.5_day", "--token", "tok",
        ]);
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.port, 9090);
                assert_eq!(args.feed.to_string(), "2.5_day");
                assert_eq!(args.token.as_deref(), Some("tok"));
            }
            Command::Render(_) => panic!("expected serve"),
        }
    }
}
