//! Command-line entry point: load inputs, fetch stats, write the README.

use crate::cache::CacheStore;
use crate::compose::merge_ascii_and_info;
use crate::config::ProfileConfig;
use crate::github::{DEFAULT_API_URL, GithubClient};
use crate::layout::build_info_lines;
use crate::logging;
use crate::readme::{load_ascii_art, render_readme};
use crate::stats::fetch_stats;
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Generate a neofetch-style GitHub profile README
#[derive(Parser, Debug)]
#[command(name = "profilefetch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// ASCII art shown to the left of the info panel
    #[arg(long, default_value = "ascii.txt")]
    pub ascii: PathBuf,

    /// Profile configuration (JSON)
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Where to write the generated README
    #[arg(short, long, default_value = "README.md")]
    pub output: PathBuf,

    /// Directory holding the per-user lines-of-code cache
    #[arg(long, default_value = "cache")]
    pub cache_dir: PathBuf,

    /// GitHub API root; GraphQL is served under `<api-url>/graphql`
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Access token; without one the lines-of-code count is skipped
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Report API and cache activity on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    generate(&cli).await
}

/// Build the README described by `cli`. Nothing is written unless every
/// step before the final write succeeds.
pub async fn generate(cli: &Cli) -> Result<()> {
    let art = load_ascii_art(&cli.ascii)?;
    let config = ProfileConfig::from_file(&cli.config)?;

    info!("fetching GitHub stats for {}", config.username);
    let client = GithubClient::new(&cli.api_url, cli.token.clone())
        .context("Failed to build HTTP client")?;
    let cache_store = CacheStore::new(&cli.cache_dir, &config.username);
    let stats = fetch_stats(&client, &config.username, &cache_store).await;

    let today = Utc::now().date_naive();
    let info_lines = build_info_lines(&config, &stats, today);
    let merged = merge_ascii_and_info(&art, &info_lines);
    let readme = render_readme(&config.username, &merged);

    fs::write(&cli.output, readme)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    println!("Generated {}", cli.output.display());

    Ok(())
}
