//! Sitetree main entry point
//!
//! Command-line interface: crawl a single origin and print the resulting
//! site graph as an indented tree.

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Parser;
use sitetree::config::CrawlConfig;
use sitetree::crawler::crawl;
use sitetree::output::render;
use sitetree::SiteTreeError;
use tracing_subscriber::EnvFilter;

/// Sitetree: map a website into a printable page tree
///
/// Crawls every page reachable on the seed URL's host, records the assets
/// and outbound links found on each page, and prints the resulting site
/// graph as an indented tree.
#[derive(Parser, Debug)]
#[command(name = "sitetree")]
#[command(version)]
#[command(about = "Single-origin web crawler with tree output", long_about = None)]
struct Cli {
    /// Seed URL to crawl; must start with http:// or https://
    #[arg(long, value_name = "URL")]
    site: String,

    /// Maximum number of pages to crawl
    #[arg(long, default_value_t = 100)]
    pages: usize,

    /// Number of fetch workers
    #[arg(long, default_value_t = 8)]
    workers: usize,

    /// Write a CPU flamegraph to this file on exit
    #[arg(long, value_name = "PATH")]
    cpuprofile: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if !cli.site.starts_with("http://") && !cli.site.starts_with("https://") {
        return Err(SiteTreeError::Argument(
            "--site must be a fully formed http:// or https:// URL".to_string(),
        )
        .into());
    }

    let profiler = match &cli.cpuprofile {
        Some(_) => Some(pprof::ProfilerGuard::new(99)?),
        None => None,
    };

    let config = CrawlConfig {
        workers: cli.workers,
        page_budget: cli.pages,
        ..CrawlConfig::default()
    };

    tracing::info!(
        site = %cli.site,
        pages = cli.pages,
        workers = cli.workers,
        "starting crawl"
    );

    let root = crawl(&cli.site, config).await?;

    print!("{}", render(&root));

    if let (Some(path), Some(guard)) = (&cli.cpuprofile, profiler) {
        write_profile(path, &guard)?;
    }

    Ok(())
}

/// Sets up the tracing subscriber based on the verbosity flags
///
/// Logs go to stderr so the rendered tree on stdout stays clean.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitetree=info,warn"),
            1 => EnvFilter::new("sitetree=debug,info"),
            2 => EnvFilter::new("sitetree=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Writes the sampled CPU profile as a flamegraph
fn write_profile(
    path: &Path,
    guard: &pprof::ProfilerGuard<'_>,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = guard.report().build()?;
    let file = File::create(path)?;
    report.flamegraph(file)?;

    tracing::info!(path = %path.display(), "wrote CPU profile");
    Ok(())
}
