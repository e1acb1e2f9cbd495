#![forbid(unsafe_code)]

//! `rescuenet-build`: post-build and inspection commands for the site.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rescuenet_build::{
    BuildConfig, BuildError, CONFIG_FILE, check_content, optimize_file, route_rows,
};
use rescuenet_content::ContentStore;
use rescuenet_router::{RouteTable, compute_metadata};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rescuenet-build", version, about = "RescueNet site build tooling")]
struct Cli {
    /// Config file; missing means defaults.
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Make stylesheet links in the built HTML non-render-blocking.
    OptimizeHtml {
        /// Bundler output directory (overrides `html.dist_dir`).
        #[arg(long)]
        dist: Option<PathBuf>,
        /// Entry file inside the output directory (overrides `html.entry`).
        #[arg(long)]
        file: Option<String>,
        /// Report what would change without writing.
        #[arg(long)]
        dry_run: bool,
    },
    /// List the route table.
    Routes {
        #[arg(long)]
        json: bool,
    },
    /// Print the document metadata a path resolves to, as JSON.
    Meta { path: String },
    /// Validate the bundled datasets and print a summary as JSON.
    CheckContent {
        /// Date used to flag expired campaigns (default: today).
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Exit non-zero when the report has warnings.
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, BuildError> {
    match cli.command {
        Command::OptimizeHtml {
            dist,
            file,
            dry_run,
        } => {
            let mut config = BuildConfig::load(&cli.config)?;
            if let Some(dist) = dist {
                config.html.dist_dir = dist;
            }
            if let Some(file) = file {
                config.html.entry = file;
            }
            let report = optimize_file(&config.entry_path(), dry_run)?;
            if report.rewritten == 0 {
                tracing::warn!(path = %report.path.display(), "no blocking stylesheet links found");
            }
            println!(
                "{} stylesheet link(s) {} in {}",
                report.rewritten,
                if report.written { "deferred" } else { "would be deferred" },
                report.path.display()
            );
        }
        Command::Routes { json } => {
            let rows = route_rows(&RouteTable::standard());
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in rows {
                    println!("{:<16} {:<16} {}", row.path, row.name, row.title);
                }
            }
        }
        Command::Meta { path } => {
            let table = RouteTable::standard();
            let route = table.resolve(&path);
            if route.is_none() {
                tracing::warn!(%path, "no route matches; using default metadata");
            }
            let metadata = compute_metadata(route.and_then(|m| m.route.meta.as_ref()));
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
        Command::CheckContent { today, strict } => {
            let store = ContentStore::load()?;
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            let report = check_content(&store, today);
            for slug in &report.expired_campaigns {
                tracing::warn!(%slug, %today, "active campaign is past its end date");
            }
            for slug in &report.orphan_campaigns {
                tracing::warn!(%slug, "campaign references an unknown disaster");
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
            if strict && report.has_warnings() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
