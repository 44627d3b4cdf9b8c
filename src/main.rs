//! Noteworthy CLI - Eclipse release notes to the clipboard
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use noteworthy::logging::{self, Verbosity};
use noteworthy::{present, workflow, HttpFetcher, Query, Settings, SystemClipboard};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "noteworthy")]
#[command(author, version, about = "Copy an Eclipse New and Noteworthy entry to the clipboard as Markdown", long_about = None)]
#[command(subcommand_negates_reqs = true, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Eclipse version, e.g. 4.30
    #[arg(short = 'e', long, visible_alias = "eversion", required = true)]
    eclipse_version: Option<String>,

    /// Title or part of a title to match
    #[arg(short = 't', long, visible_alias = "title", required = true)]
    title_to_match: Option<String>,

    /// Page to match; matches every page when omitted
    #[arg(short = 'p', long, visible_alias = "page", default_value = "")]
    page_to_match: String,

    /// Settings file (defaults to ./noteworthy.toml or ~/.config/noteworthy/noteworthy.toml)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Read EclipseVersion, TitleToMatch and PageToMatch from a key=value file
    Args {
        /// Arguments file (defaults to .vscode/args next to the executable)
        file: Option<PathBuf>,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli {
        command,
        eclipse_version,
        title_to_match,
        page_to_match,
        settings,
        verbose,
        quiet,
    } = Cli::parse();

    logging::init(Verbosity::from_flags(quiet, verbose));

    let query = match command {
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "noteworthy",
                &mut std::io::stdout(),
            );
            return Ok(());
        }
        Some(Commands::Args { file }) => {
            let path = match file {
                Some(path) => path,
                None => Query::default_args_file()?,
            };
            Query::from_args_file(&path)
                .with_context(|| format!("failed to load arguments from {}", path.display()))?
        }
        None => Query::new(
            eclipse_version.unwrap_or_default(),
            title_to_match.unwrap_or_default(),
            page_to_match,
        )?,
    };

    tracing::info!("EclipseVersion: {}", query.eclipse_version);
    tracing::info!("TitleToMatch: {}", query.title_to_match);
    tracing::info!("PageToMatch: {}", query.page_to_match);

    let settings = Settings::load(settings.as_deref()).context("failed to load settings")?;
    let fetcher = HttpFetcher::new(&settings.http).context("failed to build HTTP client")?;
    let urls = settings.news.page_urls(&query.eclipse_version);

    let matches = workflow::collect_matches(&fetcher, &urls, &query).await;

    let mut clipboard = SystemClipboard::new();
    let outcome = present::present(&matches, &mut clipboard, &mut std::io::stdout().lock())?;
    tracing::debug!(?outcome, "finished");

    Ok(())
}
