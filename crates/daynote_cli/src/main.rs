//! `daynote` command-line entry point.
//!
//! # Responsibility
//! - Map subcommands onto `daynote_core` service calls.
//! - Own process exit codes: 0 success, 1 no search result, 2 error.

use clap::{Parser, Subcommand};
use daynote_core::{
    default_log_level, init_logging, Clock, Config, DayFileRepository, FsDayFileRepository,
    MemoryLayout, MemoryService, SearchError, SearchQuery, SystemClock,
};
use log::{info, warn};
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_SUMMARY_LINES: usize = 20;

#[derive(Parser, Debug)]
#[command(name = "daynote", about = "Dated markdown memory files")]
#[command(version = daynote_core::core_version())]
struct Cli {
    /// Memory root directory
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file (defaults to `<root>/daynote.toml` when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Create today's memory file if missing
    Init,

    /// Append an entry with timestamp
    Add {
        /// Entry text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Search memory files by keyword
    Search {
        keyword: String,

        /// Stop after this many matching lines
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the Summary section of today's file
    Today {
        #[arg(long, default_value_t = DEFAULT_SUMMARY_LINES)]
        max_lines: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let root = std::path::absolute(&cli.root)?;
    let config = Config::load(&root, cli.config.as_deref())?;
    let layout = config.layout(root);
    start_logging(cli.log_level.as_deref(), &config, &layout);

    let template_path = layout.template_path.clone();
    let service = MemoryService::new(FsDayFileRepository::new(layout), SystemClock)
        .with_template(template_path);

    match cli.command {
        Commands::Init => {
            let outcome = service.ensure_today_file()?;
            if outcome.is_created() {
                println!("Created {}", outcome.path().display());
            } else {
                println!("Exists {}", outcome.path().display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Add { message } => {
            let outcome = service.add_entry(&message.join(" "))?;
            if outcome.file.is_created() {
                println!("Created {}", outcome.file.path().display());
            }
            println!("Appended to {}", outcome.file.path().display());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Search { keyword, limit } => {
            let query = SearchQuery::new(keyword).with_limit(limit.or(config.search_limit));
            let status = search_command(&service, &query, &mut io::stdout().lock())?;
            Ok(status.exit_code())
        }
        Commands::Today { max_lines } => {
            let lines = service.today_summary(Some(max_lines))?;
            println!("Summary for {}:", service.today_date());
            for line in lines {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// How a search run ended; drives the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchStatus {
    Found,
    NoMatch,
    MissingDirectory,
}

impl SearchStatus {
    fn exit_code(self) -> ExitCode {
        match self {
            Self::Found => ExitCode::SUCCESS,
            Self::NoMatch | Self::MissingDirectory => ExitCode::FAILURE,
        }
    }
}

/// Prints every hit as `file:line: text` to `out`.
fn search_command<R: DayFileRepository, C: Clock>(
    service: &MemoryService<R, C>,
    query: &SearchQuery,
    out: &mut impl Write,
) -> Result<SearchStatus, Box<dyn Error>> {
    let hits = match service.search(query) {
        Ok(hits) => hits,
        Err(SearchError::MissingDirectory(_)) => {
            writeln!(out, "No memory directory found.")?;
            return Ok(SearchStatus::MissingDirectory);
        }
        Err(err) => return Err(err.into()),
    };
    for hit in &hits {
        writeln!(out, "{hit}")?;
    }
    if hits.is_empty() {
        Ok(SearchStatus::NoMatch)
    } else {
        Ok(SearchStatus::Found)
    }
}

// Logging is best-effort; a broken log dir must not block note taking.
fn start_logging(cli_level: Option<&str>, config: &Config, layout: &MemoryLayout) {
    let level = log_level(cli_level, config);
    let log_dir = config.log_dir(layout);
    match init_logging(level, &log_dir) {
        Ok(()) => info!(
            "event=cli_start module=cli status=ok root={}",
            layout.root.display()
        ),
        Err(err) => {
            eprintln!("warning: logging disabled: {err}");
            warn!("event=cli_start module=cli status=error error={err}");
        }
    }
}

// `--log-level` wins over the config file.
fn log_level<'a>(cli_level: Option<&'a str>, config: &'a Config) -> &'a str {
    cli_level
        .or(config.log_level.as_deref())
        .unwrap_or(default_log_level())
}
