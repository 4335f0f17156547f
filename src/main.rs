use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use stx::index::{self, IndexConfig, TextIndex};
use stx::output;
use stx::query::QueryExecutor;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use termcolor::ColorChoice;

#[derive(Parser)]
#[command(name = "stx")]
#[command(about = "Exact substring search backed by a linear-time suffix tree")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Pattern to search for (when no subcommand is given)
    query: Vec<String>,

    /// File to index (`-` reads standard input)
    #[arg(short, long, default_value = "-", global = true)]
    path: PathBuf,

    #[command(flatten)]
    options: IndexOptions,

    #[command(flatten)]
    display: DisplayOptions,
}

#[derive(clap::Args, Clone, Copy)]
struct IndexOptions {
    /// Match case-insensitively (ASCII letters)
    #[arg(short = 'i', long, global = true)]
    ignore_case: bool,

    /// Index content that looks binary
    #[arg(long, global = true)]
    binary: bool,

    /// Refuse texts larger than this many bytes
    #[arg(long, global = true)]
    max_size: Option<u64>,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(clap::Args, Clone, Copy)]
struct DisplayOptions {
    /// Only print the number of matches
    #[arg(short, long, global = true)]
    count: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Print the source name above its matches instead of on every line
    #[arg(long, global = true)]
    heading: bool,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    color: ColorWhen,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the text for one or more patterns
    Find {
        /// Patterns to search for
        #[arg(required = true)]
        patterns: Vec<String>,
    },
    /// Show index statistics
    Stats {
        /// File to index (overrides `--path`)
        file: Option<PathBuf>,
    },
    /// Print the suffix tree, one edge per line
    Tree {
        /// File to index (overrides `--path`)
        file: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorWhen {
    Never,
    Auto,
    Always,
}

impl From<ColorWhen> for ColorChoice {
    fn from(when: ColorWhen) -> Self {
        match when {
            ColorWhen::Never => ColorChoice::Never,
            ColorWhen::Auto => ColorChoice::Auto,
            ColorWhen::Always => ColorChoice::Always,
        }
    }
}

impl IndexOptions {
    fn config(&self) -> IndexConfig {
        let defaults = IndexConfig::default();
        IndexConfig {
            case_insensitive: self.ignore_case,
            allow_binary: self.binary,
            max_text_size: self.max_size.unwrap_or(defaults.max_text_size),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("stx: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether anything was found (always `true` for non-search commands)
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Some(Commands::Find { patterns }) => search(&cli.path, &patterns, cli.options, cli.display),
        Some(Commands::Stats { file }) => {
            let index = open(file.as_deref().unwrap_or(&cli.path), cli.options)?;
            index::stats::show_stats(&index, cli.display.json)?;
            Ok(true)
        }
        Some(Commands::Tree { file }) => {
            let index = open(file.as_deref().unwrap_or(&cli.path), cli.options)?;
            index::stats::show_tree(&index)?;
            Ok(true)
        }
        None => {
            if cli.query.is_empty() {
                bail!("no pattern given (try `stx find <PATTERN> -p <FILE>`)");
            }
            // Direct query mode: the words form one pattern
            let pattern = cli.query.join(" ");
            search(&cli.path, &[pattern], cli.options, cli.display)
        }
    }
}

fn open(path: &Path, options: IndexOptions) -> Result<TextIndex> {
    let index = TextIndex::open(path, options.config(), options.quiet)?;
    if !options.quiet && index.meta.build_millis > 1000 {
        eprintln!(
            "stx: indexed {} bytes in {} ms",
            index.meta.text_size, index.meta.build_millis
        );
    }
    Ok(index)
}

fn search(
    path: &Path,
    patterns: &[String],
    options: IndexOptions,
    display: DisplayOptions,
) -> Result<bool> {
    let index = open(path, options)?;
    let executor = QueryExecutor::new(&index);
    let choice = ColorChoice::from(display.color);

    if display.count {
        let counts = executor.count_many(patterns);
        output::print_counts(&counts, choice)?;
        return Ok(counts.iter().any(|(_, count)| *count > 0));
    }

    let results = executor.execute_many(patterns);
    if display.json {
        output::print_json(&results)?;
    } else {
        output::print_matches(&index.meta.source, &results, choice, display.heading)?;
    }

    Ok(results.iter().any(|r| !r.matches.is_empty()))
}
