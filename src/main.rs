//! dirtally - list, sort and categorize directory contents.
//!
//! Usage:
//!   dirtally list [PATH]      Sorted listing of one directory
//!   dirtally count [PATH]     Count files per extension category
//!   dirtally stat PATH        Size and modification time of one entry
//!   dirtally --help           Show help

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, eyre};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use dirtally_core::format::{format_date, format_entry_size};
use dirtally_scan::{
    CategoryMap, CategoryScanner, ExtensionRule, FileEntry, ScanConfig, SortKey, list_and_sort,
    stat_entry, validate_root,
};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "DIRTALLY_LOG";

#[derive(Parser)]
#[command(
    name = "dirtally",
    version,
    about = "List, sort and categorize directory contents",
    long_about = "dirtally lists directories the way a file browser does and \
                  tallies whole subtrees into extension categories."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List one directory, directories first
    List {
        /// Directory to list
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Sort order
        #[arg(short, long, default_value = "name")]
        sort: SortArg,

        /// Largest files first (size sort only)
        #[arg(short, long)]
        desc: bool,

        /// Include hidden entries
        #[arg(short, long)]
        all: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Count files below a directory per extension category
    Count {
        /// Root of the subtree
        #[arg(default_value = ".")]
        path: PathBuf,

        /// JSON file mapping category names to extension lists
        #[arg(short, long)]
        categories: Option<PathBuf>,

        /// Category definition NAME=ext[,ext...] (repeatable)
        #[arg(long = "category", value_name = "NAME=EXTS")]
        category: Vec<String>,

        /// Use the text after the last dot as the extension
        #[arg(long)]
        last_dot: bool,

        /// Descend into symlinked directories (no cycle detection)
        #[arg(long)]
        follow_symlinks: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show size and modification time of a path
    Stat {
        /// File or directory
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum SortArg {
    #[default]
    Name,
    Size,
    Modified,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortKey::Name,
            SortArg::Size => SortKey::Size,
            SortArg::Modified => SortKey::Modified,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Command::List {
            path,
            sort,
            desc,
            all,
            format,
        } => run_list(&path, sort.into(), desc, all, format)?,
        Command::Count {
            path,
            categories,
            category,
            last_dot,
            follow_symlinks,
            format,
        } => {
            let categories = load_categories(categories.as_deref(), &category)?;
            let rule = if last_dot {
                ExtensionRule::LastDot
            } else {
                ExtensionRule::FirstDot
            };
            let config = ScanConfig::builder()
                .root(path)
                .extension_rule(rule)
                .follow_symlinks(follow_symlinks)
                .build()
                .map_err(|e| eyre!("Invalid scan configuration: {e}"))?;
            run_count(config, categories, format).await?;
        }
        Command::Stat { path, format } => run_stat(&path, format)?,
    }

    Ok(())
}

/// Install a stderr subscriber filtered by `DIRTALLY_LOG`.
fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("dirtally=debug,dirtally_scan=debug,dirtally_core=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// List and sort one directory.
fn run_list(
    path: &Path,
    key: SortKey,
    descending: bool,
    include_hidden: bool,
    format: OutputFormat,
) -> Result<()> {
    let entries = list_and_sort(path, include_hidden, key, descending)
        .with_context(|| format!("Cannot list {}", path.display()))?;

    match format {
        OutputFormat::Text => {
            for entry in &entries {
                print_entry(entry);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

/// Scan a subtree and print per-category counts.
async fn run_count(config: ScanConfig, categories: CategoryMap, format: OutputFormat) -> Result<()> {
    let root = config.root.clone();
    check_root(&root)?;
    debug!(root = %root.display(), categories = categories.len(), "starting category scan");

    let scanner = CategoryScanner::new();
    let handle = scanner.start(config, Arc::new(categories));

    let Some(report) = handle.wait().await else {
        return Err(eyre!("Scan of {} did not complete", root.display()));
    };

    match format {
        OutputFormat::Text => {
            println!("{}", "─".repeat(40));
            println!(" {}", report.root.display());
            println!(
                " {} files in {} directories, scanned in {:.2}s",
                report.stats.files_seen,
                report.stats.dirs_scanned,
                report.scan_duration.as_secs_f64()
            );
            println!("{}", "─".repeat(40));
            for (category, count) in report.counts.iter() {
                println!(" {category:<20} {count:>10}");
            }
            println!(" {:<20} {:>10}", "(unmatched)", report.stats.files_unmatched());

            if report.has_warnings() {
                println!();
                println!("{} warning(s) during scan", report.warnings.len());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Fail with the typed scan error when `root` cannot be scanned.
fn check_root(root: &Path) -> Result<()> {
    validate_root(root).with_context(|| format!("Cannot scan {}", root.display()))
}

/// Show a single entry.
fn run_stat(path: &Path, format: OutputFormat) -> Result<()> {
    let entry = stat_entry(path).with_context(|| format!("Cannot stat {}", path.display()))?;

    match format {
        OutputFormat::Text => print_entry(&entry),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
    }

    Ok(())
}

/// Build the category map from a JSON file and inline definitions.
fn load_categories(file: Option<&Path>, definitions: &[String]) -> Result<CategoryMap> {
    let mut categories = match file {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read {}", path.display()))?;
            CategoryMap::from_json_str(&json)
                .with_context(|| format!("Invalid categories in {}", path.display()))?
        }
        None if definitions.is_empty() => CategoryMap::default_categories(),
        None => CategoryMap::new(),
    };

    for definition in definitions {
        categories.insert_definition(definition)?;
    }

    Ok(categories)
}

fn print_entry(entry: &FileEntry) {
    let size = format_entry_size(entry).unwrap_or_else(|| "-".to_string());
    let marker = if entry.is_dir() { "/" } else { "" };
    println!(
        "{:<19}  {:>10}  {}{}",
        format_date(entry.modified),
        size,
        entry.name,
        marker
    );
}
