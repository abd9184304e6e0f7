use clap::{Parser, Subcommand, ValueEnum};
use mirrorsync_core::comparison::CompareMethod;
use std::path::PathBuf;

/// One-way directory mirror
///
/// Periodically makes a target directory an exact copy of a source directory
/// and logs every change it applies
#[derive(Parser, Debug)]
#[command(name = "mirrorsync")]
#[command(about, long_about = None, version)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Enable debug diagnostics
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors; do not echo action lines
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Preview changes without executing (dry-run)
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Gitignore-style pattern to exclude from both trees (repeatable)
    #[arg(short, long, global = true, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// How file contents are compared
    #[arg(long, global = true, value_enum)]
    pub compare: Option<CompareMode>,

    /// Use specific config file
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore all config files
    #[arg(long, global = true, conflicts_with = "config")]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mirror SOURCE into TARGET repeatedly until interrupted
    Run {
        /// Directory to copy from
        source: PathBuf,

        /// Directory to keep identical to SOURCE
        target: PathBuf,

        /// Append action lines to this file
        #[arg(short, long, value_name = "PATH")]
        log_file: Option<PathBuf>,

        /// Seconds between cycles [default: 300]
        #[arg(short, long, value_name = "SECS")]
        interval: Option<u64>,
    },

    /// Mirror SOURCE into TARGET once and exit
    Once {
        /// Directory to copy from
        source: PathBuf,

        /// Directory to make identical to SOURCE
        target: PathBuf,

        /// Append action lines to this file
        #[arg(short, long, value_name = "PATH")]
        log_file: Option<PathBuf>,
    },

    /// List the actions the next cycle would apply, without making changes
    Status {
        /// Directory to copy from
        source: PathBuf,

        /// Directory to compare against SOURCE
        target: PathBuf,
    },

    /// Show the merged configuration
    Config,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompareMode {
    /// Stream both files and compare byte by byte
    Bytes,
    /// Compare SHA-256 digests
    Checksum,
}

impl From<CompareMode> for CompareMethod {
    fn from(mode: CompareMode) -> Self {
        match mode {
            CompareMode::Bytes => Self::Bytes,
            CompareMode::Checksum => Self::Checksum,
        }
    }
}
