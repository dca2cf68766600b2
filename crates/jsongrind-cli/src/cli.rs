//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// jsongrind - grammar-driven JSON parser fuzzing
///
/// Generates random JSON documents from the RFC 8259 grammar and feeds
/// them to a parser executable over stdin, recording acceptance and
/// timing for every run.
#[derive(Parser, Debug)]
#[command(
    name = "jsongrind",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "JSONGRIND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fuzz a parser executable and write an acceptance report
    Run(RunArgs),

    /// Print generated documents to stdout without running a subject
    Sample(SampleArgs),

    /// Check the generator against the built-in reference parser
    Selfcheck(SelfcheckArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the parser executable under test
    #[arg(value_name = "SUBJECT")]
    pub subject: PathBuf,

    /// Number of documents to generate and feed to the subject
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub examples: Option<u32>,

    /// RNG seed for the generator (fresh entropy if not specified)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Recursion budget for each generated document
    #[arg(long, value_name = "BUDGET")]
    pub max_fuel: Option<u32>,

    /// Weight of escape sequences among string characters (0 disables escapes)
    #[arg(long, value_name = "WEIGHT")]
    pub escape_weight: Option<u32>,

    /// Kill the subject if a single run exceeds this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<f64>,

    /// Stop the session at the first failing run
    #[arg(long)]
    pub fail_fast: bool,

    /// Re-parse each document with the reference parser before feeding it
    #[arg(long)]
    pub validate: bool,

    /// Directory to write the acceptance report into
    #[arg(long, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,
}

/// Arguments for the sample command
#[derive(Parser, Debug)]
pub struct SampleArgs {
    /// Number of documents to print (default 10)
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub examples: Option<u32>,

    /// Separator line printed after each document (documents may span lines)
    #[arg(short, long, value_name = "TEXT", allow_hyphen_values = true)]
    pub delimiter: Option<String>,

    /// RNG seed for the generator (fresh entropy if not specified)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Recursion budget for each generated document
    #[arg(long, value_name = "BUDGET")]
    pub max_fuel: Option<u32>,

    /// Weight of escape sequences among string characters (0 disables escapes)
    #[arg(long, value_name = "WEIGHT")]
    pub escape_weight: Option<u32>,
}

/// Arguments for the selfcheck command
#[derive(Parser, Debug)]
pub struct SelfcheckArgs {
    /// Number of documents to generate and check (default 1000)
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub examples: Option<u32>,

    /// RNG seed for the generator (fresh entropy if not specified)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Recursion budget for each generated document
    #[arg(long, value_name = "BUDGET")]
    pub max_fuel: Option<u32>,

    /// Weight of escape sequences among string characters (0 disables escapes)
    #[arg(long, value_name = "WEIGHT")]
    pub escape_weight: Option<u32>,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        use is_terminal::IsTerminal;
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
