use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fieldleak")]
#[command(about = "Finds Go converter functions that drop fields", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check converter functions for unread input fields and unwritten output fields
    Check(CheckArgs),

    /// Initialize a .fieldleak.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to check
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Output format (defaults to the config file's, then terminal)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file (defaults to the nearest .fieldleak.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Analyze functions with a receiver
    #[arg(long = "include-methods")]
    pub include_methods: bool,

    /// Analyze *_test.go files
    #[arg(long = "include-tests")]
    pub include_tests: bool,

    /// Analyze files under vendor/
    #[arg(long = "include-vendor")]
    pub include_vendor: bool,

    /// Exit with status 0 even when leaks are found
    #[arg(long = "exit-zero")]
    pub exit_zero: bool,

    /// Disable colored output
    #[arg(long)]
    pub plain: bool,

    /// Increase verbosity level (-v: debug, -vv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

impl OutputFormat {
    /// Parse a format name as written in `.fieldleak.toml`.
    pub fn from_config_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}
