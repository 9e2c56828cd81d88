//! CLI definitions.

pub mod commands;
pub mod context;

use clap::{Parser, Subcommand, ValueEnum};
use daytrader_core::types::Timeframe;
use daytrader_data::Disambiguation;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "daytrader")]
#[command(author, version, about = "Day-trading analysis terminal")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    /// Log level (overrides the configuration file)
    #[arg(short, long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// What to do when a query matches several tickers.
#[derive(Clone, Copy, ValueEnum)]
pub enum PickArg {
    /// Use the first match
    First,
    /// Use every match
    All,
    /// Ask which match to use
    Prompt,
}

impl From<PickArg> for Disambiguation {
    fn from(pick: PickArg) -> Self {
        match pick {
            PickArg::First => Disambiguation::First,
            PickArg::All => Disambiguation::All,
            PickArg::Prompt => Disambiguation::Prompt,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show ticker table matches for a query
    Lookup(LookupArgs),
    /// Analyze one stock
    Analyze(AnalyzeArgs),
    /// Analyze several stocks and print a summary table
    Scan(ScanArgs),
    /// Show recent headlines for a stock
    News(NewsArgs),
    /// Record and review trades
    #[command(subcommand)]
    Journal(JournalCommand),
    /// Live watchlist in the terminal
    Dashboard(DashboardArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct LookupArgs {
    /// Company name, synonym or symbol
    pub query: String,

    /// Show how the query resolves with this strategy
    #[arg(long, value_enum)]
    pub pick: Option<PickArg>,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Company name, synonym or symbol
    pub query: String,

    /// Multiple-match handling (defaults to the configuration)
    #[arg(long, value_enum)]
    pub pick: Option<PickArg>,

    /// Intervals to try in order (comma-separated, e.g. 1h,1d)
    #[arg(short, long, value_delimiter = ',')]
    pub interval: Vec<Timeframe>,

    /// Analyze a CSV price file instead of fetching
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Keep prices in their quote currency
    #[arg(long)]
    pub no_convert: bool,

    /// Also show headlines
    #[arg(long)]
    pub news: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}

#[derive(clap::Args)]
pub struct ScanArgs {
    /// Queries to analyze (separate with commas or spaces)
    #[arg(required = true, value_delimiter = ',')]
    pub queries: Vec<String>,

    /// Multiple-match handling; `prompt` is treated as `first`
    #[arg(long, value_enum)]
    pub pick: Option<PickArg>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}

#[derive(clap::Args)]
pub struct NewsArgs {
    /// Company name, synonym or symbol
    pub query: String,

    /// Number of headlines (defaults to the configuration)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
}

#[derive(Subcommand)]
pub enum JournalCommand {
    /// Record a closed trade
    Add(JournalAddArgs),
    /// List recorded trades
    List {
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        output: String,
    },
    /// Win rate and P/L statistics
    Summary,
}

#[derive(clap::Args)]
pub struct JournalAddArgs {
    /// Traded symbol
    pub symbol: String,

    /// Entry price
    #[arg(long)]
    pub entry: String,

    /// Exit price
    #[arg(long)]
    pub exit: String,

    /// Quantity, negative for a short
    #[arg(long, allow_hyphen_values = true)]
    pub qty: String,

    /// Trade date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<String>,

    /// Setup or strategy label
    #[arg(long, default_value = "")]
    pub setup: String,

    /// Free-form note
    #[arg(long, default_value = "")]
    pub note: String,
}

#[derive(clap::Args)]
pub struct DashboardArgs {
    /// Queries to watch (defaults to the configured watchlist)
    #[arg(value_delimiter = ',')]
    pub queries: Vec<String>,
}
