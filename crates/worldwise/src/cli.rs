//! Clap derive structures for the `worldwise` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// worldwise -- keep track of the cities you have visited
#[derive(Debug, Parser)]
#[command(
    name = "worldwise",
    version,
    about = "Keep track of the cities you have visited",
    long_about = "Log visited cities against a cities collection service.\n\n\
        Click-to-create is expressed with --lat/--lng or a shared --link;\n\
        cities are reverse-geocoded before they are stored.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "WORLDWISE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Cities collection URL (overrides config)
    #[arg(long, env = "WORLDWISE_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Reverse-geocoding URL (overrides config)
    #[arg(long, env = "WORLDWISE_GEOCODING_URL", global = true, hide_env = true)]
    pub geocoding_url: Option<String>,

    /// Output format (overrides config)
    #[arg(long, short = 'o', env = "WORLDWISE_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "WORLDWISE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage visited cities
    #[command(alias = "c")]
    Cities(CitiesArgs),

    /// List visited countries
    Countries(CountriesArgs),

    /// Show where the map is focused and its markers
    Map(MapArgs),

    /// Sign in with the demo account
    Login(LoginArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Cities ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CitiesArgs {
    #[command(subcommand)]
    pub command: CitiesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CitiesCommand {
    /// List visited cities
    #[command(alias = "ls")]
    List,

    /// Show one city
    Get {
        /// City id
        id: u64,
    },

    /// Log a new city at a position
    Create(CreateCityArgs),

    /// Delete a city
    #[command(alias = "rm")]
    Delete {
        /// City id
        id: u64,
    },
}

#[derive(Debug, Args)]
pub struct CreateCityArgs {
    /// Latitude of the clicked point
    #[arg(long, allow_negative_numbers = true, requires = "lng", conflicts_with = "link")]
    pub lat: Option<f64>,

    /// Longitude of the clicked point
    #[arg(long, allow_negative_numbers = true, requires = "lat", conflicts_with = "link")]
    pub lng: Option<f64>,

    /// Shared link carrying the position, e.g. "/app/form?lat=38.7&lng=-9.1"
    #[arg(long)]
    pub link: Option<String>,

    /// City name (overrides the geocoded name)
    #[arg(long)]
    pub name: Option<String>,

    /// Visit date, YYYY-MM-DD or RFC 3339 (defaults to now)
    #[arg(long)]
    pub date: Option<String>,

    /// Notes about the trip
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Skip reverse geocoding (requires --name)
    #[arg(long, requires = "name")]
    pub no_geocode: bool,
}

// ── Countries ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CountriesArgs {
    #[command(subcommand)]
    pub command: CountriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CountriesCommand {
    /// List countries of visited cities
    #[command(alias = "ls")]
    List,
}

// ── Map ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MapArgs {
    /// Start from this link instead of the city list
    #[arg(long)]
    pub link: Option<String>,

    /// Ask the device for its position
    #[arg(long)]
    pub use_my_position: bool,
}

// ── Login ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(long, env = "WORLDWISE_EMAIL")]
    pub email: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(long, env = "WORLDWISE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display current resolved configuration
    Show,

    /// Create the config file
    Init,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
