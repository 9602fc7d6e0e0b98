//! Clap derive structures for the `jman` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// jman -- browse dashboard servers, sites and plugins
#[derive(Debug, Parser)]
#[command(
    name = "jman",
    version,
    about = "Browse jman dashboard servers, sites and plugins from the command line",
    long_about = "Reads servers, sites and plugins from the jman dashboard API.\n\n\
        Data is cached on disk after every successful fetch; later runs start\n\
        from the cache until `jman refresh` (or --refresh) pulls fresh data.",
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
    /// API base URL, absolute or relative to --origin (overrides config)
    #[arg(long, env = "JMAN_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Origin a relative base URL is resolved against (overrides config)
    #[arg(long, env = "JMAN_ORIGIN", global = true)]
    pub origin: Option<String>,

    /// Directory for the persistent cache (overrides config)
    #[arg(long, env = "JMAN_CACHE_DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Keep fetched data in memory only; never read or write the disk cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Fetch fresh data instead of starting from the cache
    #[arg(long, short = 'r', global = true)]
    pub refresh: bool,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "JMAN_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "JMAN_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "JMAN_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
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

#[derive(Debug, Clone, ValueEnum)]
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
    /// Overview: counts plus server and site tables
    #[command(alias = "h")]
    Home,

    /// List servers
    #[command(alias = "srv")]
    Servers,

    /// List sites
    #[command(alias = "s")]
    Sites(SitesArgs),

    /// Show one site with its server and plugins
    Site(SiteArgs),

    /// List plugins
    #[command(alias = "p")]
    Plugins(PluginsArgs),

    /// Fetch fresh data from the API and update the cache
    Refresh,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Resource arguments ───────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SitesArgs {
    /// Only sites hosted on this server
    #[arg(long)]
    pub server: Option<u64>,
}

#[derive(Debug, Args)]
pub struct SiteArgs {
    /// Site ID
    pub id: u64,
}

#[derive(Debug, Args)]
pub struct PluginsArgs {
    /// Only plugins installed on this site
    #[arg(long)]
    pub site: Option<u64>,

    /// Only plugins with an update available
    #[arg(long)]
    pub updates: bool,
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

    /// Show the effective configuration
    Show,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
