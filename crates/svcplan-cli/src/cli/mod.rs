//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

use svcplan_core::domain::{CategoryKey, RecommendationDirection};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "svcplan",
    bin_name = "svcplan",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Compose consulting services into an execution plan",
    long_about = "svcplan orders a selection of catalog services by phase and \
                  dependency, totals their price and suggests related services.",
    after_help = "EXAMPLES:\n\
        \x20 svcplan catalog --phase 1\n\
        \x20 svcplan plan analysis-workshop solution-design qa-testing\n\
        \x20 svcplan recommend implementation --direction dependents\n\
        \x20 svcplan completions bash > /usr/share/bash-completion/completions/svcplan",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the service catalog.
    #[command(
        visible_alias = "ls",
        about = "List catalog services",
        after_help = "EXAMPLES:\n\
            \x20 svcplan catalog\n\
            \x20 svcplan catalog --phase 2 --category innovate\n\
            \x20 svcplan catalog --format csv > services.csv\n\
            \x20 svcplan catalog --check"
    )]
    Catalog(CatalogArgs),

    /// Order a selection and total its price.
    #[command(
        visible_alias = "p",
        about = "Build an execution plan for selected services",
        after_help = "EXAMPLES:\n\
            \x20 svcplan plan kickoff solution-design\n\
            \x20 svcplan plan kickoff implementation --group category\n\
            \x20 svcplan --output-format json plan kickoff"
    )]
    Plan(PlanArgs),

    /// Recommend related services for a selection.
    #[command(
        visible_alias = "rec",
        about = "Recommend related services",
        after_help = "EXAMPLES:\n\
            \x20 svcplan recommend solution-design\n\
            \x20 svcplan recommend kickoff --direction dependents"
    )]
    Recommend(RecommendArgs),

    /// Toggle services interactively.
    #[command(
        visible_alias = "i",
        about = "Interactive composition session"
    )]
    Interactive(InteractiveArgs),

    /// Initialise an svcplan configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 svcplan init           # default location\n\
            \x20 svcplan init --force   # overwrite existing file\n\
            \x20 svcplan -c ./svcplan.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 svcplan completions bash > ~/.local/share/bash-completion/completions/svcplan\n\
            \x20 svcplan completions zsh  > ~/.zfunc/_svcplan\n\
            \x20 svcplan completions fish > ~/.config/fish/completions/svcplan.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the svcplan configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 svcplan config get recommendations.direction\n\
            \x20 svcplan config set catalog.path ./catalog\n\
            \x20 svcplan config list"
    )]
    Config(ConfigCommands),
}

// ── catalog ───────────────────────────────────────────────────────────────────

/// Arguments for `svcplan catalog`.
#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Only services in this phase.
    #[arg(long = "phase", value_name = "N", help = "Filter by phase")]
    pub phase: Option<u32>,

    /// Only services in this process category.
    #[arg(
        long = "category",
        value_enum,
        value_name = "CATEGORY",
        help = "Filter by process category"
    )]
    pub category: Option<CategoryArg>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,

    /// Report dependencies that point at unknown services.
    #[arg(long = "check", help = "Check the catalog for dangling dependencies")]
    pub check: bool,
}

/// Output format for the `catalog` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

/// Process category filter, including the catch-all group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum CategoryArg {
    Ideate,
    Innovate,
    Operate,
    Uncategorized,
}

impl From<CategoryArg> for CategoryKey {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Ideate => Self::Ideate,
            CategoryArg::Innovate => Self::Innovate,
            CategoryArg::Operate => Self::Operate,
            CategoryArg::Uncategorized => Self::Uncategorized,
        }
    }
}

// ── plan / recommend ──────────────────────────────────────────────────────────

/// Arguments for `svcplan plan`.
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Service ids to select.  Unknown ids are reported and skipped.
    #[arg(value_name = "ID", required = true, num_args = 1.., help = "Service ids")]
    pub ids: Vec<String>,

    /// How to group the ordered services.
    #[arg(
        short = 'g',
        long = "group",
        value_enum,
        default_value = "phase",
        help = "Group output by phase or category"
    )]
    pub group: GroupBy,

    /// Recommendation direction (default from config).
    #[arg(
        short = 'd',
        long = "direction",
        value_enum,
        help = "Recommendation direction"
    )]
    pub direction: Option<DirectionArg>,
}

/// Arguments for `svcplan recommend`.
#[derive(Debug, Args)]
pub struct RecommendArgs {
    /// Service ids to select.
    #[arg(value_name = "ID", required = true, num_args = 1.., help = "Service ids")]
    pub ids: Vec<String>,

    /// Recommendation direction (default from config).
    #[arg(
        short = 'd',
        long = "direction",
        value_enum,
        help = "Recommendation direction"
    )]
    pub direction: Option<DirectionArg>,
}

/// Arguments for `svcplan interactive`.
#[derive(Debug, Args)]
pub struct InteractiveArgs {
    /// Services to start with.
    #[arg(value_name = "ID", help = "Initially selected service ids")]
    pub ids: Vec<String>,

    /// Recommendation direction (default from config).
    #[arg(
        short = 'd',
        long = "direction",
        value_enum,
        help = "Recommendation direction"
    )]
    pub direction: Option<DirectionArg>,
}

/// Grouping for plan output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum GroupBy {
    #[default]
    Phase,
    Category,
    /// Flat ordered list.
    None,
}

/// Which dependency edge recommendations follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    /// Unselected prerequisites of the selection.
    #[value(alias = "prereqs", alias = "backward")]
    Prerequisites,
    /// Unselected services building on the selection.
    #[value(alias = "forward")]
    Dependents,
}

impl From<DirectionArg> for RecommendationDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Prerequisites => Self::Prerequisites,
            DirectionArg::Dependents => Self::Dependents,
        }
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `svcplan init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `svcplan completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `svcplan config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `output.format`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
