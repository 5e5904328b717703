//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Tartan - transform HR provider records into the unified schema
///
/// Rewrites JSON records with a declarative table of path-to-path mappings,
/// either a table file or one of the built-in provider tables.
#[derive(Parser, Debug)]
#[command(
    name = "tartan",
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
    #[arg(short, long, global = true, env = "TARTAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

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
    /// Transform a record (or an array of records) with a mapping table
    Transform(TransformArgs),

    /// Read the value at one path of a document
    Get(GetArgs),

    /// Check that every path in a mapping table is well formed
    Validate(ValidateArgs),

    /// Inspect configuration
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the transform command
#[derive(Parser, Debug)]
pub struct TransformArgs {
    /// Path to the source JSON file (one record object or an array of records)
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Mapping table file (JSON or YAML)
    #[arg(short, long, value_name = "TABLE", conflicts_with = "builtin")]
    pub mappings: Option<PathBuf>,

    /// Name of a built-in mapping table (e.g. adp-employee)
    #[arg(short, long, value_name = "NAME")]
    pub builtin: Option<String>,

    /// Write the transformed documents to a file instead of stdout
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,

    /// Show which entries were skipped and why
    #[arg(long)]
    pub report: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the get command
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Path to the JSON document to read from
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Path expression, e.g. salaries[0].amount
    #[arg(value_name = "PATH")]
    pub path: String,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the mapping table file (JSON or YAML)
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show(ConfigShowArgs),

    /// Print the configuration file in use, if any
    Path,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_transform_args() {
        let cli = Cli::parse_from([
            "tartan",
            "transform",
            "employees.json",
            "--builtin",
            "adp-employee",
            "--report",
        ]);
        match cli.command {
            Commands::Transform(args) => {
                assert_eq!(args.source, PathBuf::from("employees.json"));
                assert_eq!(args.builtin.as_deref(), Some("adp-employee"));
                assert!(args.mappings.is_none());
                assert!(args.report);
                assert!(!args.pretty);
            }
            other => panic!("Expected transform command, got {:?}", other),
        }
    }

    #[test]
    fn test_mappings_conflict_with_builtin() {
        let result = Cli::try_parse_from([
            "tartan",
            "transform",
            "employees.json",
            "--mappings",
            "table.json",
            "--builtin",
            "adp-employee",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_get_args() {
        let cli = Cli::parse_from(["tartan", "-o", "json", "get", "doc.json", "a.b[0].c"]);
        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Commands::Get(args) => assert_eq!(args.path, "a.b[0].c"),
            other => panic!("Expected get command, got {:?}", other),
        }
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            quiet: false,
            config: None,
            output: OutputFormat::Human,
            no_color: false,
            command: Commands::Validate(ValidateArgs {
                table: PathBuf::from("table.json"),
            }),
        };
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli { quiet: true, ..cli };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_no_color_disables_color() {
        let cli = Cli::parse_from(["tartan", "--no-color", "config", "path"]);
        assert!(!cli.use_color());
    }
}
