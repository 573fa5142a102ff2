//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use clap::{Args, Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Schemadoc - render OpenAPI / JSON Schema entities into markdown
///
/// Resolves the references of a document set and renders the schema
/// tables, entity sections and examples used by documentation pages.
#[derive(Parser, Debug)]
#[command(
    name = "schemadoc",
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
    #[arg(short, long, global = true, env = "SCHEMADOC_CONFIG")]
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
    /// Render the table of a schema followed by its linked entity sections
    Render(RenderArgs),

    /// Render a full `Body` section for a request or response schema
    Body(BodyArgs),

    /// Inline the reference graph of a schema into one self-contained schema
    Merge(MergeArgs),

    /// Print the example of a schema
    Example(ExampleArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// The document and schema a command works on
#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Path to the root OpenAPI / JSON Schema document (JSON or YAML)
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Schema reference (`#/components/schemas/User`) or a bare component name
    #[arg(short, long, value_name = "REF")]
    pub schema: String,

    /// Visibility mode; the configured mode when not given
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub target: SchemaArgs,

    /// Output file path (stdout if not specified)
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the body command
#[derive(Parser, Debug)]
pub struct BodyArgs {
    #[command(flatten)]
    pub target: SchemaArgs,

    /// Content type shown as the title of the example block
    #[arg(long, value_name = "MIME")]
    pub content_type: Option<String>,

    /// Output file path (stdout if not specified)
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the merge command
#[derive(Parser, Debug)]
pub struct MergeArgs {
    #[command(flatten)]
    pub target: SchemaArgs,

    /// Serialization of the merged schema
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: MergeFormat,
}

/// Arguments for the example command
#[derive(Parser, Debug)]
pub struct ExampleArgs {
    #[command(flatten)]
    pub target: SchemaArgs,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Visibility mode of a rendered schema
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Response payloads: `writeOnly` properties are hidden
    Read,
    /// Request payloads: `readOnly` properties are hidden
    Write,
}

/// Merged schema formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum MergeFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
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
        !self.no_color && std::io::stderr().is_terminal()
    }
}

impl From<Mode> for schemadoc_core::RenderMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Read => schemadoc_core::RenderMode::Read,
            Mode::Write => schemadoc_core::RenderMode::Write,
        }
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
    fn test_render_arguments() {
        let cli = Cli::parse_from([
            "schemadoc",
            "-vv",
            "render",
            "openapi.yaml",
            "--schema",
            "User",
            "--mode",
            "write",
            "--save-to",
            "user.md",
        ]);

        assert_eq!(cli.verbosity_level(), 2);
        let Commands::Render(args) = cli.command else {
            panic!("expected the render command");
        };
        assert_eq!(args.target.document, PathBuf::from("openapi.yaml"));
        assert_eq!(args.target.schema, "User");
        assert_eq!(args.target.mode, Some(Mode::Write));
        assert_eq!(args.save_to, Some(PathBuf::from("user.md")));
    }

    #[test]
    fn test_quiet_resets_verbosity() {
        let cli = Cli::parse_from(["schemadoc", "--quiet", "example", "spec.json", "-s", "Pet"]);
        assert_eq!(cli.verbosity_level(), 0);
        assert!(matches!(cli.command, Commands::Example(_)));
    }

    #[test]
    fn test_merge_format_defaults_to_json() {
        let cli = Cli::parse_from(["schemadoc", "merge", "spec.json", "-s", "Pet"]);
        let Commands::Merge(args) = cli.command else {
            panic!("expected the merge command");
        };
        assert_eq!(args.format, MergeFormat::Json);
        assert_eq!(args.target.mode, None);
    }

    #[test]
    fn test_mode_conversion() {
        assert_eq!(schemadoc_core::RenderMode::from(Mode::Write), schemadoc_core::RenderMode::Write);
    }
}
