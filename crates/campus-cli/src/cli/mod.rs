use anyhow::anyhow;
use campus_config::CampusConfig;
use clap::{Parser, ValueEnum};

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `campus` binary.
#[derive(Debug, Parser)]
#[command(name = "campus", version, about = "Campus - school records from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw (defaults to `general.default_format`)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve global flags, falling back to configured defaults.
    pub fn global_flags(&self, config: &CampusConfig) -> anyhow::Result<GlobalFlags> {
        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_str(&config.general.default_format, true).map_err(|_| {
                anyhow!(
                    "invalid general.default_format '{}' (expected json or raw)",
                    config.general.default_format
                )
            })?,
        };
        Ok(GlobalFlags {
            format,
            quiet: self.quiet,
            verbose: self.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat};
    use crate::cli::subcommands::{EntityCommands, SchemaCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["campus", "--format", "raw", "--verbose", "schema", "list"])
            .expect("cli should parse");

        assert_eq!(cli.format, Some(OutputFormat::Raw));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Schema {
                action: SchemaCommands::List
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["campus", "schema", "list", "--format", "json", "--quiet"])
            .expect("cli should parse");
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["campus", "--format", "xml", "schema", "list"]).is_err());
    }

    #[test]
    fn format_falls_back_to_config() {
        let cli = Cli::try_parse_from(["campus", "schema", "list"]).expect("cli should parse");
        let mut config = campus_config::CampusConfig::default();
        config.general.default_format = "raw".into();
        assert_eq!(cli.global_flags(&config).unwrap().format, OutputFormat::Raw);

        config.general.default_format = "yaml".into();
        assert!(cli.global_flags(&config).is_err());
    }

    #[test]
    fn entity_delete_takes_many_ids() {
        let cli = Cli::try_parse_from(["campus", "entity", "students", "delete", "1", "2", "3"])
            .expect("cli should parse");
        let Commands::Entity(args) = cli.command else {
            panic!("expected entity command");
        };
        assert_eq!(args.resource, "students");
        let EntityCommands::Delete { ids } = args.action else {
            panic!("expected delete");
        };
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn entity_delete_needs_an_id() {
        assert!(Cli::try_parse_from(["campus", "entity", "students", "delete"]).is_err());
    }

    #[test]
    fn wizard_collects_repeated_steps() {
        let cli = Cli::try_parse_from([
            "campus",
            "wizard",
            "full_student",
            "--step",
            "student=s.json",
            "--step",
            "parents=p.json",
            "--resource",
            "students",
        ])
        .expect("cli should parse");
        let Commands::Wizard(args) = cli.command else {
            panic!("expected wizard command");
        };
        assert_eq!(args.schema, "full_student");
        assert_eq!(args.steps, vec!["student=s.json", "parents=p.json"]);
        assert_eq!(args.resource.as_deref(), Some("students"));
    }
}
