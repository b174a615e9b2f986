use clap::{Args, Subcommand};

use crate::cli::subcommands::{EntityCommands, SchemaCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Form schemas.
    Schema {
        #[command(subcommand)]
        action: SchemaCommands,
    },
    /// Create, read, update, and delete backend records.
    Entity(EntityArgs),
    /// Submit a multi-step form one step file at a time.
    Wizard(WizardArgs),
}

#[derive(Clone, Debug, Args)]
pub struct EntityArgs {
    /// Backend resource, e.g. `students`.
    pub resource: String,

    /// Extra cache namespaces a mutation of this resource invalidates.
    #[arg(long = "invalidates", value_name = "NAMESPACE")]
    pub invalidates: Vec<String>,

    /// Validate payloads against this schema before sending.
    #[arg(long)]
    pub schema: Option<String>,

    #[command(subcommand)]
    pub action: EntityCommands,
}

#[derive(Clone, Debug, Args)]
pub struct WizardArgs {
    /// Schema the whole submission must satisfy, e.g. `full_student`.
    pub schema: String,

    /// One step, in order: `key=file` for a keyed step, `file` for an
    /// unkeyed one. `-` reads the step from stdin.
    #[arg(long = "step", value_name = "KEY=FILE", required = true)]
    pub steps: Vec<String>,

    /// Create a record of this resource from the final data.
    #[arg(long)]
    pub resource: Option<String>,
}
