use std::path::PathBuf;

use clap::Subcommand;

/// Schema registry commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SchemaCommands {
    /// List registered schema names.
    List,
    /// Print a schema document.
    Show { name: String },
    /// Validate one or more JSON files as a form group.
    Validate {
        name: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}
