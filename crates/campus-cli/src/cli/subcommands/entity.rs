use std::path::PathBuf;

use clap::Subcommand;

/// Entity CRUD commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EntityCommands {
    /// List all records.
    List,
    /// Get a record by ID.
    Get { id: String },
    /// Create a record from a JSON file (`-` for stdin).
    Create { file: PathBuf },
    /// Update the record identified by the file's `id` field.
    Update { file: PathBuf },
    /// Delete one or more records.
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}
