use anyhow::Context;
use campus_forms::{Form, FormError, FormGroup};
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SchemaCommands;
use crate::commands::shared::parse::read_json;
use crate::context::AppContext;
use crate::output::output;

/// Handle `campus schema`.
pub async fn handle(
    action: &SchemaCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SchemaCommands::List => output(&ctx.schemas.list(), flags.format),
        SchemaCommands::Show { name } => {
            let schema = ctx
                .schemas
                .get(name)
                .with_context(|| format!("unknown schema '{name}'"))?;
            output(schema.document(), flags.format)
        }
        SchemaCommands::Validate { name, files } => {
            let schema = ctx
                .schemas
                .get(name)
                .with_context(|| format!("unknown schema '{name}'"))?;

            // Every file is one form of the group, keyed by its path.
            let group = FormGroup::with_policy(ctx.config.forms.duplicate_registration);
            for file in files {
                let values = read_json(file)?;
                let form = Form::new(file.display().to_string(), schema.clone(), values);
                Form::attach(&form.into_shared(), &group)?.detach();
            }

            match group.submit_group().await {
                Ok(submission) => output(&submission.into_value(), flags.format),
                Err(FormError::Group { errors }) => {
                    let report: Vec<_> = errors
                        .iter()
                        .map(|(id, error)| match error {
                            FormError::Invalid(failure) => {
                                json!({ "form": id, "fieldErrors": failure.field_errors })
                            }
                            other => json!({ "form": id, "error": other.to_string() }),
                        })
                        .collect();
                    output(&report, flags.format)?;
                    anyhow::bail!("{} of {} file(s) failed validation", errors.len(), files.len())
                }
                Err(other) => Err(other.into()),
            }
        }
    }
}
