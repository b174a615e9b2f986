use std::sync::Arc;

use anyhow::Context;
use campus_forms::{RecordingShell, StepDef, StepOutcome, Wizard, WizardError};
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::WizardArgs;
use crate::commands::shared::parse::{parse_step, read_json};
use crate::context::AppContext;
use crate::output::output;

/// Handle `campus wizard`.
pub async fn handle(args: &WizardArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = ctx
        .schemas
        .get(&args.schema)
        .with_context(|| format!("unknown schema '{}'", args.schema))?
        .clone();

    let steps = args
        .steps
        .iter()
        .map(|spec| parse_step(spec))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut builder = Wizard::builder(schema);
    for (key, _) in &steps {
        builder = builder.step(key.as_deref().map_or_else(StepDef::unkeyed, StepDef::keyed));
    }
    if let Some(resource) = &args.resource {
        let crud = Arc::new(ctx.entity(resource, &[])?);
        builder = builder.on_submit(move |data| {
            let crud = Arc::clone(&crud);
            async move { crud.create(data).await.map(|_| ()) }
        });
    }

    let shell = Arc::new(RecordingShell::with_dialog("campus-cli"));
    let mut wizard = builder.build(shell)?;

    for (_, file) in &steps {
        let values = read_json(file)?;
        match wizard.submit_step(values).await {
            Ok(StepOutcome::Advanced { step }) => {
                tracing::debug!(step, file = %file.display(), "step accepted");
            }
            Ok(StepOutcome::Submitted(data)) => {
                let summary = json!({
                    "steps": wizard.steps(),
                    "data": data,
                    "created": args.resource.is_some(),
                });
                return output(&summary, flags.format);
            }
            Err(WizardError::Step { step, failure }) => {
                output(&failure.field_errors, flags.format)?;
                anyhow::bail!("step {step} ({}) failed validation", file.display());
            }
            Err(WizardError::Validation { failure, steps }) => {
                output(&failure.field_errors, flags.format)?;
                anyhow::bail!("submitted data failed validation (steps {steps:?})");
            }
            Err(other) => return Err(other.into()),
        }
    }

    anyhow::bail!("wizard ended before the last step was submitted")
}
