use anyhow::Context;
use campus_core::api::ApiError;
use campus_crud::{EntityCrud, QueryResult, RestEndpoints};
use serde_json::{Value, json};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EntityArgs;
use crate::cli::subcommands::EntityCommands;
use crate::commands::shared::parse::read_json;
use crate::context::AppContext;
use crate::output::output;

/// Handle `campus entity <resource>`.
pub async fn handle(args: &EntityArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let crud = ctx.entity(&args.resource, &args.invalidates)?;

    match &args.action {
        EntityCommands::List => print_query(crud.get_all(true).await, flags),
        EntityCommands::Get { id } => print_query(crud.get_by_id(id, true).await, flags),
        EntityCommands::Create { file } => {
            let payload = load_payload(file, args.schema.as_deref(), ctx)?;
            let response = crud.create(payload).await?;
            output(&response, flags.format)
        }
        EntityCommands::Update { file } => {
            let payload = load_payload(file, args.schema.as_deref(), ctx)?;
            let response = crud.update(payload).await?;
            output(&response, flags.format)
        }
        EntityCommands::Delete { ids } => delete(&crud, ids, flags).await,
    }
}

async fn delete(
    crud: &EntityCrud<RestEndpoints>,
    ids: &[String],
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if let [id] = ids {
        let response = crud.delete(id).await?;
        return output(&response, flags.format);
    }

    let report = crud.bulk_delete(ids).await;
    let rows: Vec<Value> = report
        .outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(response) => json!({ "id": outcome.id, "ok": true, "message": response.message }),
            Err(error) => json!({
                "id": outcome.id,
                "ok": false,
                "status": error.status,
                "message": error.message,
            }),
        })
        .collect();
    output(&rows, flags.format)?;

    let failed = report.failed().count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} delete(s) failed", ids.len());
    }
    Ok(())
}

fn print_query(result: QueryResult, flags: &GlobalFlags) -> anyhow::Result<()> {
    if let Some(error) = result.error {
        return Err(query_error(error));
    }
    output(&result.data, flags.format)
}

fn query_error(error: ApiError) -> anyhow::Error {
    anyhow::Error::new(error).context("query failed")
}

fn load_payload(
    file: &std::path::Path,
    schema: Option<&str>,
    ctx: &AppContext,
) -> anyhow::Result<Value> {
    let payload = read_json(file)?;
    match schema {
        Some(name) => ctx
            .schemas
            .validate(name, &payload)
            .with_context(|| format!("{} does not match schema '{name}'", file.display())),
        None => Ok(payload),
    }
}
