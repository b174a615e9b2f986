use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Schema { action } => commands::schema::handle(&action, ctx, flags).await,
        Commands::Entity(args) => commands::entity::handle(&args, ctx, flags).await,
        Commands::Wizard(args) => commands::wizard::handle(&args, ctx, flags).await,
    }
}
