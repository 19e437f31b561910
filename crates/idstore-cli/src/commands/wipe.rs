//! Bulk deletion.

use idstore_document::DocumentStore;

use crate::Context;
use crate::cli::{WipeArgs, WipeTarget};
use crate::output::{confirm, error, success};

/// Runs the wipe command.
pub async fn run_wipe<S: DocumentStore>(args: WipeArgs, ctx: &Context<S>) -> crate::CliResult<()> {
    let what = match args.target {
        WipeTarget::Users => "users",
        WipeTarget::Roles => "roles",
    };

    if !args.force && !confirm(&format!("Are you sure you want to delete ALL {what}?"))? {
        error("Operation cancelled");
        return Ok(());
    }

    match args.target {
        WipeTarget::Users => ctx.users.wipe(&ctx.cancel).await?,
        WipeTarget::Roles => ctx.roles.wipe(&ctx.cancel).await?,
    }
    success(&format!("All {what} deleted"));
    Ok(())
}
