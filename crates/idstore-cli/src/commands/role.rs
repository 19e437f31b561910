//! Role management commands.

use idstore_document::DocumentStore;
use idstore_model::{IdentityRole, LookupNormalizer};
use idstore_storage::{QueryableRoleStore, RoleStore};

use super::accepted;
use crate::cli::{RoleCommand, RoleLookup};
use crate::output::{RoleRow, confirm, error, output, output_single, success};
use crate::{CliError, Context};

/// Runs a role command.
pub async fn run_role<S: DocumentStore>(cmd: RoleCommand, ctx: &Context<S>) -> crate::CliResult<()> {
    match cmd {
        RoleCommand::Create { name } => {
            let mut role = IdentityRole::new(&name);
            ctx.roles
                .set_normalized_role_name(&mut role, Some(ctx.normalizer.normalize_name(&name)));

            accepted(&ctx.roles.create(&role, &ctx.cancel).await)?;
            success(&format!("Role '{}' created with id {}", name, role.id));
            output_single(&RoleRow::from(&role), ctx.format)
        }
        RoleCommand::Get { key, by } => {
            let role = find_role(ctx, &key, by).await?;
            output_single(&RoleRow::from(&role), ctx.format)
        }
        RoleCommand::List => {
            let roles = ctx.roles.roles(&ctx.cancel).await?;
            let rows: Vec<RoleRow> = roles.iter().map(RoleRow::from).collect();
            output(&rows, ctx.format)
        }
        RoleCommand::Delete { id, force } => {
            let role = find_role(ctx, &id, RoleLookup::Id).await?;

            if !force && !confirm(&format!("Are you sure you want to delete role '{}'?", id))? {
                error("Operation cancelled");
                return Ok(());
            }

            accepted(&ctx.roles.delete(&role, &ctx.cancel).await)?;
            success(&format!("Role '{}' deleted successfully", id));
            Ok(())
        }
    }
}

/// Looks a role up, failing when absent.
async fn find_role<S: DocumentStore>(
    ctx: &Context<S>,
    key: &str,
    by: RoleLookup,
) -> crate::CliResult<IdentityRole> {
    let found = match by {
        RoleLookup::Id => ctx.roles.find_by_id(key, &ctx.cancel).await?,
        RoleLookup::Name => {
            let name = ctx.normalizer.normalize_name(key);
            ctx.roles.find_by_name(&name, &ctx.cancel).await?
        }
    };
    found.ok_or_else(|| CliError::not_found("Role", key))
}
