//! User management commands.

use idstore_document::DocumentStore;
use idstore_model::{Claim, IdentityUser, LookupNormalizer};
use idstore_storage::{
    QueryableUserStore, StorageError, UserClaimStore, UserEmailStore, UserPasswordStore,
    UserPhoneNumberStore, UserStore,
};

use super::accepted;
use crate::cli::{UserCommand, UserLookup};
use crate::output::{
    ClaimRow, UserRow, confirm, error, output, output_single, success, warning,
};
use crate::{CliError, Context};

/// Runs a user command.
pub async fn run_user<S: DocumentStore>(cmd: UserCommand, ctx: &Context<S>) -> crate::CliResult<()> {
    match cmd {
        UserCommand::Create {
            user_name,
            email,
            phone,
            password_hash,
        } => create_user(ctx, &user_name, email, phone, password_hash).await,
        UserCommand::Get { key, by } => {
            let user = find_user(ctx, &key, by).await?;
            output_single(&UserRow::from(&user), ctx.format)
        }
        UserCommand::List => {
            let users = ctx.users.users(&ctx.cancel).await?;
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output(&rows, ctx.format)
        }
        UserCommand::Delete { id, force } => delete_user(ctx, &id, force).await,
        UserCommand::Claims { id } => {
            let user = find_user(ctx, &id, UserLookup::Id).await?;
            let claims = ctx.users.claims(&user, &ctx.cancel).await?;
            let rows: Vec<ClaimRow> = claims.iter().map(ClaimRow::from).collect();
            output(&rows, ctx.format)
        }
        UserCommand::AddClaims { id, roles } => {
            let mut user = find_user(ctx, &id, UserLookup::Id).await?;
            let claims: Vec<Claim> = roles.into_iter().map(Claim::role).collect();
            let added = ctx.users.add_claims(&mut user, &claims, &ctx.cancel).await?;
            success(&format!(
                "Added {} role claim(s) to user '{}'",
                added.accepted, user.id
            ));
            Ok(())
        }
        UserCommand::RemoveClaims { id, roles } => remove_claims(ctx, &id, roles).await,
        UserCommand::ReplaceClaim { id, old, new } => {
            let mut user = find_user(ctx, &id, UserLookup::Id).await?;
            ctx.users
                .replace_claim(&mut user, &Claim::role(&old), &Claim::role(&new), &ctx.cancel)
                .await?;
            success(&format!("Replaced '{}' with '{}' on user '{}'", old, new, user.id));
            Ok(())
        }
        UserCommand::ForClaim { role } => {
            let users = ctx
                .users
                .get_users_for_claim(&Claim::role(role), &ctx.cancel)
                .await?;
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output(&rows, ctx.format)
        }
    }
}

/// Looks a user up, failing when absent.
async fn find_user<S: DocumentStore>(
    ctx: &Context<S>,
    key: &str,
    by: UserLookup,
) -> crate::CliResult<IdentityUser> {
    let found = match by {
        UserLookup::Id => ctx.users.find_by_id(key, &ctx.cancel).await?,
        UserLookup::Name => {
            let name = ctx.normalizer.normalize_name(key);
            ctx.users.find_by_name(&name, &ctx.cancel).await?
        }
        UserLookup::Email => {
            let email = ctx.normalizer.normalize_email(key);
            ctx.users.find_by_email(&email, &ctx.cancel).await?
        }
    };
    found.ok_or_else(|| CliError::not_found("User", key))
}

/// Creates a user.
async fn create_user<S: DocumentStore>(
    ctx: &Context<S>,
    user_name: &str,
    email: Option<String>,
    phone: Option<String>,
    password_hash: Option<String>,
) -> crate::CliResult<()> {
    let store = &ctx.users;
    let mut user = IdentityUser::new(user_name);
    store.set_normalized_user_name(&mut user, Some(ctx.normalizer.normalize_name(user_name)));
    if let Some(email) = email {
        store.set_normalized_email(&mut user, Some(ctx.normalizer.normalize_email(&email)));
        store.set_email(&mut user, Some(email));
    }
    store.set_phone_number(&mut user, phone);
    store.set_password_hash(&mut user, password_hash);

    accepted(&store.create(&user, &ctx.cancel).await)?;
    success(&format!("User '{}' created with id {}", user_name, user.id));
    output_single(&UserRow::from(&user), ctx.format)
}

/// Deletes a user.
async fn delete_user<S: DocumentStore>(
    ctx: &Context<S>,
    id: &str,
    force: bool,
) -> crate::CliResult<()> {
    let user = find_user(ctx, id, UserLookup::Id).await?;

    if !force && !confirm(&format!("Are you sure you want to delete user '{}'?", id))? {
        error("Operation cancelled");
        return Ok(());
    }

    accepted(&ctx.users.delete(&user, &ctx.cancel).await)?;
    success(&format!("User '{}' deleted successfully", id));
    Ok(())
}

/// Removes role claims, warning about the ones the user did not hold.
async fn remove_claims<S: DocumentStore>(
    ctx: &Context<S>,
    id: &str,
    roles: Vec<String>,
) -> crate::CliResult<()> {
    let mut user = find_user(ctx, id, UserLookup::Id).await?;
    let claims: Vec<Claim> = roles.into_iter().map(Claim::role).collect();

    match ctx.users.remove_claims(&mut user, &claims, &ctx.cancel).await {
        Ok(()) => {}
        Err(StorageError::ClaimsNotFound(missing)) => {
            let values: Vec<&str> = missing.iter().map(|c| c.value.as_str()).collect();
            warning(&format!("User did not hold: {}", values.join(", ")));
        }
        Err(e) => return Err(e.into()),
    }
    success(&format!("Role claims of user '{}' updated", id));
    Ok(())
}
