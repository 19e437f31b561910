//! Command implementations.

pub mod role;
pub mod schema;
pub mod user;
pub mod wipe;

pub use role::run_role;
pub use schema::run_schema;
pub use user::run_user;
pub use wipe::run_wipe;

use idstore_storage::IdentityResult;

use crate::CliError;

/// Turns a failed identity result into an error.
pub(crate) fn accepted(result: &IdentityResult) -> crate::CliResult<()> {
    if result.succeeded() {
        Ok(())
    } else {
        Err(CliError::rejected(result.errors()))
    }
}
