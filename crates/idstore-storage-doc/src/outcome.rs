//! Folds unit-of-work results into [`IdentityResult`]s.

use idstore_document::{DocumentResult, DocumentSession, DocumentStore};
use idstore_storage::{IdentityError, IdentityResult};
use tokio_util::sync::CancellationToken;

pub(crate) const USER_SAVE_FAILED: &str = "Something went wrong saving the user.";
pub(crate) const USER_DELETE_FAILED: &str = "Something went wrong deleting the user.";
pub(crate) const ROLE_SAVE_FAILED: &str = "Something went wrong saving the role.";
pub(crate) const ROLE_DELETE_FAILED: &str = "Something went wrong deleting the role.";

/// Runs one write in a fresh session and reports the outcome.
///
/// A failure is logged with its cause; the caller only sees `description`.
pub(crate) async fn write<S, F>(
    store: &S,
    cancel: &CancellationToken,
    entity: &'static str,
    id: &str,
    description: &'static str,
    queue: F,
) -> IdentityResult
where
    S: DocumentStore,
    F: FnOnce(&mut S::Session) -> DocumentResult<()> + Send,
{
    if cancel.is_cancelled() {
        tracing::debug!(entity, id, "write cancelled before start");
        return IdentityResult::failed(IdentityError::canceled());
    }

    let mut session = store.open_session();
    let outcome = match queue(&mut session) {
        Ok(()) => session.save_changes().await,
        Err(error) => Err(error),
    };

    match outcome {
        Ok(()) => IdentityResult::Success,
        Err(error) => {
            tracing::error!(entity, id, error = %error, "{description}");
            IdentityResult::failed(IdentityError::storage_failure(description))
        }
    }
}
