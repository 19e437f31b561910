//! Role-claim list editing.
//!
//! Users persist role claims as a flat list of values. These helpers apply
//! the add, replace and remove rules to such a list without touching any
//! store.

use idstore_model::Claim;
use serde::Serialize;

/// Outcome of adding claims to a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClaimsAdded {
    /// Role claims appended to the user.
    pub accepted: usize,
    /// Claims of any other type, dropped without error.
    pub ignored: usize,
}

/// Appends the values of every role claim in `claims` to `values`.
pub fn append_role_claims<'a, I>(values: &mut Vec<String>, claims: I) -> ClaimsAdded
where
    I: IntoIterator<Item = &'a Claim>,
{
    let mut outcome = ClaimsAdded::default();
    for claim in claims {
        if claim.is_role() {
            values.push(claim.value.clone());
            outcome.accepted += 1;
        } else {
            outcome.ignored += 1;
        }
    }
    outcome
}

/// Replaces the first value equal to `old` by `new`, appended at the end.
///
/// Returns `false` and leaves `values` untouched when `old` is absent.
pub fn replace_first(values: &mut Vec<String>, old: &str, new: &str) -> bool {
    match values.iter().position(|v| v == old) {
        Some(index) => {
            values.remove(index);
            values.push(new.to_string());
            true
        }
        None => false,
    }
}

/// Removes the first match of each claim from `values`.
///
/// Only role claims can match. Returns the claims that had no match.
pub fn remove_each(values: &mut Vec<String>, claims: &[Claim]) -> Vec<Claim> {
    let mut missing = Vec::new();
    for claim in claims {
        let index = claim
            .is_role()
            .then(|| values.iter().position(|v| *v == claim.value))
            .flatten();
        match index {
            Some(index) => {
                values.remove(index);
            }
            None => missing.push(claim.clone()),
        }
    }
    missing
}
