//! User store facets.
//!
//! Accessors are synchronous and only read or mutate the record handed in.
//! Changes reach the backend through [`UserStore::update`].

use async_trait::async_trait;
use idstore_model::{Claim, IdentityUser};
use tokio_util::sync::CancellationToken;

use crate::claims::ClaimsAdded;
use crate::error::StorageResult;
use crate::result::IdentityResult;

/// Core user store: persistence, lookups and user name accessors.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user.
    ///
    /// Failures are logged and reported as [`IdentityResult::Failed`].
    async fn create(&self, user: &IdentityUser, cancel: &CancellationToken) -> IdentityResult;

    /// Overwrites a persisted user. Updating an absent user fails.
    async fn update(&self, user: &IdentityUser, cancel: &CancellationToken) -> IdentityResult;

    /// Deletes a user by id. Deleting an absent user succeeds.
    async fn delete(&self, user: &IdentityUser, cancel: &CancellationToken) -> IdentityResult;

    /// Finds a user by id.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Cancelled` or `StorageError::Document`.
    async fn find_by_id(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> StorageResult<Option<IdentityUser>>;

    /// Finds a user by normalized user name.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Cancelled` or `StorageError::Document`.
    async fn find_by_name(
        &self,
        normalized_user_name: &str,
        cancel: &CancellationToken,
    ) -> StorageResult<Option<IdentityUser>>;

    /// Returns the user id.
    fn user_id<'a>(&self, user: &'a IdentityUser) -> &'a str {
        &user.id
    }

    /// Returns the user name.
    fn user_name<'a>(&self, user: &'a IdentityUser) -> Option<&'a str> {
        user.user_name.as_deref()
    }

    /// Sets the user name.
    fn set_user_name(&self, user: &mut IdentityUser, user_name: Option<String>) {
        user.user_name = user_name;
    }

    /// Returns the normalized user name.
    fn normalized_user_name<'a>(&self, user: &'a IdentityUser) -> Option<&'a str> {
        user.normalized_user_name.as_deref()
    }

    /// Sets the normalized user name.
    fn set_normalized_user_name(&self, user: &mut IdentityUser, name: Option<String>) {
        user.normalized_user_name = name;
    }
}

/// Password hash accessors.
pub trait UserPasswordStore: UserStore {
    /// Sets the password hash.
    fn set_password_hash(&self, user: &mut IdentityUser, hash: Option<String>) {
        user.password_hash = hash;
    }

    /// Returns the password hash.
    fn password_hash<'a>(&self, user: &'a IdentityUser) -> Option<&'a str> {
        user.password_hash.as_deref()
    }

    /// Checks if the user has a non-empty password hash.
    fn has_password(&self, user: &IdentityUser) -> bool {
        user.password_hash.as_deref().is_some_and(|h| !h.is_empty())
    }
}

/// Email accessors and lookup by email.
#[async_trait]
pub trait UserEmailStore: UserStore {
    /// Finds a user by normalized email.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Cancelled` or `StorageError::Document`.
    async fn find_by_email(
        &self,
        normalized_email: &str,
        cancel: &CancellationToken,
    ) -> StorageResult<Option<IdentityUser>>;

    /// Sets the email.
    fn set_email(&self, user: &mut IdentityUser, email: Option<String>) {
        user.email = email;
    }

    /// Returns the email.
    fn email<'a>(&self, user: &'a IdentityUser) -> Option<&'a str> {
        user.email.as_deref()
    }

    /// Sets whether the email is confirmed.
    fn set_email_confirmed(&self, user: &mut IdentityUser, confirmed: bool) {
        user.email_confirmed = confirmed;
    }

    /// Returns whether the email is confirmed.
    fn email_confirmed(&self, user: &IdentityUser) -> bool {
        user.email_confirmed
    }

    /// Sets the normalized email.
    fn set_normalized_email(&self, user: &mut IdentityUser, email: Option<String>) {
        user.normalized_email = email;
    }

    /// Returns the normalized email.
    fn normalized_email<'a>(&self, user: &'a IdentityUser) -> Option<&'a str> {
        user.normalized_email.as_deref()
    }
}

/// Phone number accessors.
pub trait UserPhoneNumberStore: UserStore {
    /// Sets the phone number.
    fn set_phone_number(&self, user: &mut IdentityUser, phone: Option<String>) {
        user.phone_number = phone;
    }

    /// Returns the phone number.
    fn phone_number<'a>(&self, user: &'a IdentityUser) -> Option<&'a str> {
        user.phone_number.as_deref()
    }

    /// Sets whether the phone number is confirmed.
    fn set_phone_number_confirmed(&self, user: &mut IdentityUser, confirmed: bool) {
        user.phone_number_confirmed = confirmed;
    }

    /// Returns whether the phone number is confirmed.
    fn phone_number_confirmed(&self, user: &IdentityUser) -> bool {
        user.phone_number_confirmed
    }
}

/// Two-factor flag accessors.
pub trait UserTwoFactorStore: UserStore {
    /// Enables or disables two-factor authentication.
    fn set_two_factor_enabled(&self, user: &mut IdentityUser, enabled: bool) {
        user.two_factor_enabled = enabled;
    }

    /// Returns whether two-factor authentication is enabled.
    fn two_factor_enabled(&self, user: &IdentityUser) -> bool {
        user.two_factor_enabled
    }
}

/// Authenticator key accessors.
pub trait UserAuthenticatorKeyStore: UserStore {
    /// Sets the authenticator key.
    fn set_authenticator_key(&self, user: &mut IdentityUser, key: Option<String>) {
        user.authenticator_key = key;
    }

    /// Returns the authenticator key.
    fn authenticator_key<'a>(&self, user: &'a IdentityUser) -> Option<&'a str> {
        user.authenticator_key.as_deref()
    }
}

/// Two-factor recovery codes.
pub trait UserTwoFactorRecoveryCodeStore: UserStore {
    /// Replaces every recovery code.
    fn replace_codes(&self, user: &mut IdentityUser, codes: Vec<String>) {
        user.recovery_codes = codes;
    }

    /// Redeems one code. Returns whether it was valid.
    fn redeem_code(&self, user: &mut IdentityUser, code: &str) -> bool {
        match user.recovery_codes.iter().position(|c| c == code) {
            Some(index) => {
                user.recovery_codes.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns the number of unredeemed codes.
    fn count_codes(&self, user: &IdentityUser) -> usize {
        user.recovery_codes.len()
    }
}

/// Role-claim management.
///
/// Only claims of type [`claim_types::ROLE`](idstore_model::claim_types::ROLE)
/// are persisted.
#[async_trait]
pub trait UserClaimStore: UserStore {
    /// Returns the persisted role claims of a user.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::UserNotFound` if the user was never persisted.
    async fn claims(
        &self,
        user: &IdentityUser,
        cancel: &CancellationToken,
    ) -> StorageResult<Vec<Claim>>;

    /// Appends the role claims among `claims` and persists the user.
    ///
    /// Other claim types are ignored and counted in the outcome.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Cancelled` or `StorageError::Document`.
    async fn add_claims(
        &self,
        user: &mut IdentityUser,
        claims: &[Claim],
        cancel: &CancellationToken,
    ) -> StorageResult<ClaimsAdded>;

    /// Replaces the first persisted claim with `old`'s value by `new`.
    ///
    /// Returns `false` without any change when either claim is not a role
    /// claim.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::ClaimNotFound` if the user does not hold `old`.
    async fn replace_claim(
        &self,
        user: &mut IdentityUser,
        old: &Claim,
        new: &Claim,
        cancel: &CancellationToken,
    ) -> StorageResult<bool>;

    /// Removes the first match of each claim and persists the user.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::ClaimsNotFound` listing the claims that were not
    /// held. The others have been removed and persisted by then.
    async fn remove_claims(
        &self,
        user: &mut IdentityUser,
        claims: &[Claim],
        cancel: &CancellationToken,
    ) -> StorageResult<()>;

    /// Returns every user holding a role claim with `claim`'s value.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Cancelled` or `StorageError::Document`.
    async fn get_users_for_claim(
        &self,
        claim: &Claim,
        cancel: &CancellationToken,
    ) -> StorageResult<Vec<IdentityUser>>;
}

/// Enumeration of users.
#[async_trait]
pub trait QueryableUserStore: UserStore {
    /// Returns every user, ordered by id.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Cancelled` or `StorageError::Document`.
    async fn users(&self, cancel: &CancellationToken) -> StorageResult<Vec<IdentityUser>>;
}
