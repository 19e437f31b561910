//! Document-backed user store.

use async_trait::async_trait;
use idstore_document::{DocumentSession, DocumentStore, Filter};
use idstore_model::user::fields;
use idstore_model::{Claim, IdentityUser};
use idstore_storage::claims::{append_role_claims, remove_each, replace_first};
use idstore_storage::{
    ClaimsAdded, IdentityResult, QueryableUserStore, StorageError, StorageResult,
    UserAuthenticatorKeyStore, UserClaimStore, UserEmailStore, UserPasswordStore,
    UserPhoneNumberStore, UserStore, UserTwoFactorRecoveryCodeStore, UserTwoFactorStore,
    ensure_active,
};
use tokio_util::sync::CancellationToken;

use crate::outcome::{USER_DELETE_FAILED, USER_SAVE_FAILED, write};

/// User store persisting [`IdentityUser`] documents.
#[derive(Debug, Clone)]
pub struct DocumentUserStore<S> {
    store: S,
}

impl<S> DocumentUserStore<S> {
    /// Creates a user store over a document store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying document store.
    pub const fn document_store(&self) -> &S {
        &self.store
    }
}

impl<S: DocumentStore> DocumentUserStore<S> {
    /// Deletes every user.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Cancelled` or `StorageError::Document`.
    pub async fn wipe(&self, cancel: &CancellationToken) -> StorageResult<()> {
        ensure_active(cancel)?;
        let mut session = self.store.open_session();
        session.delete_where::<IdentityUser>(Filter::All);
        session.save_changes().await?;
        tracing::info!("all users deleted");
        Ok(())
    }

    async fn find_one(
        &self,
        filter: Filter,
        cancel: &CancellationToken,
    ) -> StorageResult<Option<IdentityUser>> {
        ensure_active(cancel)?;
        let session = self.store.open_session();
        Ok(session.first::<IdentityUser>(&filter).await?)
    }

    /// Loads the persisted copy of `user`.
    async fn persisted(&self, user: &IdentityUser) -> StorageResult<IdentityUser> {
        let session = self.store.open_session();
        session
            .load::<IdentityUser>(&user.id)
            .await?
            .ok_or_else(|| StorageError::UserNotFound(user.id.clone()))
    }

    /// Writes the whole record, inserting it if needed.
    async fn persist(&self, user: &IdentityUser) -> StorageResult<()> {
        let mut session = self.store.open_session();
        session.store(user)?;
        session.save_changes().await?;
        Ok(())
    }

    /// Persists `user` with `role_claims` swapped in.
    ///
    /// The caller's record only takes the new list once the write has
    /// committed.
    async fn commit_claims(
        &self,
        user: &mut IdentityUser,
        role_claims: Vec<String>,
    ) -> StorageResult<()> {
        let updated = IdentityUser {
            role_claims,
            ..user.clone()
        };
        self.persist(&updated).await?;
        *user = updated;
        Ok(())
    }
}

#[async_trait]
impl<S: DocumentStore> UserStore for DocumentUserStore<S> {
    async fn create(&self, user: &IdentityUser, cancel: &CancellationToken) -> IdentityResult {
        write(&self.store, cancel, "user", &user.id, USER_SAVE_FAILED, |session| {
            session.insert(user)
        })
        .await
    }

    async fn update(&self, user: &IdentityUser, cancel: &CancellationToken) -> IdentityResult {
        write(&self.store, cancel, "user", &user.id, USER_SAVE_FAILED, |session| {
            session.update(user)
        })
        .await
    }

    async fn delete(&self, user: &IdentityUser, cancel: &CancellationToken) -> IdentityResult {
        write(&self.store, cancel, "user", &user.id, USER_DELETE_FAILED, |session| {
            session.delete::<IdentityUser>(&user.id);
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> StorageResult<Option<IdentityUser>> {
        ensure_active(cancel)?;
        let session = self.store.open_session();
        Ok(session.load::<IdentityUser>(id).await?)
    }

    async fn find_by_name(
        &self,
        normalized_user_name: &str,
        cancel: &CancellationToken,
    ) -> StorageResult<Option<IdentityUser>> {
        self.find_one(
            Filter::eq(fields::NORMALIZED_USER_NAME, normalized_user_name),
            cancel,
        )
        .await
    }
}

#[async_trait]
impl<S: DocumentStore> UserEmailStore for DocumentUserStore<S> {
    async fn find_by_email(
        &self,
        normalized_email: &str,
        cancel: &CancellationToken,
    ) -> StorageResult<Option<IdentityUser>> {
        self.find_one(Filter::eq(fields::NORMALIZED_EMAIL, normalized_email), cancel)
            .await
    }
}

impl<S: DocumentStore> UserPasswordStore for DocumentUserStore<S> {}
impl<S: DocumentStore> UserPhoneNumberStore for DocumentUserStore<S> {}
impl<S: DocumentStore> UserTwoFactorStore for DocumentUserStore<S> {}
impl<S: DocumentStore> UserAuthenticatorKeyStore for DocumentUserStore<S> {}
impl<S: DocumentStore> UserTwoFactorRecoveryCodeStore for DocumentUserStore<S> {}

#[async_trait]
impl<S: DocumentStore> UserClaimStore for DocumentUserStore<S> {
    async fn claims(
        &self,
        user: &IdentityUser,
        cancel: &CancellationToken,
    ) -> StorageResult<Vec<Claim>> {
        ensure_active(cancel)?;
        Ok(self.persisted(user).await?.claims())
    }

    async fn add_claims(
        &self,
        user: &mut IdentityUser,
        claims: &[Claim],
        cancel: &CancellationToken,
    ) -> StorageResult<ClaimsAdded> {
        ensure_active(cancel)?;
        let mut values = user.role_claims.clone();
        let outcome = append_role_claims(&mut values, claims);
        if outcome.ignored > 0 {
            tracing::debug!(
                user = %user.id,
                ignored = outcome.ignored,
                "non-role claims ignored"
            );
        }
        self.commit_claims(user, values).await?;
        Ok(outcome)
    }

    async fn replace_claim(
        &self,
        user: &mut IdentityUser,
        old: &Claim,
        new: &Claim,
        cancel: &CancellationToken,
    ) -> StorageResult<bool> {
        ensure_active(cancel)?;
        if !old.is_role() || !new.is_role() {
            return Ok(false);
        }

        let mut values = self.persisted(user).await?.role_claims;
        if !replace_first(&mut values, &old.value, &new.value) {
            return Err(StorageError::claim_not_found(old));
        }
        self.commit_claims(user, values).await?;
        Ok(true)
    }

    async fn remove_claims(
        &self,
        user: &mut IdentityUser,
        claims: &[Claim],
        cancel: &CancellationToken,
    ) -> StorageResult<()> {
        ensure_active(cancel)?;
        let mut values = self.persisted(user).await?.role_claims;
        let missing = remove_each(&mut values, claims);
        self.commit_claims(user, values).await?;

        if missing.is_empty() {
            Ok(())
        } else {
            Err(StorageError::ClaimsNotFound(missing))
        }
    }

    async fn get_users_for_claim(
        &self,
        claim: &Claim,
        cancel: &CancellationToken,
    ) -> StorageResult<Vec<IdentityUser>> {
        ensure_active(cancel)?;
        let session = self.store.open_session();
        let filter = Filter::contains(fields::ROLE_CLAIMS, claim.value.as_str());
        Ok(session.query::<IdentityUser>(&filter).await?)
    }
}

#[async_trait]
impl<S: DocumentStore> QueryableUserStore for DocumentUserStore<S> {
    async fn users(&self, cancel: &CancellationToken) -> StorageResult<Vec<IdentityUser>> {
        ensure_active(cancel)?;
        let session = self.store.open_session();
        Ok(session.query::<IdentityUser>(&Filter::All).await?)
    }
}

#[cfg(test)]
mod tests {
    use idstore_document::{
        Document, DocumentError, DocumentResult, InMemoryDocumentStore, InMemorySession,
        UnitOfWork,
    };
    use idstore_model::claim_types;

    use super::*;

    fn store() -> DocumentUserStore<InMemoryDocumentStore> {
        DocumentUserStore::new(InMemoryDocumentStore::new())
    }

    /// Reads from an in-memory store but refuses every commit.
    #[derive(Clone)]
    struct ReadOnlyStore(InMemoryDocumentStore);

    struct ReadOnlySession(InMemorySession);

    impl DocumentStore for ReadOnlyStore {
        type Session = ReadOnlySession;

        fn open_session(&self) -> ReadOnlySession {
            ReadOnlySession(self.0.open_session())
        }
    }

    #[async_trait]
    impl DocumentSession for ReadOnlySession {
        fn work(&mut self) -> &mut UnitOfWork {
            self.0.work()
        }

        async fn load<T: Document>(&self, id: &str) -> DocumentResult<Option<T>> {
            self.0.load(id).await
        }

        async fn query<T: Document>(&self, filter: &Filter) -> DocumentResult<Vec<T>> {
            self.0.query(filter).await
        }

        async fn first<T: Document>(&self, filter: &Filter) -> DocumentResult<Option<T>> {
            self.0.first(filter).await
        }

        async fn save_changes(&mut self) -> DocumentResult<()> {
            self.0.work().drain();
            Err(DocumentError::Transaction("commit refused".to_string()))
        }
    }

    /// Seeds `user` with `claims` and returns a store that can no longer write.
    async fn read_only_with(
        user: &mut IdentityUser,
        claims: &[Claim],
    ) -> DocumentUserStore<ReadOnlyStore> {
        let inner = InMemoryDocumentStore::new();
        DocumentUserStore::new(inner.clone())
            .add_claims(user, claims, &CancellationToken::new())
            .await
            .unwrap();
        DocumentUserStore::new(ReadOnlyStore(inner))
    }

    fn user(name: &str) -> IdentityUser {
        IdentityUser::new(name)
            .with_normalized_user_name(name.to_uppercase())
            .with_email(format!("{name}@example.com"))
            .with_normalized_email(format!("{}@EXAMPLE.COM", name.to_uppercase()))
    }

    async fn created(store: &DocumentUserStore<InMemoryDocumentStore>, name: &str) -> IdentityUser {
        let user = user(name);
        assert!(store.create(&user, &CancellationToken::new()).await.succeeded());
        user
    }

    fn values(claims: &[Claim]) -> Vec<&str> {
        claims.iter().map(|c| c.value.as_str()).collect()
    }

    #[tokio::test]
    async fn create_then_find_by_id() {
        let store = store();
        let cancel = CancellationToken::new();
        let user = created(&store, "ada").await;

        let found = store.find_by_id(&user.id, &cancel).await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found, user);
    }

    #[tokio::test]
    async fn create_twice_fails() {
        let store = store();
        let user = created(&store, "ada").await;

        let result = store.create(&user, &CancellationToken::new()).await;
        assert!(!result.succeeded());
        assert_eq!(
            result.errors()[0].description,
            "Something went wrong saving the user."
        );
    }

    #[tokio::test]
    async fn update_is_reflected_and_nothing_else_changes() {
        let store = store();
        let cancel = CancellationToken::new();
        let mut user = created(&store, "ada").await;

        store.set_phone_number(&mut user, Some("0800505050".to_string()));
        assert!(store.update(&user, &cancel).await.succeeded());

        let found = store.find_by_id(&user.id, &cancel).await.unwrap().unwrap();
        assert_eq!(found.phone_number.as_deref(), Some("0800505050"));
        assert_eq!(found, user);
        assert_eq!(store.users(&cancel).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_twice_equals_update_once() {
        let store = store();
        let cancel = CancellationToken::new();
        let mut user = created(&store, "ada").await;
        store.set_email_confirmed(&mut user, true);

        assert!(store.update(&user, &cancel).await.succeeded());
        let once = store.find_by_id(&user.id, &cancel).await.unwrap();
        assert!(store.update(&user, &cancel).await.succeeded());
        let twice = store.find_by_id(&user.id, &cancel).await.unwrap();

        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn update_of_absent_user_fails() {
        let store = store();

        let result = store.update(&user("ghost"), &CancellationToken::new()).await;
        assert_eq!(
            result.errors()[0].description,
            "Something went wrong saving the user."
        );
    }

    #[tokio::test]
    async fn delete_removes_user() {
        let store = store();
        let cancel = CancellationToken::new();
        let user = created(&store, "ada").await;

        assert!(store.delete(&user, &cancel).await.succeeded());
        assert!(store.find_by_id(&user.id, &cancel).await.unwrap().is_none());
        assert!(store.delete(&user, &cancel).await.succeeded());
    }

    #[tokio::test]
    async fn lookups_by_name_and_email() {
        let store = store();
        let cancel = CancellationToken::new();
        let user = created(&store, "ada").await;
        created(&store, "grace").await;

        let by_name = store.find_by_name("ADA", &cancel).await.unwrap().unwrap();
        assert_eq!(by_name.id, user.id);

        let by_email = store
            .find_by_email("ADA@EXAMPLE.COM", &cancel)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, user.id);

        assert!(store.find_by_name("ada", &cancel).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_name_is_none() {
        let store = store();

        let found = store
            .find_by_name("NOBODY", &CancellationToken::new())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn add_claims_keeps_only_role_claims() {
        let store = store();
        let cancel = CancellationToken::new();
        let mut user = created(&store, "ada").await;
        let claims = [
            Claim::role("CanRead"),
            Claim::role("CanWrite"),
            Claim::new("other", "X"),
        ];

        let outcome = store.add_claims(&mut user, &claims, &cancel).await.unwrap();

        assert_eq!(outcome.accepted, 2);
        assert_eq!(outcome.ignored, 1);
        let stored = store.claims(&user, &cancel).await.unwrap();
        assert_eq!(values(&stored), ["CanRead", "CanWrite"]);
        assert!(stored.iter().all(|c| c.claim_type == claim_types::ROLE));
    }

    #[tokio::test]
    async fn add_claims_persists_unsaved_user() {
        let store = store();
        let cancel = CancellationToken::new();
        let mut user = user("ada");

        store
            .add_claims(&mut user, &[Claim::role("CanRead")], &cancel)
            .await
            .unwrap();

        let found = store.find_by_id(&user.id, &cancel).await.unwrap().unwrap();
        assert_eq!(found.role_claims, ["CanRead"]);
    }

    #[tokio::test]
    async fn claims_of_unsaved_user_is_not_found() {
        let store = store();

        let err = store
            .claims(&user("ghost"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn replace_claim_swaps_value() {
        let store = store();
        let cancel = CancellationToken::new();
        let mut user = created(&store, "ada").await;
        let claims = [
            Claim::role("CanRead"),
            Claim::role("CanWrite"),
            Claim::role("PowerfulAdmin"),
        ];
        store.add_claims(&mut user, &claims, &cancel).await.unwrap();

        let replaced = store
            .replace_claim(
                &mut user,
                &Claim::role("PowerfulAdmin"),
                &Claim::role("LonelyGrunt"),
                &cancel,
            )
            .await
            .unwrap();

        assert!(replaced);
        let mut stored: Vec<String> = store
            .claims(&user, &cancel)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.value)
            .collect();
        stored.sort();
        assert_eq!(stored, ["CanRead", "CanWrite", "LonelyGrunt"]);
        assert_eq!(user.role_claims.len(), 3);
    }

    #[tokio::test]
    async fn replace_claim_ignores_other_types() {
        let store = store();
        let cancel = CancellationToken::new();
        let mut user = created(&store, "ada").await;
        store
            .add_claims(&mut user, &[Claim::role("CanRead")], &cancel)
            .await
            .unwrap();

        let replaced = store
            .replace_claim(
                &mut user,
                &Claim::role("CanRead"),
                &Claim::new(claim_types::EMAIL, "x@y.z"),
                &cancel,
            )
            .await
            .unwrap();

        assert!(!replaced);
        assert_eq!(store.claims(&user, &cancel).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn replace_missing_claim_is_typed_error() {
        let store = store();
        let cancel = CancellationToken::new();
        let mut user = created(&store, "ada").await;
        store
            .add_claims(&mut user, &[Claim::role("CanRead")], &cancel)
            .await
            .unwrap();

        let err = store
            .replace_claim(
                &mut user,
                &Claim::role("IsAdmin"),
                &Claim::role("LonelyGrunt"),
                &cancel,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::ClaimNotFound { ref value, .. } if value == "IsAdmin"));
        assert_eq!(values(&store.claims(&user, &cancel).await.unwrap()), ["CanRead"]);
    }

    #[tokio::test]
    async fn remove_claims_leaves_the_rest() {
        let store = store();
        let cancel = CancellationToken::new();
        let mut user = created(&store, "ada").await;
        let claims = [
            Claim::role("CanRead"),
            Claim::role("CanWrite"),
            Claim::role("IsAdmin"),
        ];
        store.add_claims(&mut user, &claims, &cancel).await.unwrap();

        store
            .remove_claims(
                &mut user,
                &[Claim::role("CanWrite"), Claim::role("IsAdmin")],
                &cancel,
            )
            .await
            .unwrap();

        assert_eq!(values(&store.claims(&user, &cancel).await.unwrap()), ["CanRead"]);
        assert_eq!(user.role_claims, ["CanRead"]);
    }

    #[tokio::test]
    async fn remove_claims_reports_missing_after_persisting() {
        let store = store();
        let cancel = CancellationToken::new();
        let mut user = created(&store, "ada").await;
        let claims = [Claim::role("CanRead"), Claim::role("CanWrite")];
        store.add_claims(&mut user, &claims, &cancel).await.unwrap();

        let err = store
            .remove_claims(
                &mut user,
                &[Claim::role("Ghost"), Claim::role("CanWrite")],
                &cancel,
            )
            .await
            .unwrap_err();

        match err {
            StorageError::ClaimsNotFound(missing) => {
                assert_eq!(missing, vec![Claim::role("Ghost")]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(values(&store.claims(&user, &cancel).await.unwrap()), ["CanRead"]);
    }

    #[tokio::test]
    async fn users_for_claim_matches_value() {
        let store = store();
        let cancel = CancellationToken::new();
        let mut first = created(&store, "one").await;
        let mut second = created(&store, "two").await;
        let mut third = created(&store, "three").await;
        let admin = [Claim::role("IsAdmin")];
        store.add_claims(&mut first, &admin, &cancel).await.unwrap();
        store.add_claims(&mut second, &admin, &cancel).await.unwrap();
        store
            .add_claims(&mut third, &[Claim::role("CanRead")], &cancel)
            .await
            .unwrap();

        let mut ids: Vec<String> = store
            .get_users_for_claim(&Claim::role("IsAdmin"), &cancel)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        ids.sort();

        let mut expected = vec![first.id, second.id];
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn users_for_claim_ignores_claim_type() {
        let store = store();
        let cancel = CancellationToken::new();
        let mut first = created(&store, "one").await;
        let mut second = created(&store, "two").await;
        let mut third = created(&store, "three").await;
        let admin = [Claim::role("IsAdmin")];
        store.add_claims(&mut first, &admin, &cancel).await.unwrap();
        store.add_claims(&mut second, &admin, &cancel).await.unwrap();
        store
            .add_claims(&mut third, &[Claim::role("CanRead")], &cancel)
            .await
            .unwrap();

        let mut ids: Vec<String> = store
            .get_users_for_claim(&Claim::new(claim_types::EMAIL, "IsAdmin"), &cancel)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        ids.sort();

        let mut expected = vec![first.id, second.id];
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn failed_add_leaves_record_untouched() {
        let mut user = user("ada");
        let store = read_only_with(&mut user, &[Claim::role("CanRead")]).await;
        let before = user.clone();

        let err = store
            .add_claims(&mut user, &[Claim::role("IsAdmin")], &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Document(_)));
        assert_eq!(user, before);
    }

    #[tokio::test]
    async fn failed_replace_leaves_record_untouched() {
        let mut user = user("ada");
        let store = read_only_with(&mut user, &[Claim::role("CanRead")]).await;
        let before = user.clone();

        let result = store
            .replace_claim(
                &mut user,
                &Claim::role("CanRead"),
                &Claim::role("CanWrite"),
                &CancellationToken::new(),
            )
            .await;

        assert!(result.is_err());
        assert_eq!(user, before);
    }

    #[tokio::test]
    async fn failed_remove_leaves_record_untouched() {
        let mut user = user("ada");
        let claims = [Claim::role("CanRead"), Claim::role("CanWrite")];
        let store = read_only_with(&mut user, &claims).await;
        let before = user.clone();

        let result = store
            .remove_claims(&mut user, &[Claim::role("CanRead")], &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(StorageError::Document(_))));
        assert_eq!(user, before);
        assert_eq!(user.role_claims, ["CanRead", "CanWrite"]);
    }

    #[tokio::test]
    async fn cancelled_operations() {
        let store = store();
        let cancel = CancellationToken::new();
        let mut user = created(&store, "ada").await;
        cancel.cancel();

        let result = store.update(&user, &cancel).await;
        assert_eq!(result.errors()[0].code, "OperationCanceled");

        assert!(
            store
                .find_by_id(&user.id, &cancel)
                .await
                .unwrap_err()
                .is_cancelled()
        );
        assert!(
            store
                .add_claims(&mut user, &[Claim::role("CanRead")], &cancel)
                .await
                .unwrap_err()
                .is_cancelled()
        );
        assert!(user.role_claims.is_empty());
    }

    #[tokio::test]
    async fn wipe_deletes_every_user() {
        let store = store();
        let cancel = CancellationToken::new();
        created(&store, "ada").await;
        created(&store, "grace").await;

        store.wipe(&cancel).await.unwrap();

        assert!(store.users(&cancel).await.unwrap().is_empty());
    }

    #[test]
    fn accessors_mutate_record_only() {
        let store = store();
        let mut user = user("ada");

        assert!(!store.has_password(&user));
        store.set_password_hash(&mut user, Some(String::new()));
        assert!(!store.has_password(&user));
        store.set_password_hash(&mut user, Some("hash".to_string()));
        assert!(store.has_password(&user));
        assert_eq!(store.password_hash(&user), Some("hash"));

        store.set_user_name(&mut user, Some("lovelace".to_string()));
        assert_eq!(store.user_name(&user), Some("lovelace"));
        store.set_normalized_user_name(&mut user, Some("LOVELACE".to_string()));
        assert_eq!(store.normalized_user_name(&user), Some("LOVELACE"));

        store.set_two_factor_enabled(&mut user, true);
        assert!(store.two_factor_enabled(&user));
        store.set_phone_number_confirmed(&mut user, true);
        assert!(store.phone_number_confirmed(&user));
        assert_eq!(store.user_id(&user), user.id);

        assert_eq!(store.document_store().count("users"), 0);
    }

    #[test]
    fn authenticator_key_and_recovery_codes() {
        let store = store();
        let mut user = user("ada");

        store.set_authenticator_key(&mut user, Some("JBSWY3DPEHPK3PXP".to_string()));
        assert_eq!(store.authenticator_key(&user), Some("JBSWY3DPEHPK3PXP"));

        store.replace_codes(&mut user, vec!["a1".to_string(), "b2".to_string()]);
        assert_eq!(store.count_codes(&user), 2);
        assert!(store.redeem_code(&mut user, "a1"));
        assert!(!store.redeem_code(&mut user, "a1"));
        assert_eq!(store.count_codes(&user), 1);
    }
}
