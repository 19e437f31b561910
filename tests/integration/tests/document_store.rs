//! Document gateway tests against Postgres.

use idstore_document::{
    DocumentSession, DocumentStore, Filter, PgDocumentStore, provision_database,
};
use idstore_integration_tests::TestEnv;
use idstore_model::IdentityUser;
use idstore_model::user::fields;

#[tokio::test]
#[ignore = "requires docker"]
async fn test_failed_batch_rolls_back() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let mut session = env.store.open_session();
    session.insert(&IdentityUser::new("ada").with_normalized_user_name("ADA"))?;
    session.update(&IdentityUser::new("ghost"))?;
    assert_eq!(session.pending(), 2);
    assert!(session.save_changes().await.is_err());
    assert_eq!(session.pending(), 0);

    let found: Option<IdentityUser> = env
        .store
        .open_session()
        .first(&Filter::eq(fields::NORMALIZED_USER_NAME, "ADA"))
        .await?;
    assert!(found.is_none());

    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_ensure_schema_is_idempotent() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    env.store.ensure_schema(&["users", "roles"]).await?;

    let other = PgDocumentStore::new(env.store.pool().clone(), "tenant_b")?;
    other.ensure_schema(&["users"]).await?;

    let mut session = other.open_session();
    session.store(&IdentityUser::new("ada"))?;
    session.save_changes().await?;

    let in_default: Vec<IdentityUser> = env.store.open_session().query(&Filter::All).await?;
    assert!(in_default.is_empty());

    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_provision_database() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let mut schema = env.config.schema.clone();
    schema.database_owner = "postgres".to_string();

    assert!(provision_database(&env.database_url, "identity", &schema).await?);
    assert!(!provision_database(&env.database_url, "identity", &schema).await?);

    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_provision_mixed_case_database() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let mut schema = env.config.schema.clone();
    schema.database_owner = "postgres".to_string();

    assert!(provision_database(&env.database_url, "Identity_Mixed", &schema).await?);
    assert!(!provision_database(&env.database_url, "Identity_Mixed", &schema).await?);
    assert!(!provision_database(&env.database_url, "identity_mixed", &schema).await?);

    Ok(())
}
