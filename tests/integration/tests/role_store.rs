//! Role store tests against Postgres.

use idstore_integration_tests::TestEnv;
use idstore_model::IdentityRole;
use idstore_storage::{QueryableRoleStore, RoleStore};
use tokio_util::sync::CancellationToken;

#[tokio::test]
#[ignore = "requires docker"]
async fn test_role_crud() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let store = env.roles();
    let cancel = CancellationToken::new();

    let mut admin = IdentityRole::new("Admin").with_normalized_name("ADMIN");
    assert!(store.create(&admin, &cancel).await.succeeded());

    admin.name = Some("Administrator".to_string());
    assert!(store.update(&admin, &cancel).await.succeeded());

    let found = store.find_by_name("ADMIN", &cancel).await?.expect("role persisted");
    assert_eq!(found.name.as_deref(), Some("Administrator"));
    assert_eq!(store.roles(&cancel).await?.len(), 1);

    assert!(store.delete(&admin, &cancel).await.succeeded());
    assert!(store.find_by_id(&admin.id, &cancel).await?.is_none());

    Ok(())
}
