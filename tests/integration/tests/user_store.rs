//! User store tests against Postgres.

use idstore_integration_tests::TestEnv;
use idstore_model::{Claim, IdentityUser};
use idstore_storage::{
    QueryableUserStore, StorageError, UserClaimStore, UserEmailStore, UserStore,
};
use tokio_util::sync::CancellationToken;

fn user(name: &str) -> IdentityUser {
    IdentityUser::new(name)
        .with_normalized_user_name(name.to_uppercase())
        .with_email(format!("{name}@example.com"))
        .with_normalized_email(format!("{}@EXAMPLE.COM", name.to_uppercase()))
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_user_crud() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let store = env.users();
    let cancel = CancellationToken::new();

    let mut ada = user("ada");
    assert!(store.create(&ada, &cancel).await.succeeded());
    assert!(!store.create(&ada, &cancel).await.succeeded());

    let found = store.find_by_id(&ada.id, &cancel).await?.expect("user persisted");
    assert_eq!(found, ada);

    ada.phone_number = Some("0800505050".to_string());
    assert!(store.update(&ada, &cancel).await.succeeded());
    assert!(store.update(&ada, &cancel).await.succeeded());

    let by_name = store.find_by_name("ADA", &cancel).await?.expect("lookup by name");
    assert_eq!(by_name.phone_number.as_deref(), Some("0800505050"));
    let by_email = store
        .find_by_email("ADA@EXAMPLE.COM", &cancel)
        .await?
        .expect("lookup by email");
    assert_eq!(by_email.id, ada.id);
    assert!(store.find_by_name("NOBODY", &cancel).await?.is_none());

    assert!(store.delete(&ada, &cancel).await.succeeded());
    assert!(store.find_by_id(&ada.id, &cancel).await?.is_none());

    let result = store.update(&ada, &cancel).await;
    assert_eq!(
        result.errors()[0].description,
        "Something went wrong saving the user."
    );

    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_claim_management() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let store = env.users();
    let cancel = CancellationToken::new();

    let mut ada = user("ada");
    assert!(store.create(&ada, &cancel).await.succeeded());

    let added = store
        .add_claims(
            &mut ada,
            &[
                Claim::role("CanRead"),
                Claim::role("CanWrite"),
                Claim::role("PowerfulAdmin"),
                Claim::new("other", "X"),
            ],
            &cancel,
        )
        .await?;
    assert_eq!((added.accepted, added.ignored), (3, 1));

    assert!(
        store
            .replace_claim(
                &mut ada,
                &Claim::role("PowerfulAdmin"),
                &Claim::role("LonelyGrunt"),
                &cancel,
            )
            .await?
    );

    let err = store
        .remove_claims(
            &mut ada,
            &[Claim::role("CanWrite"), Claim::role("Ghost")],
            &cancel,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::ClaimsNotFound(ref missing) if missing.len() == 1));

    let values: Vec<String> = store
        .claims(&ada, &cancel)
        .await?
        .into_iter()
        .map(|c| c.value)
        .collect();
    assert_eq!(values, ["CanRead", "LonelyGrunt"]);

    Ok(())
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_users_for_claim() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let store = env.users();
    let cancel = CancellationToken::new();

    let mut ids = Vec::new();
    for (name, role) in [("one", "IsAdmin"), ("two", "IsAdmin"), ("three", "CanRead")] {
        let mut u = user(name);
        store.add_claims(&mut u, &[Claim::role(role)], &cancel).await?;
        if role == "IsAdmin" {
            ids.push(u.id);
        }
    }
    ids.sort();

    let mut found: Vec<String> = store
        .get_users_for_claim(&Claim::role("IsAdmin"), &cancel)
        .await?
        .into_iter()
        .map(|u| u.id)
        .collect();
    found.sort();
    assert_eq!(found, ids);

    assert_eq!(store.users(&cancel).await?.len(), 3);
    store.wipe(&cancel).await?;
    assert!(store.users(&cancel).await?.is_empty());

    Ok(())
}
