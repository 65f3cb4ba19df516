use super::*;

/// Tests creating a counter for a new address.
///
/// Expected: Ok with count and timestamp stored
#[tokio::test]
async fn creates_new_counter() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let repo = EmailAttemptRepository::new(db);
    let attempt = repo.upsert("user@example.com", 1, now).await?;

    assert_eq!(attempt.count, 1);
    assert_eq!(attempt.last_attempt_at.timestamp(), now.timestamp());

    Ok(())
}

/// Tests that writing an existing address replaces its counter instead of duplicating it.
///
/// Expected: Ok with the latest count readable through `find`
#[tokio::test]
async fn replaces_existing_counter() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::email_attempt::create_attempt(db, "user@example.com", 2).await?;

    let repo = EmailAttemptRepository::new(db);
    repo.upsert("user@example.com", 3, Utc::now()).await?;

    let attempt = repo.find("user@example.com").await?.unwrap();
    assert_eq!(attempt.count, 3);

    Ok(())
}
