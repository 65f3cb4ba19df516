use super::*;

/// Tests finding a counter that was never written.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = EmailAttemptRepository::new(db);
    let result = repo.find("nobody@example.com").await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests finding an existing counter.
///
/// Expected: Ok(Some) with the stored count
#[tokio::test]
async fn returns_stored_counter() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::email_attempt::create_attempt(db, "user@example.com", 3).await?;

    let repo = EmailAttemptRepository::new(db);
    let attempt = repo.find("user@example.com").await?.unwrap();

    assert_eq!(attempt.email, "user@example.com");
    assert_eq!(attempt.count, 3);

    Ok(())
}
