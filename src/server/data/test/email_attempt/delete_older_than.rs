use super::*;

/// Tests that only counters last used before the cutoff are purged.
///
/// Expected: Ok(1) with the recent counter kept
#[tokio::test]
async fn deletes_only_stale_counters() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::email_attempt::EmailAttemptFactory::new(db)
        .email("stale@example.com")
        .last_attempt_at(now - Duration::hours(25))
        .build()
        .await?;
    factory::email_attempt::EmailAttemptFactory::new(db)
        .email("recent@example.com")
        .last_attempt_at(now - Duration::hours(1))
        .build()
        .await?;

    let repo = EmailAttemptRepository::new(db);
    let removed = repo.delete_older_than(now - Duration::hours(24)).await?;

    assert_eq!(removed, 1);
    assert!(repo.find("stale@example.com").await?.is_none());
    assert!(repo.find("recent@example.com").await?.is_some());

    Ok(())
}
