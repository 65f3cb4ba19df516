use super::*;

/// Tests deleting a single session's code.
///
/// Expected: Ok with the code gone
#[tokio::test]
async fn deletes_code_for_session() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::verification_code::create_code(db, "abc", "AB12CD").await?;

    let repo = VerificationCodeRepository::new(db);
    repo.delete("abc").await?;

    assert!(repo.find("abc").await?.is_none());

    Ok(())
}

/// Tests purging codes created before the cutoff.
///
/// Expected: Ok(1) with the fresh code kept
#[tokio::test]
async fn purges_codes_older_than_cutoff() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::verification_code::VerificationCodeFactory::new(db)
        .session("old")
        .created_at(now - Duration::minutes(30))
        .build()
        .await?;
    factory::verification_code::VerificationCodeFactory::new(db)
        .session("new")
        .created_at(now)
        .build()
        .await?;

    let repo = VerificationCodeRepository::new(db);
    let removed = repo.delete_older_than(now - Duration::minutes(10)).await?;

    assert_eq!(removed, 1);
    assert!(repo.find("old").await?.is_none());
    assert!(repo.find("new").await?.is_some());

    Ok(())
}
