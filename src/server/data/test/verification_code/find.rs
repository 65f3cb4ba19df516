use super::*;

/// Tests finding a code for a session that was never written.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_session() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::verification_code::create_code(db, "abc", "AB12CD").await?;

    let repo = VerificationCodeRepository::new(db);

    assert!(repo.find("other").await?.is_none());

    Ok(())
}

/// Tests finding a stored code.
///
/// Expected: Ok(Some) with the stored code
#[tokio::test]
async fn returns_stored_code() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::verification_code::create_code(db, "abc", "AB12CD").await?;

    let repo = VerificationCodeRepository::new(db);
    let stored = repo.find("abc").await?.unwrap();

    assert_eq!(stored.session, "abc");
    assert_eq!(stored.code, "AB12CD");

    Ok(())
}
