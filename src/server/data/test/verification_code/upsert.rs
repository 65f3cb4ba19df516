use super::*;

/// Tests that a second write for the same session replaces the code.
///
/// Expected: Ok with the newest code stored
#[tokio::test]
async fn overwrites_code_for_same_session() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_verification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VerificationCodeRepository::new(db);
    repo.upsert("abc", "AAAAAA", Utc::now()).await?;
    repo.upsert("abc", "BBBBBB", Utc::now()).await?;

    let stored = repo.find("abc").await?.unwrap();
    assert_eq!(stored.code, "BBBBBB");

    Ok(())
}
