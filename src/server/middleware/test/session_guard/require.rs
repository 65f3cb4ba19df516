use super::*;

/// Tests that a logged-in user with a bearer token passes the guard.
///
/// Expected: Ok(SessionUser) equal to the stored user
#[tokio::test]
async fn grants_access_to_user_with_token() -> Result<(), AppError> {
    let mut test = TestContext::new();
    let session = test.session().await.unwrap();

    AuthSession::new(session)
        .set_user(&session_user("bearer-token"))
        .await?;

    let user = SessionGuard::new(session)
        .require(Rejection::PlainText)
        .await?;

    assert_eq!(user, session_user("bearer-token"));

    Ok(())
}

/// Tests that an anonymous session is rejected with the route's rejection style.
///
/// Expected: Err(AuthError::Unauthorized(Rejection::Json("MISSING_AUTHORIZATION")))
#[tokio::test]
async fn rejects_anonymous_session() -> Result<(), AppError> {
    let mut test = TestContext::new();
    let session = test.session().await.unwrap();

    let result = SessionGuard::new(session)
        .require(Rejection::Json("MISSING_AUTHORIZATION"))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::Unauthorized(Rejection::Json(
            "MISSING_AUTHORIZATION"
        ))))
    ));

    Ok(())
}

/// Tests that a session user without a bearer token is rejected.
///
/// Expected: Err(AuthError::Unauthorized(Rejection::PlainText))
#[tokio::test]
async fn rejects_user_without_token() -> Result<(), AppError> {
    let mut test = TestContext::new();
    let session = test.session().await.unwrap();

    AuthSession::new(session).set_user(&session_user("")).await?;

    let result = SessionGuard::new(session)
        .require(Rejection::PlainText)
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::Unauthorized(Rejection::PlainText)))
    ));

    Ok(())
}

/// Tests that clearing the session logs the user out.
///
/// Expected: Err(AuthError::Unauthorized) after `clear`
#[tokio::test]
async fn rejects_after_logout() -> Result<(), AppError> {
    let mut test = TestContext::new();
    let session = test.session().await.unwrap();

    let auth_session = AuthSession::new(session);
    auth_session.set_user(&session_user("bearer-token")).await?;
    auth_session.clear().await?;

    let result = SessionGuard::new(session)
        .require(Rejection::PlainText)
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(_))));

    Ok(())
}
