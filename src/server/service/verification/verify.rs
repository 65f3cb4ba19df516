use serde_json::Value;

use crate::{
    model::verification::VerifyRequestDto,
    server::{
        error::{upstream::UpstreamError, verification::VerificationError, AppError},
        model::verification::{AnswersSubmission, CaptchaSubmission, EmailSubmission},
        service::{
            upstream::error_body,
            verification::{captcha::CaptchaVerifier, VerificationService},
        },
    },
};

impl<'a> VerificationService<'a> {
    /// Completes a verification session.
    ///
    /// The request body decides the method: `answers` for questions, `token` for captcha,
    /// otherwise the email code in `verification_data.email.code`, accepted only after the
    /// bot API confirms the session's code as valid.
    pub async fn verify(
        &self,
        guild_id: &str,
        user_id: &str,
        request: VerifyRequestDto,
    ) -> Result<Value, AppError> {
        let path = format!("verification/verify/{}/{}", guild_id, user_id);

        if let Some(answers) = request.answers.as_ref() {
            return self.verify_answers(&path, &request, answers).await;
        }

        if let Some(token) = request.token.as_deref().filter(|token| !token.is_empty()) {
            return self.verify_captcha(&path, &request, token).await;
        }

        self.verify_email(&path, &request).await
    }

    async fn verify_answers(
        &self,
        path: &str,
        request: &VerifyRequestDto,
        answers: &Value,
    ) -> Result<Value, AppError> {
        let response = self
            .api()
            .post(
                path,
                &AnswersSubmission {
                    session: request.session.as_ref(),
                    answers,
                },
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;

            return Err(UpstreamError::Status {
                status,
                body: body.into_failure(),
            }
            .into());
        }

        Ok(response.json::<Value>().await?)
    }

    async fn verify_captcha(
        &self,
        path: &str,
        request: &VerifyRequestDto,
        token: &str,
    ) -> Result<Value, AppError> {
        let verdict = CaptchaVerifier::from_config(self.http_client, self.config)?
            .verify(token)
            .await?;

        let response = self
            .api()
            .post(
                path,
                &CaptchaSubmission {
                    session: request.session.as_ref(),
                    token,
                    success: verdict.success,
                    challenge_ts: verdict.challenge_ts,
                },
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error = error_body(response)
                .await
                .error
                .unwrap_or_else(|| "INTERNAL_ERROR".to_string());

            return Err(UpstreamError::error(status, error).into());
        }

        Ok(response.json::<Value>().await?)
    }

    async fn verify_email(
        &self,
        path: &str,
        request: &VerifyRequestDto,
    ) -> Result<Value, AppError> {
        let session = match request.session.as_ref() {
            Some(Value::String(session)) => session.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };

        let check = self
            .api()
            .get_with_query("verification/email/code", &[("session", session.as_str())])
            .await?
            .json::<Value>()
            .await?;

        if check.get("valid") != Some(&Value::Bool(true)) {
            return Err(VerificationError::InvalidCode.into());
        }

        let code = request
            .verification_data
            .as_ref()
            .and_then(|data| data.pointer("/email/code"))
            .ok_or_else(|| {
                AppError::InternalError("Verify request has no email code".to_string())
            })?;

        let response = self
            .api()
            .post(
                path,
                &EmailSubmission {
                    session: request.session.as_ref(),
                    code,
                },
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!("Email verification rejected with {}: {}", status, text);

            return Err(UpstreamError::error(status, "Verification failed").into());
        }

        Ok(response.json::<Value>().await?)
    }
}
