//! SendGrid v3 mail payloads.

use serde::Serialize;

/// Sender shown on verification emails.
pub const VERIFICATION_SENDER: &str = "noreply@evict.bot";
pub const VERIFICATION_SENDER_NAME: &str = "Evict Verification";

/// Content of one verification email.
pub struct VerificationEmail<'a> {
    pub to: &'a str,
    pub code: &'a str,
    pub guild_name: &'a str,
    pub user_name: &'a str,
    pub expires_at: String,
}

impl VerificationEmail<'_> {
    pub fn subject(&self) -> String {
        format!("Verify your access to {}", self.guild_name)
    }
}

#[derive(Debug, Serialize)]
pub struct MailAddress<'a> {
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct TemplateData<'a> {
    pub subject: String,
    pub verification_code: &'a str,
    pub guild_name: &'a str,
    pub user_name: &'a str,
    pub expires_at: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Personalization<'a> {
    pub to: Vec<MailAddress<'a>>,
    pub subject: String,
    pub dynamic_template_data: TemplateData<'a>,
}

/// Body of `POST /v3/mail/send` using a dynamic template.
#[derive(Debug, Serialize)]
pub struct MailSend<'a> {
    pub personalizations: Vec<Personalization<'a>>,
    pub from: MailAddress<'a>,
    pub subject: String,
    pub template_id: &'a str,
}

impl<'a> MailSend<'a> {
    pub fn verification(template_id: &'a str, email: &'a VerificationEmail<'a>) -> Self {
        let subject = email.subject();

        Self {
            personalizations: vec![Personalization {
                to: vec![MailAddress {
                    email: email.to,
                    name: None,
                }],
                subject: subject.clone(),
                dynamic_template_data: TemplateData {
                    subject: subject.clone(),
                    verification_code: email.code,
                    guild_name: email.guild_name,
                    user_name: email.user_name,
                    expires_at: &email.expires_at,
                },
            }],
            from: MailAddress {
                email: VERIFICATION_SENDER,
                name: Some(VERIFICATION_SENDER_NAME),
            },
            subject,
            template_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn verification_mail_carries_template_data() {
        let email = VerificationEmail {
            to: "user@example.com",
            code: "A1B2C3D4E5F6",
            guild_name: "Evict",
            user_name: "tester",
            expires_at: "March 1, 2025 12:00 UTC".to_string(),
        };

        let body = serde_json::to_value(MailSend::verification("d-template", &email)).unwrap();

        assert_eq!(body["template_id"], "d-template");
        assert_eq!(
            body["from"],
            json!({ "email": "noreply@evict.bot", "name": "Evict Verification" })
        );
        assert_eq!(body["personalizations"][0]["to"], json!([{ "email": "user@example.com" }]));
        assert_eq!(
            body["personalizations"][0]["dynamic_template_data"],
            json!({
                "subject": "Verify your access to Evict",
                "verification_code": "A1B2C3D4E5F6",
                "guild_name": "Evict",
                "user_name": "tester",
                "expires_at": "March 1, 2025 12:00 UTC"
            })
        );
    }
}
