//! Client for the evict bot API.

use reqwest::Response;
use serde::Serialize;

use crate::server::model::verification::UpstreamErrorBody;

/// Bot API client bound to one session user's bearer token.
pub struct BotApi<'a> {
    http_client: &'a reqwest::Client,
    base_url: &'a str,
    token: &'a str,
}

impl<'a> BotApi<'a> {
    pub fn new(http_client: &'a reqwest::Client, base_url: &'a str, token: &'a str) -> Self {
        Self {
            http_client,
            base_url,
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn get(&self, path: &str) -> Result<Response, reqwest::Error> {
        self.http_client
            .get(self.url(path))
            .bearer_auth(self.token)
            .send()
            .await
    }

    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response, reqwest::Error> {
        self.http_client
            .get(self.url(path))
            .bearer_auth(self.token)
            .query(query)
            .send()
            .await
    }

    /// Sends `body` as JSON.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, reqwest::Error> {
        self.http_client
            .post(self.url(path))
            .bearer_auth(self.token)
            .json(body)
            .send()
            .await
    }
}

/// Reads the error payload of a non-success response.
///
/// Bodies that are not the usual `{error, message, code}` JSON yield an empty payload so
/// callers fall back to their default error code.
pub async fn error_body(response: Response) -> UpstreamErrorBody {
    let status = response.status();

    match response.text().await {
        Ok(text) => serde_json::from_str(&text).unwrap_or_else(|_| {
            tracing::debug!("Upstream {} returned a non-JSON body: {}", status, text);
            UpstreamErrorBody::default()
        }),
        Err(e) => {
            tracing::debug!("Failed to read upstream {} body: {}", status, e);
            UpstreamErrorBody::default()
        }
    }
}
