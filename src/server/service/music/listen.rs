//! Client for the listen music service (search, lyrics and autoplay suggestions).

use serde_json::Value;

use crate::server::error::AppError;

pub struct ListenClient<'a> {
    http_client: &'a reqwest::Client,
    base_url: &'a str,
    api_key: &'a str,
}

impl<'a> ListenClient<'a> {
    pub fn new(http_client: &'a reqwest::Client, base_url: &'a str, api_key: &'a str) -> Self {
        Self {
            http_client,
            base_url,
            api_key,
        }
    }

    /// Calls `path` with `params` plus the API key and relays the JSON body.
    async fn relay(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, AppError> {
        let body = self
            .http_client
            .get(format!("{}/{}", self.base_url.trim_end_matches('/'), path))
            .query(params)
            .query(&[("key", self.api_key)])
            .send()
            .await?
            .json::<Value>()
            .await?;

        Ok(body)
    }

    pub async fn search(&self, query: &str, user_id: &str) -> Result<Value, AppError> {
        self.relay("search", &[("query", query), ("userId", user_id)])
            .await
    }

    pub async fn lyrics(&self, title: &str, artist: &str) -> Result<Value, AppError> {
        self.relay("lyrics", &[("title", title), ("artist", artist)])
            .await
    }

    pub async fn autoplay(&self, title: &str, author: &str) -> Result<Value, AppError> {
        self.relay(
            "autoplay",
            &[("title", title), ("author", author), ("algorithm", "DYNAMIC")],
        )
        .await
    }
}
