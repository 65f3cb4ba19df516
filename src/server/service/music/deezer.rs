//! Deezer public API client.

use serde_json::Value;

use crate::server::{
    error::AppError,
    model::music::{DeezerArtist, DeezerPage, DeezerTrack},
};

pub struct DeezerClient<'a> {
    http_client: &'a reqwest::Client,
    base_url: &'a str,
}

impl<'a> DeezerClient<'a> {
    pub fn new(http_client: &'a reqwest::Client, base_url: &'a str) -> Self {
        Self {
            http_client,
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn first<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &str,
    ) -> Result<Option<T>, AppError> {
        let page = self
            .http_client
            .get(self.url(path))
            .query(&[("q", query), ("limit", "1")])
            .send()
            .await?
            .json::<DeezerPage<T>>()
            .await?;

        Ok(page.data.into_iter().next())
    }

    /// Medium album cover of the best track match, if any.
    pub async fn track_cover(&self, query: &str) -> Result<Option<String>, AppError> {
        let track: Option<DeezerTrack> = self.first("search/track", query).await?;

        Ok(track
            .and_then(|track| track.album)
            .and_then(|album| album.cover_medium)
            .filter(|url| !url.is_empty()))
    }

    /// Medium picture of the best artist match, if any.
    pub async fn artist_picture(&self, name: &str) -> Result<Option<String>, AppError> {
        let artist: Option<DeezerArtist> = self.first("search/artist", name).await?;

        Ok(artist
            .and_then(|artist| artist.picture_medium)
            .filter(|url| !url.is_empty()))
    }

    /// Runs a general search and returns Deezer's JSON untouched.
    pub async fn search(&self, query: &str) -> Result<Value, AppError> {
        let body = self
            .http_client
            .get(self.url("search"))
            .query(&[("q", query)])
            .send()
            .await?
            .json::<Value>()
            .await?;

        Ok(body)
    }
}
