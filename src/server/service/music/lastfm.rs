//! Last.fm web service client.

use crate::server::{
    error::AppError,
    model::music::{
        ArtistInfo, ArtistSearch, LastfmArtist, LastfmArtistDetails, LastfmTrack, TrackSearch,
    },
};

/// Results requested from each Last.fm search.
const SEARCH_LIMIT: &str = "5";

pub struct LastfmClient<'a> {
    http_client: &'a reqwest::Client,
    base_url: &'a str,
    api_key: &'a str,
}

impl<'a> LastfmClient<'a> {
    pub fn new(http_client: &'a reqwest::Client, base_url: &'a str, api_key: &'a str) -> Self {
        Self {
            http_client,
            base_url,
            api_key,
        }
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let response = self
            .http_client
            .get(self.base_url)
            .query(&[
                ("method", method),
                ("api_key", self.api_key),
                ("format", "json"),
            ])
            .query(params)
            .send()
            .await?
            .json::<T>()
            .await?;

        Ok(response)
    }

    pub async fn search_tracks(&self, query: &str) -> Result<Vec<LastfmTrack>, AppError> {
        let search: TrackSearch = self
            .call("track.search", &[("track", query), ("limit", SEARCH_LIMIT)])
            .await?;

        Ok(search.results.trackmatches.track)
    }

    pub async fn search_artists(&self, query: &str) -> Result<Vec<LastfmArtist>, AppError> {
        let search: ArtistSearch = self
            .call("artist.search", &[("artist", query), ("limit", SEARCH_LIMIT)])
            .await?;

        Ok(search.results.artistmatches.artist)
    }

    /// Fetches the artist profile.
    ///
    /// # Returns
    /// - `Ok(LastfmArtistDetails)` - Profile found
    /// - `Err(InternalError)` - Last.fm answered without an artist (unknown artist or API error)
    pub async fn artist_info(&self, artist: &str) -> Result<LastfmArtistDetails, AppError> {
        let info: ArtistInfo = self.call("artist.getinfo", &[("artist", artist)]).await?;

        info.artist.ok_or_else(|| {
            AppError::InternalError(format!("Last.fm returned no artist for '{}'", artist))
        })
    }
}
