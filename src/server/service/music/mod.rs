//! Music lookups backing the dashboard's player and search widgets.
//!
//! `MusicService` combines Last.fm metadata, Deezer artwork and Spotify track ids into
//! the shapes the browser expects, and relays the listen service and Deezer search.

pub mod deezer;
pub mod lastfm;
pub mod listen;
pub mod spotify;

use futures::future::try_join_all;
use serde_json::Value;

use crate::{
    model::music::{
        ArtistInfoDto, ArtistResultDto, SongInfoDto, SongSearchDto, SpotifyTrackDto,
        TrackResultDto,
    },
    server::{
        config::require_credential, error::AppError, state::AppState, util::parse::parse_count,
    },
};

use self::{
    deezer::DeezerClient, lastfm::LastfmClient, listen::ListenClient, spotify::SpotifyClient,
};

pub struct MusicService<'a> {
    state: &'a AppState,
}

impl<'a> MusicService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn lastfm(&self) -> Result<LastfmClient<'a>, AppError> {
        let api_key = require_credential(
            &self.state.config.credentials.lastfm_api_key,
            "LASTFM_API_KEY",
        )?;

        Ok(LastfmClient::new(
            &self.state.http_client,
            &self.state.config.upstream.lastfm_url,
            api_key,
        ))
    }

    fn deezer(&self) -> DeezerClient<'a> {
        DeezerClient::new(&self.state.http_client, &self.state.config.upstream.deezer_url)
    }

    fn listen(&self) -> Result<ListenClient<'a>, AppError> {
        let api_key = require_credential(
            &self.state.config.credentials.listen_api_key,
            "LISTEN_API_KEY",
        )?;

        Ok(ListenClient::new(
            &self.state.http_client,
            &self.state.config.upstream.listen_url,
            api_key,
        ))
    }

    fn spotify(&self) -> SpotifyClient<'a> {
        SpotifyClient::new(
            &self.state.http_client,
            self.state.spotify_client.as_ref(),
            &self.state.spotify_tokens,
            &self.state.config.upstream.spotify_api_url,
        )
    }

    /// Searches Last.fm for tracks and artists matching `query`, with Deezer artwork.
    ///
    /// Both Last.fm searches run concurrently, then one Deezer lookup per result.
    pub async fn search(&self, query: &str) -> Result<SongSearchDto, AppError> {
        let lastfm = self.lastfm()?;
        let deezer = self.deezer();

        let (tracks, artists) =
            tokio::try_join!(lastfm.search_tracks(query), lastfm.search_artists(query))?;

        let tracks = try_join_all(tracks.into_iter().map(|track| {
            let deezer = &deezer;
            async move {
                let image = deezer
                    .track_cover(&format!("{} {}", track.name, track.artist))
                    .await?;

                Ok::<_, AppError>(TrackResultDto {
                    listeners: parse_count(&track.listeners),
                    name: track.name,
                    artist: track.artist,
                    url: track.url,
                    image,
                })
            }
        }))
        .await?;

        let artists = try_join_all(artists.into_iter().map(|artist| {
            let deezer = &deezer;
            async move {
                let image = deezer.artist_picture(&artist.name).await?;

                Ok::<_, AppError>(ArtistResultDto {
                    listeners: parse_count(&artist.listeners),
                    name: artist.name,
                    url: artist.url,
                    image,
                })
            }
        }))
        .await?;

        Ok(SongSearchDto { tracks, artists })
    }

    /// Looks up the Spotify track id and the Last.fm artist profile concurrently.
    pub async fn song_info(&self, title: &str, artist: &str) -> Result<SongInfoDto, AppError> {
        let lastfm = self.lastfm()?;
        let spotify = self.spotify();

        let (track_id, details) =
            tokio::join!(spotify.track_id(artist, title), lastfm.artist_info(artist));

        let track_id = track_id.unwrap_or_else(|e| {
            tracing::warn!("Spotify lookup for {} - {} failed: {}", artist, title, e);
            None
        });
        let details = details?;

        let stats = details.stats.unwrap_or_default();

        Ok(SongInfoDto {
            spotify: SpotifyTrackDto { track_id },
            artist: ArtistInfoDto {
                name: details.name,
                url: details.url,
                bio: details.bio.and_then(|bio| bio.summary),
                listeners: parse_count(&stats.listeners),
                playcount: parse_count(&stats.playcount),
                tags: details.tags.and_then(|tags| tags.tag),
                similar: details.similar.and_then(|similar| similar.artist),
            },
        })
    }

    pub async fn deezer_search(&self, query: &str) -> Result<Value, AppError> {
        self.deezer().search(query).await
    }

    /// Searches the listen service on behalf of the Discord user `user_id`.
    pub async fn listen_search(&self, query: &str, user_id: &str) -> Result<Value, AppError> {
        self.listen()?.search(query, user_id).await
    }

    pub async fn lyrics(&self, title: &str, artist: &str) -> Result<Value, AppError> {
        self.listen()?.lyrics(title, artist).await
    }

    pub async fn autoplay(&self, title: &str, author: &str) -> Result<Value, AppError> {
        self.listen()?.autoplay(title, author).await
    }
}
