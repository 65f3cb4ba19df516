//! Payloads of the Last.fm, Deezer and Spotify APIs.
//!
//! Only the fields the dashboard reshapes are modelled; everything defaults so that a
//! provider omitting a section yields empty results instead of a decode error.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LastfmTrack {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub listeners: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LastfmArtist {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub listeners: Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrackMatches {
    #[serde(default)]
    pub track: Vec<LastfmTrack>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArtistMatches {
    #[serde(default)]
    pub artist: Vec<LastfmArtist>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrackSearchResults {
    #[serde(default)]
    pub trackmatches: TrackMatches,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArtistSearchResults {
    #[serde(default)]
    pub artistmatches: ArtistMatches,
}

/// `method=track.search` response.
#[derive(Debug, Default, Deserialize)]
pub struct TrackSearch {
    #[serde(default)]
    pub results: TrackSearchResults,
}

/// `method=artist.search` response.
#[derive(Debug, Default, Deserialize)]
pub struct ArtistSearch {
    #[serde(default)]
    pub results: ArtistSearchResults,
}

#[derive(Debug, Default, Deserialize)]
pub struct LastfmBio {
    pub summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LastfmStats {
    #[serde(default)]
    pub listeners: Value,
    #[serde(default)]
    pub playcount: Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct LastfmTags {
    pub tag: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LastfmSimilar {
    pub artist: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LastfmArtistDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    pub bio: Option<LastfmBio>,
    pub stats: Option<LastfmStats>,
    pub tags: Option<LastfmTags>,
    pub similar: Option<LastfmSimilar>,
}

/// `method=artist.getinfo` response. `artist` is absent when Last.fm reports an error.
#[derive(Debug, Default, Deserialize)]
pub struct ArtistInfo {
    pub artist: Option<LastfmArtistDetails>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeezerAlbum {
    pub cover_medium: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeezerTrack {
    pub album: Option<DeezerAlbum>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeezerArtist {
    pub picture_medium: Option<String>,
}

/// Deezer `/search/*` envelope.
#[derive(Debug, Deserialize)]
pub struct DeezerPage<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct SpotifyTrack {
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SpotifyTrackPage {
    #[serde(default)]
    pub items: Vec<SpotifyTrack>,
}

/// Spotify `/search?type=track` response.
#[derive(Debug, Default, Deserialize)]
pub struct SpotifySearch {
    #[serde(default)]
    pub tracks: SpotifyTrackPage,
}
