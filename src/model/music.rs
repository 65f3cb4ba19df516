use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Track match combining Last.fm search data with Deezer artwork.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrackResultDto {
    pub name: String,
    pub artist: String,
    pub url: String,
    pub listeners: Option<u64>,
    pub image: Option<String>,
}

/// Artist match combining Last.fm search data with a Deezer picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ArtistResultDto {
    pub name: String,
    pub url: String,
    pub listeners: Option<u64>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SongSearchDto {
    pub tracks: Vec<TrackResultDto>,
    pub artists: Vec<ArtistResultDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpotifyTrackDto {
    pub track_id: Option<String>,
}

/// Last.fm artist details reshaped for the song card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ArtistInfoDto {
    pub name: String,
    pub url: String,
    pub bio: Option<String>,
    pub listeners: Option<u64>,
    pub playcount: Option<u64>,
    #[schema(value_type = Option<Object>)]
    pub tags: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub similar: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SongInfoDto {
    pub spotify: SpotifyTrackDto,
    pub artist: ArtistInfoDto,
}
