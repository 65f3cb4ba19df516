use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        music::{SongInfoDto, SongSearchDto},
    },
    server::{
        error::{auth::Rejection, AppError},
        middleware::auth::SessionGuard,
        service::music::MusicService,
        state::AppState,
        util::query::required,
    },
};

/// Tag for grouping music endpoints in OpenAPI documentation
pub static MUSIC_TAG: &str = "music";

const UNAUTHORIZED: Rejection = Rejection::Json("Unauthorized");

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Free-text search query.
    pub q: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SongParams {
    pub title: Option<String>,
    pub artist: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListenSearchParams {
    pub query: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AutoplayParams {
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Search tracks and artists.
///
/// Queries Last.fm for up to 5 tracks and 5 artists and attaches Deezer artwork to each
/// result. Listener counts are parsed to integers.
///
/// # Returns
/// - `200 OK` - `{tracks, artists}`
/// - `400 Bad Request` - `q` missing or empty
/// - `401 Unauthorized` - No session
/// - `500 Internal Server Error` - A provider failed
#[utoipa::path(
    get,
    path = "/api/song/search",
    tag = MUSIC_TAG,
    params(SearchParams),
    responses(
        (status = 200, description = "Search results", body = SongSearchDto),
        (status = 400, description = "Missing search query", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Failed to search music", body = ErrorDto)
    ),
)]
pub async fn search_songs(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = SessionGuard::new(&session).require(UNAUTHORIZED).await?;
    let query = required(&params.q, "Missing search query")?;

    let results = MusicService::new(&state)
        .search(query)
        .await
        .map_err(|e| e.failed_with("Failed to search music"))?;

    Ok(Json(results))
}

/// Get the Spotify track id and Last.fm artist profile for a song.
///
/// `spotify.trackId` is null when Spotify is not configured or has no match.
#[utoipa::path(
    get,
    path = "/api/song",
    tag = MUSIC_TAG,
    params(SongParams),
    responses(
        (status = 200, description = "Song details", body = SongInfoDto),
        (status = 400, description = "Missing title or artist", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Failed to fetch music info", body = ErrorDto)
    ),
)]
pub async fn get_song(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<SongParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = SessionGuard::new(&session).require(UNAUTHORIZED).await?;
    let title = required(&params.title, "Missing title or artist")?;
    let artist = required(&params.artist, "Missing title or artist")?;

    let info = MusicService::new(&state)
        .song_info(title, artist)
        .await
        .map_err(|e| e.failed_with("Failed to fetch music info"))?;

    Ok(Json(info))
}

/// Relay a Deezer search.
#[utoipa::path(
    get,
    path = "/api/deezer/search",
    tag = MUSIC_TAG,
    params(SearchParams),
    responses(
        (status = 200, description = "Deezer search response"),
        (status = 400, description = "Query parameter required", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Failed to fetch from Deezer", body = ErrorDto)
    ),
)]
pub async fn search_deezer(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = SessionGuard::new(&session).require(UNAUTHORIZED).await?;
    let query = required(&params.q, "Query parameter required")?;

    let body = MusicService::new(&state)
        .deezer_search(query)
        .await
        .map_err(|e| e.failed_with("Failed to fetch from Deezer"))?;

    Ok(Json(body))
}

/// Relay a listen service search for the session user.
#[utoipa::path(
    get,
    path = "/api/listen/search",
    tag = MUSIC_TAG,
    params(ListenSearchParams),
    responses(
        (status = 200, description = "listen search response"),
        (status = 400, description = "Missing search query", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Failed to search tracks", body = ErrorDto)
    ),
)]
pub async fn search_listen(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListenSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = SessionGuard::new(&session).require(UNAUTHORIZED).await?;
    let query = required(&params.query, "Missing search query")?;

    let body = MusicService::new(&state)
        .listen_search(query, &user.id)
        .await
        .map_err(|e| e.failed_with("Failed to search tracks"))?;

    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/api/listen/lyrics",
    tag = MUSIC_TAG,
    params(SongParams),
    responses(
        (status = 200, description = "listen lyrics response"),
        (status = 400, description = "Missing title or artist", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Failed to fetch lyrics", body = ErrorDto)
    ),
)]
pub async fn get_lyrics(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<SongParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = SessionGuard::new(&session).require(UNAUTHORIZED).await?;
    let title = required(&params.title, "Missing title or artist")?;
    let artist = required(&params.artist, "Missing title or artist")?;

    let body = MusicService::new(&state)
        .lyrics(title, artist)
        .await
        .map_err(|e| e.failed_with("Failed to fetch lyrics"))?;

    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/api/listen/autoplay",
    tag = MUSIC_TAG,
    params(AutoplayParams),
    responses(
        (status = 200, description = "listen autoplay suggestions"),
        (status = 400, description = "Missing title or author", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Failed to fetch autoplay", body = ErrorDto)
    ),
)]
pub async fn get_autoplay(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<AutoplayParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = SessionGuard::new(&session).require(UNAUTHORIZED).await?;
    let title = required(&params.title, "Missing title or author")?;
    let author = required(&params.author, "Missing title or author")?;

    let body = MusicService::new(&state)
        .autoplay(title, author)
        .await
        .map_err(|e| e.failed_with("Failed to fetch autoplay"))?;

    Ok(Json(body))
}
