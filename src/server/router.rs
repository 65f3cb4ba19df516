use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{auth, beta, music, verification},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Evict Dashboard API"),
    tags(
        (name = "auth", description = "Discord login and session user"),
        (name = "beta", description = "Beta role applications"),
        (name = "verification", description = "Guild member verification"),
        (name = "music", description = "Music search, metadata and lyrics")
    )
)]
struct ApiDoc;

/// Builds the API router with Swagger UI at `/api/docs`.
pub fn router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::login))
        .routes(routes!(auth::callback))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::get_user))
        .routes(routes!(beta::apply))
        .routes(routes!(verification::get_status))
        .routes(routes!(verification::start))
        .routes(routes!(verification::verify))
        .routes(routes!(
            verification::get_email_code,
            verification::store_email_code
        ))
        .routes(routes!(music::search_songs))
        .routes(routes!(music::get_song))
        .routes(routes!(music::search_deezer))
        .routes(routes!(music::search_listen))
        .routes(routes!(music::get_lyrics))
        .routes(routes!(music::get_autoplay))
        .with_state(state)
        .split_for_parts();

    router.merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", api))
}
