use axum::http::{header, HeaderValue, Method};
use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::DatabaseConnection;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    router,
    scheduler::store_purge,
    state::{AppState, ClientCredentialsClient, OAuth2Client},
};

/// Overall timeout applied to every upstream request.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(15);

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then runs all pending SeaORM migrations so the verification store
/// tables exist before the first request.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the same Sqlite pool as the stores.
///
/// Sessions expire after 7 days of inactivity. The cookie is marked secure when the
/// application is served over HTTPS.
pub async fn connect_to_session(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store.migrate().await?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.app_url.starts_with("https://"))
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(7)));

    Ok(session_layer)
}

/// Builds the HTTP client used for every upstream call.
///
/// Redirects are disabled, which the OAuth2 token exchange requires.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(UPSTREAM_TIMEOUT)
        .build()?;

    Ok(client)
}

fn parse_url<T>(url: &str, parse: fn(String) -> Result<T, url::ParseError>) -> Result<T, AppError> {
    parse(url.to_string()).map_err(|source| {
        ConfigError::InvalidUrl {
            url: url.to_string(),
            source,
        }
        .into()
    })
}

/// Builds the Discord OAuth2 client for the login flow.
pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let discord = &config.discord;

    let client = BasicClient::new(ClientId::new(discord.client_id.clone()))
        .set_client_secret(ClientSecret::new(discord.client_secret.clone()))
        .set_auth_uri(parse_url(&discord.auth_url, AuthUrl::new)?)
        .set_token_uri(parse_url(&discord.token_url, TokenUrl::new)?)
        .set_redirect_uri(parse_url(&discord.redirect_url, RedirectUrl::new)?);

    Ok(client)
}

/// Builds the Spotify client-credentials client, or `None` when Spotify is not configured.
pub fn setup_spotify_client(config: &Config) -> Result<Option<ClientCredentialsClient>, AppError> {
    let credentials = &config.credentials;
    let (Some(client_id), Some(client_secret)) = (
        credentials.spotify_client_id.as_ref(),
        credentials.spotify_client_secret.as_ref(),
    ) else {
        tracing::info!("Spotify credentials not configured, track ids will be null");
        return Ok(None);
    };

    let client = BasicClient::new(ClientId::new(client_id.clone()))
        .set_client_secret(ClientSecret::new(client_secret.clone()))
        .set_token_uri(parse_url(&config.upstream.spotify_token_url, TokenUrl::new)?);

    Ok(Some(client))
}

/// Allows the dashboard frontend at `APP_URL` to call the API with its session cookie.
fn setup_cors(config: &Config) -> Result<CorsLayer, AppError> {
    let origin = HeaderValue::from_str(config.app_url.trim_end_matches('/')).map_err(|_| {
        ConfigError::InvalidValue {
            name: "APP_URL".to_string(),
            value: config.app_url.clone(),
        }
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

/// Initializes every dependency and serves the API until Ctrl+C.
pub async fn serve(config: Config) -> Result<(), AppError> {
    let db = connect_to_database(&config).await?;
    let session = connect_to_session(&db, &config).await?;
    let http_client = setup_reqwest_client()?;
    let oauth_client = setup_oauth_client(&config)?;
    let spotify_client = setup_spotify_client(&config)?;
    let cors = setup_cors(&config)?;

    let scheduler_db = db.clone();
    let code_ttl = config.code_ttl;
    tokio::spawn(async move {
        if let Err(e) = store_purge::start_scheduler(scheduler_db, code_ttl).await {
            tracing::error!("Store purge scheduler error: {}", e);
        }
    });

    let bind_address = config.bind_address.clone();
    let state = AppState::new(db, http_client, oauth_client, spotify_client, config);

    let app = router::router(state)
        .layer(session)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Listening on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
