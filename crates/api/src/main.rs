use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use launcher_ads::client::GoogleAdsClient;
use launcher_ads::config::{AdsCredentials, AdsSettings};
use launcher_core::error::CoreError;
use launcher_core::templates::TemplateCatalog;
use launcher_db::directory::{CustomerDirectory, PgCustomerSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use launcher_api::config::ServerConfig;
use launcher_api::router::build_app_router;
use launcher_api::state::{AdsHandle, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "launcher_api=debug,launcher_pipeline=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Customer directory ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = launcher_db::create_pool(&database_url).expect("Invalid DATABASE_URL");

    match launcher_db::health_check(&pool).await {
        Ok(()) => tracing::info!("Database health check passed"),
        Err(e) => tracing::warn!(error = %e, "Database unreachable; the form will show a diagnostic"),
    }

    let directory = Arc::new(CustomerDirectory::new(
        Arc::new(PgCustomerSource::new(pool)),
        Duration::from_secs(config.directory_cache_secs),
    ));

    // --- Templates ---
    let catalog = TemplateCatalog::builtin();
    catalog.validate_all().expect("Invalid built-in template");
    tracing::info!(templates = ?catalog.list_template_names(), "Loaded template catalog");

    // --- Google Ads ---
    let ads = build_ads_handle();

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        directory,
        catalog: Arc::new(catalog),
        ads,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Resolve credentials and settings into an advertising handle.
///
/// Missing credentials are reported by name and leave the server running
/// without the ability to provision.
fn build_ads_handle() -> AdsHandle {
    let credentials = match AdsCredentials::from_env() {
        Ok(credentials) => credentials,
        Err(CoreError::ConfigurationMissing(missing)) => {
            tracing::warn!(missing = ?missing, "Google Ads credentials missing; provisioning disabled");
            return AdsHandle::Unconfigured { missing };
        }
        Err(e) => panic!("Invalid Google Ads credentials: {e}"),
    };
    let settings = AdsSettings::from_env().expect("Invalid Google Ads settings");
    tracing::info!(
        api_version = %settings.api_version,
        login_customer_id = %credentials.login_customer_id,
        "Google Ads client configured",
    );

    let client = GoogleAdsClient::new(credentials, settings).expect("Failed to build HTTP client");
    AdsHandle::Ready(Arc::new(client))
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
