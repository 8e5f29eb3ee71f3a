use std::net::SocketAddr;
use std::sync::Arc;
use ta_service::config::Config;
use ta_service::handlers::auth_handler::AppState;
use ta_service::repositories::users::UserDirectory;
use ta_service::routes;
use ta_service::services::auth_service::AuthService;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ta_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting text analysis service");

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!("Configuration loaded successfully");

    // Provision the user directory (static, read-only after this point)
    let users = Arc::new(UserDirectory::bootstrap(config.bcrypt_cost).map_err(|e| {
        error!("Failed to provision user directory: {}", e);
        e
    })?);

    info!("User directory provisioned");

    let auth = Arc::new(AuthService::new(&config, users));

    // Install the metrics recorder backing GET /metrics
    let metrics_handle = routes::init_metrics_recorder().map_err(|e| {
        error!("Failed to install metrics recorder: {}", e);
        e
    })?;

    // Parse bind address before moving config into state
    let bind_address = config.bind_address.clone();

    let state = Arc::new(AppState { auth, config });

    let app = routes::build_routes(state, metrics_handle);

    let addr: SocketAddr = bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    info!("Text analysis service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
