//! Kontor API Server
//!
//! Main entry point for the Kontor backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kontor_api::{AppState, create_router, notify::{LogSink, WebhookSink}};
use kontor_core::notify::NotificationSink;
use kontor_db::connect;
use kontor_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kontor=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Create JWT service
    let jwt_service = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        ..JwtConfig::default()
    });

    // Notification sink: webhook when configured, log otherwise
    let notifier: Arc<dyn NotificationSink> = match &config.notifications.webhook_url {
        Some(url) => {
            info!(webhook_url = %url, "Webhook notifications enabled");
            Arc::new(WebhookSink::new(url))
        }
        None => Arc::new(LogSink),
    };

    // Create application state; role routing is injected here, not global
    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        routing: Arc::new(config.routing.clone()),
        notifier,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
