// Main entry point for the registration API server

use std::sync::Arc;

use anyhow::{Context, Result};
use sendgrid::models::MailAddress;
use sendgrid::{SendGridOptions, SendGridService};
use server_core::data::Store;
use server_core::html::Templates;
use server_core::kernel::{SendGridAdapter, ServerDeps};
use server_core::opts::Options;
use server_core::server::build_app;
use server_core::Config;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LinuxFleet registration API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // An options document can point the server at a database cluster host;
    // the environment-provided URL is the fallback.
    let mut database_url = config.database_url.clone();
    if let Some(path) = &config.options_path {
        let options = Options::read(path).context("Failed to load options file")?;
        if let Some(url) = options.database_url() {
            database_url = url.to_string();
        }
    }

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Provision tables
    let store = Store::new(pool);
    store
        .provision()
        .await
        .context("Failed to provision tables")?;
    tracing::info!("Tables provisioned");

    // Outbound email via SendGrid
    let sendgrid = Arc::new(SendGridService::new(SendGridOptions {
        api_key: config.sendgrid_api_key.clone(),
    }));
    let mailer = Arc::new(SendGridAdapter::new(
        sendgrid,
        MailAddress::new(&config.email_from_name, &config.email_from_address),
    ));

    let templates = Arc::new(Templates::new().context("Failed to load email templates")?);

    let deps = Arc::new(ServerDeps::new(
        store,
        templates,
        mailer,
        config.base_url.clone(),
    ));

    // Build application
    let app = build_app(deps);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
