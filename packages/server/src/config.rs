use std::env;

use anyhow::{Context, Result};
use dotenvy::dotenv;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// External base URL used in emailed confirmation links.
    pub base_url: String,
    /// Fallback database URL; an options file entry takes precedence.
    pub database_url: String,
    /// Optional path to the YAML options document.
    pub options_path: Option<String>,
    pub sendgrid_api_key: String,
    pub email_from_address: String,
    pub email_from_name: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            base_url: env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://linuxfleet.db?mode=rwc".to_string()),
            options_path: env::var("OPTIONS_PATH").ok(),
            sendgrid_api_key: env::var("SENDGRID_API_KEY")
                .context("SENDGRID_API_KEY must be set")?,
            email_from_address: env::var("EMAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| "support@linuxfleet.com".to_string()),
            email_from_name: env::var("EMAIL_FROM_NAME")
                .unwrap_or_else(|_| "LinuxFleet Support".to_string()),
        })
    }
}
