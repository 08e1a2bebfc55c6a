use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:3000,http://localhost:8000";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Directory holding the guide files and the jobs/users datasets.
    pub data_dir: PathBuf,
    pub chat_model: String,
    pub embedding_model: String,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            chat_model: std::env::var("CHAT_MODEL")
                .unwrap_or_else(|_| crate::llm_client::DEFAULT_MODEL.to_string()),
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| crate::llm_client::embeddings::DEFAULT_EMBEDDING_MODEL.to_string()),
            allowed_origins: parse_origins(
                &std::env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
            ),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
