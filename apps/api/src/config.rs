use anyhow::{bail, Context, Result};

use crate::matching::aggregate::DEFAULT_MATCH_THRESHOLD;

const DEFAULT_MAX_RESUME_ALERTS: u32 = 5;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Percentage of declared criteria a candidate/job must satisfy.
    pub match_threshold: f64,
    /// Alerts are logged instead of POSTed when unset.
    pub notify_webhook_url: Option<String>,
    pub max_resume_alerts: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let match_threshold = optional_env("MATCH_THRESHOLD")
            .map(|raw| {
                raw.parse::<f64>()
                    .context("MATCH_THRESHOLD must be a number")
            })
            .transpose()?
            .unwrap_or(DEFAULT_MATCH_THRESHOLD);
        if !(0.0..=100.0).contains(&match_threshold) {
            bail!("MATCH_THRESHOLD must lie between 0 and 100, got {match_threshold}");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            match_threshold,
            notify_webhook_url: optional_env("NOTIFY_WEBHOOK_URL"),
            max_resume_alerts: optional_env("MAX_RESUME_ALERTS")
                .map(|raw| {
                    raw.parse::<u32>()
                        .context("MAX_RESUME_ALERTS must be a non-negative integer")
                })
                .transpose()?
                .unwrap_or(DEFAULT_MAX_RESUME_ALERTS),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
