//! Configuration management for Scimgate Core

use anyhow::{Context, Result};
use std::env;
use url::Url;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// SCIM protocol configuration
    pub scim: ScimConfig,
    /// Logging and metrics configuration
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct ScimConfig {
    /// Public origin used to build `meta.location`, without trailing slash
    /// (e.g. `https://api.example.com`).
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// "pretty" or "json"
    pub log_format: String,
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: "pretty".to_string(),
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").context("DATABASE_URL is required")?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(|_| "2".to_string())
                    .parse()
                    .unwrap_or(2),
            },
            scim: ScimConfig {
                base_url: normalize_base_url(
                    &env::var("SCIM_BASE_URL")
                        .unwrap_or_else(|_| "https://api.example.com".to_string()),
                )?,
            },
            telemetry: TelemetryConfig {
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
                metrics_enabled: env::var("METRICS_ENABLED")
                    .map(|s| s.to_lowercase() != "false")
                    .unwrap_or(true),
            },
        })
    }

    /// Get HTTP server address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

/// Validate an absolute http(s) URL and strip any trailing slash.
fn normalize_base_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw).with_context(|| format!("Invalid SCIM_BASE_URL: {}", raw))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        anyhow::bail!("SCIM_BASE_URL must use http or https, got {}", parsed.scheme());
    }
    Ok(raw.trim_end_matches('/').to_string())
}
