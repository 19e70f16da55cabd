use crate::domain::Route;
use clap::Parser;
use log::{info, warn};
use reqwest::Url;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:1337";

/// Command-line arguments for the cadastro client
#[derive(Debug, Parser)]
#[command(
    name = "cadastro",
    version,
    about = "Terminal client for registering people and looking them up"
)]
pub struct Cli {
    /// Base URL of the content backend (e.g. http://localhost:1337)
    #[arg(long = "api-url", env = "API_URL")]
    pub api_url: Option<String>,

    /// File the diagnostic log is appended to
    #[arg(long = "log-file", default_value = "cadastro.log")]
    pub log_file: PathBuf,

    /// Screen to open: /person or /person/{documentId}
    #[arg(default_value = "/person")]
    pub route: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub log_file: PathBuf,
    pub start_route: Route,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let raw_url = cli.api_url.unwrap_or_else(|| {
            warn!("API_URL not set, using default: {DEFAULT_API_URL}");
            DEFAULT_API_URL.to_string()
        });
        let api_url = Url::parse(&raw_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: raw_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw_url,
                reason: format!("scheme must be http or https, got {:?}", api_url.scheme()),
            });
        }

        let start_route = Route::parse(&cli.route).unwrap_or_else(|| {
            warn!("Unknown route {}, opening /person instead", cli.route);
            Route::NewPerson
        });

        info!("Backend at {api_url}, starting at {start_route}");

        Ok(Self {
            api_url,
            log_file: cli.log_file,
            start_route,
        })
    }
}
