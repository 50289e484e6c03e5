use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use clap::Parser;
use std::time::Duration;

pub const DEFAULT_API_KEY: &str = "DEMO_KEY";
pub const DEFAULT_API_BASE: &str = "https://api.nasa.gov";

#[derive(Debug, Clone, Parser)]
#[command(name = "astro-feed")]
#[command(about = "Astronomy picture, Mars rover photos and near-earth objects on one page")]
pub struct ServerConfig {
    #[arg(long, env = "NASA_API_KEY", default_value = DEFAULT_API_KEY, hide_env_values = true)]
    pub api_key: String,

    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "NASA_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    #[arg(long, env = "REQUEST_TIMEOUT_SECS", help = "Upstream request timeout; unset waits forever")]
    pub request_timeout_secs: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl ServerConfig {
    /// Defaults for everything, pointed at `api_base`.
    pub fn for_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            api_base: api_base.into(),
            request_timeout_secs: None,
            verbose: false,
            log_json: false,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ConfigProvider for ServerConfig {
    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.api_base)?;
        validate_non_empty_string("api_key", &self.api_key)?;
        validate_non_empty_string("host", &self.host)?;
        validate_positive_number("port", self.port as usize, 1)?;
        if let Some(secs) = self.request_timeout_secs {
            validate_range("request_timeout_secs", secs, 1, 300)?;
        }
        Ok(())
    }
}
