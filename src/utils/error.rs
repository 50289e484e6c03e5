use thiserror::Error;

#[derive(Error, Debug)]
pub enum AstroError {
    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to bind {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

impl AstroError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            AstroError::HttpClientError(_) => "Could not set up the HTTP client".to_string(),
            AstroError::IoError(e) => format!("File or network I/O failed: {}", e),
            AstroError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            AstroError::BindError { address, .. } => {
                format!("Could not listen on {}", address)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AstroError::HttpClientError(_) => "Check the TLS setup of the host",
            AstroError::IoError(_) => "Check permissions and available resources",
            AstroError::InvalidConfigValueError { .. } => {
                "Check the command-line flags, environment variables and .env file"
            }
            AstroError::BindError { .. } => "Pick another --port or stop the process using it",
        }
    }
}

pub type Result<T> = std::result::Result<T, AstroError>;

/// Outcome of one failed upstream call. Never surfaced to the page; the
/// aggregator folds it into an empty or absent value.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{endpoint} returned an unparseable body: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type UpstreamResult<T> = std::result::Result<T, UpstreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message_names_field() {
        let invalid = AstroError::InvalidConfigValueError {
            field: "port".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        };
        assert_eq!(
            invalid.user_friendly_message(),
            "Setting 'port' is invalid: Value must be at least 1"
        );
        assert!(invalid.recovery_suggestion().contains(".env"));
    }

    #[test]
    fn test_bind_error_keeps_address() {
        let err = AstroError::BindError {
            address: "0.0.0.0:3000".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };
        assert!(err.to_string().starts_with("Failed to bind 0.0.0.0:3000"));
        assert!(err.recovery_suggestion().contains("--port"));
    }

    #[test]
    fn test_status_error_display() {
        let err = UpstreamError::Status {
            endpoint: "apod",
            status: 503,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "apod returned HTTP 503");
    }
}
