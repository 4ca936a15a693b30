use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures surfaced by the sync engine and its HTTP collaborators.
///
/// Transport failures, non-2xx statuses and undecodable payloads are all
/// retryable and leave previously synced data in place. `Rejected` and
/// `Ignored` come from a 2xx payload and are kept apart so callers can tell
/// "blocked" from a generic failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("{0}")]
    Rejected(String),

    #[error("recipient is ignoring you")]
    Ignored,

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Validation(String),

    #[error("scheduler has been shut down")]
    ShutDown,
}

impl SyncError {
    /// True for the failures a retry could fix (network, HTTP status, bad payload).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SyncError::Network(_) | SyncError::Http { .. } | SyncError::Decode(_)
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatterboxError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("chatter.snapshot_limit".into());
        assert_eq!(
            err.to_string(),
            "config validation error: chatter.snapshot_limit"
        );
    }

    #[test]
    fn sync_error_display() {
        let err = SyncError::Network("connection refused".into());
        assert_eq!(err.to_string(), "network error: connection refused");

        let err = SyncError::Http {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");

        let err = SyncError::Rejected("You are borged".into());
        assert_eq!(err.to_string(), "You are borged");

        assert_eq!(SyncError::Ignored.to_string(), "recipient is ignoring you");
    }

    #[test]
    fn transport_classification() {
        assert!(SyncError::Network("x".into()).is_transport());
        assert!(SyncError::Http {
            status: 500,
            message: String::new()
        }
        .is_transport());
        assert!(SyncError::Decode("x".into()).is_transport());
        assert!(!SyncError::Rejected("x".into()).is_transport());
        assert!(!SyncError::Ignored.is_transport());
        assert!(!SyncError::Validation("x".into()).is_transport());
    }

    #[test]
    fn chatterbox_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: ChatterboxError = config_err.into();
        assert!(matches!(err, ChatterboxError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn chatterbox_error_from_sync() {
        let err: ChatterboxError = SyncError::Ignored.into();
        assert!(matches!(err, ChatterboxError::Sync(SyncError::Ignored)));
    }

    #[test]
    fn chatterbox_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ChatterboxError = io_err.into();
        assert!(matches!(err, ChatterboxError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }
}
