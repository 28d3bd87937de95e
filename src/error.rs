//! Error types for the Essential Agent extension.
//!
//! Registration failures are kept separate from the crate-wide error so the
//! lifecycle entry point can downgrade them to a warning without also
//! swallowing configuration problems.

use std::path::PathBuf;

use thiserror::Error;

/// Why a command could not be inserted into the host's command table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The host does not expose a command table at this lifecycle stage.
    #[error("command table unavailable: {0}")]
    TableUnavailable(String),

    /// The host exposes a command registry of an incompatible version.
    #[error("command registry version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    /// The host refused access to its command table.
    #[error("access to command table denied: {0}")]
    AccessDenied(String),

    /// A command with the same label is already registered.
    #[error("command '{name}' is already registered by '{owner}'")]
    NameCollision { name: String, owner: String },

    /// The descriptor itself is unusable (empty name, bad characters).
    #[error("invalid command descriptor: {0}")]
    InvalidDescriptor(String),
}

/// Result type for command registration.
pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Errors that can occur in the extension outside of registration.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::AgentConfig`].
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Command registration failed.
    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),
}

/// Result type alias for extension operations.
pub type AgentResult<T> = Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_error_messages() {
        let err = RegistrationError::TableUnavailable("commandMap".to_string());
        assert_eq!(err.to_string(), "command table unavailable: commandMap");

        let err = RegistrationError::VersionMismatch {
            expected: 1,
            found: 2,
        };
        assert!(err.to_string().contains("expected 1, found 2"));
    }

    #[test]
    fn test_agent_error_wraps_registration() {
        let err: AgentError = RegistrationError::AccessDenied("sandbox".to_string()).into();
        assert!(matches!(err, AgentError::Registration(_)));
        assert!(err.to_string().contains("sandbox"));
    }
}
