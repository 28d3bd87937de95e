use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AgentError, AgentResult};
use crate::host::runtime::CollisionPolicy;

pub const DEFAULT_COMMAND_NAME: &str = "essentialagentexample";
pub const DEFAULT_COMMAND_DESCRIPTION: &str = "Essential Agent example command.";
pub const DEFAULT_WELCOME: &str = "[Agent][essential-agent-example] Hello {player}, enjoy your time!";
pub const DEFAULT_DEPARTURE: &str = "{player} has left the server.";
pub const DEFAULT_LOG_FILTER: &str = "essential_agent_example=info";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub command: CommandConfig,
    pub messages: MessagesConfig,
    pub registry: RegistryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    pub name: String,
    pub description: String,
    pub usage: String,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Sent to arriving players; `{player}` is replaced with their name.
    pub welcome: String,
    /// Logged when a player leaves; `{player}` is replaced with their name.
    pub departure: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Applied by the local host's command table.
    pub collision: CollisionPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_COMMAND_NAME.to_string(),
            description: DEFAULT_COMMAND_DESCRIPTION.to_string(),
            usage: format!("/{DEFAULT_COMMAND_NAME}"),
            aliases: Vec::new(),
        }
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            welcome: DEFAULT_WELCOME.to_string(),
            departure: DEFAULT_DEPARTURE.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AgentConfig {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("mcengine")
            .join("essential-agent-example.toml")
    }

    /// Load config from the default path; a missing file yields defaults.
    ///
    /// A broken file is reported to the caller, which decides whether to
    /// fall back to defaults once logging is available.
    pub fn load() -> AgentResult<Self> {
        Self::load_or_default(Self::config_path())
    }

    /// Load config from `path`, or return defaults if the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> AgentResult<Self> {
        if !path.as_ref().exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load and validate config from `path`. `~` is expanded.
    pub fn load_from(path: impl AsRef<Path>) -> AgentResult<Self> {
        let raw = path.as_ref().to_string_lossy();
        let expanded = PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref());

        let content = fs::read_to_string(&expanded).map_err(|source| AgentError::ConfigRead {
            path: expanded.clone(),
            source,
        })?;

        let mut config: Self = toml::from_str(&content)?;
        config.validate();
        Ok(config)
    }

    /// Replace empty values with defaults
    fn validate(&mut self) {
        let defaults = CommandConfig::default();

        self.command.name = self.command.name.trim().to_lowercase();
        if self.command.name.is_empty() {
            self.command.name = defaults.name;
        }
        if self.command.usage.trim().is_empty() {
            self.command.usage = format!("/{}", self.command.name);
        }
        self.command.aliases = self
            .command
            .aliases
            .iter()
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();

        if self.messages.welcome.is_empty() {
            self.messages.welcome = DEFAULT_WELCOME.to_string();
        }
        if self.messages.departure.is_empty() {
            self.messages.departure = DEFAULT_DEPARTURE.to_string();
        }
        if self.logging.filter.trim().is_empty() {
            self.logging.filter = DEFAULT_LOG_FILTER.to_string();
        }
    }
}
