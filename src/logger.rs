//! Per-extension labeled logger.
//!
//! Every line an extension logs carries the host name, a category and the
//! extension's own tag, so messages from many extensions sharing one host
//! log stay distinguishable. Lines go through a [`LogSink`]; the default
//! sink forwards to `tracing`.

use std::fmt;
use std::sync::Arc;

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.write_str("INFO"),
            Self::Warning => f.write_str("WARN"),
        }
    }
}

/// Destination for extension log lines.
pub trait LogSink: Send + Sync {
    /// Write one already-labeled line.
    fn write(&self, level: LogLevel, label: &str, message: &str);
}

/// Sink that emits `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, level: LogLevel, label: &str, message: &str) {
        match level {
            LogLevel::Info => tracing::info!(extension = label, "{}", message),
            LogLevel::Warning => tracing::warn!(extension = label, "{}", message),
        }
    }
}

/// Logger handed to an extension by its host.
#[derive(Clone)]
pub struct ExtensionLogger {
    label: String,
    sink: Arc<dyn LogSink>,
}

impl ExtensionLogger {
    /// Create a logger labeled `[host] [category] [name]`.
    pub fn new(sink: Arc<dyn LogSink>, host_name: &str, category: &str, name: &str) -> Self {
        Self {
            label: format!("[{host_name}] [{category}] [{name}]"),
            sink,
        }
    }

    /// The label prepended to every line.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.sink.write(LogLevel::Info, &self.label, message.as_ref());
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.sink
            .write(LogLevel::Warning, &self.label, message.as_ref());
    }
}

impl fmt::Debug for ExtensionLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionLogger")
            .field("label", &self.label)
            .finish()
    }
}
