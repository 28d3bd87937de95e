//! Lifecycle entry point of the Essential Agent example extension.
//!
//! On load the agent subscribes its player listener and then injects the
//! `/essentialagentexample` command into the host's command table. A failed
//! injection is logged and the agent stays loaded without the command.
//! On unload only a notice is logged; the host cleans up whatever the
//! extension registered.

use std::sync::Arc;

use crate::command::{CommandDescriptor, EssentialAgentCommand, EssentialAgentTabCompleter};
use crate::config::AgentConfig;
use crate::host::{Extension, Host, LoadOutcome};
use crate::listener::{register_listener, EssentialAgentListener};
use crate::logger::ExtensionLogger;
use crate::registrar;

/// Identifier the extension always registers under.
pub const EXTENSION_ID: &str = "mcengine-essential-agent-example";

/// Category label of the extension's logger.
pub const LOGGER_CATEGORY: &str = "Agent";

/// Name label of the extension's logger.
pub const LOGGER_NAME: &str = "EssentialExampleAgent";

/// Lifecycle state as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Unloaded,
    Loaded,
}

/// State that exists only while the extension is loaded.
#[derive(Debug)]
struct ExtensionContext {
    logger: ExtensionLogger,
    namespace: String,
}

/// The Essential Agent example extension.
#[derive(Debug, Default)]
pub struct ExampleEssentialAgent {
    config: AgentConfig,
    context: Option<ExtensionContext>,
    outcome: Option<LoadOutcome>,
}

impl ExampleEssentialAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AgentConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn id(&self) -> &'static str {
        EXTENSION_ID
    }

    pub fn state(&self) -> LifecycleState {
        if self.context.is_some() {
            LifecycleState::Loaded
        } else {
            LifecycleState::Unloaded
        }
    }

    /// Outcome of the most recent load, if any.
    pub fn outcome(&self) -> Option<&LoadOutcome> {
        self.outcome.as_ref()
    }

    /// Namespace the command was registered under, while loaded.
    pub fn namespace(&self) -> Option<&str> {
        self.context.as_ref().map(|c| c.namespace.as_str())
    }

    /// Descriptor for `/essentialagentexample`, bound to the pass-through handlers.
    pub fn command_descriptor(&self) -> CommandDescriptor {
        let cmd = &self.config.command;
        CommandDescriptor::new(
            cmd.name.clone(),
            Arc::new(EssentialAgentCommand),
            Arc::new(EssentialAgentTabCompleter),
        )
        .with_description(cmd.description.clone())
        .with_usage(cmd.usage.clone())
        .with_aliases(cmd.aliases.clone())
    }
}

impl Extension for ExampleEssentialAgent {
    /// A repeated load while already loaded registers nothing and returns
    /// the outcome of the first load.
    fn on_load(&mut self, host: &mut dyn Host) -> LoadOutcome {
        if let (Some(context), Some(outcome)) = (&self.context, &self.outcome) {
            context.logger.warning("Already loaded; ignoring repeated load.");
            return outcome.clone();
        }

        let logger = ExtensionLogger::new(host.log_sink(), host.name(), LOGGER_CATEGORY, LOGGER_NAME);
        let namespace = host.name().to_lowercase();

        let listener = EssentialAgentListener::new(logger.clone(), &self.config.messages);
        register_listener(host.event_bus(), EXTENSION_ID, Arc::new(listener));

        let outcome = match registrar::register_command(host, &namespace, self.command_descriptor()) {
            Ok(()) => {
                logger.info("Enabled successfully.");
                LoadOutcome::Ready
            }
            Err(e) => {
                logger.warning(format!("Failed to initialize ExampleEssentialAgent: {e}"));
                tracing::debug!(error = ?e, namespace = %namespace, "command registration failed");
                LoadOutcome::Degraded(e)
            }
        };

        self.context = Some(ExtensionContext { logger, namespace });
        self.outcome = Some(outcome.clone());
        outcome
    }

    fn on_unload(&mut self, _host: &mut dyn Host) {
        if let Some(context) = self.context.take() {
            context.logger.info("Disabled.");
        }
    }

    /// The assigned id is ignored; the canonical id keeps registration
    /// consistent across environments.
    fn set_id(&mut self, host: &mut dyn Host, _id: &str) {
        host.set_extension_id(EXTENSION_ID);
    }
}
