//! Command descriptors handed to the host's command table.
//!
//! A [`CommandDescriptor`] is a plain value: metadata plus two capability
//! objects, one that executes the command and one that completes its
//! arguments. The host owns the descriptor once it is registered and calls
//! [`CommandDescriptor::execute`] / [`CommandDescriptor::tab_complete`],
//! which forward to those capabilities.

pub mod handler;

use std::fmt;
use std::sync::Arc;

use crate::error::{RegistrationError, RegistrationResult};
use crate::host::Actor;

pub use handler::{EssentialAgentCommand, EssentialAgentTabCompleter};

/// Executes a command on behalf of a sender.
pub trait CommandExecutor: Send + Sync {
    /// Run the command. Returns `false` when the usage string should be shown.
    fn on_command(
        &self,
        sender: &dyn Actor,
        command: &CommandDescriptor,
        label: &str,
        args: &[String],
    ) -> bool;
}

/// Produces argument suggestions while a sender is typing a command.
pub trait TabCompleter: Send + Sync {
    fn on_tab_complete(
        &self,
        sender: &dyn Actor,
        command: &CommandDescriptor,
        alias: &str,
        args: &[String],
    ) -> Vec<String>;
}

/// A command as seen by the host's dispatch table.
#[derive(Clone)]
pub struct CommandDescriptor {
    name: String,
    description: String,
    usage: String,
    aliases: Vec<String>,
    executor: Arc<dyn CommandExecutor>,
    completer: Arc<dyn TabCompleter>,
}

impl CommandDescriptor {
    /// Create a descriptor with an empty description and `/<name>` as usage.
    pub fn new(
        name: impl Into<String>,
        executor: Arc<dyn CommandExecutor>,
        completer: Arc<dyn TabCompleter>,
    ) -> Self {
        let name = name.into();
        let usage = format!("/{name}");
        Self {
            name,
            description: String::new(),
            usage,
            aliases: Vec::new(),
            executor,
            completer,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Name followed by aliases: every label this command answers to.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Forward execution to the bound executor.
    pub fn execute(&self, sender: &dyn Actor, label: &str, args: &[String]) -> bool {
        self.executor.on_command(sender, self, label, args)
    }

    /// Forward completion to the bound completer.
    pub fn tab_complete(&self, sender: &dyn Actor, alias: &str, args: &[String]) -> Vec<String> {
        self.completer.on_tab_complete(sender, self, alias, args)
    }

    /// Check that every label can be used as a command-table key.
    pub fn validate(&self) -> RegistrationResult<()> {
        for label in self.labels() {
            if label.is_empty() {
                return Err(RegistrationError::InvalidDescriptor(
                    "command name is required".to_string(),
                ));
            }
            if label.contains(':') || label.chars().any(char::is_whitespace) {
                return Err(RegistrationError::InvalidDescriptor(format!(
                    "'{label}' must not contain ':' or whitespace"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("usage", &self.usage)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::runtime::LocalPlayer;

    struct EchoCommand;

    impl CommandExecutor for EchoCommand {
        fn on_command(
            &self,
            sender: &dyn Actor,
            command: &CommandDescriptor,
            label: &str,
            args: &[String],
        ) -> bool {
            sender.send_message(&format!("{} {} {}", command.name(), label, args.join(",")));
            !args.is_empty()
        }
    }

    struct FixedCompleter;

    impl TabCompleter for FixedCompleter {
        fn on_tab_complete(
            &self,
            _sender: &dyn Actor,
            _command: &CommandDescriptor,
            alias: &str,
            args: &[String],
        ) -> Vec<String> {
            vec![format!("{alias}:{}", args.len())]
        }
    }

    fn echo(name: &str) -> CommandDescriptor {
        CommandDescriptor::new(name, Arc::new(EchoCommand), Arc::new(FixedCompleter))
    }

    #[test]
    fn test_defaults() {
        let cmd = echo("ping");
        assert_eq!(cmd.usage(), "/ping");
        assert_eq!(cmd.description(), "");
        assert!(cmd.aliases().is_empty());
    }

    #[test]
    fn test_execute_forwards_args_verbatim() {
        let cmd = echo("ping");
        let player = LocalPlayer::new("Steve");
        let args = vec!["a b".to_string(), "".to_string()];

        assert!(cmd.execute(&player, "p", &args));
        assert_eq!(player.messages(), vec!["ping p a b,".to_string()]);
        assert!(!cmd.execute(&player, "ping", &[]));
    }

    #[test]
    fn test_tab_complete_forwards() {
        let cmd = echo("ping");
        let player = LocalPlayer::new("Steve");
        let out = cmd.tab_complete(&player, "ping", &["x".to_string()]);
        assert_eq!(out, vec!["ping:1".to_string()]);
    }

    #[test]
    fn test_validate() {
        assert!(echo("ping").validate().is_ok());
        assert!(echo("").validate().is_err());
        assert!(echo("ns:ping").validate().is_err());
        assert!(echo("two words").validate().is_err());
        assert!(echo("ping")
            .with_aliases(vec!["bad alias".to_string()])
            .validate()
            .is_err());
    }

    #[test]
    fn test_essential_handlers_are_pass_through() {
        let cmd = CommandDescriptor::new(
            "essentialagentexample",
            Arc::new(EssentialAgentCommand),
            Arc::new(EssentialAgentTabCompleter),
        );
        let player = LocalPlayer::new("Alex");
        assert!(cmd.execute(&player, "essentialagentexample", &["anything".to_string()]));
        assert!(cmd.tab_complete(&player, "essentialagentexample", &[]).is_empty());
        assert!(player.messages().is_empty());
    }
}
