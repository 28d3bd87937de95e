//! Handlers bound to the `/essentialagentexample` command.
//!
//! Both are stateless. The command accepts any arguments and reports
//! success; the completer never offers suggestions.

use crate::host::Actor;

use super::{CommandDescriptor, CommandExecutor, TabCompleter};

/// Execution handler for `/essentialagentexample`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EssentialAgentCommand;

impl CommandExecutor for EssentialAgentCommand {
    fn on_command(
        &self,
        _sender: &dyn Actor,
        _command: &CommandDescriptor,
        _label: &str,
        _args: &[String],
    ) -> bool {
        true
    }
}

/// Tab completer for `/essentialagentexample`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EssentialAgentTabCompleter;

impl TabCompleter for EssentialAgentTabCompleter {
    fn on_tab_complete(
        &self,
        _sender: &dyn Actor,
        _command: &CommandDescriptor,
        _alias: &str,
        _args: &[String],
    ) -> Vec<String> {
        Vec::new()
    }
}
