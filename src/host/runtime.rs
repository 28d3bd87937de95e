//! In-process host runtime.
//!
//! `LocalHost` implements the [`Host`] ports with a plain command table, an
//! event dispatcher and an identifier registry. The demo binary drives an
//! extension through it, and tests use it as the host double.

use std::cell::RefCell;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};

use crate::command::CommandDescriptor;
use crate::error::{RegistrationError, RegistrationResult};
use crate::logger::{LogSink, TracingSink};

use super::{
    Actor, CommandRegistry, EventBus, EventKind, EventSubscription, Host, PlayerEvent,
    COMMAND_REGISTRY_VERSION,
};

/// What the command table does when a bare label is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Refuse the registration and leave the existing command in place.
    #[default]
    Reject,
    /// Replace the existing command.
    Overwrite,
}

#[derive(Debug, Clone)]
struct CommandEntry {
    namespace: String,
    command: Arc<CommandDescriptor>,
}

/// Outcome of dispatching one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The command ran and reported success.
    Executed,
    /// The command ran, reported failure, and its usage was sent to the sender.
    UsageShown,
    /// No command answers to the label.
    Unknown(String),
}

/// Label to command mapping consulted on every command a player issues.
///
/// Each registration stores the fallback label `namespace:name`, the bare
/// name and every alias. A rejected bare name still leaves the fallback
/// label in place.
pub struct CommandTable {
    version: u32,
    policy: CollisionPolicy,
    entries: HashMap<String, CommandEntry>,
    matcher: SkimMatcherV2,
}

impl CommandTable {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            version: COMMAND_REGISTRY_VERSION,
            policy,
            entries: HashMap::new(),
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Report a different contract version (used to simulate an incompatible host).
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Look up a command by any of its labels, case-insensitively.
    pub fn get(&self, label: &str) -> Option<&Arc<CommandDescriptor>> {
        self.entries.get(&label.to_lowercase()).map(|e| &e.command)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// Namespace a label was registered under.
    pub fn namespace_of(&self, label: &str) -> Option<&str> {
        self.entries
            .get(&label.to_lowercase())
            .map(|e| e.namespace.as_str())
    }

    /// Number of labels in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All labels, sorted.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    fn insert_command(
        &mut self,
        namespace: &str,
        command: CommandDescriptor,
    ) -> RegistrationResult<()> {
        command.validate()?;

        let namespace = namespace.trim().to_lowercase();
        if namespace.is_empty() || namespace.contains(':') {
            return Err(RegistrationError::InvalidDescriptor(format!(
                "invalid namespace '{namespace}'"
            )));
        }

        let name = command.name().to_lowercase();
        let aliases: Vec<String> = command.aliases().iter().map(|a| a.to_lowercase()).collect();
        let entry = CommandEntry {
            namespace: namespace.clone(),
            command: Arc::new(command),
        };

        // The fallback label is recorded even when the bare name is taken.
        self.entries
            .insert(format!("{namespace}:{name}"), entry.clone());

        if self.policy == CollisionPolicy::Reject {
            if let Some(existing) = self.entries.get(&name) {
                return Err(RegistrationError::NameCollision {
                    name,
                    owner: existing.namespace.clone(),
                });
            }
        }

        self.entries.insert(name.clone(), entry.clone());

        for alias in aliases {
            if self.policy == CollisionPolicy::Reject && self.entries.contains_key(&alias) {
                tracing::warn!(command = %name, alias = %alias, "alias already taken, skipping");
                continue;
            }
            self.entries.insert(alias, entry.clone());
        }

        tracing::debug!(namespace = %namespace, command = %name, "command registered");
        Ok(())
    }

    /// Parse and run a command line such as `/name arg1 arg2`.
    ///
    /// Arguments are split on single spaces, so empty arguments survive.
    pub fn dispatch(&self, sender: &dyn Actor, line: &str) -> Dispatch {
        let line = line.strip_prefix('/').unwrap_or(line);
        let mut parts = line.split(' ');
        let label = parts.next().unwrap_or_default();
        let args: Vec<String> = parts.map(str::to_string).collect();

        let Some(command) = self.get(label) else {
            return Dispatch::Unknown(label.to_string());
        };

        if command.execute(sender, label, &args) {
            Dispatch::Executed
        } else {
            sender.send_message(command.usage());
            Dispatch::UsageShown
        }
    }

    /// Suggestions for a partially typed command line.
    ///
    /// Without a space the label itself is completed (best fuzzy match
    /// first); otherwise the command's own completer is asked.
    pub fn tab_complete(&self, sender: &dyn Actor, line: &str) -> Vec<String> {
        let line = line.strip_prefix('/').unwrap_or(line);

        match line.split_once(' ') {
            None => {
                let query = line.to_lowercase();
                let mut matches: Vec<(i64, &str)> = self
                    .entries
                    .keys()
                    .filter_map(|label| {
                        if query.is_empty() {
                            return Some((0, label.as_str()));
                        }
                        self.matcher
                            .fuzzy_match(label, &query)
                            .map(|score| (score, label.as_str()))
                    })
                    .collect();
                matches.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
                matches
                    .into_iter()
                    .map(|(_, label)| format!("/{label}"))
                    .collect()
            }
            Some((label, rest)) => {
                let Some(command) = self.get(label) else {
                    return Vec::new();
                };
                let args: Vec<String> = rest.split(' ').map(str::to_string).collect();
                command.tab_complete(sender, label, &args)
            }
        }
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new(CollisionPolicy::default())
    }
}

impl CommandRegistry for CommandTable {
    fn version(&self) -> u32 {
        self.version
    }

    fn register(&mut self, namespace: &str, command: CommandDescriptor) -> RegistrationResult<()> {
        self.insert_command(namespace, command)
    }
}

/// Event bus that delivers each event to every matching subscription.
#[derive(Default)]
pub struct EventDispatcher {
    subscriptions: Vec<EventSubscription>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event`; returns how many handlers completed.
    ///
    /// A panicking handler is logged and skipped; the remaining handlers
    /// still run.
    pub fn publish(&self, event: &PlayerEvent<'_>) -> usize {
        let kind = event.kind();
        let mut delivered = 0;

        for sub in self.subscriptions.iter().filter(|s| s.kind == kind) {
            let callback = &sub.callback;
            match panic::catch_unwind(AssertUnwindSafe(|| callback(event))) {
                Ok(()) => delivered += 1,
                Err(_) => {
                    tracing::warn!(owner = %sub.owner, ?kind, "event handler panicked");
                }
            }
        }

        delivered
    }

    /// Drop every subscription registered by `owner`; returns how many were removed.
    pub fn unregister_owner(&mut self, owner: &str) -> usize {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.owner != owner);
        before - self.subscriptions.len()
    }

    pub fn subscription_count(&self, kind: EventKind) -> usize {
        self.subscriptions.iter().filter(|s| s.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl EventBus for EventDispatcher {
    fn subscribe(&mut self, subscription: EventSubscription) {
        tracing::debug!(owner = %subscription.owner, kind = ?subscription.kind, "event subscription added");
        self.subscriptions.push(subscription);
    }
}

/// How the host answers a request for its command table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CommandAccess {
    #[default]
    Open,
    /// The table does not exist in this runtime.
    Missing(String),
    /// A security policy refuses access.
    Denied(String),
}

/// A player connected to a [`LocalHost`]. Keeps every message it receives.
#[derive(Debug)]
pub struct LocalPlayer {
    name: String,
    inbox: RefCell<Vec<String>>,
}

impl LocalPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inbox: RefCell::new(Vec::new()),
        }
    }

    /// Messages received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.inbox.borrow().clone()
    }
}

impl Actor for LocalPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn send_message(&self, message: &str) {
        self.inbox.borrow_mut().push(message.to_string());
    }
}

/// Host runtime living in the current process.
pub struct LocalHost {
    name: String,
    sink: Arc<dyn LogSink>,
    access: CommandAccess,
    commands: CommandTable,
    events: EventDispatcher,
    extension_ids: Vec<String>,
}

impl LocalHost {
    pub fn new(name: impl Into<String>, policy: CollisionPolicy) -> Self {
        Self {
            name: name.into(),
            sink: Arc::new(TracingSink),
            access: CommandAccess::Open,
            commands: CommandTable::new(policy),
            events: EventDispatcher::new(),
            extension_ids: Vec::new(),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_command_access(mut self, access: CommandAccess) -> Self {
        self.access = access;
        self
    }

    pub fn with_registry_version(mut self, version: u32) -> Self {
        self.commands = self.commands.with_version(version);
        self
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventDispatcher {
        &mut self.events
    }

    /// Identifiers extensions registered under, in call order.
    pub fn extension_ids(&self) -> &[String] {
        &self.extension_ids
    }

    pub fn player_join(&self, player: &dyn Actor) -> usize {
        self.events.publish(&PlayerEvent::Arrived(player))
    }

    pub fn player_quit(&self, player: &dyn Actor) -> usize {
        self.events.publish(&PlayerEvent::Departed(player))
    }

    pub fn dispatch_command(&self, sender: &dyn Actor, line: &str) -> Dispatch {
        self.commands.dispatch(sender, line)
    }

    pub fn tab_complete(&self, sender: &dyn Actor, line: &str) -> Vec<String> {
        self.commands.tab_complete(sender, line)
    }
}

impl Host for LocalHost {
    fn name(&self) -> &str {
        &self.name
    }

    fn log_sink(&self) -> Arc<dyn LogSink> {
        Arc::clone(&self.sink)
    }

    fn event_bus(&mut self) -> &mut dyn EventBus {
        &mut self.events
    }

    fn command_registry(&mut self) -> RegistrationResult<&mut dyn CommandRegistry> {
        match &self.access {
            CommandAccess::Open => Ok(&mut self.commands),
            CommandAccess::Missing(reason) => {
                Err(RegistrationError::TableUnavailable(reason.clone()))
            }
            CommandAccess::Denied(reason) => Err(RegistrationError::AccessDenied(reason.clone())),
        }
    }

    fn set_extension_id(&mut self, id: &str) {
        self.extension_ids.push(id.to_string());
    }
}
