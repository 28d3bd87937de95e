//! Ports between an extension and the host game-server runtime.
//!
//! The host owns the command table, the event bus and the extension
//! identifier registry. Extensions only see them through the traits in
//! this module.
//!
//! # Architecture
//!
//! ```text
//! Host
//! ├── command_registry() -> CommandRegistry   (may be unavailable)
//! ├── event_bus()        -> EventBus
//! ├── log_sink()         -> LogSink
//! └── set_extension_id()
//!
//! Extension
//! ├── on_load(host)   -> LoadOutcome
//! ├── on_unload(host)
//! └── set_id(host, id)
//! ```
//!
//! Every call happens on the host's controlling thread. Mutable access is
//! expressed with `&mut`, so no locking is involved.

pub mod runtime;

use std::fmt;
use std::sync::Arc;

use crate::command::CommandDescriptor;
use crate::error::{RegistrationError, RegistrationResult};
use crate::logger::LogSink;

/// Version of the [`CommandRegistry`] contract this crate was built against.
pub const COMMAND_REGISTRY_VERSION: u32 = 1;

/// A player (or console) that can receive chat messages.
pub trait Actor {
    /// Display name.
    fn name(&self) -> &str;

    /// Deliver a chat message to this actor only.
    fn send_message(&self, message: &str);
}

/// Kinds of host events an extension can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PlayerArrived,
    PlayerDeparted,
}

/// An event published on the host bus.
#[derive(Clone, Copy)]
pub enum PlayerEvent<'a> {
    Arrived(&'a dyn Actor),
    Departed(&'a dyn Actor),
}

impl<'a> PlayerEvent<'a> {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Arrived(_) => EventKind::PlayerArrived,
            Self::Departed(_) => EventKind::PlayerDeparted,
        }
    }

    pub fn actor(&self) -> &'a dyn Actor {
        match *self {
            Self::Arrived(actor) | Self::Departed(actor) => actor,
        }
    }
}

impl fmt::Debug for PlayerEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerEvent")
            .field("kind", &self.kind())
            .field("actor", &self.actor().name())
            .finish()
    }
}

/// Callback invoked by the event bus.
pub type EventCallback = Arc<dyn Fn(&PlayerEvent<'_>) + Send + Sync>;

/// One (event kind, callback) binding owned by the host bus.
#[derive(Clone)]
pub struct EventSubscription {
    pub kind: EventKind,
    /// Identifier of the extension that registered the callback.
    pub owner: String,
    pub callback: EventCallback,
}

impl fmt::Debug for EventSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSubscription")
            .field("kind", &self.kind)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

/// Host-owned command table, exposed to extensions after startup.
pub trait CommandRegistry {
    /// Contract version implemented by the host.
    fn version(&self) -> u32;

    /// Insert `command` under `namespace`. On success it is dispatchable at once.
    fn register(&mut self, namespace: &str, command: CommandDescriptor) -> RegistrationResult<()>;
}

/// Host-owned publish mechanism for lifecycle events.
pub trait EventBus {
    fn subscribe(&mut self, subscription: EventSubscription);
}

/// Everything an extension may ask of the host runtime.
pub trait Host {
    /// Name of the host plugin; lower-cased it becomes the command namespace.
    fn name(&self) -> &str;

    /// Sink used for the extension's labeled logger.
    fn log_sink(&self) -> Arc<dyn LogSink>;

    fn event_bus(&mut self) -> &mut dyn EventBus;

    /// Live handle to the command table.
    ///
    /// Fails when the host does not expose the table or refuses access.
    fn command_registry(&mut self) -> RegistrationResult<&mut dyn CommandRegistry>;

    /// Record the identifier the extension registers under.
    fn set_extension_id(&mut self, id: &str);
}

/// Result of loading an extension. Loading itself never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Listeners and command are registered.
    Ready,
    /// Listeners are registered but the command is absent.
    Degraded(RegistrationError),
}

impl LoadOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Lifecycle hooks the host calls on an extension.
pub trait Extension {
    fn on_load(&mut self, host: &mut dyn Host) -> LoadOutcome;

    fn on_unload(&mut self, host: &mut dyn Host);

    fn set_id(&mut self, host: &mut dyn Host, id: &str);
}
