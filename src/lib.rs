//! Essential Agent - example extension for the MCEngine host runtime.
//!
//! The extension registers one command, `/essentialagentexample`, into the
//! host's live command table after the host has finished its own startup
//! registration, and subscribes to player arrival and departure events.
//!
//! # Architecture
//!
//! The library is organized into these main modules:
//!
//! - [`host`] - Ports the host implements (command registry, event bus, logging)
//! - [`host::runtime`] - In-process host used by the CLI and by tests
//! - [`command`] - Command descriptors and their execute/complete capabilities
//! - [`registrar`] - Dynamic command registration
//! - [`listener`] - Event subscription adapter and the player listener
//! - [`agent`] - Lifecycle entry point (`on_load`, `on_unload`, `set_id`)
//! - [`config`] - Configuration loading
//!
//! # Example
//!
//! ```
//! use essential_agent_example::host::runtime::{CollisionPolicy, LocalHost, LocalPlayer};
//! use essential_agent_example::{ExampleEssentialAgent, Extension};
//!
//! let mut host = LocalHost::new("MCEngineEssential", CollisionPolicy::Reject);
//! let mut agent = ExampleEssentialAgent::new();
//!
//! assert!(agent.on_load(&mut host).is_ready());
//! let steve = LocalPlayer::new("Steve");
//! host.player_join(&steve);
//! host.dispatch_command(&steve, "/essentialagentexample");
//! agent.on_unload(&mut host);
//! ```

pub mod agent;
pub mod chat;
pub mod cli;
pub mod command;
pub mod config;
pub mod host;
pub mod listener;
pub mod logger;
pub mod registrar;

mod error;

pub use agent::{ExampleEssentialAgent, LifecycleState, EXTENSION_ID};
pub use command::{CommandDescriptor, CommandExecutor, TabCompleter};
pub use config::AgentConfig;
pub use error::{AgentError, AgentResult, RegistrationError, RegistrationResult};
pub use host::{Actor, CommandRegistry, EventBus, EventKind, Extension, Host, LoadOutcome};
pub use logger::{ExtensionLogger, LogLevel, LogSink};
