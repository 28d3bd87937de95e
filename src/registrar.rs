//! Dynamic command registration.
//!
//! The host has finished its own command registration by the time an
//! extension loads, so the command is inserted directly into the host's
//! live command table through the [`CommandRegistry`] port.

use crate::command::CommandDescriptor;
use crate::error::{RegistrationError, RegistrationResult};
use crate::host::{CommandRegistry, Host, COMMAND_REGISTRY_VERSION};

/// Insert `command` into the host's command table under `namespace`.
///
/// The namespace is lower-cased. On success the command can be dispatched
/// immediately. Nothing is registered on failure.
pub fn register_command(
    host: &mut dyn Host,
    namespace: &str,
    command: CommandDescriptor,
) -> RegistrationResult<()> {
    let registry = host.command_registry()?;
    register_into(registry, namespace, command)
}

/// Same as [`register_command`] for an already obtained registry.
pub fn register_into(
    registry: &mut dyn CommandRegistry,
    namespace: &str,
    command: CommandDescriptor,
) -> RegistrationResult<()> {
    let found = registry.version();
    if found != COMMAND_REGISTRY_VERSION {
        return Err(RegistrationError::VersionMismatch {
            expected: COMMAND_REGISTRY_VERSION,
            found,
        });
    }

    command.validate()?;
    registry.register(&namespace.to_lowercase(), command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{EssentialAgentCommand, EssentialAgentTabCompleter};
    use crate::host::runtime::{CollisionPolicy, CommandAccess, Dispatch, LocalHost, LocalPlayer};
    use std::sync::Arc;

    fn descriptor(name: &str) -> CommandDescriptor {
        CommandDescriptor::new(
            name,
            Arc::new(EssentialAgentCommand),
            Arc::new(EssentialAgentTabCompleter),
        )
    }

    #[test]
    fn test_registered_command_is_dispatchable() {
        let mut host = LocalHost::new("MCEngineEssential", CollisionPolicy::Reject);

        register_command(&mut host, "MCEngineEssential", descriptor("essentialagentexample")).unwrap();

        let player = LocalPlayer::new("Steve");
        assert_eq!(
            host.dispatch_command(&player, "/essentialagentexample a b"),
            Dispatch::Executed
        );
        assert!(host.commands().contains("mcengineessential:essentialagentexample"));
    }

    #[test]
    fn test_missing_table() {
        let mut host = LocalHost::new("Host", CollisionPolicy::Reject)
            .with_command_access(CommandAccess::Missing("no commandMap".to_string()));

        let err = register_command(&mut host, "host", descriptor("x")).unwrap_err();
        assert_eq!(err, RegistrationError::TableUnavailable("no commandMap".to_string()));
        assert!(host.commands().is_empty());
    }

    #[test]
    fn test_version_mismatch() {
        let mut host = LocalHost::new("Host", CollisionPolicy::Reject).with_registry_version(2);

        let err = register_command(&mut host, "host", descriptor("x")).unwrap_err();
        assert_eq!(
            err,
            RegistrationError::VersionMismatch {
                expected: COMMAND_REGISTRY_VERSION,
                found: 2,
            }
        );
        assert!(host.commands().is_empty());
    }

    #[test]
    fn test_invalid_descriptor_is_rejected_before_insert() {
        let mut host = LocalHost::new("Host", CollisionPolicy::Reject);
        let err = register_command(&mut host, "host", descriptor("bad name")).unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidDescriptor(_)));
    }

    #[test]
    fn test_collision_surfaces_as_error() {
        let mut host = LocalHost::new("Host", CollisionPolicy::Reject);
        register_command(&mut host, "one", descriptor("x")).unwrap();

        let err = register_command(&mut host, "two", descriptor("x")).unwrap_err();
        assert!(matches!(err, RegistrationError::NameCollision { .. }));
    }
}
