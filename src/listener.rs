//! Event subscription adapter and the example player listener.
//!
//! A [`Listener`] declares which event kinds it handles; the adapter turns
//! each declared kind into one [`EventSubscription`] on the host bus.

use std::sync::Arc;

use crate::chat::ChatColor;
use crate::config::MessagesConfig;
use crate::host::{Actor, EventBus, EventCallback, EventKind, EventSubscription, PlayerEvent};
use crate::logger::ExtensionLogger;

/// Placeholder replaced with the player's display name in message templates.
pub const PLAYER_PLACEHOLDER: &str = "{player}";

/// Receives player lifecycle events.
///
/// Only the kinds returned by [`Listener::handles`] are subscribed.
pub trait Listener: Send + Sync {
    fn handles(&self) -> &[EventKind];

    fn on_player_arrived(&self, _actor: &dyn Actor) {}

    fn on_player_departed(&self, _actor: &dyn Actor) {}
}

/// Subscribe `listener` to every event kind it handles.
///
/// Returns the number of subscriptions added.
pub fn register_listener(bus: &mut dyn EventBus, owner: &str, listener: Arc<dyn Listener>) -> usize {
    let kinds = listener.handles().to_vec();

    for &kind in &kinds {
        let listener = Arc::clone(&listener);
        let callback: EventCallback = Arc::new(move |event: &PlayerEvent<'_>| match event {
            PlayerEvent::Arrived(actor) => listener.on_player_arrived(*actor),
            PlayerEvent::Departed(actor) => listener.on_player_departed(*actor),
        });

        bus.subscribe(EventSubscription {
            kind,
            owner: owner.to_string(),
            callback,
        });
    }

    kinds.len()
}

/// Greets arriving players and logs departures.
pub struct EssentialAgentListener {
    logger: ExtensionLogger,
    welcome: String,
    departure: String,
}

impl EssentialAgentListener {
    pub fn new(logger: ExtensionLogger, messages: &MessagesConfig) -> Self {
        Self {
            logger,
            welcome: messages.welcome.clone(),
            departure: messages.departure.clone(),
        }
    }

    /// Chat line sent to a player who just arrived.
    pub fn welcome_message(&self, player_name: &str) -> String {
        format!(
            "{}{}",
            ChatColor::Aqua,
            self.welcome.replace(PLAYER_PLACEHOLDER, player_name)
        )
    }

    /// Log line written when a player leaves.
    pub fn departure_message(&self, player_name: &str) -> String {
        self.departure.replace(PLAYER_PLACEHOLDER, player_name)
    }
}

impl Listener for EssentialAgentListener {
    fn handles(&self) -> &[EventKind] {
        &[EventKind::PlayerArrived, EventKind::PlayerDeparted]
    }

    fn on_player_arrived(&self, actor: &dyn Actor) {
        actor.send_message(&self.welcome_message(actor.name()));
    }

    fn on_player_departed(&self, actor: &dyn Actor) {
        self.logger.info(self.departure_message(actor.name()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{strip_colors, COLOR_CHAR};
    use crate::host::runtime::{EventDispatcher, LocalPlayer};
    use crate::logger::tests::RecordingSink;
    use crate::logger::LogLevel;

    fn listener(sink: Arc<RecordingSink>) -> EssentialAgentListener {
        let logger = ExtensionLogger::new(sink, "MCEngineEssential", "Agent", "EssentialExampleAgent");
        EssentialAgentListener::new(logger, &MessagesConfig::default())
    }

    #[test]
    fn test_register_listener_subscribes_both_kinds() {
        let mut bus = EventDispatcher::new();
        let sink = Arc::new(RecordingSink::default());

        let added = register_listener(&mut bus, "ext", Arc::new(listener(sink)));

        assert_eq!(added, 2);
        assert_eq!(bus.subscription_count(EventKind::PlayerArrived), 1);
        assert_eq!(bus.subscription_count(EventKind::PlayerDeparted), 1);
    }

    #[test]
    fn test_arrival_sends_welcome() {
        let mut bus = EventDispatcher::new();
        let sink = Arc::new(RecordingSink::default());
        register_listener(&mut bus, "ext", Arc::new(listener(sink.clone())));

        let steve = LocalPlayer::new("Steve");
        bus.publish(&PlayerEvent::Arrived(&steve));

        let messages = steve.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            strip_colors(&messages[0]),
            "[Agent][essential-agent-example] Hello Steve, enjoy your time!"
        );
        assert!(sink.lines.lock().unwrap().is_empty());
    }

    #[test]
    fn test_welcome_is_aqua() {
        let sink = Arc::new(RecordingSink::default());
        let message = listener(sink).welcome_message("Steve");

        let mut chars = message.chars();
        assert_eq!(chars.next(), Some(COLOR_CHAR));
        assert_eq!(chars.next(), Some('b'));
        assert!(message.starts_with(&ChatColor::Aqua.to_string()));
    }

    #[test]
    fn test_departure_logs_once_without_message() {
        let mut bus = EventDispatcher::new();
        let sink = Arc::new(RecordingSink::default());
        register_listener(&mut bus, "ext", Arc::new(listener(sink.clone())));

        let alex = LocalPlayer::new("Alex");
        bus.publish(&PlayerEvent::Departed(&alex));

        let lines = sink.lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, LogLevel::Info);
        assert!(lines[0].2.contains("Alex has left the server."));
        assert!(alex.messages().is_empty());
    }

    #[test]
    fn test_listener_with_partial_capabilities() {
        struct ArrivalsOnly;

        impl Listener for ArrivalsOnly {
            fn handles(&self) -> &[EventKind] {
                &[EventKind::PlayerArrived]
            }
        }

        let mut bus = EventDispatcher::new();
        assert_eq!(register_listener(&mut bus, "ext", Arc::new(ArrivalsOnly)), 1);
        assert_eq!(bus.subscription_count(EventKind::PlayerDeparted), 0);
    }
}
