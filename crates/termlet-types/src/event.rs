//! Executor events: the notification stream the embedding layer observes.

use serde::{Deserialize, Serialize};

/// A notification emitted by the command executor.
///
/// `command` is always the resolved (post-alias) name, i.e. the name that
/// was actually looked up in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TermEvent {
    /// A handler ran and returned `Ok`.
    CommandSuccess {
        command: String,
        args: Vec<String>,
        input: String,
        result: Option<String>,
    },
    /// The handler failed, or no handler was registered for the name.
    CommandError {
        command: String,
        args: Vec<String>,
        input: String,
        message: String,
    },
    /// Fired after every execution attempt, success or not.
    CommandExecuted {
        command: String,
        args: Vec<String>,
        input: String,
    },
}

/// Receiver for executor events.
///
/// Implementations forward to whatever event dispatch the embedding uses
/// (custom DOM events, channels, a test vector).
pub trait EventSink {
    fn emit(&mut self, event: TermEvent);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&mut self, _event: TermEvent) {}
}

impl EventSink for Vec<TermEvent> {
    fn emit(&mut self, event: TermEvent) {
        self.push(event);
    }
}
