//! Outbox for events produced while stepping
//!
//! Statement handlers never call back into the host. They queue events
//! here and the session layer drains them into the caller's sink.

use super::types::Val;
use serde::{Deserialize, Serialize};

/// Classification tag attached to every emitted event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// Value written by an output statement
    Output,
    /// Completion notification
    System,
    /// Runtime fault notification
    Error,
}

/// A single value handed to the output sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputEvent {
    pub value: Val,
    pub kind: OutputKind,
}

impl OutputEvent {
    pub fn output(value: Val) -> Self {
        OutputEvent {
            value,
            kind: OutputKind::Output,
        }
    }

    pub fn system(message: impl Into<String>) -> Self {
        OutputEvent {
            value: Val::Str(message.into()),
            kind: OutputKind::System,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        OutputEvent {
            value: Val::Str(message.into()),
            kind: OutputKind::Error,
        }
    }
}

/// Pending events in emission order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outbox {
    pub events: Vec<OutputEvent>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: OutputEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take all queued events, leaving the outbox empty
    pub fn drain(&mut self) -> Vec<OutputEvent> {
        std::mem::take(&mut self.events)
    }
}
