// crates/command-filter/src/message.rs
// ============================================================================
// Module: Command Message View
// Description: Read-only access to the command name of a dispatched message.
// Purpose: Decouple filter evaluation from concrete message envelopes.
// Dependencies: serde, std
// ============================================================================

//! ## Overview
//! Filters only ever inspect the command name of a message. The
//! [`CommandMessage`] trait is the boundary to whatever envelope the dispatch
//! layer carries; plain strings implement it so a bare name can be evaluated
//! directly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::rc::Rc;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Message Trait
// ============================================================================

/// Read-only view of a command message as seen by routing filters.
pub trait CommandMessage {
    /// Returns the command name identifying the message.
    fn command_name(&self) -> &str;
}

impl CommandMessage for str {
    fn command_name(&self) -> &str {
        self
    }
}

impl CommandMessage for String {
    fn command_name(&self) -> &str {
        self.as_str()
    }
}

impl<M: CommandMessage + ?Sized> CommandMessage for &M {
    fn command_name(&self) -> &str {
        (**self).command_name()
    }
}

impl<M: CommandMessage + ?Sized> CommandMessage for Box<M> {
    fn command_name(&self) -> &str {
        (**self).command_name()
    }
}

impl<M: CommandMessage + ?Sized> CommandMessage for Arc<M> {
    fn command_name(&self) -> &str {
        (**self).command_name()
    }
}

impl<M: CommandMessage + ?Sized> CommandMessage for Rc<M> {
    fn command_name(&self) -> &str {
        (**self).command_name()
    }
}

// ============================================================================
// SECTION: Command Envelope
// ============================================================================

/// Minimal owned command message carrying a name and optional payload type.
///
/// # Invariants
/// - `command_name` is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandEnvelope {
    /// Command name used for routing decisions.
    command_name: String,
    /// Optional payload type descriptor, ignored by filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload_type: Option<String>,
}

impl CommandEnvelope {
    /// Creates an envelope for the given command name.
    pub fn new(command_name: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            payload_type: None,
        }
    }

    /// Attaches a payload type descriptor.
    #[must_use]
    pub fn with_payload_type(mut self, payload_type: impl Into<String>) -> Self {
        self.payload_type = Some(payload_type.into());
        self
    }

    /// Returns the payload type descriptor, if any.
    #[must_use]
    pub fn payload_type(&self) -> Option<&str> {
        self.payload_type.as_deref()
    }
}

impl CommandMessage for CommandEnvelope {
    fn command_name(&self) -> &str {
        &self.command_name
    }
}
