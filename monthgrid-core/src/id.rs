//! Event identifiers and the sources that mint them.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of an event within an event store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        EventId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        EventId::new(id)
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        EventId(id)
    }
}

/// Source of fresh event ids. Ids only need to be unique for the lifetime of
/// one event store.
pub trait IdGenerator {
    fn next_id(&mut self) -> EventId;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> EventId {
        EventId(Uuid::new_v4().to_string())
    }
}

/// Predictable ids of the form `{prefix}{n}`, starting at 1.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialIds {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        SequentialIds::new("evt-")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> EventId {
        let id = EventId(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
