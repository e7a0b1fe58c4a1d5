//! Badge events and the direction of a checkpoint crossing.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Direction of a badge swipe at the checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Entry,
    Exit,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Exit => "exit",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    /// Accepts the canonical names, the short `in`/`out` forms and the labels
    /// printed by the turnstile controller export (`Wejście`, `Wyjście`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "Wejście" | "wejście" => return Ok(Self::Entry),
            "Wyjście" | "wyjście" => return Ok(Self::Exit),
            _ => {}
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "entry" | "in" => Ok(Self::Entry),
            "exit" | "out" => Ok(Self::Exit),
            _ => Err(UnknownEventKind(s.to_string())),
        }
    }
}

impl Serialize for EventKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unrecognised event kind strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventKind(String);

impl fmt::Display for UnknownEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event kind: {}", self.0)
    }
}

impl std::error::Error for UnknownEventKind {}

/// A single badge swipe for one person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Wall-clock time as recorded by the reader.
    pub timestamp: NaiveDateTime,
    pub kind: EventKind,
}

impl Event {
    #[must_use]
    pub const fn entry(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            kind: EventKind::Entry,
        }
    }

    #[must_use]
    pub const fn exit(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            kind: EventKind::Exit,
        }
    }

    pub const fn is_entry(&self) -> bool {
        matches!(self.kind, EventKind::Entry)
    }

    pub const fn is_exit(&self) -> bool {
        matches!(self.kind, EventKind::Exit)
    }
}
