//! Pickup lifecycle states and the allowed transitions between them.
//!
//! The wire vocabulary is lowercase `pending`, `confirmed`, `in_progress`,
//! `completed`, `cancelled`. Decoding is lenient about case and separators and
//! maps the legacy `SCHEDULED` state onto `confirmed`, so servers speaking the
//! older upper-case vocabulary still decode into this one enum.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Lifecycle state of a pickup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum PickupStatus {
    #[default]
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pickup status {0:?}")]
pub struct UnknownStatus(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move a pickup from {from} to {to}")]
pub struct TransitionError {
    pub from: PickupStatus,
    pub to: PickupStatus,
}

impl PickupStatus {
    /// Every state in lifecycle order.
    pub const ALL: [PickupStatus; 5] = [
        PickupStatus::Pending,
        PickupStatus::Confirmed,
        PickupStatus::InProgress,
        PickupStatus::Completed,
        PickupStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PickupStatus::Pending => "pending",
            PickupStatus::Confirmed => "confirmed",
            PickupStatus::InProgress => "in_progress",
            PickupStatus::Completed => "completed",
            PickupStatus::Cancelled => "cancelled",
        }
    }

    /// Human-readable label, e.g. `In Progress`.
    pub fn label(self) -> &'static str {
        match self {
            PickupStatus::Pending => "Pending",
            PickupStatus::Confirmed => "Confirmed",
            PickupStatus::InProgress => "In Progress",
            PickupStatus::Completed => "Completed",
            PickupStatus::Cancelled => "Cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PickupStatus::Completed | PickupStatus::Cancelled)
    }

    /// Pending, confirmed and in-progress pickups still need work.
    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }

    /// States reachable in one step from `self`.
    pub fn next_states(self) -> &'static [PickupStatus] {
        match self {
            PickupStatus::Pending => &[PickupStatus::Confirmed, PickupStatus::Cancelled],
            PickupStatus::Confirmed => &[PickupStatus::InProgress, PickupStatus::Cancelled],
            PickupStatus::InProgress => &[PickupStatus::Completed, PickupStatus::Cancelled],
            PickupStatus::Completed | PickupStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, next: PickupStatus) -> bool {
        self.next_states().contains(&next)
    }

    /// Validate a move against the transition table.
    pub fn transition_to(self, next: PickupStatus) -> Result<PickupStatus, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for PickupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PickupStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "pending" => Ok(PickupStatus::Pending),
            "confirmed" | "scheduled" => Ok(PickupStatus::Confirmed),
            "in_progress" | "inprogress" => Ok(PickupStatus::InProgress),
            "completed" => Ok(PickupStatus::Completed),
            "cancelled" | "canceled" => Ok(PickupStatus::Cancelled),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl Serialize for PickupStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PickupStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
