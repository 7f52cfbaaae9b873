//! Client-side filtering, ordering and counting of fetched pickups.

use crate::status::PickupStatus;
use crate::types::{PickupRequest, WasteType};

/// Criteria for narrowing a pickup list. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickupFilter {
    pub status: Option<PickupStatus>,
    pub waste_type: Option<WasteType>,
    /// Case-insensitive substring of the user name.
    pub user: Option<String>,
}

impl PickupFilter {
    pub fn matches(&self, pickup: &PickupRequest) -> bool {
        if self.status.is_some_and(|status| pickup.status != status) {
            return false;
        }
        if let Some(waste_type) = &self.waste_type {
            if &pickup.waste_type != waste_type {
                return false;
            }
        }
        match self.user.as_deref().map(str::trim) {
            Some(user) if !user.is_empty() => pickup
                .user_name
                .to_lowercase()
                .contains(&user.to_lowercase()),
            _ => true,
        }
    }

    /// Keep matching pickups, most recently scheduled first.
    pub fn apply(&self, pickups: Vec<PickupRequest>) -> Vec<PickupRequest> {
        let mut kept: Vec<PickupRequest> = pickups.into_iter().filter(|p| self.matches(p)).collect();
        kept.sort_by(|a, b| b.pickup_date_time.cmp(&a.pickup_date_time));
        kept
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickupSummary {
    pub total: usize,
    pub completed: usize,
    /// Pending, confirmed or in progress.
    pub active: usize,
}

impl PickupSummary {
    pub fn of(pickups: &[PickupRequest]) -> Self {
        pickups.iter().fold(Self::default(), |mut summary, pickup| {
            summary.total += 1;
            if pickup.status == PickupStatus::Completed {
                summary.completed += 1;
            }
            if pickup.status.is_active() {
                summary.active += 1;
            }
            summary
        })
    }
}
