//! Plain-text rendering of pickups and impact figures.

use chrono::NaiveDateTime;
use comfy_table::{Cell, Table};
use pickup_core::{parse_pickup_datetime, EnvironmentalImpact, PickupRequest, PickupStatus, PickupSummary};

const DISPLAY_FORMAT: &str = "%b %d, %Y at %I:%M %p";

pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DISPLAY_FORMAT).to_string()
}

/// Server timestamps are opaque; show them nicely when they parse.
pub fn format_timestamp(raw: &str) -> String {
    parse_pickup_datetime(raw)
        .map(|dt| format_datetime(&dt))
        .unwrap_or_else(|_| raw.to_string())
}

pub fn pickup_details(pickup: &PickupRequest) -> String {
    let mut out = format!(
        "Pickup #{} - {} Waste\n  Location:  {}\n  Scheduled: {}\n  Status:    {}\n  User:      {}",
        pickup.id,
        pickup.waste_type.label(),
        pickup.pickup_location,
        format_datetime(&pickup.pickup_date_time),
        pickup.status.label(),
        pickup.user_name,
    );
    if let Some(created) = &pickup.creation_timestamp {
        out.push_str(&format!("\n  Created:   {}", format_timestamp(created)));
    }
    out
}

/// One line per lifecycle stage, checked up to the current one. A cancelled
/// pickup shows only the stage it started in plus the cancellation.
pub fn timeline(current: PickupStatus) -> String {
    let stages = [
        PickupStatus::Pending,
        PickupStatus::Confirmed,
        PickupStatus::InProgress,
        PickupStatus::Completed,
    ];
    let mut lines: Vec<String> = stages
        .iter()
        .map(|&stage| {
            let reached = if current == PickupStatus::Cancelled {
                stage == PickupStatus::Pending
            } else {
                stage <= current
            };
            format!("[{}] {}", if reached { "x" } else { " " }, stage.label())
        })
        .collect();
    if current == PickupStatus::Cancelled {
        lines.push(format!("[x] {}", PickupStatus::Cancelled.label()));
    }
    lines.join("\n")
}

pub fn status_hint(status: PickupStatus) -> &'static str {
    match status {
        PickupStatus::Pending => "Your pickup request is being reviewed. Check back later for updates.",
        PickupStatus::Confirmed => {
            "Your pickup has been confirmed. A collection team will arrive at the scheduled time."
        }
        PickupStatus::InProgress => "The collection team is on its way to your location.",
        PickupStatus::Completed => "Your waste has been collected and disposed of.",
        PickupStatus::Cancelled => "This pickup has been cancelled. Contact support for more information.",
    }
}

pub fn pickup_table(pickups: &[PickupRequest]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Waste Type", "Location", "Scheduled", "Status", "User"]);
    for pickup in pickups {
        table.add_row(vec![
            Cell::new(&pickup.id),
            Cell::new(pickup.waste_type.label()),
            Cell::new(&pickup.pickup_location),
            Cell::new(format_datetime(&pickup.pickup_date_time)),
            Cell::new(pickup.status.label()),
            Cell::new(&pickup.user_name),
        ]);
    }
    table
}

pub fn summary(summary: &PickupSummary) -> String {
    format!(
        "Total pickups: {}  Completed: {}  Active: {}",
        summary.total, summary.completed, summary.active
    )
}

pub fn impact_report(impact: &EnvironmentalImpact) -> String {
    let mut out = format!(
        "Completed pickups:   {}\nWaste recycled:      {:.1} kg\nCO2 emissions saved: {:.1} kg",
        impact.total_completed_pickups, impact.total_recycled_waste, impact.co2_reduction,
    );
    if !impact.waste_type_distribution.is_empty() {
        out.push_str("\nBy waste type:");
        for (waste_type, count) in &impact.waste_type_distribution {
            out.push_str(&format!("\n  {waste_type}: {count}"));
        }
    }
    out
}
