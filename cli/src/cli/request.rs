use chrono::{Days, Local, NaiveDate, NaiveDateTime, NaiveTime};
use pickup_core::{Created, Transport, WasteType};

use super::Context;
use crate::render;

/// Pickups may be booked from today up to this many days ahead.
pub const BOOKING_WINDOW_DAYS: u64 = 30;

/// Special instructions ride along in the location field.
pub fn annotate_location(location: &str, note: Option<&str>) -> anyhow::Result<String> {
    let location = location.trim();
    if location.is_empty() {
        anyhow::bail!("Please enter a pickup location");
    }
    Ok(match note.map(str::trim).filter(|note| !note.is_empty()) {
        Some(note) => format!("{location} (Note: {note})"),
        None => location.to_string(),
    })
}

/// The slot must not have passed and must fall within the booking window.
pub fn check_pickup_slot(at: NaiveDateTime, now: NaiveDateTime) -> anyhow::Result<()> {
    if at < now {
        anyhow::bail!("Pickup time {} is in the past", render::format_datetime(&at));
    }
    let today = now.date();
    let date = at.date();
    let last = today
        .checked_add_days(Days::new(BOOKING_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX);
    if date > last {
        anyhow::bail!("Pickups can be scheduled at most {BOOKING_WINDOW_DAYS} days ahead (until {last})");
    }
    Ok(())
}

pub fn request<T: Transport>(
    ctx: &Context<T>,
    waste_type: WasteType,
    location: &str,
    date: NaiveDate,
    time: NaiveTime,
    note: Option<&str>,
) -> anyhow::Result<()> {
    let user_name = ctx.session.require_user()?;
    let location = annotate_location(location, note)?;
    let at = date.and_time(time);
    check_pickup_slot(at, Local::now().naive_local())?;

    let result = ctx.api.create_pickup(waste_type, &location, at, user_name);
    ctx.emit(result, |created| match created {
        Created::Record(pickup) => {
            println!("Pickup scheduled. Confirmation #{}\n", pickup.id);
            println!("{}", render::pickup_details(pickup));
            println!("\nTrack it with: pickup track {}", pickup.id);
        }
        Created::Acknowledged { message } => {
            println!("Pickup scheduled: {message}");
        }
    })
}
