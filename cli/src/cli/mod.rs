pub mod impact;
pub mod lifecycle;
pub mod list;
pub mod ping;
pub mod request;
pub mod track;

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use pickup_core::{Outcome, PickupApi, PickupId, PickupStatus, Transport, UreqTransport, WasteType};
use serde::Serialize;

use crate::session::Session;

#[derive(Parser)]
#[command(
    name = "pickup",
    version,
    about = "Schedule, track and manage waste pickups"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the pickup API
    #[arg(long, env = "PICKUP_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Name to act as (`admin` may change statuses and delete)
    #[arg(short, long, env = "PICKUP_USER", global = true)]
    pub user: Option<String>,

    /// Print {success, data|error} JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check that the pickup API is reachable
    Ping,
    /// Schedule a new pickup
    Request {
        /// Waste type (plastic, electronic, hazardous, organic)
        #[arg(long)]
        waste_type: WasteType,
        /// Address or location for the pickup
        #[arg(long)]
        location: String,
        /// Pickup date (YYYY-MM-DD), up to 30 days ahead
        #[arg(long)]
        date: NaiveDate,
        /// Pickup time (HH:MM or HH:MM:SS)
        #[arg(long, default_value = "09:00", value_parser = parse_time)]
        time: NaiveTime,
        /// Special instructions, appended to the location
        #[arg(long)]
        note: Option<String>,
    },
    /// Show a pickup and where it is in its lifecycle
    Track {
        /// Confirmation number returned when the pickup was scheduled
        id: PickupId,
    },
    /// List pickups, newest first
    List {
        /// Only pickups in this status
        #[arg(long)]
        status: Option<PickupStatus>,
        /// Only pickups of this waste type
        #[arg(long)]
        waste_type: Option<WasteType>,
        /// Only pickups whose user name contains this text
        #[arg(long)]
        by: Option<String>,
    },
    /// Move a pickup to its next status (admin only)
    SetStatus {
        id: PickupId,
        /// New status (pending, confirmed, in_progress, completed, cancelled)
        status: PickupStatus,
    },
    /// Move a pending or confirmed pickup to a new date and time
    Reschedule {
        id: PickupId,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// New time (HH:MM or HH:MM:SS)
        #[arg(long, default_value = "09:00", value_parser = parse_time)]
        time: NaiveTime,
    },
    /// Cancel a pickup, keeping its record
    Cancel { id: PickupId },
    /// Remove a pickup record entirely (admin only)
    Delete { id: PickupId },
    /// Show environmental impact of completed pickups
    Impact,
}

/// Everything a command handler needs, passed explicitly.
pub struct Context<T = UreqTransport> {
    pub api: PickupApi<T>,
    pub session: Session,
    pub json: bool,
}

impl<T: Transport> Context<T> {
    /// Render a successful result, or print it as a success envelope in
    /// JSON mode. Failures propagate to `main`, which reports them.
    pub fn emit<R: Serialize>(
        &self,
        result: Result<R, pickup_core::ApiError>,
        render: impl FnOnce(&R),
    ) -> anyhow::Result<()> {
        let data = result?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&Outcome::success(&data))?);
        } else {
            render(&data);
        }
        Ok(())
    }
}

pub fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| format!("invalid time {raw:?}, expected HH:MM or HH:MM:SS"))
}
