//! Domain DTOs for the pickup API.
//!
//! # Design
//! `PickupRequest` is the single canonical record. Its serde attributes are
//! the adapter at the API boundary: outbound it always uses camelCase keys,
//! inbound it also accepts the legacy snake_case keys so both server variants
//! decode into the same type. The mock-server crate defines its own schema
//! independently; integration tests catch drift between the two.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::status::PickupStatus;

/// Wire format of `pickupDateTime`.
pub const PICKUP_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a pickup date-time as sent by the server.
///
/// Accepts the canonical `YYYY-MM-DD HH:MM:SS`, the ISO `T`-separated form,
/// and RFC 3339 (converted to UTC).
pub fn parse_pickup_datetime(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, PICKUP_DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|e| {
            DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.naive_utc())
                .map_err(|_| e)
        })
}

pub fn format_pickup_datetime(value: &NaiveDateTime) -> String {
    value.format(PICKUP_DATETIME_FORMAT).to_string()
}

mod wire_datetime {
    use super::*;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(PICKUP_DATETIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_pickup_datetime(&raw)
            .map_err(|e| serde::de::Error::custom(format!("invalid pickup date-time {raw:?}: {e}")))
    }
}

/// Server-assigned identifier, opaque to the client.
///
/// The server may send it as a JSON number or a string; whichever it used is
/// what gets written back out, digit for digit. Comparisons and hashing use
/// the textual form, so `42` and `"42"` name the same pickup.
#[derive(Debug, Clone)]
pub struct PickupId(Repr);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(serde_json::Number),
    Text(String),
}

impl PickupId {
    fn text(&self) -> Cow<'_, str> {
        match &self.0 {
            Repr::Number(n) => Cow::Owned(n.to_string()),
            Repr::Text(s) => Cow::Borrowed(s),
        }
    }
}

impl fmt::Display for PickupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl PartialEq for PickupId {
    fn eq(&self, other: &Self) -> bool {
        self.text() == other.text()
    }
}

impl Eq for PickupId {}

impl Hash for PickupId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text().hash(state);
    }
}

impl PartialOrd for PickupId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PickupId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text().cmp(&other.text())
    }
}

impl From<u64> for PickupId {
    fn from(value: u64) -> Self {
        PickupId(Repr::Number(value.into()))
    }
}

/// Text ids are kept verbatim, surrounding whitespace included.
impl From<&str> for PickupId {
    fn from(value: &str) -> Self {
        PickupId(Repr::Text(value.to_string()))
    }
}

impl From<String> for PickupId {
    fn from(value: String) -> Self {
        PickupId(Repr::Text(value))
    }
}

impl FromStr for PickupId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PickupId::from(s))
    }
}

impl Serialize for PickupId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PickupId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Repr::deserialize(deserializer).map(PickupId)
    }
}

/// Kind of waste to collect.
///
/// Open enumeration: the four known kinds are matched case-insensitively and
/// anything else is preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WasteType {
    Plastic,
    Electronic,
    Organic,
    Hazardous,
    Other(String),
}

impl WasteType {
    pub const KNOWN: [WasteType; 4] = [
        WasteType::Plastic,
        WasteType::Electronic,
        WasteType::Organic,
        WasteType::Hazardous,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            WasteType::Plastic => "PLASTIC",
            WasteType::Electronic => "ELECTRONIC",
            WasteType::Organic => "ORGANIC",
            WasteType::Hazardous => "HAZARDOUS",
            WasteType::Other(raw) => raw,
        }
    }

    /// Title-cased label, e.g. `Plastic`.
    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for WasteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for WasteType {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "plastic" => WasteType::Plastic,
            "electronic" => WasteType::Electronic,
            "organic" => WasteType::Organic,
            "hazardous" => WasteType::Hazardous,
            _ => WasteType::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for WasteType {
    fn from(value: String) -> Self {
        WasteType::from(value.as_str())
    }
}

impl FromStr for WasteType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(WasteType::from(s))
    }
}

impl Serialize for WasteType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WasteType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(WasteType::from)
    }
}

/// A pickup request as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupRequest {
    pub id: PickupId,
    #[serde(alias = "waste_type")]
    pub waste_type: WasteType,
    #[serde(alias = "pickup_location")]
    pub pickup_location: String,
    #[serde(alias = "pickup_date_time", with = "wire_datetime")]
    pub pickup_date_time: NaiveDateTime,
    pub status: PickupStatus,
    #[serde(alias = "user_name")]
    pub user_name: String,
    /// Set by the server; never sent by the client.
    #[serde(
        alias = "creation_timestamp",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_timestamp: Option<String>,
}

impl PickupRequest {
    /// Full-record payload carrying every current field, ready to be edited
    /// and sent back through an update.
    pub fn to_update(&self) -> PickupUpdate {
        PickupUpdate {
            waste_type: self.waste_type.clone(),
            pickup_location: self.pickup_location.clone(),
            pickup_date_time: self.pickup_date_time,
            status: self.status,
            user_name: self.user_name.clone(),
        }
    }
}

/// Request payload for creating a pickup. New pickups always start pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPickup {
    pub waste_type: WasteType,
    pub pickup_location: String,
    #[serde(with = "wire_datetime")]
    pub pickup_date_time: NaiveDateTime,
    pub user_name: String,
    #[serde(default)]
    pub status: PickupStatus,
}

impl NewPickup {
    pub fn new(
        waste_type: impl Into<WasteType>,
        pickup_location: impl Into<String>,
        pickup_date_time: NaiveDateTime,
        user_name: impl Into<String>,
    ) -> Self {
        Self {
            waste_type: waste_type.into(),
            pickup_location: pickup_location.into(),
            pickup_date_time,
            user_name: user_name.into(),
            status: PickupStatus::Pending,
        }
    }
}

/// Request payload for replacing a pickup. The server overwrites the whole
/// record, so every mutable field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupUpdate {
    pub waste_type: WasteType,
    pub pickup_location: String,
    #[serde(with = "wire_datetime")]
    pub pickup_date_time: NaiveDateTime,
    pub status: PickupStatus,
    pub user_name: String,
}

impl PickupUpdate {
    pub fn with_status(mut self, status: PickupStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_pickup_date_time(mut self, pickup_date_time: NaiveDateTime) -> Self {
        self.pickup_date_time = pickup_date_time;
        self
    }
}

/// Result of a create call.
///
/// A 201 whose body is not a pickup record still means the server created
/// something, so it is reported as `Acknowledged` instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Created {
    Record(PickupRequest),
    Acknowledged { message: String },
}

impl Created {
    pub fn id(&self) -> Option<&PickupId> {
        match self {
            Created::Record(pickup) => Some(&pickup.id),
            Created::Acknowledged { .. } => None,
        }
    }

    pub fn record(&self) -> Option<&PickupRequest> {
        match self {
            Created::Record(pickup) => Some(pickup),
            Created::Acknowledged { .. } => None,
        }
    }
}

/// Aggregate statistics computed server-side from completed pickups.
/// Missing fields decode to zero or an empty map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentalImpact {
    #[serde(alias = "total_recycled_waste")]
    pub total_recycled_waste: f64,
    #[serde(alias = "co2_reduction")]
    pub co2_reduction: f64,
    #[serde(alias = "waste_type_distribution")]
    pub waste_type_distribution: BTreeMap<String, u64>,
    #[serde(alias = "total_completed_pickups")]
    pub total_completed_pickups: u64,
}
