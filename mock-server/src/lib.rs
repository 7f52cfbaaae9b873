//! In-memory stand-in for the pickup REST resource, used by integration tests
//! and local demos. Routes live under `/api`.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pickup {
    pub id: u64,
    pub waste_type: String,
    pub pickup_location: String,
    pub pickup_date_time: String,
    pub status: String,
    pub user_name: String,
    pub creation_timestamp: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPickup {
    pub waste_type: String,
    pub pickup_location: String,
    pub pickup_date_time: String,
    pub user_name: String,
    #[serde(default = "default_status")]
    pub status: String,
}

/// Full replacement: every field is required.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupUpdate {
    pub waste_type: String,
    pub pickup_location: String,
    pub pickup_date_time: String,
    pub status: String,
    pub user_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Impact {
    pub total_recycled_waste: f64,
    pub co2_reduction: f64,
    pub waste_type_distribution: BTreeMap<String, u64>,
    pub total_completed_pickups: u64,
}

fn default_status() -> String {
    "pending".to_string()
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    pickups: BTreeMap<u64, Pickup>,
}

pub type Db = Arc<RwLock<Store>>;

type Rejection = (StatusCode, String);

pub fn app() -> Router {
    let db: Db = Arc::default();
    let api = Router::new()
        .route("/pickups", get(list_pickups).post(create_pickup))
        .route(
            "/pickups/{id}",
            get(get_pickup).put(update_pickup).delete(delete_pickup),
        )
        .route("/environmental-impact", get(environmental_impact))
        .with_state(db);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn bad_request(msg: &str) -> Rejection {
    (StatusCode::BAD_REQUEST, msg.to_string())
}

fn not_found() -> Rejection {
    (StatusCode::NOT_FOUND, "Pickup not found".to_string())
}

fn validate(fields: &[&str], pickup_date_time: &str) -> Result<(), Rejection> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(bad_request("Missing required fields"));
    }
    NaiveDateTime::parse_from_str(pickup_date_time, DATETIME_FORMAT)
        .map(|_| ())
        .map_err(|_| bad_request("pickupDateTime must be YYYY-MM-DD HH:MM:SS"))
}

/// Per-pickup (kg recycled, kg CO2 avoided) by waste type.
fn weights(waste_type: &str) -> (f64, f64) {
    match waste_type.to_ascii_lowercase().as_str() {
        "plastic" => (2.5, 5.0),
        "electronic" => (5.0, 20.0),
        "hazardous" => (1.0, 10.0),
        "organic" => (3.0, 3.0),
        _ => (0.0, 0.0),
    }
}

pub fn impact_of<'a>(pickups: impl IntoIterator<Item = &'a Pickup>) -> Impact {
    let mut impact = Impact::default();
    for pickup in pickups
        .into_iter()
        .filter(|p| p.status.eq_ignore_ascii_case("completed"))
    {
        let (waste, co2) = weights(&pickup.waste_type);
        impact.total_recycled_waste += waste;
        impact.co2_reduction += co2;
        *impact
            .waste_type_distribution
            .entry(pickup.waste_type.clone())
            .or_default() += 1;
        impact.total_completed_pickups += 1;
    }
    impact
}

async fn list_pickups(State(db): State<Db>) -> Json<Vec<Pickup>> {
    let store = db.read().await;
    Json(store.pickups.values().cloned().collect())
}

async fn create_pickup(
    State(db): State<Db>,
    Json(input): Json<NewPickup>,
) -> Result<(StatusCode, Json<Pickup>), Rejection> {
    validate(
        &[
            input.waste_type.as_str(),
            input.pickup_location.as_str(),
            input.user_name.as_str(),
        ],
        &input.pickup_date_time,
    )?;
    let mut store = db.write().await;
    store.next_id += 1;
    let pickup = Pickup {
        id: store.next_id,
        waste_type: input.waste_type,
        pickup_location: input.pickup_location,
        pickup_date_time: input.pickup_date_time,
        status: input.status,
        user_name: input.user_name,
        creation_timestamp: Utc::now().format(DATETIME_FORMAT).to_string(),
    };
    store.pickups.insert(pickup.id, pickup.clone());
    tracing::debug!(id = pickup.id, "created pickup");
    Ok((StatusCode::CREATED, Json(pickup)))
}

async fn get_pickup(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Pickup>, Rejection> {
    let store = db.read().await;
    store.pickups.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn update_pickup(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<PickupUpdate>,
) -> Result<Json<Pickup>, Rejection> {
    validate(
        &[
            input.waste_type.as_str(),
            input.pickup_location.as_str(),
            input.status.as_str(),
            input.user_name.as_str(),
        ],
        &input.pickup_date_time,
    )?;
    let mut store = db.write().await;
    let pickup = store.pickups.get_mut(&id).ok_or_else(not_found)?;
    pickup.waste_type = input.waste_type;
    pickup.pickup_location = input.pickup_location;
    pickup.pickup_date_time = input.pickup_date_time;
    pickup.status = input.status;
    pickup.user_name = input.user_name;
    Ok(Json(pickup.clone()))
}

async fn delete_pickup(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, Rejection> {
    let mut store = db.write().await;
    store
        .pickups
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(not_found)
}

async fn environmental_impact(State(db): State<Db>) -> Json<Impact> {
    let store = db.read().await;
    Json(impact_of(store.pickups.values()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pickup(id: u64, waste_type: &str, status: &str) -> Pickup {
        Pickup {
            id,
            waste_type: waste_type.to_string(),
            pickup_location: "Main St".to_string(),
            pickup_date_time: "2025-06-01 09:00:00".to_string(),
            status: status.to_string(),
            user_name: "alice".to_string(),
            creation_timestamp: "2025-05-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn pickup_serializes_camel_case() {
        let json = serde_json::to_value(pickup(1, "PLASTIC", "pending")).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["wasteType"], "PLASTIC");
        assert_eq!(json["pickupDateTime"], "2025-06-01 09:00:00");
        assert_eq!(json["creationTimestamp"], "2025-05-01 00:00:00");
    }

    #[test]
    fn new_pickup_defaults_status_to_pending() {
        let input: NewPickup = serde_json::from_str(
            r#"{"wasteType":"ORGANIC","pickupLocation":"Elm St","pickupDateTime":"2025-06-01 09:00:00","userName":"bob"}"#,
        )
        .unwrap();
        assert_eq!(input.status, "pending");
    }

    #[test]
    fn update_rejects_partial_payload() {
        let result: Result<PickupUpdate, _> = serde_json::from_str(r#"{"status":"completed"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn impact_counts_only_completed_pickups() {
        let pickups = [
            pickup(1, "PLASTIC", "completed"),
            pickup(2, "ELECTRONIC", "COMPLETED"),
            pickup(3, "ORGANIC", "pending"),
            pickup(4, "PLASTIC", "completed"),
        ];
        let impact = impact_of(&pickups);
        assert_eq!(impact.total_completed_pickups, 3);
        assert_eq!(impact.total_recycled_waste, 10.0);
        assert_eq!(impact.co2_reduction, 30.0);
        assert_eq!(impact.waste_type_distribution.get("PLASTIC"), Some(&2));
        assert_eq!(impact.waste_type_distribution.get("ORGANIC"), None);
    }

    #[test]
    fn validate_rejects_blank_fields_and_bad_dates() {
        assert!(validate(&["PLASTIC", "Main St"], "2025-06-01 09:00:00").is_ok());
        assert_eq!(
            validate(&["PLASTIC", " "], "2025-06-01 09:00:00").unwrap_err().0,
            StatusCode::BAD_REQUEST
        );
        assert!(validate(&["PLASTIC"], "tomorrow").is_err());
    }
}
