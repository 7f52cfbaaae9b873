use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Impact, Pickup};
use tower::ServiceExt;

const NEW_PICKUP: &str = r#"{"wasteType":"PLASTIC","pickupLocation":"221B Baker St","pickupDateTime":"2025-06-01 09:00:00","userName":"alice"}"#;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_pickups_empty() {
    let resp = app().oneshot(empty_request("GET", "/api/pickups")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let pickups: Vec<Pickup> = body_json(resp).await;
    assert!(pickups.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_pickup_returns_201() {
    let resp = app()
        .oneshot(json_request("POST", "/api/pickups", NEW_PICKUP))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let pickup: Pickup = body_json(resp).await;
    assert_eq!(pickup.id, 1);
    assert_eq!(pickup.waste_type, "PLASTIC");
    assert_eq!(pickup.status, "pending");
    assert!(!pickup.creation_timestamp.is_empty());
}

#[tokio::test]
async fn create_pickup_missing_field_returns_422() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/pickups",
            r#"{"wasteType":"PLASTIC","userName":"alice"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_pickup_blank_location_returns_400() {
    let body = NEW_PICKUP.replace("221B Baker St", " ");
    let resp = app()
        .oneshot(json_request("POST", "/api/pickups", &body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_pickup_bad_date_returns_400() {
    let body = NEW_PICKUP.replace("2025-06-01 09:00:00", "next tuesday");
    let resp = app()
        .oneshot(json_request("POST", "/api/pickups", &body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- get ---

#[tokio::test]
async fn get_pickup_not_found() {
    let resp = app().oneshot(empty_request("GET", "/api/pickups/99")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_pickup_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/pickups/not-a-number"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_pickup_not_found() {
    let body = r#"{"wasteType":"PLASTIC","pickupLocation":"x","pickupDateTime":"2025-06-01 09:00:00","status":"confirmed","userName":"alice"}"#;
    let resp = app()
        .oneshot(json_request("PUT", "/api/pickups/99", body))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_pickup_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/api/pickups/99"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- environmental impact ---

#[tokio::test]
async fn environmental_impact_empty() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/environmental-impact"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let impact: Impact = body_json(resp).await;
    assert_eq!(impact, Impact::default());
}

// --- full lifecycle ---

#[tokio::test]
async fn pickup_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/pickups", NEW_PICKUP))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Pickup = body_json(resp).await;
    let id = created.id;

    // list contains the one pickup
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/pickups"))
        .await
        .unwrap();
    let pickups: Vec<Pickup> = body_json(resp).await;
    assert_eq!(pickups.len(), 1);
    assert_eq!(pickups[0].id, id);

    // partial update is rejected: the resource only accepts full records
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/pickups/{id}"),
            r#"{"status":"completed"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // full update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/pickups/{id}"),
            r#"{"wasteType":"PLASTIC","pickupLocation":"221B Baker St","pickupDateTime":"2025-06-01 09:00:00","status":"completed","userName":"alice"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Pickup = body_json(resp).await;
    assert_eq!(updated.status, "completed");
    assert_eq!(updated.pickup_location, "221B Baker St");
    assert_eq!(updated.creation_timestamp, created.creation_timestamp);

    // impact reflects the completed pickup
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/environmental-impact"))
        .await
        .unwrap();
    let impact: Impact = body_json(resp).await;
    assert_eq!(impact.total_completed_pickups, 1);
    assert_eq!(impact.total_recycled_waste, 2.5);
    assert_eq!(impact.co2_reduction, 5.0);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/api/pickups/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/api/pickups/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
