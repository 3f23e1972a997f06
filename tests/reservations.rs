// =====================================================
// 예약 API 통합 테스트
// =====================================================

mod common;
use common::*;
use axum::http::StatusCode;
use serde_json::json;
use ttirring_api::shared::store::ReservationStore;

/// 테스트: 최초 생성은 201, idempotent 플래그 없음
#[tokio::test]
async fn test_create_reservation() {
    let app = TestApp::new();

    let (status, body) = app.post("/v1/reservations", reservation_body("REQ-100")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["ok"], true);
    assert_eq!(body["reservation"]["reqId"], "REQ-100");
    assert_eq!(body["reservation"]["channelId"], MAIN_CHANNEL);
    assert!(body["reservation"]["reservationId"].as_str().unwrap().starts_with("R-"));
    assert!(body.get("idempotent").is_none());
}

/// 테스트: 같은 reqId 재요청 → 200 + 같은 reservationId (바디가 달라도)
#[tokio::test]
async fn test_same_req_id_replays_first_reservation() {
    let app = TestApp::new();

    let (_, first) = app.post("/v1/reservations", reservation_body("REQ-101")).await;

    let mut changed = reservation_body("REQ-101");
    changed["pickup"] = json!({ "lat": 1.0, "lng": 2.0 });
    let (status, second) = app.post("/v1/reservations", changed).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["idempotent"], true);
    assert_eq!(second["reservation"]["reservationId"], first["reservation"]["reservationId"]);
    assert_eq!(second["reservation"]["pickup"]["lat"], 37.5665);
    assert_eq!(app.store.count_reservations().await.unwrap(), 1);
}

/// 테스트: 필수 필드 누락 → 400 MISSING_FIELDS
#[tokio::test]
async fn test_missing_fields() {
    let app = TestApp::new();

    for field in ["reqId", "scheduledAt", "pickup", "dropoff"] {
        let mut body = reservation_body("REQ-102");
        body.as_object_mut().unwrap().remove(field);
        let (status, res) = app.post("/v1/reservations", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{field}");
        assert_eq!(res, json!({ "ok": false, "error": "MISSING_FIELDS" }), "{field}");
    }
    assert_eq!(app.store.count_reservations().await.unwrap(), 0);
}

/// 테스트: 잘못된 scheduledAt / 좌표 타입 → 400 BAD_REQUEST
#[tokio::test]
async fn test_bad_request_on_invalid_values() {
    let app = TestApp::new();

    let mut body = reservation_body("REQ-103");
    body["scheduledAt"] = json!("next tuesday");
    let (status, res) = app.post("/v1/reservations", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["error"], "BAD_REQUEST");

    let mut body = reservation_body("REQ-104");
    body["pickup"] = json!({ "lat": "north", "lng": 1.0 });
    let (status, res) = app.post("/v1/reservations", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["error"], "BAD_REQUEST");
}

/// 테스트: 없는 채널/사용자 → 404, 아무것도 저장되지 않음
#[tokio::test]
async fn test_unknown_entities() {
    let app = TestApp::new();

    let mut body = reservation_body("REQ-105");
    body["channelId"] = json!("CH-404");
    let (status, res) = app.post("/v1/reservations", body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["error"], "CHANNEL_NOT_FOUND");

    let mut body = reservation_body("REQ-106");
    body["userId"] = json!("DR-404");
    let (status, res) = app.post("/v1/reservations", body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["error"], "USER_NOT_FOUND");

    assert_eq!(app.store.count_reservations().await.unwrap(), 0);
}

/// 테스트: 필드 타입이 틀려도 존재 검증이 먼저 → 404
#[tokio::test]
async fn test_unknown_channel_wins_over_bad_field_types() {
    let app = TestApp::new();

    let mut body = reservation_body("REQ-107");
    body["channelId"] = json!("CH-404");
    body["pickup"] = json!({ "lat": "north", "lng": 1.0 });
    let (status, res) = app.post("/v1/reservations", body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res, json!({ "ok": false, "error": "CHANNEL_NOT_FOUND" }));

    let mut body = reservation_body("REQ-108");
    body["userId"] = json!(42);
    body["scheduledAt"] = json!(20251001);
    let (status, res) = app.post("/v1/reservations", body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["error"], "USER_NOT_FOUND");

    // 엔티티가 모두 있으면 타입 오류는 400
    let mut body = reservation_body("REQ-109");
    body["reqId"] = json!(["REQ-109"]);
    let (status, res) = app.post("/v1/reservations", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["error"], "BAD_REQUEST");

    assert_eq!(app.store.count_reservations().await.unwrap(), 0);
}

/// 테스트: reqId 조회
#[tokio::test]
async fn test_lookup_by_req_id() {
    let app = TestApp::new();
    let (_, created) = app.post("/v1/reservations", reservation_body("REQ-107")).await;

    let (status, found) = app.get("/v1/reservations/by-req?reqId=REQ-107").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["reservation"], created["reservation"]);
    assert!(found.get("idempotent").is_none());

    let (status, res) = app.get("/v1/reservations/by-req?reqId=REQ-404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["error"], "RESERVATION_NOT_FOUND");

    let (status, res) = app.get("/v1/reservations/by-req").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["error"], "BAD_REQUEST");
}
