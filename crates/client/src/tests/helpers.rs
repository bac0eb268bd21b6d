// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-process stub backend.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{HttpGateway, HttpGatewayConfig};

pub const TOKEN: &str = "test-token";

/// Requests the stub received, for assertions.
#[derive(Debug, Default)]
pub struct StubLog {
    pub bodies: Vec<Value>,
    pub check_ins: Vec<i64>,
}

#[derive(Clone, Default)]
struct StubState {
    log: Arc<Mutex<StubLog>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Invalid or expired token" })),
    )
        .into_response()
}

async fn list_activities(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        {
            "activityId": 10,
            "title": "Campus clean-up",
            "status": "ongoing",
            "maxParticipants": 40,
            "registeredCount": 3,
            "checkedInCount": 1,
            "completedCount": 1
        },
        {
            "activityId": 11,
            "title": "Library night",
            "status": "open",
            "maxParticipants": null,
            "registeredCount": 0,
            "checkedInCount": 0,
            "completedCount": 0
        }
    ]))
    .into_response()
}

async fn list_participants(headers: HeaderMap, Path(activity_id): Path<i64>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    match activity_id {
        10 => Json(json!([
            {
                "userId": 1,
                "firstName": "Minh",
                "lastName": "Nguyen",
                "code": "SV001",
                "email": "minh@example.edu",
                "role": "STUDENT",
                "department": "Physics",
                "faculty": "Science",
                "registeredAt": "2026-03-10T02:00:00Z",
                "checkInTime": null,
                "checkOutTime": null
            },
            {
                "userId": 2,
                "firstName": "Lan",
                "lastName": "Tran",
                "role": "teacher",
                "department": "",
                "registeredAt": "2026-03-11T02:00:00Z",
                "checkInTime": "2026-03-15T01:00:00Z"
            }
        ]))
        .into_response(),
        12 => Json(json!([{ "userId": 3, "firstName": "A", "lastName": "B", "role": "alumni" }]))
            .into_response(),
        13 => (StatusCode::OK, "not json").into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Activity not found" })),
        )
            .into_response(),
    }
}

async fn list_pictures(headers: HeaderMap, Path((_activity_id, user_id)): Path<(i64, i64)>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        {
            "pictureId": user_id * 100,
            "userId": user_id,
            "status": "pending",
            "aiSuccess": true,
            "uploadedAt": "2026-03-15T02:00:00Z"
        },
        {
            "pictureId": user_id * 100 + 1,
            "userId": user_id,
            "status": "REJECTED",
            "rejectReason": "blurry"
        }
    ]))
    .into_response()
}

async fn bulk_approve(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let count: usize = body["pictureIds"].as_array().map_or(0, Vec::len);
    state.log.lock().await.bodies.push(body);
    Json(json!({
        "approvedCount": count,
        "skippedCount": 0,
        "certificates": [{ "userId": 1, "certificateId": "CERT-1" }]
    }))
    .into_response()
}

async fn bulk_reject(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if body["reason"].as_str().is_none_or(str::is_empty) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "reason is required" })),
        )
            .into_response();
    }
    state.log.lock().await.bodies.push(body);
    Json(json!({ "rejectedCount": 1, "skippedCount": 1, "errors": ["Picture 5 already moderated"] }))
        .into_response()
}

async fn check_in(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path((_activity_id, user_id)): Path<(i64, i64)>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    state.log.lock().await.check_ins.push(user_id);
    match user_id {
        2 => (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response(),
        3 => (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Already checked in" })),
        )
            .into_response(),
        _ => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn check_out(headers: HeaderMap, Path((_activity_id, user_id)): Path<(i64, i64)>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if user_id == 9 {
        return (StatusCode::FORBIDDEN, Json(json!({ "message": "Not your activity" })))
            .into_response();
    }
    Json(json!({ "success": true })).into_response()
}

/// A running stub backend.
pub struct Stub {
    pub base_url: String,
    pub log: Arc<Mutex<StubLog>>,
}

/// Starts the stub on an ephemeral port.
pub async fn start_stub() -> Stub {
    let state: StubState = StubState::default();
    let log: Arc<Mutex<StubLog>> = Arc::clone(&state.log);
    let app: Router = Router::new()
        .route("/api/activities/with-participants", get(list_activities))
        .route("/api/activities/{activity_id}/participants", get(list_participants))
        .route(
            "/api/activities/{activity_id}/participants/{user_id}/pictures",
            get(list_pictures),
        )
        .route(
            "/api/activities/{activity_id}/participants/{user_id}/check-in",
            post(check_in),
        )
        .route(
            "/api/activities/{activity_id}/participants/{user_id}/check-out",
            post(check_out),
        )
        .route("/api/pictures/bulk-approve", post(bulk_approve))
        .route("/api/pictures/bulk-reject", post(bulk_reject))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: std::net::SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Stub {
        base_url: format!("http://{addr}/api/"),
        log,
    }
}

pub fn gateway_for(stub: &Stub, token: &str) -> HttpGateway {
    HttpGateway::new(&HttpGatewayConfig::new(&stub.base_url, token)).unwrap()
}
