// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use clinic_schedule::{DoctorDirectory, FixedClock};
use clinic_schedule_domain::{Doctor, DoctorId};
use serde::de::DeserializeOwned;
use time::macros::datetime;
use tower::ServiceExt;

const DOCTOR_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const DOCTOR_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
const UNKNOWN_DOCTOR: &str = "eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";

/// Helper to create test app state with in-memory persistence.
///
/// Doctor A works Mondays, doctor B has no pattern. The clock is frozen
/// on Saturday 2025-03-01.
fn create_test_app_state() -> AppState {
    let mut persistence: SqlitePersistence =
        SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");

    for (id, pattern, minute) in [(DOCTOR_A, Some("weekly:MON"), 0), (DOCTOR_B, None, 1)] {
        persistence
            .insert_doctor(&Doctor {
                doctor_id: DoctorId::parse(id).unwrap(),
                display_name: format!("Dr. {}", &id[..1]),
                is_active: true,
                schedule_pattern: pattern.map(String::from),
                created_at: datetime!(2025-01-01 00:00 UTC) + time::Duration::minutes(minute),
            })
            .unwrap();
    }

    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        clock: Arc::new(FixedClock::new(datetime!(2025-03-01 08:00 UTC))),
        initializer: Arc::new(ScheduleInitializer::default()),
    }
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (HttpStatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status: HttpStatusCode = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body_bytes.to_vec())
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap()
}

fn scenario_override_body() -> serde_json::Value {
    serde_json::json!({
        "date": "2025-03-10",
        "assignedDoctorId": DOCTOR_B,
        "reason": "Annual leave cover",
        "originalDoctorId": DOCTOR_A,
    })
}

async fn assignment_on(app: &Router, date: &str) -> AssignmentInfo {
    let (status, body) = send(
        app,
        empty_request("GET", &format!("/doctors/schedule/assignment?date={date}")),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    parse(&body)
}

#[tokio::test]
async fn test_override_lifecycle_on_scenario_monday() {
    let app: Router = build_router(create_test_app_state());

    let before: AssignmentInfo = assignment_on(&app, "2025-03-10").await;
    assert_eq!(before.doctor_id.as_deref(), Some(DOCTOR_A));

    let (status, body) = send(
        &app,
        json_request("POST", "/doctors/schedule-override", &scenario_override_body()),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let created: OverrideInfo = parse(&body);
    assert_eq!(created.assigned_doctor_id, DOCTOR_B);

    let during: AssignmentInfo = assignment_on(&app, "2025-03-10").await;
    assert_eq!(during.doctor_id.as_deref(), Some(DOCTOR_B));
    assert_eq!(during.source, "override");

    let (status, body) = send(&app, empty_request("DELETE", "/doctors/schedule-override/2025-03-10")).await;
    assert_eq!(status, HttpStatusCode::OK);
    let deleted: StatusResponse = parse(&body);
    assert!(deleted.success);

    let after: AssignmentInfo = assignment_on(&app, "2025-03-10").await;
    assert_eq!(after.doctor_id.as_deref(), Some(DOCTOR_A));
    assert_eq!(after.source, "pattern");
}

#[tokio::test]
async fn test_get_override_returns_null_when_absent() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(&app, empty_request("GET", "/doctors/schedule-override/2025-03-10")).await;

    assert_eq!(status, HttpStatusCode::OK);
    let found: Option<OverrideInfo> = parse(&body);
    assert!(found.is_none());
}

#[tokio::test]
async fn test_duplicate_override_is_conflict() {
    let app: Router = build_router(create_test_app_state());
    send(
        &app,
        json_request("POST", "/doctors/schedule-override", &scenario_override_body()),
    )
    .await;

    let (status, body) = send(
        &app,
        json_request("POST", "/doctors/schedule-override", &scenario_override_body()),
    )
    .await;

    assert_eq!(status, HttpStatusCode::CONFLICT);
    let error_body: ErrorResponse = parse(&body);
    assert!(!error_body.success);
    assert!(error_body.errors.is_empty());
}

#[tokio::test]
async fn test_missing_fields_are_listed_in_bad_request() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/doctors/schedule-override",
            &serde_json::json!({ "reason": "Cover" }),
        ),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    let error_body: ErrorResponse = parse(&body);
    let fields: Vec<&str> = error_body.errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["date", "assignedDoctorId"]);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app: Router = build_router(create_test_app_state());
    let request: Request<Body> = Request::builder()
        .method("POST")
        .uri("/doctors/schedule-override")
        .header("content-type", "application/json")
        .body(Body::from("{\"date\": 20250310"))
        .unwrap();

    let (status, _) = send(&app, request).await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_override_for_unknown_doctor_is_not_found() {
    let app: Router = build_router(create_test_app_state());
    let mut body: serde_json::Value = scenario_override_body();
    body["assignedDoctorId"] = serde_json::Value::from(UNKNOWN_DOCTOR);

    let (status, _) = send(&app, json_request("POST", "/doctors/schedule-override", &body)).await;

    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_to_original_doctor_is_unprocessable() {
    let app: Router = build_router(create_test_app_state());
    let (_, body) = send(
        &app,
        json_request("POST", "/doctors/schedule-override", &scenario_override_body()),
    )
    .await;
    let created: OverrideInfo = parse(&body);

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/doctors/schedule-override/{}", created.id),
            &serde_json::json!({ "assignedDoctorId": DOCTOR_A }),
        ),
    )
    .await;

    assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_changes_reason() {
    let app: Router = build_router(create_test_app_state());
    let (_, body) = send(
        &app,
        json_request("POST", "/doctors/schedule-override", &scenario_override_body()),
    )
    .await;
    let created: OverrideInfo = parse(&body);

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/doctors/schedule-override/{}", created.id),
            &serde_json::json!({ "reason": "Conference travel" }),
        ),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    let updated: OverrideInfo = parse(&body);
    assert_eq!(updated.reason, "Conference travel");
    assert_eq!(updated.assigned_doctor_id, DOCTOR_B);
}

#[tokio::test]
async fn test_set_and_remove_schedule() {
    let app: Router = build_router(create_test_app_state());

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/doctors/{DOCTOR_B}/schedule"),
            &serde_json::json!({ "schedulePattern": "weekly:tue" }),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let tuesday: AssignmentInfo = assignment_on(&app, "2025-03-11").await;
    assert_eq!(tuesday.doctor_id.as_deref(), Some(DOCTOR_B));

    let (status, _) = send(&app, empty_request("DELETE", &format!("/doctors/{DOCTOR_B}/schedule"))).await;
    assert_eq!(status, HttpStatusCode::OK);
    let tuesday: AssignmentInfo = assignment_on(&app, "2025-03-11").await;
    assert_eq!(tuesday.source, "unassigned");
}

#[tokio::test]
async fn test_blank_schedule_is_bad_request() {
    let app: Router = build_router(create_test_app_state());

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/doctors/{DOCTOR_B}/schedule"),
            &serde_json::json!({ "schedulePattern": "  " }),
        ),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_remove_schedule_for_unknown_doctor_is_not_found() {
    let app: Router = build_router(create_test_app_state());

    let (status, _) = send(
        &app,
        empty_request("DELETE", &format!("/doctors/{UNKNOWN_DOCTOR}/schedule")),
    )
    .await;

    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_initialize_schedules_twice() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(&app, empty_request("POST", "/doctors/initialize-schedules")).await;
    assert_eq!(status, HttpStatusCode::OK);
    let first: InitializationResponse = parse(&body);
    assert_eq!(first.updated, 1);
    assert_eq!(first.doctors, vec![DOCTOR_B]);
    assert_eq!(first.skipped_doctors, vec![DOCTOR_A]);

    let (_, body) = send(&app, empty_request("POST", "/doctors/initialize-schedules")).await;
    let second: InitializationResponse = parse(&body);
    assert_eq!(second.updated, 0);
    assert_eq!(second.skipped, 2);
}

#[tokio::test]
async fn test_calendar_lists_every_day() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        empty_request("GET", "/doctors/schedule/calendar?from=2025-03-09&to=2025-03-15"),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    let calendar: Vec<AssignmentInfo> = parse(&body);
    assert_eq!(calendar.len(), 7);
    assert_eq!(calendar[1].date, "2025-03-10");
    assert_eq!(calendar[1].doctor_id.as_deref(), Some(DOCTOR_A));
}

#[tokio::test]
async fn test_calendar_without_range_is_bad_request() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(&app, empty_request("GET", "/doctors/schedule/calendar")).await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    let error_body: ErrorResponse = parse(&body);
    assert_eq!(error_body.errors.len(), 2);
}

#[tokio::test]
async fn test_register_list_and_deactivate_doctor() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/doctors",
            &serde_json::json!({ "displayName": "Dr. Mbeki", "schedulePattern": "daily" }),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let created: DoctorInfo = parse(&body);
    assert!(created.is_active);

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/doctors/{}/status", created.id),
            &serde_json::json!({ "active": false }),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);

    let (_, body) = send(&app, empty_request("GET", "/doctors")).await;
    let doctors: Vec<DoctorInfo> = parse(&body);
    assert_eq!(doctors.len(), 3);
    let stored: &DoctorInfo = doctors.iter().find(|d| d.id == created.id).unwrap();
    assert!(!stored.is_active);
}

#[tokio::test]
async fn test_past_override_is_rejected() {
    let app: Router = build_router(create_test_app_state());
    let mut body: serde_json::Value = scenario_override_body();
    body["date"] = serde_json::Value::from("2025-02-28");

    let (status, body) = send(&app, json_request("POST", "/doctors/schedule-override", &body)).await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    let error_body: ErrorResponse = parse(&body);
    assert_eq!(error_body.errors[0].field, "date");
}
