//! HTTP-level tests for the `/api/time-entries` resource and its booking rules.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_entry, create_project, delete, expect_error, get, put_json,
    user_token,
};
use serde_json::json;
use sqlx::PgPool;

const DAY: &str = "2025-03-14";

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_entry(pool: PgPool) {
    let app = build_test_app(pool);
    let token = user_token("ola");
    let project = create_project(&app, &token, "Kunde A").await;

    let response = create_entry(&app, &token, project, DAY, 7.5).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let entry = body_json(response).await;
    assert!(entry["timeEntryId"].is_i64());
    assert_eq!(entry["prosjektId"], project);
    assert_eq!(entry["dato"], DAY);
    assert_eq!(entry["timer"], 7.5);
    assert_eq!(entry["version"], 1);
    assert!(entry["sistEndret"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hour_rules_are_reported_with_codes(pool: PgPool) {
    let app = build_test_app(pool);
    let token = user_token("ola");
    let project = create_project(&app, &token, "Kunde A").await;

    for (timer, code) in [
        (0.0, "INVALID_TIMER_VALUE"),
        (-2.0, "INVALID_TIMER_VALUE"),
        (1.25, "INVALID_TIMER_STEP"),
        (24.5, "MAX_HOURS_PER_ENTRY"),
    ] {
        let response = create_entry(&app, &token, project, DAY, timer).await;
        expect_error(response, StatusCode::BAD_REQUEST, code).await;
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_daily_total_is_capped_at_24(pool: PgPool) {
    let app = build_test_app(pool);
    let token = user_token("ola");
    let project = create_project(&app, &token, "Kunde A").await;

    let first = create_entry(&app, &token, project, DAY, 23.0).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let too_much = create_entry(&app, &token, project, DAY, 2.0).await;
    expect_error(too_much, StatusCode::CONFLICT, "MAX_HOURS_PER_DAY").await;

    let fills_day = create_entry(&app, &token, project, DAY, 1.0).await;
    assert_eq!(fills_day.status(), StatusCode::CREATED);

    // Another day is unaffected.
    let next_day = create_entry(&app, &token, project, "2025-03-15", 8.0).await;
    assert_eq!(next_day.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_users_project_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let karis_project = create_project(&app, &user_token("kari"), "Karis").await;

    let response = create_entry(&app, &user_token("ola"), karis_project, DAY, 1.0).await;
    expect_error(response, StatusCode::NOT_FOUND, "PROJECT_NOT_FOUND_OR_INACTIVE").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_project_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let token = user_token("ola");
    let project = create_project(&app, &token, "Avsluttet").await;
    let deleted = delete(&app, &format!("/api/projects/{project}"), Some(&token)).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let response = create_entry(&app, &token, project, DAY, 1.0).await;
    expect_error(response, StatusCode::NOT_FOUND, "PROJECT_NOT_FOUND_OR_INACTIVE").await;
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_keeps_own_hours_out_of_the_total(pool: PgPool) {
    let app = build_test_app(pool);
    let token = user_token("ola");
    let project = create_project(&app, &token, "Kunde A").await;
    create_entry(&app, &token, project, DAY, 16.0).await;
    let entry = body_json(create_entry(&app, &token, project, DAY, 8.0).await).await;
    let id = entry["timeEntryId"].as_i64().unwrap();

    let response = put_json(
        &app,
        &format!("/api/time-entries/{id}"),
        Some(&token),
        json!({ "prosjektId": project, "dato": DAY, "timer": 8.0, "kommentar": "uendret" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["version"], 2);
    assert_eq!(json["kommentar"], "uendret");

    let response = put_json(
        &app,
        &format!("/api/time-entries/{id}"),
        Some(&token),
        json!({ "prosjektId": project, "dato": DAY, "timer": 8.5 }),
    )
    .await;
    expect_error(response, StatusCode::CONFLICT, "MAX_HOURS_PER_DAY").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_with_stale_version_conflicts(pool: PgPool) {
    let app = build_test_app(pool);
    let token = user_token("ola");
    let project = create_project(&app, &token, "Kunde A").await;
    let entry = body_json(create_entry(&app, &token, project, DAY, 2.0).await).await;
    let id = entry["timeEntryId"].as_i64().unwrap();
    let uri = format!("/api/time-entries/{id}");

    let ok = put_json(
        &app,
        &uri,
        Some(&token),
        json!({ "prosjektId": project, "dato": DAY, "timer": 3.0, "version": 1 }),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);

    let stale = put_json(
        &app,
        &uri,
        Some(&token),
        json!({ "prosjektId": project, "dato": DAY, "timer": 4.0, "version": 1 }),
    )
    .await;
    expect_error(stale, StatusCode::CONFLICT, "VERSION_CONFLICT").await;
}

// ---------------------------------------------------------------------------
// Read and delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_date_and_owner(pool: PgPool) {
    let app = build_test_app(pool);
    let ola = user_token("ola");
    let project = create_project(&app, &ola, "Kunde A").await;
    for dato in ["2025-01-10", "2025-01-20", "2025-02-01"] {
        create_entry(&app, &ola, project, dato, 1.0).await;
    }
    let kari = user_token("kari");
    let karis = create_project(&app, &kari, "Karis").await;
    create_entry(&app, &kari, karis, "2025-01-15", 1.0).await;

    let all = body_json(get(&app, "/api/time-entries", Some(&ola)).await).await;
    let dates: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["dato"].as_str().unwrap())
        .collect();
    assert_eq!(dates, ["2025-02-01", "2025-01-20", "2025-01-10"]);

    let january = body_json(
        get(&app, "/api/time-entries?from=2025-01-01&to=2025-01-31", Some(&ola)).await,
    )
    .await;
    assert_eq!(january.as_array().unwrap().len(), 2);

    let backwards = get(&app, "/api/time-entries?from=2025-02-01&to=2025-01-01", Some(&ola)).await;
    expect_error(backwards, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_and_delete_entry(pool: PgPool) {
    let app = build_test_app(pool);
    let token = user_token("ola");
    let project = create_project(&app, &token, "Kunde A").await;
    let entry = body_json(create_entry(&app, &token, project, DAY, 2.0).await).await;
    let uri = format!("/api/time-entries/{}", entry["timeEntryId"]);

    let other = get(&app, &uri, Some(&user_token("kari"))).await;
    expect_error(other, StatusCode::NOT_FOUND, "TIME_ENTRY_NOT_FOUND").await;

    let fetched = get(&app, &uri, Some(&token)).await;
    assert_eq!(fetched.status(), StatusCode::OK);

    let deleted = delete(&app, &uri, Some(&token)).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = get(&app, &uri, Some(&token)).await;
    expect_error(gone, StatusCode::NOT_FOUND, "TIME_ENTRY_NOT_FOUND").await;

    // With its only entry gone the project can be deleted.
    let project_deleted = delete(&app, &format!("/api/projects/{project}"), Some(&token)).await;
    assert_eq!(project_deleted.status(), StatusCode::NO_CONTENT);
}
