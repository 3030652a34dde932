//! HTTP-level tests for the `/api/projects` resource.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_entry, create_project, delete, expect_error, get, post_json,
    put_json, user_token,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_fetch_project(pool: PgPool) {
    let app = build_test_app(pool);
    let token = user_token("ola");

    let response = post_json(
        &app,
        "/api/projects",
        Some(&token),
        json!({ "navn": "  Intern  ", "beskrivelse": "Møter og admin" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["navn"], "Intern");
    assert_eq!(created["aktiv"], true);
    assert!(created["opprettetDato"].is_string());
    assert!(created.get("owner_sub").is_none());

    let id = created["projectId"].as_i64().unwrap();
    let fetched = get(&app, &format!("/api/projects/{id}"), Some(&token)).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await["beskrivelse"], "Møter og admin");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_validation(pool: PgPool) {
    let app = build_test_app(pool);
    let token = user_token("ola");

    let response = post_json(
        &app,
        "/api/projects",
        Some(&token),
        json!({ "navn": " x ", "beskrivelse": "a".repeat(501) }),
    )
    .await;
    let json = expect_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
    assert!(json["errors"]["navn"].is_string());
    assert!(json["errors"]["beskrivelse"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_projects_are_private_to_their_owner(pool: PgPool) {
    let app = build_test_app(pool);
    let id = create_project(&app, &user_token("ola"), "Olas").await;

    let kari = user_token("kari");
    let response = get(&app, &format!("/api/projects/{id}"), Some(&kari)).await;
    expect_error(response, StatusCode::NOT_FOUND, "PROJECT_NOT_FOUND").await;

    let response = put_json(
        &app,
        &format!("/api/projects/{id}"),
        Some(&kari),
        json!({ "navn": "Kapret" }),
    )
    .await;
    expect_error(response, StatusCode::NOT_FOUND, "PROJECT_NOT_FOUND").await;

    let list = get(&app, "/api/projects", Some(&kari)).await;
    assert_eq!(body_json(list).await["total"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_sorts_and_pages(pool: PgPool) {
    let app = build_test_app(pool);
    let token = user_token("ola");
    for navn in ["Charlie", "Alfa", "Bravo"] {
        create_project(&app, &token, navn).await;
    }

    let response = get(&app, "/api/projects?pageSize=2", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await;
    assert_eq!(page["page"], 1);
    assert_eq!(page["pageSize"], 2);
    assert_eq!(page["total"], 3);
    let names: Vec<&str> = page["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["navn"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Alfa", "Bravo"]);

    let response = get(&app, "/api/projects?page=1&pageSize=1&asc=false", Some(&token)).await;
    assert_eq!(body_json(response).await["projects"][0]["navn"], "Charlie");

    let response = get(&app, "/api/projects?sort=opprettetDato", Some(&token)).await;
    assert_eq!(body_json(response).await["projects"][0]["navn"], "Charlie");

    let response = get(&app, "/api/projects?sort=hacker", Some(&token)).await;
    expect_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_page_past_the_end_is_empty(pool: PgPool) {
    let app = build_test_app(pool);
    let token = user_token("ola");
    create_project(&app, &token, "Alfa").await;

    let uri = format!("/api/projects?page={}&pageSize=100", i64::MAX);
    let response = get(&app, &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["projects"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_project(pool: PgPool) {
    let app = build_test_app(pool);
    let token = user_token("ola");
    let id = create_project(&app, &token, "Gammelt navn").await;

    let response = put_json(
        &app,
        &format!("/api/projects/{id}"),
        Some(&token),
        json!({ "navn": "Nytt navn", "beskrivelse": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["navn"], "Nytt navn");
    assert!(json["beskrivelse"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_project_with_entries_is_refused(pool: PgPool) {
    let app = build_test_app(pool);
    let token = user_token("ola");
    let id = create_project(&app, &token, "Med timer").await;
    let entry = create_entry(&app, &token, id, "2025-04-01", 2.0).await;
    assert_eq!(entry.status(), StatusCode::CREATED);

    let response = delete(&app, &format!("/api/projects/{id}"), Some(&token)).await;
    let json = expect_error(response, StatusCode::CONFLICT, "PROJECT_HAS_TIME_ENTRIES").await;
    assert_eq!(json["message"], "Kan ikke slette prosjekt med registrerte timer");

    let still_there = get(&app, &format!("/api/projects/{id}"), Some(&token)).await;
    assert_eq!(still_there.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_empty_project_then_404(pool: PgPool) {
    let app = build_test_app(pool);
    let token = user_token("ola");
    let id = create_project(&app, &token, "Tomt").await;

    let response = delete(&app, &format!("/api/projects/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let gone = get(&app, &format!("/api/projects/{id}"), Some(&token)).await;
    expect_error(gone, StatusCode::NOT_FOUND, "PROJECT_NOT_FOUND").await;

    let again = delete(&app, &format!("/api/projects/{id}"), Some(&token)).await;
    expect_error(again, StatusCode::NOT_FOUND, "PROJECT_NOT_FOUND").await;
}
