mod common;

use chrono::Duration;
use common::TestApp;
use myflix_service::domain::movie::catalog::starter_catalog;
use myflix_service::domain::movie::models::MovieId;
use reqwest::StatusCode;
use serde_json::json;

async fn json_body(response: reqwest::Response) -> serde_json::Value {
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
async fn test_welcome() {
    let app = TestApp::spawn().await;

    let response = app.get("/").send().await.expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "Welcome to my movies list!");
}

#[tokio::test]
async fn test_register_user_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users")
        .json(&json!({
            "username": "alice",
            "password": "Secret123",
            "email": "alice@example.com",
            "birthdate": "1990-01-01"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["birthdate"], "1990-01-01");
    assert!(body["data"]["id"].is_string());
    assert_eq!(body["data"]["favorite_movies"], json!([]));
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    let first = app
        .register("alice", "Secret123", "alice@example.com")
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .register("alice", "Other456", "other@example.com")
        .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body = json_body(second).await;
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));

    // The original account is untouched.
    app.login("alice", "Secret123").await;
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users")
        .json(&json!({
            "username": "al!",
            "password": "",
            "email": "not-an-email"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response).await;
    let fields: Vec<&str> = body["data"]["errors"]
        .as_array()
        .expect("Missing field errors")
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["username", "password", "email"]);
}

#[tokio::test]
async fn test_register_short_username() {
    let app = TestApp::spawn().await;

    let response = app.register("bob", "Secret123", "bob@example.com").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["data"]["errors"][0]["message"]
        .as_str()
        .unwrap()
        .contains("minimum 5 characters"));
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.register("alice", "Secret123", "alice@example.com")
        .await;

    let response = app
        .post("/login")
        .json(&json!({
            "username": "alice",
            "password": "Secret123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
    assert_eq!(body["data"]["user"]["username"], "alice");
    assert!(body["data"]["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("alice", "Secret123", "alice@example.com")
        .await;

    let wrong_password = app
        .post("/login")
        .json(&json!({ "username": "alice", "password": "wrongpass" }))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_user = app
        .post("/login")
        .json(&json!({ "username": "nouser", "password": "anything" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    assert_eq!(unknown_user.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(wrong_password).await, json_body(unknown_user).await);
}

#[tokio::test]
async fn test_get_own_profile() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("alice", "Secret123").await;

    let response = app
        .get_authenticated("/users/alice", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["username"], "alice");
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::spawn().await;
    app.register("alice", "Secret123", "alice@example.com")
        .await;

    let response = app
        .get("/users/alice")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret() {
    let app = TestApp::spawn().await;
    app.register("alice", "Secret123", "alice@example.com")
        .await;

    let forged = app.forge_token("alice", "00000000-0000-0000-0000-000000000000");

    let response = app
        .get_authenticated("/movies", &forged)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_expires_after_seven_days() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("alice", "Secret123").await;

    app.advance_clock(Duration::days(7) - Duration::seconds(1));
    let still_valid = app
        .get_authenticated("/users/alice", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(still_valid.status(), StatusCode::OK);

    app.advance_clock(Duration::seconds(1));
    let expired = app
        .get_authenticated("/users/alice", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(expired.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cannot_access_another_users_account() {
    let app = TestApp::spawn().await;
    let alice_token = app.register_and_login("alice", "Secret123").await;
    app.register("bobby", "Secret456", "bobby@example.com")
        .await;

    let read = app
        .get_authenticated("/users/bobby", &alice_token)
        .send()
        .await
        .expect("Failed to execute request");
    let update = app
        .put_authenticated("/users/bobby", &alice_token)
        .json(&json!({ "email": "stolen@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    let delete = app
        .delete_authenticated("/users/bobby", &alice_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(read.status(), StatusCode::FORBIDDEN);
    assert_eq!(update.status(), StatusCode::FORBIDDEN);
    assert_eq!(delete.status(), StatusCode::FORBIDDEN);

    // Bobby is unaffected.
    app.login("bobby", "Secret456").await;
}

#[tokio::test]
async fn test_update_password() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("alice", "Secret123").await;

    let response = app
        .put_authenticated("/users/alice", &token)
        .json(&json!({ "password": "NewSecret456" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(json_body(response).await["data"]
        .get("password_hash")
        .is_none());

    let old_password = app
        .post("/login")
        .json(&json!({ "username": "alice", "password": "Secret123" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(old_password.status(), StatusCode::BAD_REQUEST);

    app.login("alice", "NewSecret456").await;
}

#[tokio::test]
async fn test_deleted_user_token_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("alice", "Secret123").await;

    let response = app
        .delete_authenticated("/users/alice", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["data"]["message"], "alice was deleted.");

    let after = app
        .get_authenticated("/movies", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_movie_catalog() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("alice", "Secret123").await;

    let list = app
        .get_authenticated("/movies", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(list.status(), StatusCode::OK);
    let titles: Vec<String> = json_body(list).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles.len(), 10);
    assert!(titles.contains(&"Coco".to_string()));
    assert!(titles.contains(&"Ratatouille".to_string()));

    let movie = json_body(
        app.get_authenticated("/movies/Coco", &token)
            .send()
            .await
            .expect("Failed to execute request"),
    )
    .await;
    assert_eq!(movie["data"]["director"]["name"], "Lee Unkrich");

    let genre = json_body(
        app.get_authenticated("/movies/genres/Animation", &token)
            .send()
            .await
            .expect("Failed to execute request"),
    )
    .await;
    assert_eq!(genre["data"]["name"], "Animation");

    let director = json_body(
        app.get_authenticated("/movies/directors/Lee%20Unkrich", &token)
            .send()
            .await
            .expect("Failed to execute request"),
    )
    .await;
    assert_eq!(director["data"]["birth_year"], 1967);

    let missing = app
        .get_authenticated("/movies/Nothing", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_favorites() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("alice", "Secret123").await;

    let movie = json_body(
        app.get_authenticated("/movies/Coco", &token)
            .send()
            .await
            .expect("Failed to execute request"),
    )
    .await;
    let movie_id = movie["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/users/alice/movies/{}", movie_id);

    for _ in 0..2 {
        let response = app
            .post_authenticated(&path, &token)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await["data"]["favorite_movies"],
            json!([movie_id])
        );
    }

    for _ in 0..2 {
        let response = app
            .delete_authenticated(&path, &token)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["data"]["favorite_movies"], json!([]));
    }
}

#[tokio::test]
async fn test_favorite_unknown_movie() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("alice", "Secret123").await;

    let unknown = app
        .post_authenticated(
            "/users/alice/movies/6f1c2b9e-8d4a-4c3b-9a7e-1d2f3a4b5c6d",
            &token,
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let malformed = app
        .post_authenticated("/users/alice/movies/not-a-uuid", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_new_catalog_entries_are_visible() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("alice", "Secret123").await;

    let mut onward = starter_catalog().remove(0);
    onward.id = MovieId::new();
    onward.title = "Onward".to_string();
    app.movies.insert(onward).await;

    let response = app
        .get_authenticated("/movies/Onward", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_fresh_server_serves_starter_catalog() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("alice", "Secret123").await;

    for movie in starter_catalog() {
        let response = app
            .get_authenticated(&format!("/movies/{}", movie.title), &token)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK, "{}", movie.title);
        assert_eq!(json_body(response).await["data"]["id"], movie.id.to_string());
    }

    // Seeded ids are usable as favorites straight away.
    let luca = &starter_catalog()[1];
    let response = app
        .post_authenticated(&format!("/users/alice/movies/{}", luca.id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_rejects_password_bcrypt_would_truncate() {
    let app = TestApp::spawn().await;
    let password = format!("{}correct", "a".repeat(72));

    let response = app.register("alice", &password, "alice@example.com").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["data"]["errors"][0]["field"], "password");

    let login = app
        .post("/login")
        .json(&json!({
            "username": "alice",
            "password": format!("{}WRONG-entirely-different", "a".repeat(72))
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(login.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_bodies_use_error_envelope() {
    let app = TestApp::spawn().await;

    let syntax = app
        .post("/login")
        .header("Content-Type", "application/json")
        .body("{\"username\": ")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(syntax.status(), StatusCode::BAD_REQUEST);
    let body = json_body(syntax).await;
    assert_eq!(body["status_code"], 400);
    assert!(body["data"]["message"].is_string());

    let missing_field = app
        .post("/users")
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing_field.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(missing_field).await;
    assert_eq!(body["status_code"], 422);
    assert_eq!(body["data"]["errors"][0]["field"], "body");

    let no_content_type = app
        .post("/login")
        .body("username=alice&password=Secret123")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(no_content_type.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(no_content_type).await["status_code"], 400);
}
