//! Integration tests for the public and own-account endpoints.
//!
//! Each test runs the real router against its own migrated SQLite file.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{error_message, json_body, location, session_cookie, TestApp, ADMIN_EMAIL, ADMIN_PASSWORD};

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;
    let response = app.get("/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_seeded_admin_can_login() {
    let app = TestApp::spawn().await;
    let response = app
        .post_json(
            "/account/login",
            json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(session_cookie(&response).is_some());
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let app = TestApp::spawn().await;
    let cookie = app.login("ADMIN@example.com", ADMIN_PASSWORD).await;
    assert!(cookie.starts_with("househelp_session="));
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let app = TestApp::spawn().await;
    let response = app
        .post_json(
            "/account/login",
            json!({ "email": ADMIN_EMAIL, "password": "#Wrong123" }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&response).is_none());
    assert_eq!(error_message(&json_body(response).await), "Invalid email or password");
}

#[tokio::test]
async fn test_unknown_email_is_rejected_the_same_way() {
    let app = TestApp::spawn().await;
    let response = app
        .post_json(
            "/account/login",
            json!({ "email": "nobody@example.com", "password": ADMIN_PASSWORD }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&json_body(response).await), "Invalid email or password");
}

#[tokio::test]
async fn test_login_follows_only_local_return_urls() {
    let app = TestApp::spawn().await;
    let credentials = json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD });

    let response = app
        .post_json("/account/login?returnUrl=/admin", credentials.clone(), None)
        .await;
    assert_eq!(location(&response), "/admin");

    let response = app
        .post_json(
            "/account/login?returnUrl=https://evil.example/",
            credentials,
            None,
        )
        .await;
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_logout_clears_session() {
    let app = TestApp::spawn().await;
    let cookie = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = app.get("/account/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let removal = response
        .headers()
        .get(axum::http::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(removal.starts_with("househelp_session=;"));
}

#[tokio::test]
async fn test_access_denied_page() {
    let app = TestApp::spawn().await;
    let response = app.get("/account/access-denied", None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_protected_routes_require_session() {
    let app = TestApp::spawn().await;

    for uri in ["/househelp", "/househelp/edit", "/account/summary", "/admin"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }

    let response = app
        .get("/househelp", Some("househelp_session=forged.token.value"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_anonymous_registration_creates_unavailable_househelp() {
    let app = TestApp::spawn().await;
    let response = app
        .post_json(
            "/househelp/create",
            json!({ "username": "jane", "email": "jane@x.com", "password": "Secret1!" }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["data"]["username"], "jane");
    assert_eq!(body["data"]["is_available"], false);
    assert_eq!(body["data"]["roles"], json!([]));

    // Not listed until the owner marks the profile available
    let listed = json_body(app.get("/", None).await).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_registration_reports_policy_and_format_errors() {
    let app = TestApp::spawn().await;
    let response = app
        .post_json(
            "/househelp/create",
            json!({ "username": "jane doe", "email": "jane@x.com", "password": "secret" }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    let details: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d.as_str())
        .collect();
    assert!(details.contains(&"Username 'jane doe' is invalid, can only contain letters or digits."));
    assert!(details.contains(&"Passwords must have at least one digit ('0'-'9')."));
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = TestApp::spawn().await;
    app.register("jane", "Secret1!").await;

    let response = app
        .post_json(
            "/househelp/create",
            json!({ "username": "JANE", "email": "other@x.com", "password": "Secret1!" }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        error_message(&json_body(response).await),
        "Username 'JANE' is already taken."
    );
}

#[tokio::test]
async fn test_reach_out_appears_on_owner_profile() {
    let app = TestApp::spawn().await;
    let jane_id = app.register("jane", "Secret1!").await;

    let response = app.reach_out(jane_id, "Bob").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        json_body(response).await["message"],
        "Reach out request sent to jane"
    );

    let cookie = app.login("jane@x.com", "Secret1!").await;
    let profile = json_body(app.get("/househelp", Some(&cookie)).await).await;
    let reach_outs = profile["reach_outs"].as_array().unwrap();

    assert_eq!(reach_outs.len(), 1);
    assert_eq!(reach_outs[0]["name"], "Bob");
    assert_eq!(reach_outs[0]["phone"], "0712345678");
    assert_eq!(reach_outs[0]["description"], "Need cleaner");
}

#[tokio::test]
async fn test_reach_out_target_from_query() {
    let app = TestApp::spawn().await;
    let jane_id = app.register("jane", "Secret1!").await;

    let form = json_body(app.get(&format!("/reach-out?houseHelpId={}", jane_id), None).await).await;
    assert_eq!(form["house_help_id"], jane_id.to_string());

    let response = app
        .post_json(
            &format!("/reach-out?houseHelpId={}", jane_id),
            json!({ "name": "Bob", "phone": "0712345678", "description": "Need cleaner" }),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_reach_out_to_unknown_account() {
    let app = TestApp::spawn().await;
    let response = app.reach_out(Uuid::new_v4(), "Bob").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(error_message(&json_body(response).await), "User Not Found");
}

#[tokio::test]
async fn test_reach_out_requires_every_field() {
    let app = TestApp::spawn().await;
    let jane_id = app.register("jane", "Secret1!").await;

    let response = app
        .post_json(
            "/reach-out",
            json!({ "house_help_id": jane_id, "name": "", "phone": "", "description": "Hi" }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_edit_profile_controls_directory_listing() {
    let app = TestApp::spawn().await;
    app.register("jane", "Secret1!").await;
    app.register("mary", "Secret1!").await;
    let jane = app.login("jane@x.com", "Secret1!").await;

    let response = app
        .post_json(
            "/househelp/edit",
            json!({
                "name": "Jane Wanjiku",
                "description": "Cooking and laundry",
                "picture": "AQID",
                "is_available": true,
            }),
            Some(&jane),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile = json_body(response).await;
    assert_eq!(profile["profile_picture_url"], "data:image/jpg;base64,AQID");

    let listed = json_body(app.get("/", None).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["username"], "jane");

    let searched = json_body(app.get("/?searchParameter=laundry", None).await).await;
    assert_eq!(searched.as_array().unwrap().len(), 1);

    let searched = json_body(app.get("/?searchParameter=Laundry", None).await).await;
    assert_eq!(searched, json!([]));

    // Availability is written on every edit; omitting it hides the profile
    app.post_json("/househelp/edit", json!({ "name": "Jane" }), Some(&jane))
        .await;
    let listed = json_body(app.get("/", None).await).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_edit_profile_rejects_taken_email() {
    let app = TestApp::spawn().await;
    app.register("jane", "Secret1!").await;
    app.register("mary", "Secret1!").await;
    let jane = app.login("jane@x.com", "Secret1!").await;

    let response = app
        .post_json(
            "/househelp/edit",
            json!({ "email": "mary@x.com", "is_available": true }),
            Some(&jane),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let profile = json_body(app.get("/househelp", Some(&jane)).await).await;
    assert_eq!(profile["email"], "jane@x.com");
    assert_eq!(profile["is_available"], false);
}

#[tokio::test]
async fn test_change_password_flow() {
    let app = TestApp::spawn().await;
    app.register("jane", "Secret1!").await;
    let jane = app.login("jane@x.com", "Secret1!").await;

    let mismatch = app
        .post_json(
            "/househelp/change-password",
            json!({
                "current_password": "Secret1!",
                "new_password": "Newpass1!",
                "confirm_new_password": "Newpass2!",
            }),
            Some(&jane),
        )
        .await;
    assert_eq!(mismatch.status(), StatusCode::BAD_REQUEST);

    let wrong_current = app
        .post_json(
            "/househelp/change-password",
            json!({
                "current_password": "Wrong1!",
                "new_password": "Newpass1!",
                "confirm_new_password": "Newpass1!",
            }),
            Some(&jane),
        )
        .await;
    assert_eq!(wrong_current.status(), StatusCode::FORBIDDEN);
    assert_eq!(error_message(&json_body(wrong_current).await), "Incorrect password.");

    // Neither attempt changed the credential
    app.login("jane@x.com", "Secret1!").await;

    let changed = app
        .post_json(
            "/househelp/change-password",
            json!({
                "current_password": "Secret1!",
                "new_password": "Newpass1!",
                "confirm_new_password": "Newpass1!",
            }),
            Some(&jane),
        )
        .await;
    assert_eq!(changed.status(), StatusCode::OK);

    app.login("jane@x.com", "Newpass1!").await;
    let old = app
        .post_json(
            "/account/login",
            json!({ "email": "jane@x.com", "password": "Secret1!" }),
            None,
        )
        .await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_summary() {
    let app = TestApp::spawn().await;
    app.register("jane", "Secret1!").await;
    let jane = app.login("jane@x.com", "Secret1!").await;

    let summary = json_body(app.get("/account/summary", Some(&jane)).await).await;
    assert_eq!(summary["username"], "jane");
    assert_eq!(summary["profile_picture_url"], "/images/default-profile.png");
}

#[tokio::test]
async fn test_bearer_header_is_accepted() {
    let app = TestApp::spawn().await;
    app.register("jane", "Secret1!").await;
    let cookie = app.login("jane@x.com", "Secret1!").await;
    let token = cookie.trim_start_matches("househelp_session=");

    let request = axum::http::Request::builder()
        .uri("/househelp")
        .header("Authorization", format!("Bearer {}", token))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::OK);
}
