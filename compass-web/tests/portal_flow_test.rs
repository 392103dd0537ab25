//! End-to-end flows through the HTTP shell

use axum::{
    body::Body,
    http::{header::LOCATION, Request, StatusCode},
    response::Response,
    Router,
};
use compass_access::CompassApplication;
use compass_core::{AuthConfig, CompassConfig};
use compass_web::{create_app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn demo_app() -> Router {
    create_app(AppState::with_application(
        CompassConfig::default(),
        CompassApplication::demo(),
    ))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn extract_json_response(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn extract_text_response(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

fn assert_redirect(response: &Response, target: &str) {
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[LOCATION], target);
}

async fn login(app: &Router, email: &str, role: &str) -> Response {
    app.clone()
        .oneshot(post_json(
            "/api/auth/login",
            json!({ "email": email, "password": "secret", "role": role }),
        ))
        .await
        .unwrap()
}

#[tokio::test]
async fn root_and_login_page() {
    let app = demo_app();

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_redirect(&response, "/login");

    let response = app.clone().oneshot(get("/login")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = extract_text_response(response).await;
    assert!(page.contains("Demo Credentials"));
    assert!(page.contains("john.smith@college.edu"));
    assert!(page.contains("robert.wilson@college.edu"));
}

#[tokio::test]
async fn anonymous_portal_requests_redirect() {
    let app = demo_app();

    for uri in [
        "/student/dashboard",
        "/faculty/marks",
        "/admin/settings",
        "/admin/unknown-page",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_redirect(&response, "/login");
    }
}

#[tokio::test]
async fn student_login_flow() {
    let app = demo_app();

    let response = login(&app, "john.smith@college.edu", "student").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json_response(response).await;
    assert_eq!(body["redirect_to"], "/student/dashboard");
    assert_eq!(body["user"]["name"], "John Smith");
    assert_eq!(body["user"]["role"], "student");

    let response = app.clone().oneshot(get("/student/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = extract_json_response(response).await;
    assert_eq!(page["page"]["title"], "Student Dashboard");
    assert_eq!(page["path"], "/student/dashboard");
    assert_eq!(page["user"]["email"], "john.smith@college.edu");
    assert_eq!(page["menu"].as_array().unwrap().len(), 8);

    // wrong portal gets the anonymous treatment
    let response = app.clone().oneshot(get("/faculty/dashboard")).await.unwrap();
    assert_redirect(&response, "/login");

    // unknown page: guarded first, then not found
    let response = app.clone().oneshot(get("/student/grades")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = app.clone().oneshot(get("/admin/grades")).await.unwrap();
    assert_redirect(&response, "/login");
}

#[tokio::test]
async fn session_and_navigation_follow_login_and_logout() {
    let app = demo_app();

    let response = app.clone().oneshot(get("/api/auth/session")).await.unwrap();
    let session = extract_json_response(response).await;
    assert_eq!(session["state"], "anonymous");
    assert_eq!(session["user"], Value::Null);
    assert_eq!(session["is_loading"], false);

    let response = app.clone().oneshot(get("/api/navigation")).await.unwrap();
    let navigation = extract_json_response(response).await;
    assert!(navigation["items"].as_array().unwrap().is_empty());

    let response = login(&app, "michael.chen@college.edu", "faculty").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/api/auth/session")).await.unwrap();
    let session = extract_json_response(response).await;
    assert_eq!(session["state"], "authenticated");
    assert_eq!(session["user"]["name"], "Dr. Michael Chen");
    assert!(session["authenticated_at"].is_string());

    let response = app.clone().oneshot(get("/api/navigation")).await.unwrap();
    let navigation = extract_json_response(response).await;
    assert_eq!(navigation["role"], "faculty");
    let items = navigation["items"].as_array().unwrap();
    assert_eq!(items.len(), 6);
    assert_eq!(items[4]["title"], "Mark Entry");
    assert_eq!(items[4]["href"], "/faculty/marks");

    let response = app
        .clone()
        .oneshot(post_json("/api/auth/logout", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/faculty/dashboard")).await.unwrap();
    assert_redirect(&response, "/login");

    // logout is idempotent
    let response = app
        .clone()
        .oneshot(post_json("/api/auth/logout", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn failed_logins_share_one_message() {
    let app = demo_app();

    let unknown = login(&app, "unknown@x.edu", "student").await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown = extract_json_response(unknown).await;

    let mismatch = login(&app, "john.smith@college.edu", "admin").await;
    assert_eq!(mismatch.status(), StatusCode::UNAUTHORIZED);
    let mismatch = extract_json_response(mismatch).await;

    assert_eq!(unknown, mismatch);
    assert_eq!(unknown["error"], "invalid_credentials");
    assert_eq!(unknown["message"], "Invalid credentials. Please try again.");

    let response = app.clone().oneshot(get("/api/auth/session")).await.unwrap();
    let session = extract_json_response(response).await;
    assert_eq!(session["state"], "anonymous");
}

#[tokio::test]
async fn missing_fields_are_bad_requests() {
    let app = demo_app();

    for body in [
        json!({ "email": "", "password": "x", "role": "student" }),
        json!({ "email": "john.smith@college.edu", "role": "student" }),
        json!({ "email": "john.smith@college.edu", "password": "x" }),
        json!({ "email": "john.smith@college.edu", "password": "x", "role": "teacher" }),
        json!({ "email": "john.smith@college.edu", "password": "x", "role": null }),
        json!({ "email": "john.smith@college.edu", "password": 7, "role": "student" }),
        json!({ "email": null, "password": "x", "role": "student" }),
    ] {
        let response = app
            .clone()
            .oneshot(post_json("/api/auth/login", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = extract_json_response(response).await;
        assert_eq!(error["error"], "missing_field");
        assert_eq!(error["message"], "Please fill in all fields");
    }
}

#[tokio::test]
async fn blank_looking_password_signs_in() {
    let app = demo_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            json!({ "email": "john.smith@college.edu", "password": "   ", "role": "student" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/student/fees")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn failed_login_keeps_existing_session() {
    let app = demo_app();

    let response = login(&app, "robert.wilson@college.edu", "admin").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = login(&app, "robert.wilson@college.edu", "student").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.clone().oneshot(get("/admin/settings")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = extract_json_response(response).await;
    assert_eq!(page["page"]["title"], "Admin Settings");
}

#[tokio::test]
async fn demo_accounts_endpoint() {
    let app = demo_app();
    let response = app
        .clone()
        .oneshot(get("/api/auth/demo-accounts"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let accounts = extract_json_response(response).await;
    assert_eq!(accounts.as_array().unwrap().len(), 5);
    assert_eq!(accounts[0]["email"], "john.smith@college.edu");
    assert_eq!(accounts[0]["role"], "student");

    let config = CompassConfig {
        auth: AuthConfig {
            show_demo_credentials: false,
            ..AuthConfig::default()
        },
        ..CompassConfig::default()
    };
    let hidden = create_app(AppState::with_application(
        config,
        CompassApplication::demo(),
    ));
    let response = hidden
        .clone()
        .oneshot(get("/api/auth/demo-accounts"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = hidden.oneshot(get("/login")).await.unwrap();
    let page = extract_text_response(response).await;
    assert!(!page.contains("Demo Credentials"));
}

#[tokio::test]
async fn unknown_paths_are_json_not_found() {
    let app = demo_app();

    let response = app.clone().oneshot(get("/nowhere")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = extract_json_response(response).await;
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["path"], "/nowhere");
}

#[tokio::test]
async fn custom_login_path() {
    let config = CompassConfig {
        auth: AuthConfig {
            login_path: "/signin".to_string(),
            ..AuthConfig::default()
        },
        ..CompassConfig::default()
    };
    let state = AppState::new(config).await.unwrap();
    let app = create_app(state);

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_redirect(&response, "/signin");

    let response = app.clone().oneshot(get("/student/dashboard")).await.unwrap();
    assert_redirect(&response, "/signin");

    let response = app.clone().oneshot(get("/signin")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
