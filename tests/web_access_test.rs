mod common;

use poem::http::StatusCode;

use assetdesk::types::internal::AuthLevel;
use common::{TestApp, assert_redirect, body, session_cookie};

#[tokio::test]
async fn test_protected_routes_redirect_anonymous_visitors_to_login() {
    let app = TestApp::new().await;

    let protected = [
        "/home",
        "/assets",
        "/assets/1",
        "/customers",
        "/create",
        "/users",
        "/contact",
        "/tickets/1",
    ];
    for path in protected {
        let resp = app.get(path, None).await;
        assert_redirect(&resp, "/");
    }

    let resp = app
        .post("/contact", None, &[("title", "Printer"), ("description", "jammed")])
        .await;
    assert_redirect(&resp, "/");
}

#[tokio::test]
async fn test_login_page_is_public() {
    let app = TestApp::new().await;

    let resp = app.get("/", None).await;
    resp.assert_status_is_ok();
    assert!(body(resp).await.contains(r#"action="/login""#));
}

#[tokio::test]
async fn test_wrong_password_stays_anonymous_with_generic_message() {
    let app = TestApp::new().await;
    app.user("sam", AuthLevel::Support, None).await;

    let resp = app
        .client
        .post("/login")
        .form(&[("username", "sam"), ("password", "wrong")])
        .send()
        .await;
    assert_redirect(&resp, "/");
    let cookie = session_cookie(&resp).expect("flash needs a session");

    let resp = app
        .client
        .get("/")
        .header("cookie", cookie.as_str())
        .send()
        .await;
    resp.assert_status_is_ok();
    assert!(body(resp).await.contains("Incorrect username/password"));

    let resp = app
        .client
        .get("/home")
        .header("cookie", cookie.as_str())
        .send()
        .await;
    assert_redirect(&resp, "/");
}

#[tokio::test]
async fn test_unknown_user_gets_same_message() {
    let app = TestApp::new().await;

    let resp = app
        .client
        .post("/login")
        .form(&[("username", "ghost"), ("password", "whatever")])
        .send()
        .await;
    assert_redirect(&resp, "/");
    let cookie = session_cookie(&resp).expect("flash needs a session");

    let resp = app
        .client
        .get("/")
        .header("cookie", cookie.as_str())
        .send()
        .await;
    assert!(body(resp).await.contains("Incorrect username/password"));
}

#[tokio::test]
async fn test_login_then_logout() {
    let app = TestApp::new().await;
    let session = app.login_as("sam", AuthLevel::Support, None).await;

    app.get("/home", Some(&session)).await.assert_status_is_ok();
    assert_redirect(&app.get("/", Some(&session)).await, "/home");

    assert_redirect(&app.get("/logout", Some(&session)).await, "/");
    assert_redirect(&app.get("/home", Some(&session)).await, "/");
}

#[tokio::test]
async fn test_customer_user_cannot_reach_staff_pages() {
    let app = TestApp::new().await;
    let acme = app.customer("Acme").await;
    let session = app.login_as("cu", AuthLevel::Customer, Some(acme.id)).await;

    assert_redirect(&app.get("/users", Some(&session)).await, "/home");
    assert_redirect(&app.get("/customers", Some(&session)).await, "/home");
    assert_redirect(&app.get("/create", Some(&session)).await, "/home");
    assert_redirect(&app.get(&format!("/customers/{}", acme.id), Some(&session)).await, "/home");
    assert_redirect(&app.get("/tickets/1", Some(&session)).await, "/contact");
}

#[tokio::test]
async fn test_support_staff_cannot_manage_users() {
    let app = TestApp::new().await;
    let session = app.login_as("sam", AuthLevel::Support, None).await;

    assert_redirect(&app.get("/users", Some(&session)).await, "/home");
    app.get("/customers", Some(&session)).await.assert_status_is_ok();
}

#[tokio::test]
async fn test_customer_user_sees_only_own_devices() {
    let app = TestApp::new().await;
    let acme = app.customer("Acme").await;
    let globex = app.customer("Globex").await;
    let own = app.asset(acme.id, "acme-laptop").await;
    let foreign = app.asset(globex.id, "globex-server").await;
    let session = app.login_as("cu", AuthLevel::Customer, Some(acme.id)).await;

    let resp = app.get("/assets", Some(&session)).await;
    resp.assert_status_is_ok();
    let page = body(resp).await;
    assert!(page.contains("acme-laptop"));
    assert!(!page.contains("globex-server"));

    // A crafted filter for another customer still returns only own rows
    let resp = app
        .post("/assets", Some(&session), &[("customer_id", globex.id.to_string())])
        .await;
    assert!(!body(resp).await.contains("globex-server"));

    assert_redirect(&app.get(&format!("/assets/{}", own.id), Some(&session)).await, "/assets");
    assert_redirect(&app.get(&format!("/assets/{}", foreign.id), Some(&session)).await, "/assets");
}

#[tokio::test]
async fn test_missing_and_malformed_ids_redirect_to_list() {
    let app = TestApp::new().await;
    let session = app.login_as("sam", AuthLevel::Admin, None).await;

    assert_redirect(&app.get("/assets/999", Some(&session)).await, "/assets");
    assert_redirect(&app.get("/assets/abc", Some(&session)).await, "/assets");
    assert_redirect(&app.get("/customers/999", Some(&session)).await, "/customers");
    assert_redirect(&app.get("/users/nope", Some(&session)).await, "/users");
    assert_redirect(&app.get("/tickets/999", Some(&session)).await, "/contact");
}

#[tokio::test]
async fn test_unknown_route_and_wrong_method_pages() {
    let app = TestApp::new().await;

    // Anonymous visitors are sent to login instead
    assert_redirect(&app.get("/no-such-page", None).await, "/");

    let session = app.login_as("sam", AuthLevel::Support, None).await;

    let resp = app.get("/no-such-page", Some(&session)).await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert!(body(resp).await.contains("Page not found"));

    let resp = app.get("/login", Some(&session)).await;
    resp.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    assert!(body(resp).await.contains("Invalid request"));
}

#[tokio::test]
async fn test_unreadable_form_body_is_not_passed_through() {
    let app = TestApp::new().await;

    let resp = app.client.post("/assets/1/delete").send().await;
    assert_redirect(&resp, "/");

    let session = app.login_as("sam", AuthLevel::Support, None).await;
    let resp = app
        .client
        .post("/assets/1/delete")
        .header("cookie", session.cookie.as_str())
        .send()
        .await;
    assert!(resp.0.status().is_client_error());
    assert!(body(resp).await.contains("Something went wrong"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new().await;

    let resp = app.get("/api/health", None).await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value().object().get("status").assert_string("healthy");
    json.value().object().get("database").assert_string("ok");
}
