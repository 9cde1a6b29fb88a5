mod common;

use poem::http::StatusCode;
use sea_orm::EntityTrait;

use assetdesk::types::db::{asset, customer, user};
use assetdesk::types::internal::AuthLevel;
use common::{NO_FORM, PASSWORD, TestApp, assert_redirect, body, session_cookie};

#[tokio::test]
async fn test_asset_create_then_view_round_trip() {
    let app = TestApp::new().await;
    let acme = app.customer("Acme").await;
    let session = app.login_as("sam", AuthLevel::Support, None).await;

    let create_page = body(app.get("/create", Some(&session)).await).await;
    assert!(create_page.contains("Acme"));

    let customer_id = acme.id.to_string();
    let resp = app
        .post(
            "/create/asset",
            Some(&session),
            &[
                ("hostname", "fin-laptop-01"),
                ("customer_id", customer_id.as_str()),
                ("device_type_id", "1"),
                ("status_id", "1"),
                ("serial_number", "SN-4242"),
                ("description", "Finance team"),
            ],
        )
        .await;

    let created = asset::Entity::find().all(&app.app_data.db).await.unwrap();
    assert_eq!(created.len(), 1);
    let created = &created[0];
    assert_redirect(&resp, &format!("/assets/{}", created.id));
    assert_eq!(created.hostname, "fin-laptop-01");
    assert_eq!(created.customer_id, acme.id);
    assert_eq!(created.serial_number.as_deref(), Some("SN-4242"));
    assert_eq!(created.description.as_deref(), Some("Finance team"));

    let page = body(app.get(&format!("/assets/{}", created.id), Some(&session)).await).await;
    assert!(page.contains("Asset created"));
    assert!(page.contains("fin-laptop-01"));
    assert!(page.contains("SN-4242"));
}

#[tokio::test]
async fn test_asset_with_blank_hostname_is_not_saved() {
    let app = TestApp::new().await;
    let acme = app.customer("Acme").await;
    let session = app.login_as("sam", AuthLevel::Support, None).await;

    let customer_id = acme.id.to_string();
    let resp = app
        .post(
            "/create/asset",
            Some(&session),
            &[
                ("hostname", " "),
                ("customer_id", customer_id.as_str()),
                ("device_type_id", "1"),
                ("status_id", "1"),
            ],
        )
        .await;
    assert_redirect(&resp, "/create");
    assert!(asset::Entity::find().all(&app.app_data.db).await.unwrap().is_empty());

    let page = body(app.get("/create", Some(&session)).await).await;
    assert!(page.contains("hostname is required"));
}

#[tokio::test]
async fn test_asset_update_and_confirmed_delete() {
    let app = TestApp::new().await;
    let acme = app.customer("Acme").await;
    let laptop = app.asset(acme.id, "old-name").await;
    let session = app.login_as("sam", AuthLevel::Admin, None).await;
    let detail = format!("/assets/{}", laptop.id);

    let customer_id = acme.id.to_string();
    let resp = app
        .post(
            &detail,
            Some(&session),
            &[
                ("hostname", "new-name"),
                ("customer_id", customer_id.as_str()),
                ("device_type_id", "1"),
                ("status_id", "1"),
            ],
        )
        .await;
    assert_redirect(&resp, &detail);
    let updated = asset::Entity::find_by_id(laptop.id)
        .one(&app.app_data.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.hostname, "new-name");

    // Without the confirmation box the user is sent back
    assert_redirect(&app.post(&format!("{detail}/delete"), Some(&session), NO_FORM).await, &detail);
    assert!(asset::Entity::find_by_id(laptop.id).one(&app.app_data.db).await.unwrap().is_some());

    let resp = app
        .post(&format!("{detail}/delete"), Some(&session), &[("confirm", "on")])
        .await;
    assert_redirect(&resp, "/assets");
    assert!(asset::Entity::find_by_id(laptop.id).one(&app.app_data.db).await.unwrap().is_none());
}

#[tokio::test]
async fn test_customer_page_lists_devices_and_open_requests() {
    let app = TestApp::new().await;
    let session = app.login_as("sam", AuthLevel::Support, None).await;

    let resp = app
        .post(
            "/create/customer",
            Some(&session),
            &[("customer_name", "Initech"), ("contact_name", "Bill")],
        )
        .await;
    let initech = customer::Entity::find().all(&app.app_data.db).await.unwrap().remove(0);
    assert_redirect(&resp, &format!("/customers/{}", initech.id));
    assert_eq!(initech.contact_name.as_deref(), Some("Bill"));

    app.asset(initech.id, "initech-printer").await;
    let customer_id = initech.id.to_string();
    app.post(
        "/contact",
        Some(&session),
        &[
            ("title", "TPS reports"),
            ("description", ""),
            ("customer_id", customer_id.as_str()),
        ],
    )
    .await;

    let page = body(app.get(&format!("/customers/{}", initech.id), Some(&session)).await).await;
    assert!(page.contains("Initech"));
    assert!(page.contains("initech-printer"));
    assert!(page.contains("TPS reports"));

    let page = body(
        app.post("/customers", Some(&session), &[("customer_name", "tech")])
            .await,
    )
    .await;
    assert!(page.contains("Initech"));
}

#[tokio::test]
async fn test_admin_creates_user_who_can_log_in() {
    let app = TestApp::new().await;
    let acme = app.customer("Acme").await;
    let admin = app.login_as("root", AuthLevel::Admin, None).await;

    let customer_id = acme.id.to_string();
    let resp = app
        .post(
            "/users/create",
            Some(&admin),
            &[
                ("username", "wile"),
                ("password", "acme-rocket"),
                ("auth_level", "3"),
                ("customer_id", customer_id.as_str()),
            ],
        )
        .await;
    resp.assert_status(StatusCode::SEE_OTHER);

    let users = user::Entity::find().all(&app.app_data.db).await.unwrap();
    let wile = users.iter().find(|u| u.username == "wile").unwrap();
    assert_eq!(wile.customer_id, Some(acme.id));
    assert_ne!(wile.password_hash, "acme-rocket");

    let resp = app
        .client
        .post("/login")
        .form(&[("username", "wile"), ("password", "acme-rocket")])
        .send()
        .await;
    assert_redirect(&resp, "/home");
    assert!(session_cookie(&resp).is_some());
}

#[tokio::test]
async fn test_customer_level_user_needs_customer() {
    let app = TestApp::new().await;
    let admin = app.login_as("root", AuthLevel::Admin, None).await;

    let resp = app
        .post(
            "/users/create",
            Some(&admin),
            &[("username", "orphan"), ("password", PASSWORD), ("auth_level", "3")],
        )
        .await;
    assert_redirect(&resp, "/users/create");

    let users = user::Entity::find().all(&app.app_data.db).await.unwrap();
    assert!(users.iter().all(|u| u.username != "orphan"));
}

#[tokio::test]
async fn test_admin_cannot_delete_own_account() {
    let app = TestApp::new().await;
    let admin = app.login_as("root", AuthLevel::Admin, None).await;
    let detail = format!("/users/{}", admin.user.id);

    let resp = app
        .post(&format!("{detail}/delete"), Some(&admin), &[("confirm", "on")])
        .await;
    assert_redirect(&resp, &detail);
    assert_eq!(user::Entity::find().all(&app.app_data.db).await.unwrap().len(), 1);
}
