mod common;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use assetdesk::types::db::{note, ticket};
use assetdesk::types::internal::{AuthLevel, TicketStatus};
use common::{NO_FORM, TestApp, assert_redirect, body};

async fn only_ticket(app: &TestApp) -> ticket::Model {
    let mut tickets = ticket::Entity::find().all(&app.app_data.db).await.unwrap();
    assert_eq!(tickets.len(), 1);
    tickets.remove(0)
}

async fn notes_of(app: &TestApp, ticket_id: i32) -> Vec<note::Model> {
    note::Entity::find()
        .filter(note::Column::TicketId.eq(ticket_id))
        .all(&app.app_data.db)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_customer_ticket_is_stamped_with_session_customer() {
    let app = TestApp::new().await;
    let acme = app.customer("Acme").await;
    let globex = app.customer("Globex").await;
    let session = app.login_as("cu", AuthLevel::Customer, Some(acme.id)).await;

    let resp = app
        .post(
            "/contact",
            Some(&session),
            &[
                ("title", "Screen flickers".to_string()),
                ("description", "Since this morning".to_string()),
                ("device_id", String::new()),
                ("customer_id", globex.id.to_string()),
            ],
        )
        .await;
    assert_redirect(&resp, "/contact");

    let ticket = only_ticket(&app).await;
    assert_eq!(ticket.customer_id, Some(acme.id));
    assert_eq!(ticket.created_by, Some(session.user.id));
    assert_eq!(ticket.status_id, TicketStatus::New.id());

    let page = body(app.get("/contact", Some(&session)).await).await;
    assert!(page.contains(&format!("Request {} created", ticket.id)));
}

#[tokio::test]
async fn test_customer_cannot_attach_foreign_device() {
    let app = TestApp::new().await;
    let acme = app.customer("Acme").await;
    let globex = app.customer("Globex").await;
    let foreign = app.asset(globex.id, "globex-server").await;
    let session = app.login_as("cu", AuthLevel::Customer, Some(acme.id)).await;

    let resp = app
        .post(
            "/contact",
            Some(&session),
            &[
                ("title", "Help".to_string()),
                ("description", String::new()),
                ("device_id", foreign.id.to_string()),
            ],
        )
        .await;
    assert_redirect(&resp, "/contact");

    assert!(ticket::Entity::find().all(&app.app_data.db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_title_is_rejected() {
    let app = TestApp::new().await;
    let session = app.login_as("sam", AuthLevel::Support, None).await;

    let resp = app
        .post("/contact", Some(&session), &[("title", "  "), ("description", "x")])
        .await;
    assert_redirect(&resp, "/contact");
    assert!(ticket::Entity::find().all(&app.app_data.db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reassign_and_close_workflow() {
    let app = TestApp::new().await;
    let acme = app.customer("Acme").await;
    let session = app.login_as("sam", AuthLevel::Support, None).await;

    app.post(
        "/contact",
        Some(&session),
        &[
            ("title", "Printer jam".to_string()),
            ("description", "Tray 2".to_string()),
            ("customer_id", acme.id.to_string()),
        ],
    )
    .await;
    let ticket = only_ticket(&app).await;
    let detail = format!("/tickets/{}", ticket.id);

    // New tickets show up on the home page until someone picks them up
    assert!(body(app.get("/home", Some(&session)).await).await.contains("Printer jam"));

    let resp = app
        .post(&format!("{detail}/reassign"), Some(&session), NO_FORM)
        .await;
    assert_redirect(&resp, &detail);
    let ticket = only_ticket(&app).await;
    assert_eq!(ticket.status_id, TicketStatus::InProgress.id());
    assert_eq!(ticket.assigned_to, Some(session.user.id));
    assert!(!body(app.get("/home", Some(&session)).await).await.contains("Printer jam"));

    assert_redirect(&app.post(&format!("{detail}/close"), Some(&session), NO_FORM).await, &detail);
    let ticket = only_ticket(&app).await;
    assert_eq!(ticket.status_id, TicketStatus::Closed.id());
    let notes = notes_of(&app, ticket.id).await;
    assert_eq!(notes.len(), 1);
    assert!(notes[0].is_system);
    assert!(notes[0].body.contains("sam"));

    // Closing again and reassigning a closed ticket change nothing
    app.post(&format!("{detail}/close"), Some(&session), NO_FORM).await;
    assert_eq!(notes_of(&app, ticket.id).await.len(), 1);

    let other = app.login_as("alex", AuthLevel::Admin, None).await;
    assert_redirect(&app.post(&format!("{detail}/reassign"), Some(&other), NO_FORM).await, &detail);
    let unchanged = only_ticket(&app).await;
    assert_eq!(unchanged.assigned_to, Some(session.user.id));
    assert_eq!(unchanged.status_id, TicketStatus::Closed.id());

    let page = body(app.get(&detail, Some(&other)).await).await;
    assert!(page.contains("is closed"));
}

#[tokio::test]
async fn test_notes_can_be_added_and_deleted() {
    let app = TestApp::new().await;
    let session = app.login_as("sam", AuthLevel::Support, None).await;
    app.post("/contact", Some(&session), &[("title", "VPN"), ("description", "")])
        .await;
    let ticket = only_ticket(&app).await;
    let detail = format!("/tickets/{}", ticket.id);

    let resp = app
        .post(&format!("{detail}/addNote"), Some(&session), &[("body", "Called the user")])
        .await;
    assert_redirect(&resp, &detail);
    assert!(body(app.get(&detail, Some(&session)).await).await.contains("Called the user"));

    let note = notes_of(&app, ticket.id).await.remove(0);
    let delete = format!("{detail}/note/{}/delete", note.id);

    app.post(&delete, Some(&session), NO_FORM).await;
    assert_eq!(notes_of(&app, ticket.id).await.len(), 1);

    assert_redirect(&app.post(&delete, Some(&session), &[("confirm", "on")]).await, &detail);
    assert!(notes_of(&app, ticket.id).await.is_empty());
}

#[tokio::test]
async fn test_change_customer_clears_foreign_device() {
    let app = TestApp::new().await;
    let acme = app.customer("Acme").await;
    let globex = app.customer("Globex").await;
    let laptop = app.asset(acme.id, "acme-laptop").await;
    let session = app.login_as("sam", AuthLevel::Support, None).await;

    app.post(
        "/contact",
        Some(&session),
        &[
            ("title", "Battery".to_string()),
            ("description", String::new()),
            ("device_id", laptop.id.to_string()),
            ("customer_id", acme.id.to_string()),
        ],
    )
    .await;
    let ticket = only_ticket(&app).await;
    assert_eq!(ticket.device_id, Some(laptop.id));

    let resp = app
        .post(
            &format!("/tickets/{}/changeCustomer", ticket.id),
            Some(&session),
            &[("customer_id", globex.id.to_string())],
        )
        .await;
    assert_redirect(&resp, &format!("/tickets/{}", ticket.id));

    let ticket = only_ticket(&app).await;
    assert_eq!(ticket.customer_id, Some(globex.id));
    assert_eq!(ticket.device_id, None);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let app = TestApp::new().await;
    let session = app.login_as("sam", AuthLevel::Support, None).await;
    app.post("/contact", Some(&session), &[("title", "Mouse"), ("description", "")])
        .await;
    let ticket = only_ticket(&app).await;
    let detail = format!("/tickets/{}", ticket.id);

    assert_redirect(&app.post(&format!("{detail}/delete"), Some(&session), NO_FORM).await, &detail);
    only_ticket(&app).await;

    let resp = app
        .post(&format!("{detail}/delete"), Some(&session), &[("confirm", "on")])
        .await;
    assert_redirect(&resp, "/contact");
    assert!(ticket::Entity::find().all(&app.app_data.db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_error_report_raises_ticket() {
    let app = TestApp::new().await;
    let acme = app.customer("Acme").await;
    let session = app.login_as("cu", AuthLevel::Customer, Some(acme.id)).await;

    let resp = app
        .post(
            "/error",
            Some(&session),
            &[("failed_path", "/assets"), ("description", "Page crashed")],
        )
        .await;
    assert_redirect(&resp, "/home");

    let ticket = only_ticket(&app).await;
    assert_eq!(ticket.title, "Application error on /assets");
    assert_eq!(ticket.description, "Page crashed");
    assert_eq!(ticket.customer_id, Some(acme.id));
}

#[tokio::test]
async fn test_staff_search_filters_request_list_by_title() {
    let app = TestApp::new().await;
    let session = app.login_as("sam", AuthLevel::Support, None).await;
    for title in ["VPN drops", "Toner empty"] {
        app.post("/contact", Some(&session), &[("title", title), ("description", "")])
            .await;
    }

    let resp = app
        .post("/user-requests", Some(&session), &[("title", "VPN")])
        .await;
    resp.assert_status_is_ok();
    let page = body(resp).await;
    assert!(page.contains("VPN drops"));
    assert!(!page.contains("Toner empty"));
}
