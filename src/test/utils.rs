// Test utilities shared by unit tests
// Only compiled when running tests

use std::sync::Arc;

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

use crate::app_data::AppData;
use crate::config::{BootstrapSettings, MockEnvironment};
use crate::types::internal::RequestContext;

use crate::types::db::{asset, customer, ticket, user};
use crate::types::internal::{AuthLevel, SessionIdentity, TicketStatus};

/// In-memory SQLite with every migration applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// AppData over a fresh in-memory database, peppered like production
pub async fn setup_test_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    let env = MockEnvironment::empty().with_var("PASSWORD_PEPPER", "test-pepper");
    let settings = BootstrapSettings::from_env_provider(Arc::new(env))
        .expect("Failed to load test settings");

    Arc::new(AppData::init(db, settings).expect("Failed to build AppData"))
}

/// Web request context for `user`
pub fn ctx_for(user: &user::Model) -> RequestContext {
    RequestContext::new().with_identity(identity_for(user))
}

pub async fn insert_customer(db: &DatabaseConnection, name: &str) -> customer::Model {
    customer::ActiveModel {
        customer_name: Set(name.to_string()),
        contact_name: Set(None),
        contact_email: Set(None),
        contact_phone: Set(None),
        address: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert customer")
}

/// Laptop, Active
pub async fn insert_asset(
    db: &DatabaseConnection,
    customer_id: i32,
    hostname: &str,
) -> asset::Model {
    asset::ActiveModel {
        hostname: Set(hostname.to_string()),
        customer_id: Set(customer_id),
        device_type_id: Set(1),
        status_id: Set(1),
        serial_number: Set(None),
        description: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert asset")
}

/// User with a placeholder hash; not usable for login
pub async fn insert_user(
    db: &DatabaseConnection,
    username: &str,
    auth_level: AuthLevel,
    customer_id: Option<i32>,
) -> user::Model {
    let now = Utc::now().timestamp();
    user::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set("not-a-real-hash".to_string()),
        auth_level: Set(auth_level.as_i32()),
        customer_id: Set(customer_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert user")
}

/// New, unassigned ticket without a device
pub async fn insert_ticket(
    db: &DatabaseConnection,
    customer_id: Option<i32>,
    title: &str,
) -> ticket::Model {
    let now = Utc::now().timestamp();
    ticket::ActiveModel {
        title: Set(title.to_string()),
        description: Set(String::new()),
        customer_id: Set(customer_id),
        device_id: Set(None),
        created_by: Set(None),
        assigned_to: Set(None),
        status_id: Set(TicketStatus::New.id()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert ticket")
}

pub fn identity_for(user: &user::Model) -> SessionIdentity {
    SessionIdentity {
        user_id: user.id,
        username: user.username.clone(),
        auth_level: AuthLevel::try_from(user.auth_level).expect("valid auth level"),
        customer_id: user.customer_id,
    }
}
