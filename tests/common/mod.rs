// Common test utilities for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::endpoint::BoxEndpoint;
use poem::http::{StatusCode, header};
use poem::test::{TestClient, TestResponse};
use poem::EndpointExt;
use sea_orm::Database;
use serde::Serialize;

use assetdesk::api::build_app;
use assetdesk::app_data::AppData;
use assetdesk::config::{BootstrapSettings, MockEnvironment};
use assetdesk::types::db::{asset, customer, user};
use assetdesk::types::dto::assets::AssetPayload;
use assetdesk::types::dto::customers::CustomerPayload;
use assetdesk::types::dto::users::UserPayload;
use assetdesk::types::internal::{AccessScope, AuthLevel};

pub const PASSWORD: &str = "correct horse battery";

/// Body for actions without fields
pub const NO_FORM: &[(&str, &str)] = &[];

/// The full application over a fresh in-memory database
pub struct TestApp {
    pub app_data: Arc<AppData>,
    pub client: TestClient<BoxEndpoint<'static>>,
}

/// Session cookie of a logged-in user
pub struct LoggedIn {
    pub cookie: String,
    pub user: user::Model,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let env = MockEnvironment::empty().with_var("PASSWORD_PEPPER", "integration-pepper");
        let settings = BootstrapSettings::from_env_provider(Arc::new(env))
            .expect("Failed to load test settings");
        let app_data = Arc::new(AppData::init(db, settings).expect("Failed to build AppData"));

        let client = TestClient::new(build_app(app_data.clone()).map_to_response().boxed());
        Self { app_data, client }
    }

    pub async fn customer(&self, name: &str) -> customer::Model {
        self.app_data
            .customer_store
            .create(
                &self.app_data.db,
                &AccessScope::Unrestricted,
                CustomerPayload {
                    customer_name: name.to_string(),
                    contact_name: None,
                    contact_email: None,
                    contact_phone: None,
                    address: None,
                },
            )
            .await
            .expect("Failed to create customer")
    }

    pub async fn asset(&self, customer_id: i32, hostname: &str) -> asset::Model {
        self.app_data
            .asset_store
            .create(
                &self.app_data.db,
                &AccessScope::Unrestricted,
                AssetPayload {
                    hostname: hostname.to_string(),
                    customer_id,
                    device_type_id: 1,
                    status_id: 1,
                    serial_number: None,
                    description: None,
                },
            )
            .await
            .expect("Failed to create asset")
    }

    /// Create a user whose password is `PASSWORD`
    pub async fn user(
        &self,
        username: &str,
        auth_level: AuthLevel,
        customer_id: Option<i32>,
    ) -> user::Model {
        let password_hash = self
            .app_data
            .crypto_provider
            .hash_password(PASSWORD)
            .await
            .expect("Failed to hash password");
        let payload = UserPayload {
            username: username.to_string(),
            password: None,
            auth_level,
            customer_id,
        };

        self.app_data
            .user_store
            .create(&self.app_data.db, &AccessScope::Unrestricted, &payload, password_hash)
            .await
            .expect("Failed to create user")
    }

    /// Create a user and log in through `/login`
    pub async fn login_as(
        &self,
        username: &str,
        auth_level: AuthLevel,
        customer_id: Option<i32>,
    ) -> LoggedIn {
        let user = self.user(username, auth_level, customer_id).await;

        let resp = self
            .client
            .post("/login")
            .form(&[("username", username), ("password", PASSWORD)])
            .send()
            .await;
        resp.assert_status(StatusCode::SEE_OTHER);
        resp.assert_header(header::LOCATION, "/home");

        let cookie = session_cookie(&resp).expect("login did not set a session cookie");
        LoggedIn { cookie, user }
    }

    pub async fn get(&self, path: &str, session: Option<&LoggedIn>) -> TestResponse {
        let mut request = self.client.get(path);
        if let Some(session) = session {
            request = request.header(header::COOKIE, session.cookie.as_str());
        }
        request.send().await
    }

    pub async fn post<T: Serialize>(
        &self,
        path: &str,
        session: Option<&LoggedIn>,
        form: T,
    ) -> TestResponse {
        let mut request = self.client.post(path).form(&form);
        if let Some(session) = session {
            request = request.header(header::COOKIE, session.cookie.as_str());
        }
        request.send().await
    }
}

/// `name=value` part of the response's Set-Cookie header
pub fn session_cookie(resp: &TestResponse) -> Option<String> {
    resp.0
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

/// Status plus redirect target
pub fn assert_redirect(resp: &TestResponse, location: &str) {
    resp.assert_status(StatusCode::SEE_OTHER);
    resp.assert_header(header::LOCATION, location);
}

pub async fn body(resp: TestResponse) -> String {
    resp.0
        .into_body()
        .into_string()
        .await
        .expect("response body is not text")
}
