// API layer - HTTP endpoints
//
// `web` serves the HTML application, `health` the JSON health check that
// is published through OpenAPI and Swagger UI.
pub mod health;
pub mod web;

use std::sync::Arc;

use poem::middleware::Tracing;
use poem::session::{CookieConfig, MemoryStorage, ServerSession};
use poem::{Endpoint, EndpointExt};
use poem_openapi::OpenApiService;

use crate::app_data::AppData;
use crate::coordinators::Coordinators;

pub use health::HealthApi;
pub use web::ErrorPages;

/// Assemble the full application endpoint.
///
/// `ErrorPages` sits inside `ServerSession` so error handling can read and
/// flash into the session.
pub fn build_app(app_data: Arc<AppData>) -> impl Endpoint {
    let api_service = OpenApiService::new(
        HealthApi::new(app_data.db.clone()),
        "AssetDesk API",
        env!("CARGO_PKG_VERSION"),
    )
    .server("/api");
    let ui = api_service.swagger_ui();

    let cookie = CookieConfig::default()
        .name(app_data.settings.session_cookie_name())
        .secure(app_data.settings.session_cookie_secure())
        .http_only(true);

    let coordinators = Arc::new(Coordinators::new(app_data));

    web::routes()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .with(ErrorPages)
        .with(ServerSession::new(cookie, MemoryStorage::new()))
        .with(Tracing)
        .data(coordinators)
}
