use std::sync::Arc;

use poem::session::Session;
use poem::web::{Data, Form};
use poem::{IntoResponse, Request, Response, handler};

use crate::coordinators::Coordinators;
use crate::errors::WebError;
use crate::errors::web::see_other;
use crate::types::dto::auth::LoginForm;
use crate::types::internal::RequestContext;
use crate::views;

use super::session::{current_identity, establish, take_flash, terminate};

/// Login page, or straight to `/home` when already logged in
#[handler]
pub async fn index(session: &Session) -> Response {
    if current_identity(session).is_some() {
        return see_other("/home");
    }
    let flash = take_flash(session);
    views::login::login_page(flash.as_deref()).into_response()
}

#[handler]
pub async fn login(
    req: &Request,
    session: &Session,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    let ctx = RequestContext::from_request(req);

    let identity = coordinators
        .login
        .login(&ctx, form.username, form.password)
        .await
        .map_err(|e| WebError::from_internal(e, "/"))?;

    establish(session, &identity);
    Ok(see_other("/home"))
}

/// Always ends at the login page, with or without a session
#[handler]
pub async fn logout(session: &Session) -> Response {
    if let Some(identity) = current_identity(session) {
        tracing::info!("User {} logged out", identity.user_id);
    }
    terminate(session);
    see_other("/")
}
