use poem::error::{MethodNotAllowedError, NotFoundError};
use poem::http::StatusCode;
use poem::session::Session;
use poem::{Endpoint, IntoResponse, Middleware, Request, Response};

use crate::errors::WebError;
use crate::errors::web::see_other;
use crate::views;

use super::session::{current_identity, set_flash};

/// Turns handler errors into redirects and error pages.
///
/// Must sit inside `ServerSession` so the session is available: validation
/// messages are flashed into it, and anonymous visitors who hit an unknown
/// route or a wrong method are sent to the login page instead.
pub struct ErrorPages;

impl<E: Endpoint> Middleware<E> for ErrorPages {
    type Output = ErrorPagesEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        ErrorPagesEndpoint { inner: ep }
    }
}

pub struct ErrorPagesEndpoint<E> {
    inner: E,
}

impl<E: Endpoint> Endpoint for ErrorPagesEndpoint<E> {
    type Output = Response;

    async fn call(&self, req: Request) -> poem::Result<Self::Output> {
        let session = req.extensions().get::<Session>().cloned();
        let path = req.uri().path().to_string();

        match self.inner.call(req).await {
            Ok(resp) => Ok(resp.into_response()),
            Err(err) => Ok(error_response(err, session.as_ref(), &path)),
        }
    }
}

fn error_response(err: poem::Error, session: Option<&Session>, path: &str) -> Response {
    let logged_in = session.and_then(current_identity).is_some();

    if err.is::<NotFoundError>() {
        if !logged_in {
            return see_other("/");
        }
        return views::errors::not_found()
            .with_status(StatusCode::NOT_FOUND)
            .into_response();
    }

    if err.is::<MethodNotAllowedError>() {
        if !logged_in {
            return see_other("/");
        }
        return views::errors::invalid_method()
            .with_status(StatusCode::METHOD_NOT_ALLOWED)
            .into_response();
    }

    match err.downcast::<WebError>() {
        Ok(web_error) => {
            if let (Some(session), Some(message)) = (session, web_error.flash_message()) {
                set_flash(session, message);
            }
            match web_error.redirect_to() {
                Some(location) => see_other(location),
                None => {
                    let failed_path = logged_in.then_some(path);
                    views::errors::application_error(failed_path)
                        .with_status(StatusCode::INTERNAL_SERVER_ERROR)
                        .into_response()
                }
            }
        }
        Err(other) => {
            tracing::warn!("Rejected request on {}: {}", path, other);
            if !logged_in {
                return see_other("/");
            }
            views::errors::application_error(Some(path))
                .with_status(other.status())
                .into_response()
        }
    }
}
