use poem::error::ResponseError;
use poem::http::{StatusCode, header};
use poem::{IntoResponse, Response};
use thiserror::Error;

use crate::errors::internal::InternalError;
use crate::views;

/// Errors returned by web handlers.
///
/// Every variant except `Internal` becomes a redirect. The `ErrorPages`
/// middleware adds the session-dependent parts (flash message, login
/// redirect for anonymous visitors, failed request path on the error page).
#[derive(Error, Debug)]
pub enum WebError {
    /// No identity in the session
    #[error("Authentication required")]
    Unauthenticated,

    /// Identity lacks the level the route requires
    #[error("Access denied, redirecting to {redirect_to}")]
    Forbidden { redirect_to: String },

    /// Missing or out-of-scope record
    #[error("Record not found, redirecting to {redirect_to}")]
    NotFound { redirect_to: String },

    /// Rejected form submission. `message` is shown to the user.
    #[error("{message}")]
    Validation { message: String, redirect_to: String },

    #[error("Internal error: {source}")]
    Internal {
        #[source]
        source: InternalError,
    },
}

impl WebError {
    pub fn forbidden(redirect_to: impl Into<String>) -> Self {
        WebError::Forbidden {
            redirect_to: redirect_to.into(),
        }
    }

    pub fn not_found(redirect_to: impl Into<String>) -> Self {
        WebError::NotFound {
            redirect_to: redirect_to.into(),
        }
    }

    pub fn validation(message: impl Into<String>, redirect_to: impl Into<String>) -> Self {
        WebError::Validation {
            message: message.into(),
            redirect_to: redirect_to.into(),
        }
    }

    /// Convert a coordinator error.
    ///
    /// `back_to` is the page the user submitted from; rejected submissions
    /// return there with the message flashed.
    pub fn from_internal(err: InternalError, back_to: &str) -> Self {
        match err {
            InternalError::NotFound { kind, id } => {
                tracing::debug!("{} {} not found or out of scope", kind, id);
                WebError::not_found(kind.list_path())
            }
            InternalError::Validation(e) => WebError::validation(e.to_string(), back_to),
            InternalError::Ticket(e) => WebError::validation(e.to_string(), back_to),
            InternalError::Login(e) => {
                tracing::debug!("Login failed: {}", e);
                WebError::validation(LOGIN_FAILED, "/")
            }
            InternalError::Scope(e) => {
                tracing::warn!("Scope check rejected request: {}", e);
                WebError::forbidden("/home")
            }
            other => {
                tracing::error!("Request failed: {}", other);
                WebError::Internal { source: other }
            }
        }
    }

    /// Redirect target, None for the error page
    pub fn redirect_to(&self) -> Option<&str> {
        match self {
            WebError::Unauthenticated => Some("/"),
            WebError::Forbidden { redirect_to }
            | WebError::NotFound { redirect_to }
            | WebError::Validation { redirect_to, .. } => Some(redirect_to),
            WebError::Internal { .. } => None,
        }
    }

    /// Message to flash into the session before redirecting
    pub fn flash_message(&self) -> Option<&str> {
        match self {
            WebError::Validation { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// The only message a failed login ever shows
pub const LOGIN_FAILED: &str = "Incorrect username/password";

impl ResponseError for WebError {
    fn status(&self) -> StatusCode {
        match self {
            WebError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::SEE_OTHER,
        }
    }

    fn as_response(&self) -> Response {
        match self.redirect_to() {
            Some(location) => see_other(location),
            None => views::errors::application_error(None)
                .with_status(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response(),
        }
    }
}

/// 303 redirect to `location`
pub fn see_other(location: &str) -> Response {
    Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header(header::LOCATION, location)
        .finish()
}
