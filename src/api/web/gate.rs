use poem::Request;
use poem::session::Session;

use crate::errors::WebError;
use crate::providers::{Authorization, authorize};
use crate::types::internal::{AuthLevel, RequestContext};

use super::session::current_identity;

/// Access rule for a group of routes.
///
/// `denied_redirect` is where a logged-in user without the level is sent;
/// anonymous visitors always go to the login page.
#[derive(Debug, Clone, Copy)]
pub struct Gate {
    pub allowed: &'static [AuthLevel],
    pub denied_redirect: &'static str,
}

/// Home page, asset list, contact page, error escalation
pub const ANY_USER: Gate = Gate {
    allowed: AuthLevel::ANY,
    denied_redirect: "/home",
};

/// Asset detail pages
pub const ASSET_STAFF: Gate = Gate {
    allowed: AuthLevel::STAFF,
    denied_redirect: "/assets",
};

/// Ticket pages and ticket search
pub const TICKET_STAFF: Gate = Gate {
    allowed: AuthLevel::STAFF,
    denied_redirect: "/contact",
};

/// Customers and create pages
pub const STAFF: Gate = Gate {
    allowed: AuthLevel::STAFF,
    denied_redirect: "/home",
};

/// User management
pub const ADMIN: Gate = Gate {
    allowed: AuthLevel::ADMIN,
    denied_redirect: "/home",
};

impl Gate {
    /// Check the session and build the request context handlers pass on
    pub fn admit(&self, req: &Request, session: &Session) -> Result<RequestContext, WebError> {
        let identity = current_identity(session);

        match authorize(identity.as_ref(), self.allowed) {
            Authorization::Granted => {}
            Authorization::Anonymous => {
                tracing::debug!("Anonymous request to {} sent to login", req.uri().path());
                return Err(WebError::Unauthenticated);
            }
            Authorization::Denied => {
                tracing::debug!(
                    "Request to {} denied, redirecting to {}",
                    req.uri().path(),
                    self.denied_redirect
                );
                return Err(WebError::forbidden(self.denied_redirect));
            }
        }

        let ctx = RequestContext::from_request(req);
        Ok(match identity {
            Some(identity) => ctx.with_identity(identity),
            None => ctx,
        })
    }
}
