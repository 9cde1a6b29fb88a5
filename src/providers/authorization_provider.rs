use crate::types::internal::{AuthLevel, SessionIdentity};

/// Outcome of checking a session against a route's allowed levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    Granted,
    /// Not logged in
    Anonymous,
    /// Logged in with a level the route does not allow
    Denied,
}

/// Check `identity` against `allowed`
pub fn authorize(identity: Option<&SessionIdentity>, allowed: &[AuthLevel]) -> Authorization {
    match identity {
        None => Authorization::Anonymous,
        Some(identity) if identity.has_level(allowed) => Authorization::Granted,
        Some(_) => Authorization::Denied,
    }
}
