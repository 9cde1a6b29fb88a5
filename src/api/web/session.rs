use poem::session::Session;

use crate::types::internal::SessionIdentity;

/// Session key holding the serialized `SessionIdentity`
pub const IDENTITY_KEY: &str = "identity";

/// Session key holding a one-shot message for the next page
pub const FLASH_KEY: &str = "flash";

/// The logged-in identity, or None for an anonymous session.
///
/// An entry that no longer deserializes is treated as logged out.
pub fn current_identity(session: &Session) -> Option<SessionIdentity> {
    session.get::<SessionIdentity>(IDENTITY_KEY)
}

/// Start an authenticated session.
///
/// The session id is renewed first so a pre-login id cannot be reused.
pub fn establish(session: &Session, identity: &SessionIdentity) {
    session.renew();
    session.set(IDENTITY_KEY, identity);
    tracing::debug!("Session established for user {}", identity.user_id);
}

/// Drop every value and the cookie. Safe on a session that never logged in.
pub fn terminate(session: &Session) {
    session.purge();
}

pub fn set_flash(session: &Session, message: &str) {
    session.set(FLASH_KEY, message);
}

/// Read and clear the flash message
pub fn take_flash(session: &Session) -> Option<String> {
    let message = session.get::<String>(FLASH_KEY);
    if message.is_some() {
        session.remove(FLASH_KEY);
    }
    message
}
