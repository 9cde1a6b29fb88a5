use std::net::IpAddr;

use poem::Request;

use crate::errors::internal::ScopeError;
use crate::types::internal::{AccessScope, AuthLevel, SessionIdentity};

use super::{request_id::RequestId, request_source::RequestSource};

/// Request context that flows through all layers
///
/// Built once per request by the session gate and passed down to
/// coordinators. Carries the session identity, so no layer below the gate
/// reads the session itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Logged-in identity, None for anonymous requests
    pub identity: Option<SessionIdentity>,

    /// Source of the request (Web, CLI, or System)
    pub source: RequestSource,

    /// Actor who initiated the operation
    pub actor_id: String,
}

impl RequestContext {
    /// Anonymous web request
    pub fn new() -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::generate(),
            identity: None,
            source: RequestSource::Web,
            actor_id: "anonymous".to_owned(),
        }
    }

    /// Create a RequestContext for CLI operations
    pub fn for_cli(command_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::generate(),
            identity: None,
            source: RequestSource::CLI,
            actor_id: format!("cli:{}", command_name),
        }
    }

    /// Create a RequestContext for system operations
    pub fn for_system(operation_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::generate(),
            identity: None,
            source: RequestSource::System,
            actor_id: format!("system:{}", operation_name),
        }
    }

    /// Web context for `req`, anonymous until `with_identity` is applied
    pub fn from_request(req: &Request) -> Self {
        let ctx = Self::new();
        match Self::extract_ip_address(req) {
            Some(ip) => ctx.with_ip_address(ip),
            None => ctx,
        }
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.parse().ok();
        }

        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }

    /// Set the ip_address
    pub fn with_ip_address(mut self, ip_address: IpAddr) -> Self {
        self.ip_address = Some(ip_address);
        self
    }

    /// Attach the session identity; the actor becomes `user:{id}`
    pub fn with_identity(mut self, identity: SessionIdentity) -> Self {
        self.actor_id = format!("user:{}", identity.user_id);
        self.identity = Some(identity);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// The logged-in identity or `ScopeError::Anonymous`
    pub fn identity(&self, operation: &'static str) -> Result<&SessionIdentity, ScopeError> {
        self.identity
            .as_ref()
            .ok_or(ScopeError::Anonymous { operation })
    }

    /// Identity of a level 1 or 2 session
    pub fn require_staff(&self, operation: &'static str) -> Result<&SessionIdentity, ScopeError> {
        let identity = self.identity(operation)?;
        if identity.is_staff() {
            Ok(identity)
        } else {
            Err(ScopeError::StaffOnly { operation })
        }
    }

    /// Identity of a level 1 session
    pub fn require_admin(&self, operation: &'static str) -> Result<&SessionIdentity, ScopeError> {
        let identity = self.identity(operation)?;
        if identity.auth_level == AuthLevel::Admin {
            Ok(identity)
        } else {
            Err(ScopeError::AdminOnly { operation })
        }
    }

    /// Row scope of this request. Anonymous requests see nothing.
    pub fn scope(&self) -> AccessScope {
        self.identity
            .as_ref()
            .map(SessionIdentity::scope)
            .unwrap_or(AccessScope::Nothing)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
