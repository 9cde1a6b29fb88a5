use assetdesk::errors::internal::ScopeError;
use assetdesk::types::internal::context::{RequestContext, RequestSource};
use assetdesk::types::internal::{AccessScope, AuthLevel, SessionIdentity};

fn identity(auth_level: AuthLevel, customer_id: Option<i32>) -> SessionIdentity {
    SessionIdentity {
        user_id: 42,
        username: "jdoe".to_string(),
        auth_level,
        customer_id,
    }
}

#[test]
fn test_request_context_new_is_anonymous_web_request() {
    let ctx = RequestContext::new();

    assert_eq!(ctx.source, RequestSource::Web);
    assert_eq!(ctx.actor_id, "anonymous");
    assert!(!ctx.is_authenticated());
    assert_eq!(ctx.scope(), AccessScope::Nothing);
}

#[test]
fn test_request_context_for_cli() {
    let ctx = RequestContext::for_cli("create-admin");

    assert_eq!(ctx.source, RequestSource::CLI);
    assert_eq!(ctx.actor_id, "cli:create-admin");
    assert!(ctx.ip_address.is_none());
    assert!(ctx.identity.is_none());
}

#[test]
fn test_request_context_for_system() {
    let ctx = RequestContext::for_system("migrate");

    assert_eq!(ctx.source, RequestSource::System);
    assert_eq!(ctx.actor_id, "system:migrate");
    assert!(ctx.ip_address.is_none());
}

#[test]
fn test_request_context_with_ip_address() {
    let ctx = RequestContext::new().with_ip_address("192.168.1.1".parse().unwrap());

    assert_eq!(ctx.ip_address, Some("192.168.1.1".parse().unwrap()));
    assert_eq!(ctx.source, RequestSource::Web);
}

#[test]
fn test_with_identity_sets_actor_and_scope() {
    let ctx = RequestContext::new().with_identity(identity(AuthLevel::Customer, Some(5)));

    assert_eq!(ctx.actor_id, "user:42");
    assert!(ctx.is_authenticated());
    assert_eq!(ctx.scope(), AccessScope::Customer(5));
}

#[test]
fn test_require_staff() {
    let anonymous = RequestContext::new();
    assert_eq!(
        anonymous.require_staff("list assets").unwrap_err(),
        ScopeError::Anonymous {
            operation: "list assets"
        }
    );

    let customer = RequestContext::new().with_identity(identity(AuthLevel::Customer, Some(5)));
    assert_eq!(
        customer.require_staff("update asset").unwrap_err(),
        ScopeError::StaffOnly {
            operation: "update asset"
        }
    );

    let support = RequestContext::new().with_identity(identity(AuthLevel::Support, None));
    assert_eq!(support.require_staff("update asset").unwrap().user_id, 42);
}

#[test]
fn test_require_admin_rejects_support() {
    let support = RequestContext::new().with_identity(identity(AuthLevel::Support, None));
    assert_eq!(
        support.require_admin("create user").unwrap_err(),
        ScopeError::AdminOnly {
            operation: "create user"
        }
    );

    let admin = RequestContext::new().with_identity(identity(AuthLevel::Admin, None));
    assert!(admin.require_admin("create user").is_ok());
    assert_eq!(admin.scope(), AccessScope::Unrestricted);
}
