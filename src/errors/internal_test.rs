#[cfg(test)]
mod tests {
    use crate::errors::internal::{
        InternalError, LoginError, ScopeError, TicketError, ValidationError,
    };
    use crate::types::internal::RecordKind;
    use sea_orm::DbErr;

    #[test]
    fn test_database_error_includes_operation() {
        let db_err = DbErr::RecordNotFound("test record".to_string());
        let error = InternalError::database("create_asset", db_err);

        let error_string = error.to_string();
        assert!(error_string.contains("create_asset"));
        assert!(error_string.contains("Database error"));
    }

    #[test]
    fn test_transaction_errors_name_the_phase() {
        let begin = InternalError::transaction_begin(DbErr::Custom("locked".to_string()));
        assert!(begin.to_string().contains("Starting transaction"));

        let commit = InternalError::transaction_commit(DbErr::Custom("locked".to_string()));
        assert!(commit.to_string().contains("Committing transaction"));
    }

    #[test]
    fn test_crypto_error_includes_operation() {
        let error = InternalError::crypto("argon2_init", "invalid secret length");

        let error_string = error.to_string();
        assert!(error_string.contains("argon2_init"));
        assert!(error_string.contains("invalid secret length"));
        assert!(error_string.contains("Crypto error"));
    }

    #[test]
    fn test_not_found_names_kind_and_id() {
        let error = InternalError::not_found(RecordKind::Asset, 17);
        assert_eq!(error.to_string(), "Asset 17 not found");
    }

    #[test]
    fn test_login_errors_convert() {
        let error: InternalError = LoginError::UsernameNotFound {
            username: "ghost".to_string(),
        }
        .into();
        assert!(matches!(
            error,
            InternalError::Login(LoginError::UsernameNotFound { .. })
        ));
        assert_eq!(LoginError::IncorrectPassword.to_string(), "Password incorrect");
    }

    #[test]
    fn test_domain_errors_are_transparent() {
        let error: InternalError = ValidationError::missing("hostname").into();
        assert_eq!(error.to_string(), "hostname is required");

        let error: InternalError = TicketError::Closed { ticket_id: 3 }.into();
        assert_eq!(error.to_string(), "Ticket 3 is closed");

        let error: InternalError = ScopeError::AdminOnly {
            operation: "delete user",
        }
        .into();
        assert_eq!(error.to_string(), "delete user requires admin access");
    }

    #[test]
    fn test_unknown_reference_message() {
        let error = ValidationError::unknown("device_type_id", "device type");
        assert_eq!(
            error.to_string(),
            "device_type_id does not match any existing device type"
        );
    }
}
