use std::fmt;
use std::sync::Arc;

use crate::config::EnvironmentProvider;
use crate::config::config_spec::ConfigSpec;
use crate::config::errors::ApplicationError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://assetdesk.db?mode=rwc";
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "assetdesk_session";

/// Settings read once at startup
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    password_pepper: Option<String>,
    session_cookie_name: String,
    session_cookie_secure: bool,
}

impl BootstrapSettings {
    /// Load bootstrap settings through `env_provider`
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider>,
    ) -> Result<Self, ApplicationError> {
        let database_url = ConfigSpec::new(env_provider.clone())
            .env_override("DATABASE_URL")
            .default_value(DEFAULT_DATABASE_URL)
            .min_length(1)
            .load_setting_with_source()?
            .value;

        let server_host = ConfigSpec::new(env_provider.clone())
            .env_override("HOST")
            .default_value("0.0.0.0")
            .validator(ConfigSpec::validate_host_address)
            .load_setting_with_source()?
            .value;

        let port_value = ConfigSpec::new(env_provider.clone())
            .env_override("PORT")
            .default_value("3000")
            .load_setting_with_source()?
            .value;
        let server_port = ConfigSpec::parse_port(&port_value, "PORT")?;

        let password_pepper = ConfigSpec::new(env_provider.clone())
            .env_override("PASSWORD_PEPPER")
            .load_setting_with_source()?
            .into_option()
            .filter(|pepper| !pepper.is_empty());

        let session_cookie_name = ConfigSpec::new(env_provider.clone())
            .env_override("SESSION_COOKIE_NAME")
            .default_value(DEFAULT_SESSION_COOKIE_NAME)
            .validator(ConfigSpec::validate_cookie_name)
            .load_setting_with_source()?
            .value;

        let secure_value = ConfigSpec::new(env_provider)
            .env_override("SESSION_COOKIE_SECURE")
            .default_value("false")
            .load_setting_with_source()?
            .value;
        let session_cookie_secure = ConfigSpec::parse_bool(&secure_value, "SESSION_COOKIE_SECURE")?;

        Ok(Self {
            database_url,
            server_host,
            server_port,
            password_pepper,
            session_cookie_name,
            session_cookie_secure,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Argon2 secret mixed into every password hash
    pub fn password_pepper(&self) -> Option<&str> {
        self.password_pepper.as_deref()
    }

    pub fn session_cookie_name(&self) -> &str {
        &self.session_cookie_name
    }

    pub fn session_cookie_secure(&self) -> bool {
        self.session_cookie_secure
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "<redacted>"),
            )
            .field("session_cookie_name", &self.session_cookie_name)
            .field("session_cookie_secure", &self.session_cookie_secure)
            .finish()
    }
}
