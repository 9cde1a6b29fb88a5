use std::sync::Arc;

use crate::config::EnvironmentProvider;
use crate::config::errors::ApplicationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValueSource {
    EnvironmentVariable { name: String },
    Default,
    /// Optional setting with no value anywhere
    Unset,
}

#[derive(Debug, Clone)]
pub struct ConfigValue {
    pub value: String,
    pub source: ConfigValueSource,
}

impl ConfigValue {
    /// The value, or None for an unset optional setting
    pub fn into_option(self) -> Option<String> {
        match self.source {
            ConfigValueSource::Unset => None,
            _ => Some(self.value),
        }
    }
}

/// One setting: environment override, then default
pub struct ConfigSpec {
    env_provider: Arc<dyn EnvironmentProvider>,
    env_override: Option<String>,
    default_value: Option<String>,
    required: bool,
    min_length: Option<usize>,
    validator: Option<fn(&str) -> Result<(), String>>,
}

impl ConfigSpec {
    pub fn new(env_provider: Arc<dyn EnvironmentProvider>) -> Self {
        Self {
            env_provider,
            env_override: None,
            default_value: None,
            required: false,
            min_length: None,
            validator: None,
        }
    }

    pub fn env_override(mut self, name: &str) -> Self {
        self.env_override = Some(name.to_string());
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn validator(mut self, f: fn(&str) -> Result<(), String>) -> Self {
        self.validator = Some(f);
        self
    }

    fn setting_name(&self) -> &str {
        self.env_override.as_deref().unwrap_or("unknown_setting")
    }

    /// Resolve the setting: environment variable first, then the default.
    ///
    /// Values from either source are validated.
    pub fn load_setting_with_source(&self) -> Result<ConfigValue, ApplicationError> {
        if let Some(env_var) = &self.env_override {
            if let Some(value) = self.env_provider.get_var(env_var) {
                self.validate_value(&value, env_var)?;
                return Ok(ConfigValue {
                    value,
                    source: ConfigValueSource::EnvironmentVariable {
                        name: env_var.clone(),
                    },
                });
            }
        }

        if let Some(default) = &self.default_value {
            self.validate_value(default, self.setting_name())?;
            return Ok(ConfigValue {
                value: default.clone(),
                source: ConfigValueSource::Default,
            });
        }

        if self.required {
            return Err(ApplicationError::InvalidSetting {
                setting_name: self.setting_name().to_string(),
                reason: "Required setting has no value from any source".to_string(),
            });
        }

        Ok(ConfigValue {
            value: String::new(),
            source: ConfigValueSource::Unset,
        })
    }

    /// Validate a setting value according to the ConfigSpec rules
    pub fn validate_value(&self, value: &str, setting_name: &str) -> Result<(), ApplicationError> {
        if let Some(min_len) = self.min_length {
            if value.len() < min_len {
                return Err(ApplicationError::InvalidSetting {
                    setting_name: setting_name.to_string(),
                    reason: format!("Value must be at least {} characters long", min_len),
                });
            }
        }

        if let Some(validator) = self.validator {
            validator(value).map_err(|reason| ApplicationError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason,
            })?;
        }

        Ok(())
    }
}

/// Type parsing utilities for configuration values
impl ConfigSpec {
    /// Parse a boolean value from string
    ///
    /// Accepts true/false, 1/0, yes/no, on/off (case-insensitive).
    pub fn parse_bool(value: &str, setting_name: &str) -> Result<bool, ApplicationError> {
        match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ApplicationError::ParseError {
                setting_name: setting_name.to_string(),
                error: format!(
                    "Expected boolean value, got '{}'. Valid values: true/false, 1/0, yes/no, on/off",
                    value
                ),
            }),
        }
    }

    pub fn parse_port(value: &str, setting_name: &str) -> Result<u16, ApplicationError> {
        let port = value
            .trim()
            .parse::<u16>()
            .map_err(|e| ApplicationError::ParseError {
                setting_name: setting_name.to_string(),
                error: format!("Expected port number (1-65535), got '{}': {}", value, e),
            })?;

        if port == 0 {
            return Err(ApplicationError::InvalidSetting {
                setting_name: setting_name.to_string(),
                reason: "Port number must be between 1 and 65535".to_string(),
            });
        }

        Ok(port)
    }

    /// Validator: host is an IPv4/IPv6 literal or a hostname without whitespace
    pub fn validate_host_address(value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err("Host address cannot be empty".to_string());
        }
        if value.parse::<std::net::IpAddr>().is_ok() {
            return Ok(());
        }

        let looks_like_ipv4 = value.split('.').count() == 4
            && value
                .split('.')
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));
        if looks_like_ipv4 {
            return Err(format!("Invalid IPv4 address: {}", value));
        }

        if value.chars().any(char::is_whitespace) {
            return Err("Host address cannot contain whitespace characters".to_string());
        }

        Ok(())
    }

    /// Validator: cookie names are non-empty HTTP tokens
    pub fn validate_cookie_name(value: &str) -> Result<(), String> {
        let valid = !value.is_empty()
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if valid {
            Ok(())
        } else {
            Err("Cookie name may only contain letters, digits, '-', '_' and '.'".to_string())
        }
    }
}
