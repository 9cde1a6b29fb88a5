use std::collections::HashMap;

/// Source of environment variables
///
/// Settings are read through this trait so tests can supply their own
/// values instead of mutating the process environment.
pub trait EnvironmentProvider: Send + Sync {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment (after `.env` has been loaded)
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed set of variables, for tests
#[derive(Debug, Default, Clone)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_environment_provider() {
        let provider = MockEnvironment::empty()
            .with_var("PORT", "8080")
            .with_var("HOST", "127.0.0.1");

        assert_eq!(provider.get_var("PORT"), Some("8080".to_string()));
        assert_eq!(provider.get_var("HOST"), Some("127.0.0.1".to_string()));
        assert_eq!(provider.get_var("DATABASE_URL"), None);
    }

    #[test]
    fn test_mock_environment_from_map() {
        let provider = MockEnvironment::new(HashMap::from([(
            "LOG_LEVEL".to_string(),
            "debug".to_string(),
        )]));

        assert_eq!(provider.get_var("LOG_LEVEL"), Some("debug".to_string()));
    }

    #[test]
    fn test_system_environment_reads_missing_var_as_none() {
        assert_eq!(SystemEnvironment.get_var("ASSETDESK_UNSET_VAR_98765"), None);
    }
}
