//! Client configuration

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// OAuth2 password-grant credentials for the token endpoint.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Static suffix appended to the password before transmission.
    /// The platform rejects password grants without it; leave empty to
    /// send the password untouched.
    pub security_token: String,
}

/// Client configuration for connecting to the CRM platform.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Platform base URL (e.g. "https://crm.example.com")
    pub base_url: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Log method, URL and body for every gateway request
    pub enable_logging: bool,

    /// Token endpoint credentials
    pub auth: AuthConfig,

    /// Entity type used for ticket CRUD
    pub case_entity: String,

    /// Tenant-specific entityType discriminator sent in create bodies
    pub create_entity_type: Option<String>,
}

impl ClientConfig {
    /// Create a new configuration with defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            enable_logging: true,
            auth: AuthConfig::default(),
            case_entity: crate::gateway::entity::SERVICE_CASE.to_string(),
            create_entity_type: None,
        }
    }

    /// Set the per-request timeout in milliseconds
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Enable or disable request logging
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Set the token endpoint credentials
    pub fn with_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.auth.client_id = client_id.into();
        self.auth.client_secret = client_secret.into();
        self
    }

    /// Set the password security-token suffix
    pub fn with_security_token(mut self, token: impl Into<String>) -> Self {
        self.auth.security_token = token.into();
        self
    }

    /// Set the entity type used for ticket CRUD
    pub fn with_case_entity(mut self, entity: impl Into<String>) -> Self {
        self.case_entity = entity.into();
        self
    }

    /// Set the create-body entityType discriminator
    pub fn with_create_entity_type(mut self, id: impl Into<String>) -> Self {
        self.create_entity_type = Some(id.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_ms, 10_000);
        assert!(config.enable_logging);
        assert_eq!(config.case_entity, "serviceCase");
        assert!(config.create_entity_type.is_none());
        assert!(config.auth.security_token.is_empty());
    }

    #[test]
    fn builder_methods() {
        let config = ClientConfig::new("https://crm.example.com")
            .with_timeout_ms(500)
            .with_logging(false)
            .with_credentials("cid", "csecret")
            .with_security_token("sfx")
            .with_create_entity_type("1042489262408070");
        assert_eq!(config.timeout_ms, 500);
        assert!(!config.enable_logging);
        assert_eq!(config.auth.client_id, "cid");
        assert_eq!(config.auth.security_token, "sfx");
        assert_eq!(
            config.create_entity_type.as_deref(),
            Some("1042489262408070")
        );
    }
}
