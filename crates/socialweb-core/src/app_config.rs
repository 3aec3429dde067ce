use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub public_base_url: String,
    pub base_domain: Option<String>,
    pub app_subdomain: String,
    pub instagram_app_id: Option<String>,
    pub instagram_app_secret: Option<String>,
    pub linkedin_client_id: Option<String>,
    pub linkedin_client_secret: Option<String>,
    pub openai_api_key: Option<String>,
    pub llm_base_url: String,
    pub analysis_model: String,
    pub html_model: String,
    pub html_max_tokens: u32,
    pub llm_timeout_secs: u64,
    pub image_proxy: bool,
    pub http_timeout_secs: u64,
    pub http_max_retries: u32,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl AppConfig {
    /// Redirect URI registered with Instagram for the OAuth callback.
    #[must_use]
    pub fn oauth_redirect_uri(&self) -> String {
        format!(
            "{}/api/auth/callback",
            self.public_base_url.trim_end_matches('/')
        )
    }

    /// Redirect URI registered with LinkedIn for its OAuth callback.
    #[must_use]
    pub fn linkedin_redirect_uri(&self) -> String {
        format!(
            "{}/api/auth/linkedin/callback",
            self.public_base_url.trim_end_matches('/')
        )
    }

    /// Public URL at which a stored site is reachable by slug.
    #[must_use]
    pub fn site_url(&self, slug: &str) -> String {
        format!("{}/sitio/{slug}", self.public_base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("public_base_url", &self.public_base_url)
            .field("base_domain", &self.base_domain)
            .field("app_subdomain", &self.app_subdomain)
            .field("database_url", &"[redacted]")
            .field("instagram_app_id", &self.instagram_app_id)
            .field(
                "instagram_app_secret",
                &self.instagram_app_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("linkedin_client_id", &self.linkedin_client_id)
            .field(
                "linkedin_client_secret",
                &self.linkedin_client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("llm_base_url", &self.llm_base_url)
            .field("analysis_model", &self.analysis_model)
            .field("html_model", &self.html_model)
            .field("html_max_tokens", &self.html_max_tokens)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("image_proxy", &self.image_proxy)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("http_max_retries", &self.http_max_retries)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
