#[derive(Debug, Clone, PartialEq, Eq)]
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

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Per-request timeout handed to the HTTP fetcher. This is the only
    /// thing bounding how long an adapter call can take.
    pub http_timeout_secs: u64,
    pub http_user_agent: String,
    /// Upper bound on in-flight distributor calls during a fan-out.
    pub max_concurrent_requests: usize,
    pub edeka_base_url: String,
}
