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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub jd_app_key: String,
    pub jd_app_secret: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub batch_chunk_size: usize,
    pub batch_max_concurrent_chunks: usize,
    pub default_store: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("jd_app_key", &self.jd_app_key)
            .field("jd_app_secret", &"[redacted]")
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("batch_chunk_size", &self.batch_chunk_size)
            .field(
                "batch_max_concurrent_chunks",
                &self.batch_max_concurrent_chunks,
            )
            .field("default_store", &self.default_store)
            .finish()
    }
}
