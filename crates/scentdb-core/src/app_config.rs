use std::net::SocketAddr;
use std::path::PathBuf;

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
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub store_path: PathBuf,
    pub seed_config_path: Option<PathBuf>,
    pub fragella_api_key: Option<String>,
    pub fragella_base_url: String,
    pub fragella_request_timeout_secs: u64,
    pub fragella_max_requests: u32,
}

impl AppConfig {
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.env == Environment::Production
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("store_path", &self.store_path)
            .field("seed_config_path", &self.seed_config_path)
            .field(
                "fragella_api_key",
                &self.fragella_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("fragella_base_url", &self.fragella_base_url)
            .field(
                "fragella_request_timeout_secs",
                &self.fragella_request_timeout_secs,
            )
            .field("fragella_max_requests", &self.fragella_max_requests)
            .finish()
    }
}
