use std::path::PathBuf;

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

/// Settings for commands that only touch the stored session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalConfig {
    pub log_level: String,
    pub storage_path: PathBuf,
    pub sign_in_path: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub env: Environment,
    pub log_level: String,
    pub storage_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub sign_in_path: String,
    pub expiry_redirect_delay_ms: u64,
    pub resync_grace_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("api_base_url", &self.api_base_url)
            .field("log_level", &self.log_level)
            .field("storage_path", &self.storage_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("sign_in_path", &self.sign_in_path)
            .field("expiry_redirect_delay_ms", &self.expiry_redirect_delay_ms)
            .field("resync_grace_ms", &self.resync_grace_ms)
            .finish()
    }
}

impl AppConfig {
    #[must_use]
    pub fn local(&self) -> LocalConfig {
        LocalConfig {
            log_level: self.log_level.clone(),
            storage_path: self.storage_path.clone(),
            sign_in_path: self.sign_in_path.clone(),
        }
    }
}
