//! Configuration handling for the bot process.
//!
//! Everything is read once from the environment at startup and then passed
//! around as immutable values. The bot token is the only required setting;
//! everything else falls back to defaults that match production behaviour.

pub mod policy;

pub use policy::LinkPolicy;

use std::env;
use std::fmt::{Debug, Formatter};
use std::time::Duration;
use thiserror::Error;

/// Environment variable names. Public so tests and deployment tooling can
/// refer to them.
pub const ENV_BOT_TOKEN: &str = "BOT_TOKEN";
pub const ENV_TELEGRAM_API_URL: &str = "TELEGRAM_API_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
pub const ENV_HTTP_USER_AGENT: &str = "HTTP_USER_AGENT";
pub const ENV_WORKER_CONCURRENCY: &str = "WORKER_CONCURRENCY";

const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 3;
const DEFAULT_WORKER_CONCURRENCY: usize = 4;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Process runtime configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    bot_token: String,
    telegram_api_url: String,
    http_timeout: Duration,
    user_agent: String,
    worker_concurrency: usize,
}

impl Config {
    /// Create a config with the given token and default settings.
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            worker_concurrency: DEFAULT_WORKER_CONCURRENCY,
        }
    }

    /// Load from environment variables.
    ///
    /// `BOT_TOKEN` must be present and non-empty. There is deliberately no
    /// baked-in fallback token.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = env::var(ENV_BOT_TOKEN)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing(ENV_BOT_TOKEN))?;

        let mut config = Self::new(bot_token);

        if let Ok(url) = env::var(ENV_TELEGRAM_API_URL) {
            config.telegram_api_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(user_agent) = env::var(ENV_HTTP_USER_AGENT) {
            config.user_agent = user_agent;
        }
        if let Some(secs) = parse_var::<u64>(ENV_HTTP_TIMEOUT_SECS)? {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    field: ENV_HTTP_TIMEOUT_SECS,
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.http_timeout = Duration::from_secs(secs);
        }
        if let Some(concurrency) = parse_var::<usize>(ENV_WORKER_CONCURRENCY)? {
            if concurrency == 0 {
                return Err(ConfigError::InvalidValue {
                    field: ENV_WORKER_CONCURRENCY,
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.worker_concurrency = concurrency;
        }

        Ok(config)
    }

    pub fn with_telegram_api_url(mut self, url: impl Into<String>) -> Self {
        self.telegram_api_url = url.into();
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_worker_concurrency(mut self, concurrency: usize) -> Self {
        self.worker_concurrency = concurrency.max(1);
        self
    }

    /// Telegram bot token.
    pub fn bot_token(&self) -> &str {
        &self.bot_token
    }
    /// Base URL of the Telegram Bot API (no trailing slash).
    pub fn telegram_api_url(&self) -> &str {
        &self.telegram_api_url
    }
    /// Per-request timeout for outbound page and redirect requests.
    pub fn http_timeout(&self) -> Duration {
        self.http_timeout
    }
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
    /// Number of inbound messages processed concurrently.
    pub fn worker_concurrency(&self) -> usize {
        self.worker_concurrency
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("telegram_api_url", &self.telegram_api_url)
            .field("http_timeout", &self.http_timeout)
            .field("user_agent", &self.user_agent)
            .field("worker_concurrency", &self.worker_concurrency)
            .finish()
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                field: name,
                reason: format!("not a valid number: {raw:?}"),
            }),
        Err(_) => Ok(None),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Ensure environment-variable manipulating tests run serially.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            ENV_BOT_TOKEN,
            ENV_TELEGRAM_API_URL,
            ENV_HTTP_TIMEOUT_SECS,
            ENV_HTTP_USER_AGENT,
            ENV_WORKER_CONCURRENCY,
        ] {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn missing_token_is_an_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_BOT_TOKEN)));
    }

    #[test]
    fn blank_token_is_an_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_BOT_TOKEN, "   ");
        }
        assert!(Config::from_env().is_err());
    }

    #[test]
    fn defaults_when_only_token_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_BOT_TOKEN, "123:abc");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.bot_token(), "123:abc");
        assert_eq!(cfg.telegram_api_url(), DEFAULT_TELEGRAM_API_URL);
        assert_eq!(cfg.http_timeout(), Duration::from_secs(3));
        assert_eq!(cfg.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(cfg.worker_concurrency(), 4);
    }

    #[test]
    fn overrides_when_env_present() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_BOT_TOKEN, "123:abc");
            env::set_var(ENV_TELEGRAM_API_URL, "http://localhost:8081/");
            env::set_var(ENV_HTTP_TIMEOUT_SECS, "7");
            env::set_var(ENV_HTTP_USER_AGENT, "dealbot-test");
            env::set_var(ENV_WORKER_CONCURRENCY, "16");
        }
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.telegram_api_url(), "http://localhost:8081");
        assert_eq!(cfg.http_timeout(), Duration::from_secs(7));
        assert_eq!(cfg.user_agent(), "dealbot-test");
        assert_eq!(cfg.worker_concurrency(), 16);
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_BOT_TOKEN, "123:abc");
            env::set_var(ENV_HTTP_TIMEOUT_SECS, "soon");
        }
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: ENV_HTTP_TIMEOUT_SECS,
                ..
            }
        ));
    }

    #[test]
    fn rejects_zero_concurrency() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe {
            env::set_var(ENV_BOT_TOKEN, "123:abc");
            env::set_var(ENV_WORKER_CONCURRENCY, "0");
        }
        assert!(Config::from_env().is_err());
    }

    #[test]
    fn debug_output_redacts_token() {
        let cfg = Config::new("123:super-secret");
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
