//! Probe configuration
//!
//! Every setting has a built-in default matching the local development
//! backend. Profiles and environment variables can override any of them.

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Base URL of the local Cosmivity backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

/// Path prefix shared by every API route
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Placeholder bearer token; never verifies against Firebase
pub const DEFAULT_MOCK_TOKEN: &str = "mock-firebase-jwt-token";

/// Origin sent with the CORS preflight
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Where the Target Service lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Scheme, host and port, without a trailing path
    pub base_url: String,
    /// Prefix prepended to every probe path
    pub api_prefix: String,
    /// Value of the `Origin` header in the CORS preflight
    pub origin: String,
    /// Route probes through HTTP(S)_PROXY from the environment
    pub use_system_proxy: bool,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            use_system_proxy: false,
        }
    }
}

/// Per-call timeouts, in seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Default for comprehensive probes
    pub comprehensive_secs: u64,
    /// Each call of the rate-limit burst
    pub rate_limit_secs: u64,
    /// Default for quick probes
    pub quick_secs: u64,
    /// Quick probes that hit Firebase-backed endpoints
    pub quick_slow_secs: u64,
}

impl TimeoutConfig {
    pub fn comprehensive(&self) -> Duration {
        Duration::from_secs(self.comprehensive_secs)
    }

    pub fn rate_limit(&self) -> Duration {
        Duration::from_secs(self.rate_limit_secs)
    }

    pub fn quick(&self) -> Duration {
        Duration::from_secs(self.quick_secs)
    }

    pub fn quick_slow(&self) -> Duration {
        Duration::from_secs(self.quick_slow_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            comprehensive_secs: 10,
            rate_limit_secs: 5,
            quick_secs: 5,
            quick_slow_secs: 15,
        }
    }
}

/// Mock credential handling for auth-gated probes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub mock_token: String,
    /// Attach `Authorization: Bearer <mock_token>` to auth-gated probes
    pub send_mock_token: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mock_token: DEFAULT_MOCK_TOKEN.to_string(),
            send_mock_token: false,
        }
    }
}

/// Shape of the rate-limit burst
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Number of sequential health requests
    pub burst: u32,
    /// Pause after each request
    pub pacing_ms: u64,
}

impl RateLimitConfig {
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            burst: 5,
            pacing_ms: 100,
        }
    }
}

/// Complete probe configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// The active profile (default, ci, etc.)
    pub profile: String,
    pub target: TargetConfig,
    pub timeouts: TimeoutConfig,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitConfig,
}

impl ProbeConfig {
    /// Loads configuration for the given profile
    ///
    /// Sources, lowest precedence first:
    /// 1. built-in defaults
    /// 2. config/default.toml
    /// 3. config/{profile}.toml
    /// 4. Environment variables with prefix PROBE_ (e.g. PROBE_TARGET__BASE_URL)
    ///
    /// Config files are searched for next to the executable, then in ./config.
    /// All of them are optional.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let config_dir = Self::find_config_dir().unwrap_or_else(|| PathBuf::from("config"));

        let defaults = config_dir.join("default");
        let profile_file = config_dir.join(profile);

        let config = Config::builder()
            .add_source(File::from(defaults.as_path()).required(false))
            .add_source(File::from(profile_file.as_path()).required(false))
            // Use __ as separator for nested fields (e.g. PROBE_TIMEOUTS__QUICK_SECS)
            .add_source(
                Environment::with_prefix("PROBE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("profile", profile)?
            .build()?;

        config.try_deserialize()
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Builds the configuration for a target at `base_url`, keeping every
    /// other default
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.target.base_url = base_url.into();
        config
    }

    /// Full URL for an API path such as `/health`
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.target.base_url.trim_end_matches('/'),
            self.target.api_prefix,
            path
        )
    }
}
