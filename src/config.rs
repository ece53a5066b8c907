use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Public data-area salary survey CSV.
pub const DEFAULT_SOURCE_URL: &str = "https://raw.githubusercontent.com/vqrca/dashboard_salarios_dados/refs/heads/main/dados-imersao-final.csv";

/// Environment variable overriding where the dataset is read from.
pub const SOURCE_ENV: &str = "SALARY_DASHBOARD_SOURCE";

/// Environment variable holding the HTTP timeout in seconds.
pub const TIMEOUT_ENV: &str = "SALARY_DASHBOARD_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// DataSource
// ---------------------------------------------------------------------------

/// Where the salary CSV lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` values are URLs; anything else is a path.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            DataSource::Url(value.to_string())
        } else {
            DataSource::File(PathBuf::from(value))
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Url(DEFAULT_SOURCE_URL.to_string())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

/// Startup configuration, resolved once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub source: DataSource,
    /// Timeout for fetching a URL source.
    pub timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DataSource::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl DashboardConfig {
    /// Read [`SOURCE_ENV`] and [`TIMEOUT_ENV`], falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(source) = lookup(SOURCE_ENV).filter(|v| !v.trim().is_empty()) {
            config.source = DataSource::parse(&source);
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => log::warn!(
                    "Ignoring {TIMEOUT_ENV}={raw:?}; using {DEFAULT_TIMEOUT_SECS}s"
                ),
            }
        }

        config
    }
}
