use crate::utils::error::{Result, WaybackError};
use crate::utils::validation::{validate_duration, validate_endpoint, validate_output_dir, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://web.archive.org/cdx/search/cdx";
pub const DEFAULT_DELAY_MS: u64 = 1200;
const MAX_DELAY: Duration = Duration::from_secs(60);
const TIMEOUT_RANGE: (Duration, Duration) = (Duration::from_secs(1), Duration::from_secs(600));

/// 選用的 TOML 設定檔
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub archive: ArchiveSettings,
    #[serde(default)]
    pub report: ReportSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

fn default_output_dir() -> String {
    ".".to_string()
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            delay_ms: default_delay_ms(),
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl ArchiveSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl SettingsFile {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| WaybackError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| WaybackError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${WAYBACK_ENDPOINT})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static regex is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

impl Validate for SettingsFile {
    fn validate(&self) -> Result<()> {
        validate_endpoint("archive.endpoint", &self.archive.endpoint)?;
        validate_duration("archive.delay_ms", self.archive.delay(), Duration::ZERO, MAX_DELAY)?;
        if let Some(timeout) = self.archive.timeout() {
            validate_duration("archive.timeout_secs", timeout, TIMEOUT_RANGE.0, TIMEOUT_RANGE.1)?;
        }
        validate_output_dir("report.output_dir", &self.report.output_dir)?;
        Ok(())
    }
}
