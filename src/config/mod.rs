#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::catalog::PROVIDERS;
use crate::domain::model::ProviderFilter;
use crate::utils::error::{Result, WaybackError};
use crate::utils::validation::{validate_domain, Validate};
use std::path::Path;
use toml_config::{ArchiveSettings, ReportSettings};

/// 查詢目標：單一網域或網域清單檔
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Domain(String),
    List(String),
}

impl Target {
    /// Exactly one of `domain` / `list` must be given (blank counts as absent).
    pub fn from_options(domain: Option<&str>, list: Option<&str>) -> Result<Self> {
        let domain = domain.map(str::trim).filter(|s| !s.is_empty());
        let list = list.map(str::trim).filter(|s| !s.is_empty());

        match (domain, list) {
            (Some(d), None) => Ok(Target::Domain(d.to_string())),
            (None, Some(l)) => Ok(Target::List(l.to_string())),
            (Some(_), Some(_)) => Err(WaybackError::UsageError {
                message: "Use either -d or -l, not both at the same time".to_string(),
            }),
            (None, None) => Err(WaybackError::UsageError {
                message: "A domain (-d) or a domain list (-l) is required".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub target: Target,
    pub providers: ProviderFilter,
    pub debug: bool,
    pub report: bool,
    pub archive: ArchiveSettings,
    pub report_settings: ReportSettings,
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        // 清單內的網域在讀檔後才逐一檢查
        if let Target::Domain(domain) = &self.target {
            validate_domain(domain)?;
        }
        Ok(())
    }
}

/// 讀取網域清單：每行一個網域，忽略空行與 `#` 註解
pub fn read_domain_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path_display = path.as_ref().display().to_string();
    let content =
        std::fs::read_to_string(&path).map_err(|e| WaybackError::DomainListError {
            path: path_display.clone(),
            message: e.to_string(),
        })?;

    let domains = parse_domain_list(&content);
    if domains.is_empty() {
        return Err(WaybackError::DomainListError {
            path: path_display,
            message: "no valid domain found".to_string(),
        });
    }
    Ok(domains)
}

pub fn parse_domain_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn providers_text() -> String {
    let mut out = String::from("Available providers:\n");
    for p in PROVIDERS {
        out.push_str(&format!("  {:<11} {}\n", p.key, p.summary));
    }
    out
}

pub fn usage_text() -> String {
    let mut out = String::new();
    out.push_str("Usage:\n");
    out.push_str("  wayback-services -d example.com\n");
    out.push_str("  wayback-services -l list.txt\n\n");
    out.push_str("Options:\n");
    out.push_str("  --provider p1,p2,p3   Only query the listed providers (default: all)\n");
    out.push_str("  --report              Write one HTML report per domain (wayback-<domain>-<timestamp>.html)\n");
    out.push_str("  --debug               Verbose mode, shows Wayback request URLs and errors\n");
    out.push_str("  --config <FILE>       TOML settings file ([archive] / [report])\n");
    out.push_str("  --delay-ms <MS>       Pause between two Wayback requests (default: 1200)\n");
    out.push_str("  --output-dir <DIR>    Directory for HTML reports (default: .)\n\n");
    out.push_str(&providers_text());
    out
}
