use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 某個服務在 Wayback 上可能出現的 URL 樣式（已代入網域）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePattern {
    pub service: String,
    pub pattern: String,
    pub provider: String,
}

/// CDX 回應中的一列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub timestamp: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaybackResult {
    pub service: String,
    pub url: String,
    pub date: String,
}

/// Lower-cased provider keys. Empty means every provider is enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFilter {
    keys: BTreeSet<String>,
}

impl ProviderFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// 解析 `google,SharePoint, s3` 這類以逗號分隔的清單
    pub fn parse(raw: &str) -> Self {
        Self::from_keys(raw.split(','))
    }

    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = keys
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keys }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn allows(&self, provider: &str) -> bool {
        self.keys.is_empty() || self.keys.contains(&provider.to_lowercase())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}
