use crate::core::catalog::build_patterns;
use crate::domain::model::{ProviderFilter, WaybackResult};
use crate::domain::ports::ArchiveIndex;
use crate::utils::error::Result;
use crate::utils::validation::validate_domain;
use std::time::Duration;

/// 單一網域的查詢統計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuntStats {
    pub patterns: usize,
    pub failures: usize,
    pub results: usize,
}

pub struct HuntEngine<A: ArchiveIndex> {
    index: A,
    delay: Duration,
}

impl<A: ArchiveIndex> HuntEngine<A> {
    pub fn new(index: A, delay: Duration) -> Self {
        Self { index, delay }
    }

    pub async fn run(&self, domain: &str, providers: &ProviderFilter) -> Result<Vec<WaybackResult>> {
        self.run_with_stats(domain, providers)
            .await
            .map(|(results, _)| results)
    }

    /// Queries every pattern of `domain` one after another. A failed lookup is
    /// logged and contributes nothing; the delay is applied after every pattern.
    pub async fn run_with_stats(
        &self,
        domain: &str,
        providers: &ProviderFilter,
    ) -> Result<(Vec<WaybackResult>, HuntStats)> {
        let domain = domain.trim();
        validate_domain(domain)?;

        let patterns = build_patterns(domain, providers);
        let total = patterns.len();
        let mut stats = HuntStats {
            patterns: total,
            ..HuntStats::default()
        };
        let mut results = Vec::new();

        for (i, p) in patterns.iter().enumerate() {
            tracing::info!("[{}/{}] {}", i + 1, total, p.service);

            match self.index.fetch(&p.pattern).await {
                Ok(entries) => {
                    results.extend(entries.into_iter().map(|e| WaybackResult {
                        service: p.service.clone(),
                        url: e.url,
                        date: e.timestamp,
                    }));
                }
                Err(e) => {
                    stats.failures += 1;
                    tracing::warn!(
                        "Wayback error for service {} (pattern {})",
                        p.service,
                        p.pattern
                    );
                    tracing::debug!("{}", e);
                }
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        stats.results = results.len();
        tracing::info!(
            "✅ {}: {} patterns queried, {} failed, {} archived URLs",
            domain,
            stats.patterns,
            stats.failures,
            stats.results
        );

        Ok((results, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ArchiveEntry;
    use crate::utils::error::WaybackError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// 依樣式回傳預先準備的資料，並記錄查詢順序
    struct FakeIndex {
        responses: HashMap<String, Vec<ArchiveEntry>>,
        failing: Vec<String>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeIndex {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
                failing: Vec::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with(mut self, pattern: &str, entries: &[(&str, &str)]) -> Self {
            self.responses.insert(
                pattern.to_string(),
                entries
                    .iter()
                    .map(|(ts, url)| ArchiveEntry {
                        timestamp: ts.to_string(),
                        url: url.to_string(),
                    })
                    .collect(),
            );
            self
        }

        fn failing(mut self, pattern: &str) -> Self {
            self.failing.push(pattern.to_string());
            self
        }
    }

    #[async_trait]
    impl ArchiveIndex for FakeIndex {
        async fn fetch(&self, pattern: &str) -> Result<Vec<ArchiveEntry>> {
            self.calls.lock().unwrap().push(pattern.to_string());
            if self.failing.iter().any(|p| p == pattern) {
                return Err(WaybackError::fetch(pattern, "connection reset"));
            }
            Ok(self.responses.get(pattern).cloned().unwrap_or_default())
        }
    }

    #[tokio::test]
    async fn test_empty_domain_is_rejected() {
        let engine = HuntEngine::new(FakeIndex::new(), Duration::ZERO);
        let err = engine.run("   ", &ProviderFilter::all()).await.unwrap_err();
        assert!(matches!(err, WaybackError::ValidationError { .. }));
        assert!(engine.index.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_domain_that_breaks_pattern_is_rejected() {
        let engine = HuntEngine::new(FakeIndex::new(), Duration::ZERO);
        for domain in ["example.com/admin", "exa mple.com", "*.example.com"] {
            let err = engine.run(domain, &ProviderFilter::all()).await.unwrap_err();
            assert!(matches!(err, WaybackError::ValidationError { .. }), "{}", domain);
        }
        assert!(engine.index.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_results_are_tagged_with_service() {
        let index = FakeIndex::new().with(
            "https://github.com/*example.com*/*",
            &[
                ("20210615120000", "https://github.com/acme/example.com"),
                ("20200101000000", "https://github.com/acme/example.com-docs"),
            ],
        );
        let engine = HuntEngine::new(index, Duration::ZERO);

        let (results, stats) = engine
            .run_with_stats(" example.com ", &ProviderFilter::parse("github"))
            .await
            .unwrap();

        assert_eq!(stats, HuntStats { patterns: 2, failures: 0, results: 2 });
        assert_eq!(results[0].service, "github_repos");
        assert_eq!(results[0].date, "20210615120000");
        assert_eq!(results[1].url, "https://github.com/acme/example.com-docs");
        assert_eq!(
            *engine.index.calls.lock().unwrap(),
            vec![
                "https://github.com/*example.com*/*".to_string(),
                "https://raw.githubusercontent.com/*example.com*/*".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_does_not_abort_the_loop() {
        let index = FakeIndex::new()
            .failing("https://github.com/*example.com*/*")
            .with(
                "https://raw.githubusercontent.com/*example.com*/*",
                &[("20220101000000", "https://raw.githubusercontent.com/acme/example.com/main/.env")],
            );
        let engine = HuntEngine::new(index, Duration::ZERO);

        let (results, stats) = engine
            .run_with_stats("example.com", &ProviderFilter::parse("github"))
            .await
            .unwrap();

        assert_eq!(stats.failures, 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].service, "github_raw");
        assert_eq!(engine.index.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_provider_runs_no_queries() {
        let engine = HuntEngine::new(FakeIndex::new(), Duration::ZERO);
        let results = engine
            .run("example.com", &ProviderFilter::parse("myspace"))
            .await
            .unwrap();
        assert!(results.is_empty());
        assert!(engine.index.calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_follows_every_pattern() {
        let engine = HuntEngine::new(FakeIndex::new(), Duration::from_millis(1200));
        let started = tokio::time::Instant::now();

        engine
            .run("example.com", &ProviderFilter::parse("s3,zoom"))
            .await
            .unwrap();

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(3 * 1200), "{:?}", elapsed);
        assert!(elapsed < Duration::from_millis(4 * 1200), "{:?}", elapsed);
    }
}
