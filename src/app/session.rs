use crate::core::engine::HuntEngine;
use crate::core::report::{render_html, render_text, report_filename};
use crate::domain::model::{ProviderFilter, WaybackResult};
use crate::domain::ports::{ArchiveIndex, Storage};
use crate::utils::error::Result;
use chrono::{Local, SecondsFormat};
use std::io::Write;

/// 整個執行過程的摘要
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub domains_processed: usize,
    pub domains_failed: usize,
    pub results: usize,
    pub reports_written: Vec<String>,
}

/// Drives the hunt for one or many domains. Console text goes to the writer
/// passed in; HTML reports go to the storage sink when enabled.
pub struct Session<A: ArchiveIndex, S: Storage> {
    engine: HuntEngine<A>,
    storage: S,
    providers: ProviderFilter,
    report: bool,
}

impl<A: ArchiveIndex, S: Storage> Session<A, S> {
    pub fn new(engine: HuntEngine<A>, storage: S, providers: ProviderFilter, report: bool) -> Self {
        Self {
            engine,
            storage,
            providers,
            report,
        }
    }

    /// 單一網域模式：網域無效時直接回傳錯誤
    pub async fn run_domain<W: Write>(
        &self,
        domain: &str,
        out: &mut W,
        summary: &mut SessionSummary,
    ) -> Result<Vec<WaybackResult>> {
        let results = self.engine.run(domain, &self.providers).await?;
        summary.domains_processed += 1;
        summary.results += results.len();

        out.write_all(render_text(domain, &results).as_bytes())?;
        out.flush()?;

        if self.report {
            // 報告寫入失敗不影響主控台輸出
            match self.write_report(domain, &results).await {
                Ok(path) => {
                    tracing::info!("📁 HTML report written: {}", path);
                    summary.reports_written.push(path);
                }
                Err(e) => {
                    tracing::error!("❌ Failed to write HTML report for {}: {}", domain, e);
                }
            }
        }

        Ok(results)
    }

    /// 清單模式：每個網域獨立處理，單一網域失敗只記錄不中止
    pub async fn run_domains<W: Write>(&self, domains: &[String], out: &mut W) -> SessionSummary {
        let mut summary = SessionSummary::default();

        for domain in domains {
            match self.run_domain(domain, out, &mut summary).await {
                Ok(_) => {
                    if let Err(e) = writeln!(out) {
                        tracing::warn!("Console write failed: {}", e);
                    }
                }
                Err(e) => {
                    summary.domains_failed += 1;
                    tracing::error!("❌ Error for domain {}: {}", domain, e);
                }
            }
        }

        summary
    }

    async fn write_report(&self, domain: &str, results: &[WaybackResult]) -> Result<String> {
        let now = Local::now();
        let filename = report_filename(domain, &now.format("%Y%m%d-%H%M%S").to_string());
        let html = render_html(
            domain,
            results,
            &now.to_rfc3339_opts(SecondsFormat::Secs, false),
        );
        self.storage.write_file(&filename, html.as_bytes()).await
    }
}
