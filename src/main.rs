use anyhow::Context;
use clap::Parser;
use wayback_services::config::{providers_text, read_domain_list, usage_text};
use wayback_services::utils::logger;
use wayback_services::{
    CliArgs, HuntEngine, LocalStorage, Session, SessionSummary, Target, WaybackClient,
    WaybackError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.list_providers {
        print!("{}", providers_text());
        return Ok(());
    }

    let log_json = args.log_json;
    let config = match args.into_run_config() {
        Ok(config) => config,
        Err(e) => {
            println!("{}", e.user_friendly_message());
            if matches!(e, WaybackError::UsageError { .. }) {
                println!();
                print!("{}", usage_text());
            }
            std::process::exit(e.exit_code().max(1));
        }
    };

    // 初始化日誌（一律輸出到 stderr）
    if log_json {
        logger::init_json_logger(config.debug);
    } else {
        logger::init_cli_logger(config.debug);
    }
    tracing::debug!("Run config: {:?}", config);

    // 清單模式：先讀完清單再開始查詢
    let domains = match &config.target {
        Target::Domain(domain) => vec![domain.clone()],
        Target::List(path) => match read_domain_list(path) {
            Ok(domains) => domains,
            Err(e) => {
                tracing::error!("❌ {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(e.exit_code());
            }
        },
    };

    let client = WaybackClient::new(&config.archive).context("failed to build Wayback client")?;
    let engine = HuntEngine::new(client, config.archive.delay());
    let storage = LocalStorage::new(config.report_settings.output_dir.clone());
    let session = Session::new(engine, storage, config.providers.clone(), config.report);

    tracing::info!(
        "Starting Wayback services hunt: {} domain(s), delay {:?}",
        domains.len(),
        config.archive.delay()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &config.target {
        Target::Domain(domain) => {
            let mut summary = SessionSummary::default();
            if let Err(e) = session.run_domain(domain, &mut out, &mut summary).await {
                tracing::error!("❌ Error for domain {}: {}", domain, e);
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(1);
            }
        }
        Target::List(_) => {
            let summary = session.run_domains(&domains, &mut out).await;
            tracing::info!(
                "Done: {} domain(s) processed, {} failed, {} archived URLs, {} report(s)",
                summary.domains_processed,
                summary.domains_failed,
                summary.results,
                summary.reports_written.len()
            );
        }
    }

    Ok(())
}
