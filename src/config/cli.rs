use crate::config::toml_config::SettingsFile;
use crate::config::{RunConfig, Target};
use crate::domain::model::ProviderFilter;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "wayback-services")]
#[command(about = "Hunt archived cloud/SaaS service URLs tied to a domain in the Wayback Machine")]
pub struct CliArgs {
    #[arg(short = 'd', long, help = "Single domain to analyse, e.g. example.com")]
    pub domain: Option<String>,

    #[arg(short = 'l', long, help = "File with one domain per line")]
    pub list: Option<String>,

    #[arg(long, value_delimiter = ',', help = "Providers to include, e.g. google,sharepoint (default: all)")]
    pub provider: Vec<String>,

    #[arg(long, help = "Write an HTML report per domain")]
    pub report: bool,

    #[arg(long, help = "Show Wayback request URLs and error details")]
    pub debug: bool,

    #[arg(long, help = "TOML settings file")]
    pub config: Option<String>,

    #[arg(long, help = "Delay between Wayback requests in milliseconds")]
    pub delay_ms: Option<u64>,

    #[arg(long, help = "Directory for HTML reports")]
    pub output_dir: Option<String>,

    #[arg(long, help = "Print the provider catalog and exit")]
    pub list_providers: bool,

    #[arg(long, help = "Emit diagnostics as JSON lines")]
    pub log_json: bool,
}

impl CliArgs {
    pub fn target(&self) -> Result<Target> {
        Target::from_options(self.domain.as_deref(), self.list.as_deref())
    }

    /// 合併設定檔與命令列參數，命令列優先
    pub fn into_run_config(self) -> Result<RunConfig> {
        let target = self.target()?;

        let mut settings = match &self.config {
            Some(path) => SettingsFile::from_file(path)?,
            None => SettingsFile::default(),
        };
        if let Some(delay_ms) = self.delay_ms {
            settings.archive.delay_ms = delay_ms;
        }
        if let Some(output_dir) = self.output_dir {
            settings.report.output_dir = output_dir;
        }
        settings.validate()?;

        let config = RunConfig {
            target,
            providers: ProviderFilter::from_keys(&self.provider),
            debug: self.debug,
            report: self.report,
            archive: settings.archive,
            report_settings: settings.report,
        };
        config.validate()?;
        Ok(config)
    }
}
