pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{LocalStorage, WaybackClient};
pub use app::{Session, SessionSummary};
pub use config::{RunConfig, Target};
pub use crate::core::{catalog::build_patterns, engine::HuntEngine};
pub use domain::model::{ArchiveEntry, ProviderFilter, ServicePattern, WaybackResult};
pub use utils::error::{Result, WaybackError};
