pub mod catalog;
pub mod engine;
pub mod report;

pub use crate::domain::model::{ArchiveEntry, ProviderFilter, ServicePattern, WaybackResult};
pub use crate::domain::ports::{ArchiveIndex, Storage};
pub use crate::utils::error::Result;
