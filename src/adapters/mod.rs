// Adapters layer: concrete implementations for external systems (archive index over HTTP, report storage).

pub mod storage;
pub mod wayback;

pub use storage::LocalStorage;
pub use wayback::WaybackClient;
