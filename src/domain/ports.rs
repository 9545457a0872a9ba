use crate::domain::model::ArchiveEntry;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 報告輸出位置，回傳實際寫入的路徑
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Timestamped URL lookup against an archive index.
#[async_trait]
pub trait ArchiveIndex: Send + Sync {
    async fn fetch(&self, pattern: &str) -> Result<Vec<ArchiveEntry>>;
}
