pub mod credentials;
pub mod sheet_db;

pub use credentials::*;
pub use sheet_db::*;

use async_trait::async_trait;

pub const SHEET_HEADER: [&str; 2] = ["business_name", "website"];

/// Append-only row store the scraped records end up in.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn read_all_rows(&self) -> anyhow::Result<Vec<Vec<String>>>;

    /// Makes `header` the first row, wiping the store when it differs.
    async fn ensure_header(&self, header: &[&str]) -> anyhow::Result<()>;

    async fn append_rows(&self, rows: Vec<Vec<String>>) -> anyhow::Result<()>;
}
