use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{EntryCard, Query};

/// What the collector needs from a map search page.
///
/// Implementations own all knowledge of the page structure.
#[async_trait]
pub trait SearchSurface: Send + Sync {
    /// Opens the results for `query`. `Ok(false)` means the result feed did
    /// not show up in time.
    async fn navigate(&self, query: &Query) -> Result<bool>;

    async fn scroll_step(&self) -> Result<()>;

    async fn entry_count(&self) -> Result<usize>;

    /// Reads every rendered card in order. A failure reading one card is
    /// reported in its own slot.
    async fn extract_entries(&self) -> Result<Vec<Result<EntryCard>>>;
}
