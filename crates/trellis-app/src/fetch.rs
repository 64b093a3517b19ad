//! Cached fetcher over the branch/content API.
//!
//! Wraps [`ApiClient`] with TTL caches so hover tooltips and panel loads
//! don't re-fetch the same records. Failures are reduced to short messages
//! here; the UI layers never see an error type, only degraded content.

use std::sync::Arc;
use std::time::Duration;

use smol_str::SmolStr;
use trellis_api::{ApiClient, BranchRecord, NoteDocument};

use crate::cache;

#[derive(Clone)]
pub struct CachedFetcher {
    pub client: Arc<ApiClient>,
    branch_cache: cache::Cache<SmolStr, Arc<BranchRecord>>,
    document_cache: cache::Cache<(SmolStr, SmolStr), Arc<NoteDocument>>,
}

impl CachedFetcher {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Arc::new(client),
            branch_cache: cache::new_cache(100, Duration::from_secs(600)),
            document_cache: cache::new_cache(100, Duration::from_secs(600)),
        }
    }

    /// Branch metadata by note id.
    pub async fn get_branch(&self, note_id: &str) -> Result<Arc<BranchRecord>, SmolStr> {
        let key = SmolStr::new(note_id);
        if let Some(branch) = cache::get(&self.branch_cache, &key) {
            return Ok(branch);
        }
        match self.client.get_branch(note_id).await {
            Ok(record) => {
                let stored = Arc::new(record);
                cache::insert(&self.branch_cache, key, stored.clone());
                Ok(stored)
            }
            Err(err) => {
                tracing::warn!(note_id, %err, "branch fetch failed");
                Err(SmolStr::new(err.to_string()))
            }
        }
    }

    /// Document content by note id + panel id.
    pub async fn get_document(
        &self,
        note_id: &str,
        panel_id: &str,
    ) -> Result<Arc<NoteDocument>, SmolStr> {
        let key = (SmolStr::new(note_id), SmolStr::new(panel_id));
        if let Some(document) = cache::get(&self.document_cache, &key) {
            return Ok(document);
        }
        match self.client.get_document(note_id, panel_id).await {
            Ok(document) => {
                let stored = Arc::new(document);
                cache::insert(&self.document_cache, key, stored.clone());
                Ok(stored)
            }
            Err(err) => {
                tracing::warn!(note_id, panel_id, %err, "document fetch failed");
                Err(SmolStr::new(err.to_string()))
            }
        }
    }

    /// Tooltip body for a branch: the record's content flattened to text,
    /// falling back to its title.
    pub async fn branch_content(&self, branch_id: &str) -> Result<String, SmolStr> {
        let record = self.get_branch(branch_id).await?;
        let text = record.text();
        if text.is_empty() {
            Ok(record.title.to_string())
        } else {
            Ok(text)
        }
    }
}
