//! Branch providers: the external collaborators that persist branches.
//!
//! Two modes exist upstream of this UI: a collaborative synchronization
//! provider (`add_branch` / `get_branches`) and a plain provider
//! (`create_branch` / `save_document`). Both are external services; the
//! in-memory stores here are the seam the UI calls through, with the sync
//! bookkeeping kept synchronous so it is testable without a runtime.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use smol_str::SmolStr;
use trellis_annotations::{BranchId, BranchKind};
use trellis_api::BranchRecord;

/// Provider failures. Uniformly non-fatal: callers log and show nothing.
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("missing {0}")]
    MissingContext(&'static str),

    #[error(transparent)]
    Api(#[from] trellis_api::ApiError),
}

/// Shared branch table keyed by note id.
#[derive(Clone, Default)]
pub struct BranchStore {
    branches: Arc<Mutex<HashMap<SmolStr, Vec<BranchRecord>>>>,
    next_id: Arc<Mutex<u64>>,
}

impl BranchStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn mint_id(&self) -> BranchId {
        let mut next = self.next_id.lock().unwrap_or_else(|e| e.into_inner());
        *next += 1;
        SmolStr::new(format!("branch-{next}"))
    }

    fn push(&self, note_id: &str, record: BranchRecord) {
        self.branches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(SmolStr::new(note_id))
            .or_default()
            .push(record);
    }

    fn list(&self, note_id: &str) -> Vec<BranchRecord> {
        self.branches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(note_id)
            .cloned()
            .unwrap_or_default()
    }
}

/// Collaborative mode: branches go through the synchronization provider so
/// peers see them.
#[derive(Clone, Default)]
pub struct CollabProvider {
    store: BranchStore,
}

impl CollabProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_branch(
        &self,
        note_id: &str,
        title: &str,
        kind: BranchKind,
    ) -> Result<BranchId, ProviderError> {
        if note_id.is_empty() {
            return Err(ProviderError::MissingContext("note id"));
        }
        let id = self.store.mint_id();
        self.store.push(
            note_id,
            BranchRecord {
                id: id.clone(),
                kind: SmolStr::new(kind.as_str()),
                title: SmolStr::new(title),
                content: None,
            },
        );
        Ok(id)
    }

    pub async fn get_branches(&self, note_id: &str) -> Result<Vec<BranchRecord>, ProviderError> {
        Ok(self.store.list(note_id))
    }
}

/// Plain (non-collaborative) mode.
#[derive(Clone, Default)]
pub struct LocalProvider {
    store: BranchStore,
    documents: Arc<Mutex<HashMap<(SmolStr, SmolStr), String>>>,
}

impl LocalProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_branch(
        &self,
        note_id: &str,
        title: &str,
        kind: BranchKind,
    ) -> Result<BranchId, ProviderError> {
        if note_id.is_empty() {
            return Err(ProviderError::MissingContext("note id"));
        }
        let id = self.store.mint_id();
        self.store.push(
            note_id,
            BranchRecord {
                id: id.clone(),
                kind: SmolStr::new(kind.as_str()),
                title: SmolStr::new(title),
                content: None,
            },
        );
        Ok(id)
    }

    pub async fn save_document(
        &self,
        note_id: &str,
        panel_id: &str,
        content: &str,
    ) -> Result<(), ProviderError> {
        if panel_id.is_empty() {
            return Err(ProviderError::MissingContext("panel id"));
        }
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(
                (SmolStr::new(note_id), SmolStr::new(panel_id)),
                content.to_string(),
            );
        Ok(())
    }

    pub fn document(&self, note_id: &str, panel_id: &str) -> Option<String> {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&(SmolStr::new(note_id), SmolStr::new(panel_id)))
            .cloned()
    }
}

/// The provider the UI is wired to, chosen at startup.
#[derive(Clone)]
pub enum BranchProvider {
    Collab(CollabProvider),
    Local(LocalProvider),
}

impl BranchProvider {
    /// Create a branch record in whichever mode is active.
    pub async fn create_branch(
        &self,
        note_id: &str,
        title: &str,
        kind: BranchKind,
    ) -> Result<BranchId, ProviderError> {
        match self {
            BranchProvider::Collab(p) => p.add_branch(note_id, title, kind).await,
            BranchProvider::Local(p) => p.create_branch(note_id, title, kind).await,
        }
    }

    pub async fn branches(&self, note_id: &str) -> Result<Vec<BranchRecord>, ProviderError> {
        match self {
            BranchProvider::Collab(p) => p.get_branches(note_id).await,
            // The plain provider has no listing call; the store answers.
            BranchProvider::Local(p) => Ok(p.store.list(note_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_mints_unique_ids() {
        let store = BranchStore::new();
        let a = store.mint_id();
        let b = store.mint_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_store_push_and_list() {
        let store = BranchStore::new();
        store.push(
            "n1",
            BranchRecord {
                id: "b1".into(),
                kind: "note".into(),
                title: "First".into(),
                content: None,
            },
        );
        assert_eq!(store.list("n1").len(), 1);
        assert!(store.list("n2").is_empty());
    }

    #[test]
    fn test_local_documents_round_trip() {
        let provider = LocalProvider::new();
        assert!(provider.document("n1", "p1").is_none());
        provider
            .documents
            .lock()
            .unwrap()
            .insert(("n1".into(), "p1".into()), "body".to_string());
        assert_eq!(provider.document("n1", "p1").as_deref(), Some("body"));
    }
}
