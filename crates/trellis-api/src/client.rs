//! Thin reqwest client for the branch/content endpoints.

use crate::error::ApiError;
use crate::record::{BranchRecord, NoteDocument};

/// Client for the REST-like JSON endpoints backing annotations.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    /// Create a client rooted at `base` (e.g. `https://host/api`).
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base.clone();
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    /// Fetch branch metadata for a note.
    pub async fn get_branch(&self, note_id: &str) -> Result<BranchRecord, ApiError> {
        self.get_json(&self.url(&["branches", note_id])).await
    }

    /// Fetch the document content shown in a panel of a note.
    pub async fn get_document(
        &self,
        note_id: &str,
        panel_id: &str,
    ) -> Result<NoteDocument, ApiError> {
        self.get_json(&self.url(&["notes", note_id, "panels", panel_id]))
            .await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        tracing::debug!(endpoint, "GET");
        let response = self.http.get(endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                endpoint: endpoint.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building_escapes_segments() {
        let client = ApiClient::new("https://host/api/");
        assert_eq!(
            client.url(&["branches", "note 1"]),
            "https://host/api/branches/note%201"
        );
        assert_eq!(
            client.url(&["notes", "n1", "panels", "p/2"]),
            "https://host/api/notes/n1/panels/p%2F2"
        );
    }
}
