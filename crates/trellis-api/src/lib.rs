//! trellis-api: typed client for the branch and note-content endpoints.
//!
//! The backend exposes REST-like JSON endpoints: branch metadata is fetched
//! by note id, document content by note id + panel id. This crate owns the
//! record types, the recursive text extraction for structured content, and a
//! thin reqwest client. No wire format is defined here; we are a consumer.

pub mod client;
pub mod error;
pub mod record;

pub use client::ApiClient;
pub use error::ApiError;
pub use record::{BranchContent, BranchRecord, ContentNode, NoteDocument};
