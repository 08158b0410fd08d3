//! # Backend Layer
//!
//! The notes service owns every note and block; this crate only ever holds a cache
//! of it. [`NotesBackend`] is the contract we consume, one method per REST call:
//!
//! | Operation | Method & Path | Body | Response |
//! |-----------|---------------|------|----------|
//! | list notes | `GET /notes` | | `Note[]` |
//! | create note | `POST /notes` | `{title}` | `Note` |
//! | get note | `GET /notes/{id}` | | `Note` |
//! | delete note | `DELETE /notes/{id}` | | `{ok}` |
//! | create block | `POST /notes/{noteId}/blocks` | `{type, position, data}` | `Block` |
//! | update block | `PATCH /blocks/{blockId}` | `{data}` | `Block` |
//! | delete block | `DELETE /blocks/{blockId}` | | `{ok}` |
//!
//! There is no retry, pagination, caching or batching: one request per call, and
//! any non-2xx response is a terminal [`BlocknoteError::Status`] for that call.
//! `update_block` replaces the stored payload wholesale.
//!
//! ## Implementations
//!
//! - [`http::HttpBackend`]: production client over `reqwest`.
//! - [`memory::InMemoryBackend`]: behaves like the reference server, records
//!   every call and can inject failures and latency. Used by tests.
//!
//! [`BlocknoteError::Status`]: crate::error::BlocknoteError::Status

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{Block, BlockData, BlockType, Note};

pub mod http;
pub mod memory;

/// Abstract interface to the notes service.
#[async_trait]
pub trait NotesBackend: Send + Sync {
    /// All notes, newest first.
    async fn list_notes(&self) -> Result<Vec<Note>>;

    /// Create a note. The service seeds it with an empty text block.
    async fn create_note(&self, title: &str) -> Result<Note>;

    async fn get_note(&self, id: Uuid) -> Result<Note>;

    /// Delete a note and its blocks. Returns the service's `ok` flag.
    async fn delete_note(&self, id: Uuid) -> Result<bool>;

    /// Create a block; the response carries the server-assigned id.
    async fn create_block(
        &self,
        note_id: Uuid,
        kind: BlockType,
        position: i64,
        data: &BlockData,
    ) -> Result<Block>;

    /// Replace a block's payload.
    async fn update_block(&self, block_id: Uuid, data: &BlockData) -> Result<Block>;

    async fn delete_block(&self, block_id: Uuid) -> Result<bool>;
}

#[async_trait]
impl<B: NotesBackend + ?Sized> NotesBackend for Arc<B> {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        (**self).list_notes().await
    }

    async fn create_note(&self, title: &str) -> Result<Note> {
        (**self).create_note(title).await
    }

    async fn get_note(&self, id: Uuid) -> Result<Note> {
        (**self).get_note(id).await
    }

    async fn delete_note(&self, id: Uuid) -> Result<bool> {
        (**self).delete_note(id).await
    }

    async fn create_block(
        &self,
        note_id: Uuid,
        kind: BlockType,
        position: i64,
        data: &BlockData,
    ) -> Result<Block> {
        (**self).create_block(note_id, kind, position, data).await
    }

    async fn update_block(&self, block_id: Uuid, data: &BlockData) -> Result<Block> {
        (**self).update_block(block_id, data).await
    }

    async fn delete_block(&self, block_id: Uuid) -> Result<bool> {
        (**self).delete_block(block_id).await
    }
}

// --- Request / response bodies ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlockRequest {
    #[serde(rename = "type")]
    pub kind: BlockType,
    pub position: i64,
    pub data: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBlockRequest {
    pub data: Value,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}
