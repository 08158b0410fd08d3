use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use super::NotesBackend;
use crate::error::{BlocknoteError, Result};
use crate::model::{sort_blocks, Block, BlockData, BlockType, Note};

/// A call as it reached the backend, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    ListNotes,
    CreateNote { title: String },
    GetNote(Uuid),
    DeleteNote(Uuid),
    CreateBlock {
        note_id: Uuid,
        kind: BlockType,
        position: i64,
    },
    UpdateBlock { block_id: Uuid, data: Value },
    DeleteBlock(Uuid),
}

#[derive(Default)]
struct MemState {
    // Insertion order; newest last.
    notes: Vec<Note>,
    calls: Vec<BackendCall>,
    simulate_failure: bool,
    note_latency: HashMap<Uuid, Duration>,
}

/// In-memory notes service for testing.
///
/// Behaves like the reference server: new notes get an empty text block at
/// position 0, notes list newest first, blocks come back sorted by position and
/// unknown ids answer 404. Every call is recorded before it is served so tests can
/// assert on exactly what the editor sent and in which order.
#[derive(Default)]
pub struct InMemoryBackend {
    state: Mutex<MemState>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make every subsequent call fail with status 500.
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.lock().simulate_failure = simulate;
    }

    /// Delay `get_note` responses for one note.
    pub fn set_note_latency(&self, note_id: Uuid, latency: Duration) {
        self.lock().note_latency.insert(note_id, latency);
    }

    /// Insert a prepared note as-is.
    pub fn seed_note(&self, note: Note) {
        self.lock().notes.push(note);
    }

    pub fn note(&self, id: &Uuid) -> Option<Note> {
        self.lock().notes.iter().find(|n| &n.id == id).cloned()
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Payloads sent by `update_block` for one block, oldest first.
    pub fn updates_for(&self, block_id: &Uuid) -> Vec<Value> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::UpdateBlock { block_id: id, data } if id == block_id => {
                    Some(data.clone())
                }
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: BackendCall) -> Result<()> {
        let mut state = self.lock();
        debug!(?call, "in-memory backend call");
        state.calls.push(call);
        if state.simulate_failure {
            return Err(BlocknoteError::Status {
                status: 500,
                path: "memory://".to_string(),
            });
        }
        Ok(())
    }
}

fn not_found(path: String) -> BlocknoteError {
    BlocknoteError::Status { status: 404, path }
}

#[async_trait]
impl NotesBackend for InMemoryBackend {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        self.record(BackendCall::ListNotes)?;
        let state = self.lock();
        Ok(state
            .notes
            .iter()
            .rev()
            .map(|note| {
                let mut note = note.clone();
                sort_blocks(&mut note.blocks);
                note
            })
            .collect())
    }

    async fn create_note(&self, title: &str) -> Result<Note> {
        self.record(BackendCall::CreateNote {
            title: title.to_string(),
        })?;
        let mut note = Note::new(title);
        note.blocks.push(Block {
            id: Uuid::new_v4(),
            position: 0,
            data: BlockData::default_for(BlockType::Text),
        });
        self.lock().notes.push(note.clone());
        Ok(note)
    }

    async fn get_note(&self, id: Uuid) -> Result<Note> {
        self.record(BackendCall::GetNote(id))?;
        let latency = self.lock().note_latency.get(&id).copied();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let mut note = self
            .note(&id)
            .ok_or_else(|| not_found(format!("/notes/{}", id)))?;
        sort_blocks(&mut note.blocks);
        Ok(note)
    }

    async fn delete_note(&self, id: Uuid) -> Result<bool> {
        self.record(BackendCall::DeleteNote(id))?;
        let mut state = self.lock();
        let before = state.notes.len();
        state.notes.retain(|n| n.id != id);
        if state.notes.len() == before {
            return Err(not_found(format!("/notes/{}", id)));
        }
        Ok(true)
    }

    async fn create_block(
        &self,
        note_id: Uuid,
        kind: BlockType,
        position: i64,
        data: &BlockData,
    ) -> Result<Block> {
        self.record(BackendCall::CreateBlock {
            note_id,
            kind,
            position,
        })?;
        let mut state = self.lock();
        let note = state
            .notes
            .iter_mut()
            .find(|n| n.id == note_id)
            .ok_or_else(|| not_found(format!("/notes/{}/blocks", note_id)))?;

        // Round-trip through the wire form, as the real service stores raw JSON.
        let block = Block {
            id: Uuid::new_v4(),
            position,
            data: BlockData::from_wire(kind, data.to_wire())?,
        };
        note.blocks.push(block.clone());
        Ok(block)
    }

    async fn update_block(&self, block_id: Uuid, data: &BlockData) -> Result<Block> {
        let wire = data.to_wire();
        self.record(BackendCall::UpdateBlock {
            block_id,
            data: wire.clone(),
        })?;
        let mut state = self.lock();
        let block = state
            .notes
            .iter_mut()
            .flat_map(|n| n.blocks.iter_mut())
            .find(|b| b.id == block_id)
            .ok_or_else(|| not_found(format!("/blocks/{}", block_id)))?;

        block.data = BlockData::from_wire(block.kind(), wire)?;
        Ok(block.clone())
    }

    async fn delete_block(&self, block_id: Uuid) -> Result<bool> {
        self.record(BackendCall::DeleteBlock(block_id))?;
        let mut state = self.lock();
        let mut found = false;
        for note in state.notes.iter_mut() {
            let before = note.blocks.len();
            note.blocks.retain(|b| b.id != block_id);
            found |= note.blocks.len() != before;
        }
        if !found {
            return Err(not_found(format!("/blocks/{}", block_id)));
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockContent, TextData};

    #[tokio::test]
    async fn test_create_note_seeds_text_block() {
        let backend = InMemoryBackend::new();
        let note = backend.create_note("Groceries").await.unwrap();

        assert_eq!(note.title, "Groceries");
        assert_eq!(note.blocks.len(), 1);
        assert_eq!(note.blocks[0].position, 0);
        assert_eq!(
            note.blocks[0].data.content(),
            &BlockContent::Text(TextData::default())
        );
    }

    #[tokio::test]
    async fn test_list_notes_newest_first() {
        let backend = InMemoryBackend::new();
        backend.create_note("first").await.unwrap();
        backend.create_note("second").await.unwrap();

        let titles: Vec<String> = backend
            .list_notes()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_missing_ids_are_404() {
        let backend = InMemoryBackend::new();
        let err = backend.get_note(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.status(), Some(404));

        let err = backend.delete_block(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_delete_note_cascades_to_blocks() {
        let backend = InMemoryBackend::new();
        let note = backend.create_note("gone").await.unwrap();
        let block_id = note.blocks[0].id;

        assert!(backend.delete_note(note.id).await.unwrap());
        let err = backend
            .update_block(block_id, &BlockData::default_for(BlockType::Text))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_simulated_failure_still_records_call() {
        let backend = InMemoryBackend::new();
        backend.set_simulate_failure(true);

        let err = backend.list_notes().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(backend.calls(), vec![BackendCall::ListNotes]);
    }
}
