//! # Note Editor
//!
//! [`NoteEditor`] owns the in-memory copy of one open note and keeps it in sync
//! with the notes service while the user types.
//!
//! ## Loading
//!
//! ```text
//! Uninitialized ──load──▶ Loading ──ok──▶ Ready(note)
//!                            └────err──▶ Error(message)
//! ```
//!
//! Every `load` (and `close`) bumps a generation counter. A response whose
//! generation is no longer current is dropped on arrival, so a slow load of note A
//! can never overwrite a later load of note B. The request itself is not aborted.
//! Switching to a different note also cancels every pending save.
//!
//! ## Edits
//!
//! Block edits are optimistic: [`NoteEditor::update_block`] swaps the payload into
//! the local note at once, then (re)arms a per-block save timer. Only the last
//! payload of a burst reaches the service. A failed save is logged and dropped;
//! the local note keeps the edit.
//!
//! Deletes remove the block locally, cancel its pending save and then call the
//! service. Adds are not optimistic: the block appears only once the service has
//! returned it with its id.
//!
//! Edits against a block the note does not hold, or while no note is ready, are
//! ignored.

use futures::future::join_all;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::backend::NotesBackend;
use crate::blocks::BlockEdit;
use crate::error::Result;
use crate::model::{sort_blocks, Block, BlockData, BlockType, Note};

pub mod debounce;

use debounce::Debouncer;

pub const DEFAULT_SAVE_DEBOUNCE: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Uninitialized,
    Loading,
    Ready(Note),
    Error(String),
}

impl LoadState {
    pub fn note(&self) -> Option<&Note> {
        match self {
            LoadState::Ready(note) => Some(note),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }
}

/// Outcome of [`NoteEditor::flush`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlushSummary {
    pub saved: usize,
    pub failed: usize,
}

#[derive(Default)]
struct EditorState {
    load: LoadState,
    note_id: Option<Uuid>,
    generation: u64,
}

pub struct NoteEditor<B: NotesBackend + ?Sized + 'static> {
    backend: Arc<B>,
    state: Mutex<EditorState>,
    saves: Debouncer<Uuid>,
    save_debounce: Duration,
}

impl<B: NotesBackend + ?Sized + 'static> NoteEditor<B> {
    pub fn new(backend: Arc<B>, save_debounce: Duration) -> Self {
        Self {
            backend,
            state: Mutex::new(EditorState::default()),
            saves: Debouncer::new(),
            save_debounce,
        }
    }

    fn lock(&self) -> MutexGuard<'_, EditorState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> LoadState {
        self.lock().load.clone()
    }

    pub fn note(&self) -> Option<Note> {
        self.lock().load.note().cloned()
    }

    pub fn block(&self, block_id: &Uuid) -> Option<Block> {
        self.lock().load.note().and_then(|n| n.block(block_id).cloned())
    }

    /// Blocks of the loaded note in display order; empty when not ready.
    pub fn sorted_blocks(&self) -> Vec<Block> {
        self.lock()
            .load
            .note()
            .map(Note::sorted_blocks)
            .unwrap_or_default()
    }

    pub fn pending_saves(&self) -> usize {
        self.saves.pending_count()
    }

    pub fn is_save_pending(&self, block_id: &Uuid) -> bool {
        self.saves.is_pending(block_id)
    }

    /// Fetches `note_id` and makes it the editor's note.
    ///
    /// Returns `Ok(None)` when a newer `load` or `close` superseded this one before
    /// the response arrived; the state is then left to whoever superseded it.
    pub async fn load(&self, note_id: Uuid) -> Result<Option<Note>> {
        let generation = {
            let mut state = self.lock();
            if state.note_id != Some(note_id) {
                let cancelled = self.saves.cancel_all();
                if !cancelled.is_empty() {
                    debug!(count = cancelled.len(), "dropped pending saves on note switch");
                }
            }
            state.generation += 1;
            state.note_id = Some(note_id);
            state.load = LoadState::Loading;
            state.generation
        };

        let result = self.backend.get_note(note_id).await;

        let mut state = self.lock();
        if state.generation != generation {
            debug!(%note_id, "discarding superseded load");
            return Ok(None);
        }
        match result {
            Ok(mut note) => {
                sort_blocks(&mut note.blocks);
                state.load = LoadState::Ready(note.clone());
                Ok(Some(note))
            }
            Err(err) => {
                state.load = LoadState::Error(err.to_string());
                Err(err)
            }
        }
    }

    /// Replaces a block's payload locally and schedules its save.
    ///
    /// Returns false when the block is not part of the loaded note.
    pub fn update_block(&self, block_id: Uuid, data: BlockData) -> bool {
        matches!(self.replace_data(block_id, |_| Ok(data)), Ok(true))
    }

    /// Applies `edit` to the block's current payload, then behaves as
    /// [`NoteEditor::update_block`].
    ///
    /// An edit for another block type is an error and changes nothing.
    pub fn edit_block(&self, block_id: Uuid, edit: &BlockEdit) -> Result<bool> {
        self.replace_data(block_id, |current| edit.apply(block_id, current))
    }

    fn replace_data<F>(&self, block_id: Uuid, next: F) -> Result<bool>
    where
        F: FnOnce(&BlockData) -> Result<BlockData>,
    {
        let mut state = self.lock();
        let LoadState::Ready(note) = &mut state.load else {
            debug!(%block_id, "ignoring block update: no note loaded");
            return Ok(false);
        };
        let Some(block) = note.blocks.iter_mut().find(|b| b.id == block_id) else {
            debug!(%block_id, "ignoring block update: unknown block");
            return Ok(false);
        };
        block.data = next(&block.data)?;

        // Armed under the state lock so a concurrent delete cancels it.
        self.schedule_save(block_id, block.data.clone());
        Ok(true)
    }

    fn schedule_save(&self, block_id: Uuid, payload: BlockData) {
        let backend = self.backend.clone();
        self.saves.arm(block_id, self.save_debounce, async move {
            if let Err(err) = backend.update_block(block_id, &payload).await {
                error!(%block_id, error = %err, "failed to save block");
            }
        });
    }

    /// Removes a block locally, drops its pending save and deletes it remotely.
    ///
    /// Returns false when the block is not part of the loaded note. A failed remote
    /// delete is logged; the block stays removed locally.
    pub async fn delete_block(&self, block_id: Uuid) -> bool {
        {
            let mut state = self.lock();
            let LoadState::Ready(note) = &mut state.load else {
                debug!(%block_id, "ignoring block delete: no note loaded");
                return false;
            };
            let before = note.blocks.len();
            note.blocks.retain(|b| b.id != block_id);
            if note.blocks.len() == before {
                debug!(%block_id, "ignoring block delete: unknown block");
                return false;
            }
            self.saves.cancel(&block_id);
        }

        if let Err(err) = self.backend.delete_block(block_id).await {
            error!(%block_id, error = %err, "failed to delete block");
        }
        true
    }

    /// Creates a block after every existing one and appends the service's copy.
    ///
    /// Without `initial` the block starts from [`BlockData::default_for`]. Returns
    /// `None` when no note is ready, when `initial` is for another type, when the
    /// create fails (logged), or when the note changed while waiting.
    pub async fn add_block(&self, kind: BlockType, initial: Option<BlockData>) -> Option<Block> {
        let data = initial.unwrap_or_else(|| BlockData::default_for(kind));
        if data.kind() != kind {
            warn!(%kind, given = %data.kind(), "initial data does not match block type");
            return None;
        }

        let (note_id, position, generation) = {
            let state = self.lock();
            let Some(note) = state.load.note() else {
                debug!(%kind, "ignoring block add: no note loaded");
                return None;
            };
            (note.id, note.next_position(), state.generation)
        };

        let block = match self
            .backend
            .create_block(note_id, kind, position, &data)
            .await
        {
            Ok(block) => block,
            Err(err) => {
                error!(%note_id, %kind, error = %err, "failed to add block");
                return None;
            }
        };

        let mut state = self.lock();
        if state.generation != generation {
            debug!(%note_id, "discarding block added to a note no longer open");
            return None;
        }
        match &mut state.load {
            LoadState::Ready(note) if note.id == note_id => {
                note.blocks.push(block.clone());
                Some(block)
            }
            _ => None,
        }
    }

    /// Sends every pending save now instead of waiting out its timer.
    ///
    /// Each block is sent with its current local payload, which is the payload the
    /// timer would have sent.
    pub async fn flush(&self) -> FlushSummary {
        let pending = self.saves.cancel_all();
        let payloads: Vec<(Uuid, BlockData)> = {
            let state = self.lock();
            let Some(note) = state.load.note() else {
                return FlushSummary::default();
            };
            pending
                .into_iter()
                .filter_map(|id| note.block(&id).map(|b| (id, b.data.clone())))
                .collect()
        };

        let results = join_all(payloads.iter().map(|(block_id, payload)| async move {
            let result = self.backend.update_block(*block_id, payload).await;
            if let Err(err) = &result {
                error!(%block_id, error = %err, "failed to save block");
            }
            result.is_ok()
        }))
        .await;

        let saved = results.iter().filter(|ok| **ok).count();
        FlushSummary {
            saved,
            failed: results.len() - saved,
        }
    }

    /// Tears the editor down: pending saves are cancelled and any in-flight load is
    /// ignored when it returns.
    pub fn close(&self) {
        let mut state = self.lock();
        state.generation += 1;
        let cancelled = self.saves.cancel_all();
        if !cancelled.is_empty() {
            debug!(count = cancelled.len(), "cancelled pending saves on close");
        }
    }
}
