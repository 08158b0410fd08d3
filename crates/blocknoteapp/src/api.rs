//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for every blocknote operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: user-typed note and block references become [`Selector`]s
//! - **Returns structured types** (`Result<CmdResult>`)
//! - **Hands out editors** for UIs that keep a note open ([`BlocknoteApi::open_editor`])
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs` and `editor/`
//! - **Presentation concerns**: returns data structures, not strings
//!
//! ## Generic Over NotesBackend
//!
//! `BlocknoteApi<B: NotesBackend>` runs the same way over
//! [`HttpBackend`](crate::backend::http::HttpBackend) in production and
//! [`InMemoryBackend`](crate::backend::memory::InMemoryBackend) in tests.

use std::sync::Arc;

use crate::backend::NotesBackend;
use crate::blocks::BlockEdit;
use crate::commands::{self, CmdResult};
use crate::config::BlocknoteConfig;
use crate::editor::NoteEditor;
use crate::error::Result;
use crate::index::Selector;
use crate::model::BlockType;

pub struct BlocknoteApi<B: NotesBackend + ?Sized + 'static> {
    backend: Arc<B>,
    config: BlocknoteConfig,
}

impl<B: NotesBackend + ?Sized + 'static> BlocknoteApi<B> {
    pub fn new(backend: Arc<B>, config: BlocknoteConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn config(&self) -> &BlocknoteConfig {
        &self.config
    }

    pub async fn list_notes(&self) -> Result<CmdResult> {
        commands::list::run(self.backend.as_ref()).await
    }

    pub async fn create_note(&self, title: &str) -> Result<CmdResult> {
        commands::create::run(self.backend.as_ref(), title).await
    }

    pub async fn delete_note(&self, note: &str) -> Result<CmdResult> {
        let note: Selector = note.parse()?;
        commands::delete::run(self.backend.as_ref(), &note).await
    }

    pub async fn view_note(&self, note: &str) -> Result<CmdResult> {
        let note: Selector = note.parse()?;
        commands::view::run(self.backend.as_ref(), &note).await
    }

    pub async fn add_block(&self, note: &str, kind: BlockType) -> Result<CmdResult> {
        let note: Selector = note.parse()?;
        commands::blocks::add(&self.backend, self.config.save_debounce(), &note, kind).await
    }

    pub async fn remove_block(&self, note: &str, block: &str) -> Result<CmdResult> {
        let note: Selector = note.parse()?;
        let block: Selector = block.parse()?;
        commands::blocks::remove(&self.backend, self.config.save_debounce(), &note, &block).await
    }

    pub async fn edit_block(&self, note: &str, block: &str, edit: &BlockEdit) -> Result<CmdResult> {
        let note: Selector = note.parse()?;
        let block: Selector = block.parse()?;
        commands::blocks::edit(
            &self.backend,
            self.config.save_debounce(),
            &note,
            &block,
            edit,
        )
        .await
    }

    /// A fresh editor over this backend, using the configured save debounce.
    pub fn open_editor(&self) -> NoteEditor<B> {
        NoteEditor::new(self.backend.clone(), self.config.save_debounce())
    }
}
