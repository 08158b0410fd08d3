//! # Command Layer
//!
//! This module holds the **business logic** behind every user-facing operation.
//! Each command lives in its own submodule as an async function over a
//! [`NotesBackend`](crate::backend::NotesBackend).
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Resolve selectors against the current dashboard or note
//! - Drive the [`Dashboard`](crate::dashboard::Dashboard) and
//!   [`NoteEditor`](crate::editor::NoteEditor)
//! - Return a structured [`CmdResult`] with indexed notes, blocks and messages
//! - Are completely UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O** besides talking to the backend: no stdout, no formatting
//! - **Argument parsing**: that's the CLI layer's job
//! - **Exit codes**: return `Result`, let the caller decide
//!
//! ## Testing Strategy
//!
//! Command tests run against
//! [`InMemoryBackend`](crate::backend::memory::InMemoryBackend) and assert on the
//! returned `CmdResult` and on the calls the backend recorded.
//!
//! ## Command Modules
//!
//! - [`list`]: dashboard listing
//! - [`create`]: create a note
//! - [`delete`]: delete a note
//! - [`view`]: one note with its blocks in display order
//! - [`blocks`]: add, remove and edit blocks through an editor session
//! - [`helpers`]: selector resolution

use serde::Serialize;

use crate::index::{DisplayBlock, DisplayNote};

pub mod blocks;
pub mod create;
pub mod delete;
pub mod helpers;
pub mod list;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    /// Notes to display.
    pub listed_notes: Vec<DisplayNote>,
    /// Notes created or deleted by the command.
    pub affected_notes: Vec<DisplayNote>,
    /// Blocks of the listed note, in display order.
    pub listed_blocks: Vec<DisplayBlock>,
    /// Blocks added, removed or edited by the command.
    pub affected_blocks: Vec<DisplayBlock>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_notes(mut self, notes: Vec<DisplayNote>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_listed_blocks(mut self, blocks: Vec<DisplayBlock>) -> Self {
        self.listed_blocks = blocks;
        self
    }
}
