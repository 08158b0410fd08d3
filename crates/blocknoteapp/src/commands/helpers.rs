use crate::backend::NotesBackend;
use crate::dashboard::Dashboard;
use crate::error::{BlocknoteError, Result};
use crate::index::{find_block, find_note, index_blocks, index_notes, DisplayBlock, DisplayNote, Selector};
use crate::model::Note;

/// Resolves a note selector against the current dashboard.
///
/// Indexes only mean something relative to a listing, so the dashboard is always
/// loaded; a UUID that is not on it is reported as not found as well.
pub async fn resolve_note<B: NotesBackend + ?Sized>(
    backend: &B,
    selector: &Selector,
) -> Result<DisplayNote> {
    let mut dashboard = Dashboard::new(backend);
    dashboard.load().await?;
    let notes = index_notes(dashboard.into_notes());
    find_note(&notes, selector)
        .cloned()
        .ok_or_else(|| BlocknoteError::NoteNotFound(selector.to_string()))
}

pub fn resolve_block(note: &Note, selector: &Selector) -> Result<DisplayBlock> {
    let blocks = index_blocks(note);
    find_block(&blocks, selector)
        .cloned()
        .ok_or_else(|| {
            BlocknoteError::BlockNotFound(format!("{} in note \"{}\"", selector, note.title))
        })
}
