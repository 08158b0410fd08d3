use crate::backend::NotesBackend;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::{index_blocks, DisplayNote, Selector};

use super::helpers::resolve_note;

/// Fetches the full note; blocks come back in display order.
pub async fn run<B: NotesBackend + ?Sized>(backend: &B, selector: &Selector) -> Result<CmdResult> {
    let target = resolve_note(backend, selector).await?;
    let mut note = backend.get_note(target.note.id).await?;
    let blocks = index_blocks(&note);
    note.blocks = blocks.iter().map(|db| db.block.clone()).collect();

    Ok(CmdResult::default()
        .with_listed_notes(vec![DisplayNote {
            index: target.index,
            note,
        }])
        .with_listed_blocks(blocks))
}
