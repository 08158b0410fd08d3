use crate::backend::NotesBackend;
use crate::commands::{CmdMessage, CmdResult};
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::index::Selector;

use super::helpers::resolve_note;

pub async fn run<B: NotesBackend + ?Sized>(backend: &B, selector: &Selector) -> Result<CmdResult> {
    let target = resolve_note(backend, selector).await?;
    let mut result = CmdResult::default();

    if Dashboard::new(backend).delete(target.note.id).await? {
        result.add_message(CmdMessage::success(format!(
            "Note deleted ({}): {}",
            target.index, target.note.title
        )));
        result.affected_notes.push(target);
    } else {
        result.add_message(CmdMessage::warning(format!(
            "The service did not delete note {}",
            target.index
        )));
    }
    Ok(result)
}
