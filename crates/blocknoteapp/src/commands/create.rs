use crate::backend::NotesBackend;
use crate::commands::{CmdMessage, CmdResult};
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::index::DisplayNote;

pub async fn run<B: NotesBackend + ?Sized>(backend: &B, title: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut dashboard = Dashboard::new(backend);

    match dashboard.create(title).await? {
        Some(note) => {
            result.add_message(CmdMessage::success(format!("Note created: {}", note.title)));
            // The newest note is always first on the dashboard.
            result.affected_notes.push(DisplayNote { index: 1, note });
        }
        None => result.add_message(CmdMessage::warning("Nothing created: title is empty")),
    }
    Ok(result)
}
