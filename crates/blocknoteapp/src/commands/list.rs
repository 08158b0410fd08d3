use crate::backend::NotesBackend;
use crate::commands::{CmdMessage, CmdResult};
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::index::index_notes;

pub async fn run<B: NotesBackend + ?Sized>(backend: &B) -> Result<CmdResult> {
    let mut dashboard = Dashboard::new(backend);
    dashboard.load().await?;
    let notes = index_notes(dashboard.into_notes());

    let mut result = CmdResult::default();
    if notes.is_empty() {
        result.add_message(CmdMessage::info("No notes yet. Create one with `create <title>`."));
    }
    Ok(result.with_listed_notes(notes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::InMemoryBackend;

    #[tokio::test]
    async fn test_lists_newest_first_with_indexes() {
        let backend = InMemoryBackend::new();
        backend.create_note("first").await.unwrap();
        backend.create_note("second").await.unwrap();

        let result = run(&backend).await.unwrap();
        let listed: Vec<(usize, &str)> = result
            .listed_notes
            .iter()
            .map(|dn| (dn.index, dn.note.title.as_str()))
            .collect();
        assert_eq!(listed, vec![(1, "second"), (2, "first")]);
        assert!(result.messages.is_empty());
    }

    #[tokio::test]
    async fn test_empty_dashboard_says_so() {
        let backend = InMemoryBackend::new();
        let result = run(&backend).await.unwrap();
        assert!(result.listed_notes.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
