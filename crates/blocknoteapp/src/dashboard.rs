//! The home screen's list of notes.
//!
//! Unlike the editor, nothing here is optimistic: a note shows up after the service
//! created it and disappears after the service deleted it.

use tracing::debug;
use uuid::Uuid;

use crate::backend::NotesBackend;
use crate::error::Result;
use crate::model::Note;

pub struct Dashboard<'a, B: NotesBackend + ?Sized> {
    backend: &'a B,
    notes: Vec<Note>,
}

impl<'a, B: NotesBackend + ?Sized> Dashboard<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            notes: Vec::new(),
        }
    }

    /// Notes in dashboard order, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn into_notes(self) -> Vec<Note> {
        self.notes
    }

    pub async fn load(&mut self) -> Result<&[Note]> {
        self.notes = self.backend.list_notes().await?;
        Ok(&self.notes)
    }

    /// Creates a note titled `title` (trimmed) and puts it first.
    ///
    /// A blank title creates nothing and returns `Ok(None)`.
    pub async fn create(&mut self, title: &str) -> Result<Option<Note>> {
        let title = title.trim();
        if title.is_empty() {
            debug!("ignoring note create with blank title");
            return Ok(None);
        }
        let note = self.backend.create_note(title).await?;
        self.notes.insert(0, note.clone());
        Ok(Some(note))
    }

    /// Deletes a note remotely, then drops it from the list.
    pub async fn delete(&mut self, id: Uuid) -> Result<bool> {
        let ok = self.backend.delete_note(id).await?;
        if ok {
            self.notes.retain(|n| n.id != id);
        }
        Ok(ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::{BackendCall, InMemoryBackend};

    #[tokio::test]
    async fn test_create_prepends_trimmed_title() {
        let backend = InMemoryBackend::new();
        let mut dashboard = Dashboard::new(&backend);
        dashboard.create("first").await.unwrap();

        let note = dashboard.create("  Groceries  ").await.unwrap().unwrap();

        assert_eq!(note.title, "Groceries");
        assert_eq!(dashboard.notes()[0].id, note.id);
        assert_eq!(dashboard.notes().len(), 2);
    }

    #[tokio::test]
    async fn test_blank_title_is_noop() {
        let backend = InMemoryBackend::new();
        let mut dashboard = Dashboard::new(&backend);

        assert!(dashboard.create("   ").await.unwrap().is_none());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_after_remote_success() {
        let backend = InMemoryBackend::new();
        let mut dashboard = Dashboard::new(&backend);
        let note = dashboard.create("gone").await.unwrap().unwrap();

        assert!(dashboard.delete(note.id).await.unwrap());
        assert!(dashboard.notes().is_empty());
        assert_eq!(backend.calls().last(), Some(&BackendCall::DeleteNote(note.id)));
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_note() {
        let backend = InMemoryBackend::new();
        let mut dashboard = Dashboard::new(&backend);
        dashboard.create("stays").await.unwrap();
        backend.set_simulate_failure(true);

        let id = dashboard.notes()[0].id;
        assert!(dashboard.delete(id).await.is_err());
        assert_eq!(dashboard.notes().len(), 1);
    }

    #[tokio::test]
    async fn test_load_lists_newest_first() {
        let backend = InMemoryBackend::new();
        backend.create_note("older").await.unwrap();
        backend.create_note("newer").await.unwrap();

        let mut dashboard = Dashboard::new(&backend);
        let titles: Vec<&str> = dashboard
            .load()
            .await
            .unwrap()
            .iter()
            .map(|n| n.title.as_str())
            .collect();
        assert_eq!(titles, vec!["newer", "older"]);
    }
}
