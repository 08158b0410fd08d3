//! Block commands run a short editor session: open the note, make one change, push
//! it to the service and close.
//!
//! Going through [`NoteEditor`] keeps the same rules a long-lived UI gets: adds
//! wait for the service, deletes cancel pending saves, edits are checked against
//! the block type. The only difference is that edits are flushed right away
//! instead of waiting out the save debounce.

use std::sync::Arc;
use std::time::Duration;

use crate::backend::NotesBackend;
use crate::blocks::BlockEdit;
use crate::commands::{CmdMessage, CmdResult};
use crate::editor::NoteEditor;
use crate::error::{BlocknoteError, Result};
use crate::index::{index_blocks, DisplayBlock, Selector};
use crate::model::{Block, BlockContent, BlockType, Note};

use super::helpers::{resolve_block, resolve_note};

async fn open<B: NotesBackend + ?Sized + 'static>(
    backend: &Arc<B>,
    save_debounce: Duration,
    note: &Selector,
) -> Result<(NoteEditor<B>, Note)> {
    let target = resolve_note(backend.as_ref(), note).await?;
    let editor = NoteEditor::new(backend.clone(), save_debounce);
    let loaded = editor
        .load(target.note.id)
        .await?
        .ok_or_else(|| BlocknoteError::Api(format!("Loading note {} was interrupted", note)))?;
    Ok((editor, loaded))
}

fn displayed(note: &Note, block: Block) -> DisplayBlock {
    let index = index_blocks(note)
        .iter()
        .find(|db| db.block.id == block.id)
        .map_or(0, |db| db.index);
    DisplayBlock { index, block }
}

pub async fn add<B: NotesBackend + ?Sized + 'static>(
    backend: &Arc<B>,
    save_debounce: Duration,
    note: &Selector,
    kind: BlockType,
) -> Result<CmdResult> {
    let (editor, loaded) = open(backend, save_debounce, note).await?;
    let block = editor.add_block(kind, None).await.ok_or_else(|| {
        BlocknoteError::Api(format!("Could not add a {} block to \"{}\"", kind, loaded.title))
    })?;
    let current = editor.note().unwrap_or(loaded);
    editor.close();

    let block = displayed(&current, block);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added {} block ({}) to {}",
        block.block.label(),
        block.index,
        current.title
    )));
    result.affected_blocks.push(block);
    Ok(result)
}

pub async fn remove<B: NotesBackend + ?Sized + 'static>(
    backend: &Arc<B>,
    save_debounce: Duration,
    note: &Selector,
    block: &Selector,
) -> Result<CmdResult> {
    let (editor, loaded) = open(backend, save_debounce, note).await?;
    let target = resolve_block(&loaded, block)?;
    editor.delete_block(target.block.id).await;
    editor.close();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Removed {} ({}) from {}",
        target.block.display_title(),
        target.index,
        loaded.title
    )));
    result.affected_blocks.push(target);
    Ok(result)
}

pub async fn edit<B: NotesBackend + ?Sized + 'static>(
    backend: &Arc<B>,
    save_debounce: Duration,
    note: &Selector,
    block: &Selector,
    edit: &BlockEdit,
) -> Result<CmdResult> {
    let (editor, loaded) = open(backend, save_debounce, note).await?;
    let target = resolve_block(&loaded, block)?;
    let edit = resolve_item_refs(edit, &target.block)?;

    editor.edit_block(target.block.id, &edit)?;
    let summary = editor.flush().await;
    let updated = editor.block(&target.block.id);
    editor.close();

    if summary.failed > 0 {
        return Err(BlocknoteError::Api(format!(
            "Failed to save block {} of {}",
            target.index, loaded.title
        )));
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Updated {} ({})",
        target.block.display_title(),
        target.index
    )));
    result.affected_blocks.push(DisplayBlock {
        index: target.index,
        block: updated.unwrap_or(target.block),
    });
    Ok(result)
}

/// Todo edits from the outside name items by 1-based position or by id; the edit
/// itself only understands ids.
fn resolve_item_refs(edit: &BlockEdit, block: &Block) -> Result<BlockEdit> {
    let BlockContent::Todo(todo) = block.data.content() else {
        return Ok(edit.clone());
    };
    let resolve = |reference: &str| {
        todo.resolve_item(reference)
            .map(|item| item.id.clone())
            .ok_or_else(|| BlocknoteError::Api(format!("Todo item not found: {}", reference)))
    };

    Ok(match edit {
        BlockEdit::ToggleItem(reference) => BlockEdit::ToggleItem(resolve(reference)?),
        BlockEdit::SetItemText { id, text } => BlockEdit::SetItemText {
            id: resolve(id)?,
            text: text.clone(),
        },
        BlockEdit::RemoveItem(reference) => BlockEdit::RemoveItem(resolve(reference)?),
        other => other.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::{BackendCall, InMemoryBackend};
    use crate::model::{TodoData, TodoItem};
    use serde_json::json;
    use uuid::Uuid;

    const QUIET: Duration = Duration::from_millis(400);

    async fn backend_with_note() -> (Arc<InMemoryBackend>, Note) {
        let backend = Arc::new(InMemoryBackend::new());
        let note = backend.create_note("Plans").await.unwrap();
        backend.clear_calls();
        (backend, note)
    }

    #[tokio::test]
    async fn test_add_appends_after_last_block() {
        let (backend, note) = backend_with_note().await;

        let result = add(&backend, QUIET, &Selector::Index(1), BlockType::Todo)
            .await
            .unwrap();

        let added = &result.affected_blocks[0];
        assert_eq!(added.index, 2);
        assert_eq!(added.block.position, 1);
        assert_eq!(backend.note(&note.id).unwrap().blocks.len(), 2);
    }

    #[tokio::test]
    async fn test_add_to_unknown_note_fails() {
        let (backend, _) = backend_with_note().await;
        let note_id = backend.list_notes().await.unwrap()[0].id;
        let err = add(&backend, QUIET, &Selector::Id(Uuid::nil()), BlockType::Text)
            .await
            .unwrap_err();
        assert!(matches!(err, BlocknoteError::NoteNotFound(_)));
        assert_eq!(backend.note(&note_id).unwrap().blocks.len(), 1);
    }

    #[tokio::test]
    async fn test_edit_is_saved_immediately() {
        let (backend, note) = backend_with_note().await;
        let block_id = note.blocks[0].id;

        let result = edit(
            &backend,
            QUIET,
            &Selector::Index(1),
            &Selector::Index(1),
            &BlockEdit::SetText("hello".into()),
        )
        .await
        .unwrap();

        assert_eq!(backend.updates_for(&block_id), vec![json!({"text": "hello"})]);
        assert_eq!(
            result.affected_blocks[0].block.data.content(),
            &BlockContent::Text(crate::model::TextData {
                text: "hello".into()
            })
        );
    }

    #[tokio::test]
    async fn test_edit_resolves_todo_item_by_position() {
        let backend = Arc::new(InMemoryBackend::new());
        let mut note = Note::new("Chores");
        let block = Block {
            id: Uuid::new_v4(),
            position: 0,
            data: crate::model::BlockData::new(BlockContent::Todo(TodoData {
                items: vec![
                    TodoItem {
                        id: "a".into(),
                        text: "dishes".into(),
                        done: false,
                    },
                    TodoItem {
                        id: "b".into(),
                        text: "laundry".into(),
                        done: false,
                    },
                ],
            })),
        };
        let block_id = block.id;
        note.blocks.push(block);
        backend.seed_note(note);

        edit(
            &backend,
            QUIET,
            &Selector::Index(1),
            &Selector::Index(1),
            &BlockEdit::ToggleItem("2".into()),
        )
        .await
        .unwrap();

        let sent = backend.updates_for(&block_id);
        assert_eq!(sent[0]["items"][1]["done"], json!(true));
        assert_eq!(sent[0]["items"][0]["done"], json!(false));

        let err = edit(
            &backend,
            QUIET,
            &Selector::Index(1),
            &Selector::Index(1),
            &BlockEdit::RemoveItem("7".into()),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Todo item not found"));
    }

    #[tokio::test]
    async fn test_mismatched_edit_sends_nothing() {
        let (backend, _) = backend_with_note().await;

        let err = edit(
            &backend,
            QUIET,
            &Selector::Index(1),
            &Selector::Index(1),
            &BlockEdit::AddColumn,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, BlocknoteError::InvalidEdit { .. }));
        assert!(!backend
            .calls()
            .iter()
            .any(|c| matches!(c, BackendCall::UpdateBlock { .. })));
    }

    #[tokio::test]
    async fn test_remove_deletes_remote_block() {
        let (backend, note) = backend_with_note().await;
        let block_id = note.blocks[0].id;

        let result = remove(&backend, QUIET, &Selector::Index(1), &Selector::Index(1))
            .await
            .unwrap();

        assert_eq!(result.affected_blocks[0].block.id, block_id);
        assert!(backend.calls().contains(&BackendCall::DeleteBlock(block_id)));
        assert!(backend.note(&note.id).unwrap().blocks.is_empty());
    }
}
