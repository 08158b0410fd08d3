//! # Block Edits
//!
//! Every change a user can make to a block payload is a [`BlockEdit`]. Applying an
//! edit never mutates the payload it was given: it returns a new [`BlockData`]
//! built from the old one, which is what the editor swaps into its note.
//!
//! Edits are grouped by the block type they understand:
//!
//! - [`text`]: replace the body
//! - [`todo`]: add, toggle, retext and remove items
//! - [`table`]: headers, cells, rows and columns
//! - [`meta`]: collapse state, width and title, valid for every type
//!
//! A type-specific edit sent to a block of another type is an
//! [`BlocknoteError::InvalidEdit`]. Edits that address something absent (an
//! unknown todo id, a row index past the end) are no-ops and return the payload
//! unchanged.

use uuid::Uuid;

use crate::error::{BlocknoteError, Result};
use crate::model::{BlockContent, BlockData, BlockSize, BlockType};

pub mod meta;
pub mod table;
pub mod text;
pub mod todo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockEdit {
    // text
    SetText(String),

    // todo
    AddItem(String),
    ToggleItem(String),
    SetItemText { id: String, text: String },
    RemoveItem(String),

    // table
    SetHeader { column: usize, text: String },
    SetCell { row: usize, column: usize, text: String },
    AddRow,
    AddColumn,
    DeleteRow(usize),
    DeleteColumn(usize),

    // any block
    SetCollapsed(bool),
    ToggleCollapsed,
    SetSize(BlockSize),
    SetTitle(String),
}

impl BlockEdit {
    /// The block type this edit requires, or `None` for metadata edits.
    pub fn required_kind(&self) -> Option<BlockType> {
        match self {
            BlockEdit::SetText(_) => Some(BlockType::Text),
            BlockEdit::AddItem(_)
            | BlockEdit::ToggleItem(_)
            | BlockEdit::SetItemText { .. }
            | BlockEdit::RemoveItem(_) => Some(BlockType::Todo),
            BlockEdit::SetHeader { .. }
            | BlockEdit::SetCell { .. }
            | BlockEdit::AddRow
            | BlockEdit::AddColumn
            | BlockEdit::DeleteRow(_)
            | BlockEdit::DeleteColumn(_) => Some(BlockType::Table),
            BlockEdit::SetCollapsed(_)
            | BlockEdit::ToggleCollapsed
            | BlockEdit::SetSize(_)
            | BlockEdit::SetTitle(_) => None,
        }
    }

    /// Applies the edit to `data`, returning the new payload.
    ///
    /// `block_id` is only used to label errors.
    pub fn apply(&self, block_id: Uuid, data: &BlockData) -> Result<BlockData> {
        if let Some(required) = self.required_kind() {
            if required != data.kind() {
                return Err(BlocknoteError::InvalidEdit {
                    block_id,
                    kind: data.kind().to_string(),
                    reason: format!("{:?} only applies to {} blocks", self, required),
                });
            }
        }

        let next = match (self, data.content()) {
            (BlockEdit::SetText(value), BlockContent::Text(_)) => {
                data.with_content(BlockContent::Text(text::set_text(value)))
            }

            (BlockEdit::AddItem(value), BlockContent::Todo(todo)) => {
                data.with_content(BlockContent::Todo(todo.add_item(value)))
            }
            (BlockEdit::ToggleItem(id), BlockContent::Todo(todo)) => {
                data.with_content(BlockContent::Todo(todo.toggle_item(id)))
            }
            (BlockEdit::SetItemText { id, text }, BlockContent::Todo(todo)) => {
                data.with_content(BlockContent::Todo(todo.set_item_text(id, text)))
            }
            (BlockEdit::RemoveItem(id), BlockContent::Todo(todo)) => {
                data.with_content(BlockContent::Todo(todo.remove_item(id)))
            }

            (BlockEdit::SetHeader { column, text }, BlockContent::Table(table)) => {
                data.with_content(BlockContent::Table(table.set_header(*column, text)))
            }
            (BlockEdit::SetCell { row, column, text }, BlockContent::Table(table)) => {
                data.with_content(BlockContent::Table(table.set_cell(*row, *column, text)))
            }
            (BlockEdit::AddRow, BlockContent::Table(table)) => {
                data.with_content(BlockContent::Table(table.add_row()))
            }
            (BlockEdit::AddColumn, BlockContent::Table(table)) => {
                data.with_content(BlockContent::Table(table.add_column()))
            }
            (BlockEdit::DeleteRow(row), BlockContent::Table(table)) => {
                data.with_content(BlockContent::Table(table.delete_row(*row)))
            }
            (BlockEdit::DeleteColumn(column), BlockContent::Table(table)) => {
                data.with_content(BlockContent::Table(table.delete_column(*column)))
            }

            (BlockEdit::SetCollapsed(value), _) => {
                data.with_meta(meta::set_collapsed(&data.meta, *value))
            }
            (BlockEdit::ToggleCollapsed, _) => data.with_meta(meta::toggle_collapsed(&data.meta)),
            (BlockEdit::SetSize(size), _) => data.with_meta(meta::set_size(&data.meta, *size)),
            (BlockEdit::SetTitle(title), _) => data.with_meta(meta::set_title(&data.meta, title)),

            // Kind mismatches were rejected above.
            _ => data.clone(),
        };

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TableData, TextData};

    #[test]
    fn test_set_text_replaces_body() {
        let data = BlockData::default_for(BlockType::Text);
        let next = BlockEdit::SetText("hello".into())
            .apply(Uuid::new_v4(), &data)
            .unwrap();
        assert_eq!(
            next.content(),
            &BlockContent::Text(TextData {
                text: "hello".into()
            })
        );
        // the input is untouched
        assert_eq!(data.content(), &BlockContent::Text(TextData::default()));
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        let data = BlockData::default_for(BlockType::Text);
        let result = BlockEdit::AddColumn.apply(Uuid::new_v4(), &data);
        assert!(matches!(
            result,
            Err(BlocknoteError::InvalidEdit { ref kind, .. }) if kind == "text"
        ));
    }

    #[test]
    fn test_meta_edits_apply_to_any_kind() {
        for kind in BlockType::ALL {
            let data = BlockData::default_for(kind);
            let next = BlockEdit::SetTitle("Mine".into())
                .apply(Uuid::new_v4(), &data)
                .unwrap();
            assert_eq!(next.meta.title.as_deref(), Some("Mine"));
            assert_eq!(next.kind(), kind);
        }
    }

    #[test]
    fn test_table_edits_keep_meta() {
        let data = BlockData::default_for(BlockType::Table);
        let collapsed = BlockEdit::SetCollapsed(true)
            .apply(Uuid::new_v4(), &data)
            .unwrap();
        let next = BlockEdit::AddRow.apply(Uuid::new_v4(), &collapsed).unwrap();

        assert!(next.meta.is_collapsed());
        match next.content() {
            BlockContent::Table(TableData { rows, .. }) => assert_eq!(rows.len(), 1),
            other => panic!("expected table, got {:?}", other),
        }
    }
}
