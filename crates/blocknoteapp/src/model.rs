//! # Domain Model: Notes, Blocks and Typed Payloads
//!
//! A [`Note`] is a titled document holding an unordered collection of [`Block`]s.
//! Display order comes from each block's integer `position`, never from the order
//! the server happened to return them in.
//!
//! ## The Payload Problem
//!
//! On the wire a block is `{id, type, position, data}` where `data` is a free-form
//! JSON object whose shape is only fixed by convention:
//!
//! | type | data |
//! |------|------|
//! | `text` | `{ text }` |
//! | `todo` | `{ items: [{ id, text, done }] }` |
//! | `table` | `{ columns: [..], rows: [[..]] }` |
//! | `calendar` | `{}` |
//!
//! Every type may also carry presentation metadata mixed into the same object:
//! `collapsed`, `layout.size` and `title`.
//!
//! Internally this is a sum type, [`BlockContent`], plus [`BlockMeta`]. Keys we do
//! not recognize are kept in [`BlockData::extra`] and written back untouched, so an
//! edit made here never strips data another client put there.
//!
//! ## Lenient Decoding
//!
//! Decoding follows what the editor has always tolerated:
//! - missing `text` → `""`
//! - missing or non-array `items` → no items
//! - missing `columns` → `["Column 1", "Column 2"]`, missing `rows` → no rows
//! - table rows are padded with `""` (or truncated) to the column count, and an
//!   empty `columns` falls back to the defaults
//! - non-string ids, text and cells are turned into strings, `null` into `""`;
//!   a todo item without an id gets a fresh one
//!
//! ## Key Functions
//!
//! - [`BlockData::from_wire`] / [`BlockData::to_wire`]: payload codec
//! - [`BlockData::default_for`]: initial payload for a new block
//! - [`sort_blocks`]: stable ascending sort by position

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{BlocknoteError, Result};

pub const DEFAULT_TABLE_COLUMNS: [&str; 2] = ["Column 1", "Column 2"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Text,
    Todo,
    Table,
    Calendar,
}

impl BlockType {
    pub const ALL: [BlockType; 4] = [
        BlockType::Text,
        BlockType::Todo,
        BlockType::Table,
        BlockType::Calendar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::Todo => "todo",
            BlockType::Table => "table",
            BlockType::Calendar => "calendar",
        }
    }

    /// Human label, also the fallback block title.
    pub fn label(&self) -> &'static str {
        match self {
            BlockType::Text => "Text",
            BlockType::Todo => "Todo list",
            BlockType::Table => "Table",
            BlockType::Calendar => "Calendar",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = BlocknoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(BlockType::Text),
            "todo" => Ok(BlockType::Todo),
            "table" => Ok(BlockType::Table),
            "calendar" => Ok(BlockType::Calendar),
            other => Err(BlocknoteError::Api(format!("Unknown block type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockSize {
    #[default]
    Full,
    Half,
}

impl FromStr for BlockSize {
    type Err = BlocknoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(BlockSize::Full),
            "half" => Ok(BlockSize::Half),
            other => Err(BlocknoteError::Api(format!("Unknown block size: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextData {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TodoData {
    pub items: Vec<TodoItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Default for TableData {
    fn default() -> Self {
        Self {
            columns: DEFAULT_TABLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// The type-specific part of a block payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    Text(TextData),
    Todo(TodoData),
    Table(TableData),
    Calendar,
}

impl Default for BlockContent {
    fn default() -> Self {
        BlockContent::Text(TextData::default())
    }
}

impl BlockContent {
    pub fn kind(&self) -> BlockType {
        match self {
            BlockContent::Text(_) => BlockType::Text,
            BlockContent::Todo(_) => BlockType::Todo,
            BlockContent::Table(_) => BlockType::Table,
            BlockContent::Calendar => BlockType::Calendar,
        }
    }
}

/// Presentation metadata shared by every block type.
///
/// Fields are optional so that a payload which never set them is written back
/// without them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockMeta {
    pub collapsed: Option<bool>,
    pub size: Option<BlockSize>,
    pub title: Option<String>,
    /// Other keys found under `layout`.
    pub layout_extra: Map<String, Value>,
}

impl BlockMeta {
    pub fn is_collapsed(&self) -> bool {
        self.collapsed.unwrap_or(false)
    }

    pub fn size(&self) -> BlockSize {
        self.size.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockData {
    pub content: BlockContent,
    pub meta: BlockMeta,
    /// Unrecognized top-level keys, preserved verbatim.
    pub extra: Map<String, Value>,
}

impl BlockData {
    pub fn new(content: BlockContent) -> Self {
        Self {
            content,
            ..Default::default()
        }
    }

    /// Initial payload for a freshly created block of `kind`.
    pub fn default_for(kind: BlockType) -> Self {
        let content = match kind {
            BlockType::Text => BlockContent::Text(TextData::default()),
            BlockType::Todo => BlockContent::Todo(TodoData::default()),
            BlockType::Table => BlockContent::Table(TableData::default()),
            BlockType::Calendar => BlockContent::Calendar,
        };
        Self::new(content)
    }

    pub fn kind(&self) -> BlockType {
        self.content.kind()
    }

    pub fn content(&self) -> &BlockContent {
        &self.content
    }

    pub fn with_content(&self, content: BlockContent) -> Self {
        Self {
            content,
            meta: self.meta.clone(),
            extra: self.extra.clone(),
        }
    }

    pub fn with_meta(&self, meta: BlockMeta) -> Self {
        Self {
            content: self.content.clone(),
            meta,
            extra: self.extra.clone(),
        }
    }

    /// Decodes a wire payload for a block of type `kind`.
    pub fn from_wire(kind: BlockType, data: Value) -> Result<Self> {
        let mut map = match data {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(BlocknoteError::Api(format!(
                    "Block data must be a JSON object, got: {}",
                    other
                )))
            }
        };

        let content = match kind {
            BlockType::Text => {
                let text = match map.remove("text") {
                    Some(Value::String(s)) => s,
                    _ => String::new(),
                };
                BlockContent::Text(TextData { text })
            }
            BlockType::Todo => {
                let items = match map.remove("items") {
                    Some(Value::Array(items)) => items.into_iter().filter_map(todo_item).collect(),
                    _ => Vec::new(),
                };
                BlockContent::Todo(TodoData { items })
            }
            BlockType::Table => {
                let defaults = TableData::default();
                let columns = match map.remove("columns") {
                    Some(Value::Array(cols)) => cols.into_iter().map(cell_text).collect(),
                    _ => defaults.columns,
                };
                let rows = match map.remove("rows") {
                    Some(Value::Array(rows)) => rows
                        .into_iter()
                        .map(|row| match row {
                            Value::Array(cells) => cells.into_iter().map(cell_text).collect(),
                            _ => Vec::new(),
                        })
                        .collect(),
                    _ => defaults.rows,
                };
                BlockContent::Table(TableData { columns, rows }.normalized())
            }
            BlockType::Calendar => BlockContent::Calendar,
        };

        let mut meta = BlockMeta::default();
        if let Some(value) = map.remove("collapsed") {
            meta.collapsed = value.as_bool();
        }
        if let Some(Value::String(title)) = map.remove("title") {
            meta.title = Some(title);
        }
        if let Some(Value::Object(mut layout)) = map.remove("layout") {
            meta.size = layout
                .remove("size")
                .and_then(|s| serde_json::from_value(s).ok());
            meta.layout_extra = layout;
        }

        Ok(Self {
            content,
            meta,
            extra: map,
        })
    }

    /// Encodes the payload back into the single JSON object the server stores.
    pub fn to_wire(&self) -> Value {
        let mut map = self.extra.clone();

        match self.content() {
            BlockContent::Text(text) => {
                map.insert("text".into(), Value::String(text.text.clone()));
            }
            BlockContent::Todo(todo) => {
                map.insert("items".into(), serde_json::json!(todo.items));
            }
            BlockContent::Table(table) => {
                map.insert("columns".into(), serde_json::json!(table.columns));
                map.insert("rows".into(), serde_json::json!(table.rows));
            }
            BlockContent::Calendar => {}
        }

        if let Some(collapsed) = self.meta.collapsed {
            map.insert("collapsed".into(), Value::Bool(collapsed));
        }
        if let Some(title) = &self.meta.title {
            map.insert("title".into(), Value::String(title.clone()));
        }
        if self.meta.size.is_some() || !self.meta.layout_extra.is_empty() {
            let mut layout = self.meta.layout_extra.clone();
            if let Some(size) = self.meta.size {
                layout.insert("size".into(), serde_json::json!(size));
            }
            map.insert("layout".into(), Value::Object(layout));
        }

        Value::Object(map)
    }
}

/// Scalars become their JSON text, `null` and containers become `""`.
fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Decodes one todo item, or `None` for a non-object entry. An item without a
/// usable id gets a fresh one so toggles and removals can still address it.
fn todo_item(value: Value) -> Option<TodoItem> {
    let Value::Object(mut item) = value else {
        return None;
    };
    let id = item.remove("id").map(cell_text).unwrap_or_default();
    Some(TodoItem {
        id: if id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            id
        },
        text: item.remove("text").map(cell_text).unwrap_or_default(),
        done: item.get("done").and_then(Value::as_bool).unwrap_or(false),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireBlock", into = "WireBlock")]
pub struct Block {
    pub id: Uuid,
    pub position: i64,
    pub data: BlockData,
}

impl Block {
    pub fn kind(&self) -> BlockType {
        self.data.kind()
    }

    pub fn label(&self) -> &'static str {
        self.kind().label()
    }

    /// The user-set title, falling back to the type label.
    pub fn display_title(&self) -> &str {
        self.data.meta.title.as_deref().unwrap_or_else(|| self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireBlock {
    id: Uuid,
    #[serde(rename = "type")]
    kind: BlockType,
    position: i64,
    #[serde(default)]
    data: Value,
}

impl TryFrom<WireBlock> for Block {
    type Error = BlocknoteError;

    fn try_from(wire: WireBlock) -> Result<Self> {
        Ok(Block {
            id: wire.id,
            position: wire.position,
            data: BlockData::from_wire(wire.kind, wire.data)?,
        })
    }
}

impl From<Block> for WireBlock {
    fn from(block: Block) -> Self {
        WireBlock {
            id: block.id,
            kind: block.kind(),
            position: block.position,
            data: block.data.to_wire(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Note {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            created_at: now,
            updated_at: now,
            blocks: Vec::new(),
        }
    }

    pub fn block(&self, id: &Uuid) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    /// Blocks in display order.
    pub fn sorted_blocks(&self) -> Vec<Block> {
        let mut blocks = self.blocks.clone();
        sort_blocks(&mut blocks);
        blocks
    }

    /// Position for a block appended after every existing one.
    ///
    /// Gaps and duplicates are left alone; positions are never compacted.
    pub fn next_position(&self) -> i64 {
        self.blocks
            .iter()
            .map(|b| b.position)
            .max()
            .map_or(0, |max| max + 1)
    }

    /// Dashboard preview: the text of the first block when it is a text block.
    pub fn preview(&self) -> Option<&str> {
        let first = self.blocks.iter().min_by_key(|b| b.position);
        match first.map(|b| b.data.content()) {
            Some(BlockContent::Text(text)) => Some(text.text.as_str()),
            _ => None,
        }
    }
}

/// Stable ascending sort by `position`. Ties keep their relative order.
pub fn sort_blocks(blocks: &mut [Block]) {
    blocks.sort_by_key(|b| b.position);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block_at(position: i64) -> Block {
        Block {
            id: Uuid::new_v4(),
            position,
            data: BlockData::default_for(BlockType::Text),
        }
    }

    #[test]
    fn test_sorted_blocks_orders_by_position() {
        let mut note = Note::new("Sorting");
        note.blocks = vec![block_at(0), block_at(2), block_at(1)];

        let positions: Vec<i64> = note.sorted_blocks().iter().map(|b| b.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let a = block_at(1);
        let b = block_at(0);
        let c = block_at(1);
        let mut blocks = vec![a.clone(), b.clone(), c.clone()];

        sort_blocks(&mut blocks);
        let once: Vec<Uuid> = blocks.iter().map(|b| b.id).collect();
        assert_eq!(once, vec![b.id, a.id, c.id]);

        sort_blocks(&mut blocks);
        let twice: Vec<Uuid> = blocks.iter().map(|b| b.id).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_next_position() {
        let mut note = Note::new("Positions");
        assert_eq!(note.next_position(), 0);

        note.blocks = vec![block_at(0), block_at(7), block_at(3)];
        assert_eq!(note.next_position(), 8);

        note.blocks = vec![block_at(0)];
        assert_eq!(note.next_position(), 1);
    }

    #[test]
    fn test_default_table_payload() {
        let data = BlockData::default_for(BlockType::Table);
        match data.content() {
            BlockContent::Table(table) => {
                assert_eq!(table.columns, vec!["Column 1", "Column 2"]);
                assert!(table.rows.is_empty());
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_lenient_decoding_of_missing_fields() {
        let text = BlockData::from_wire(BlockType::Text, json!({})).unwrap();
        assert_eq!(text.content(), &BlockContent::Text(TextData::default()));

        let todo = BlockData::from_wire(BlockType::Todo, json!({"items": "nope"})).unwrap();
        assert_eq!(todo.content(), &BlockContent::Todo(TodoData::default()));

        let table = BlockData::from_wire(BlockType::Table, Value::Null).unwrap();
        assert_eq!(table.content(), &BlockContent::Table(TableData::default()));
    }

    #[test]
    fn test_malformed_items_and_cells_are_coerced() {
        let todo = BlockData::from_wire(
            BlockType::Todo,
            json!({"items": [{"id": 1, "text": null}, {"text": "no id", "done": "yes"}, "stray"]}),
        )
        .unwrap();
        match todo.content() {
            BlockContent::Todo(t) => {
                assert_eq!(t.items.len(), 2);
                assert_eq!(t.items[0].id, "1");
                assert_eq!(t.items[0].text, "");
                assert!(!t.items[0].done);
                assert!(!t.items[1].id.is_empty());
                assert_eq!(t.items[1].text, "no id");
                assert!(!t.items[1].done);
            }
            other => panic!("expected todo, got {:?}", other),
        }

        let table = BlockData::from_wire(
            BlockType::Table,
            json!({"columns": ["a", 2], "rows": [[3], null, [true, null]]}),
        )
        .unwrap();
        match table.content() {
            BlockContent::Table(t) => {
                assert_eq!(t.columns, vec!["a", "2"]);
                assert_eq!(t.rows, vec![vec!["3", ""], vec!["", ""], vec!["true", ""]]);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_note_with_malformed_block_still_decodes() {
        let raw = json!({
            "id": Uuid::new_v4(),
            "title": "Mixed",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z",
            "blocks": [
                {"id": Uuid::new_v4(), "type": "todo", "position": 0, "data": {"items": [{"id": 1, "text": "milk"}]}},
                {"id": Uuid::new_v4(), "type": "table", "position": 1, "data": {"rows": [[3]]}}
            ]
        });
        let note: Note = serde_json::from_value(raw).unwrap();
        assert_eq!(note.blocks.len(), 2);
    }

    #[test]
    fn test_empty_columns_fall_back_to_defaults() {
        let data = BlockData::from_wire(BlockType::Table, json!({"columns": [], "rows": [["x"]]})).unwrap();
        match data.content() {
            BlockContent::Table(t) => {
                assert_eq!(t.columns, vec!["Column 1", "Column 2"]);
                assert_eq!(t.rows, vec![vec!["x", ""]]);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_table_rows_normalized_to_column_count() {
        let data = BlockData::from_wire(
            BlockType::Table,
            json!({"columns": ["a", "b", "c"], "rows": [["1"], ["1", "2", "3", "4"]]}),
        )
        .unwrap();

        match data.content() {
            BlockContent::Table(table) => {
                assert_eq!(table.rows[0], vec!["1", "", ""]);
                assert_eq!(table.rows[1], vec!["1", "2", "3"]);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_meta_and_unknown_keys_survive() {
        let raw = json!({
            "text": "hello",
            "collapsed": true,
            "title": "Intro",
            "layout": {"size": "half", "column": 2},
            "color": "blue"
        });
        let data = BlockData::from_wire(BlockType::Text, raw.clone()).unwrap();

        assert!(data.meta.is_collapsed());
        assert_eq!(data.meta.size(), BlockSize::Half);
        assert_eq!(data.meta.title.as_deref(), Some("Intro"));
        assert_eq!(data.extra.get("color"), Some(&json!("blue")));
        assert_eq!(data.to_wire(), raw);
    }

    #[test]
    fn test_absent_meta_is_not_written() {
        let data = BlockData::from_wire(BlockType::Text, json!({"text": "x"})).unwrap();
        assert_eq!(data.to_wire(), json!({"text": "x"}));
    }

    #[test]
    fn test_block_deserializes_from_wire_shape() {
        let id = Uuid::new_v4();
        let raw = json!({
            "id": id,
            "type": "todo",
            "position": 3,
            "data": {"items": [{"id": "a", "text": "milk", "done": false}]}
        });
        let block: Block = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(block.kind(), BlockType::Todo);
        assert_eq!(block.position, 3);
        assert_eq!(block.display_title(), "Todo list");
        assert_eq!(serde_json::to_value(&block).unwrap(), raw);
    }

    #[test]
    fn test_unknown_block_type_is_rejected() {
        let raw = json!({"id": Uuid::new_v4(), "type": "video", "position": 0, "data": {}});
        assert!(serde_json::from_value::<Block>(raw).is_err());
    }

    #[test]
    fn test_note_preview() {
        let mut note = Note::new("Preview");
        assert_eq!(note.preview(), None);

        let mut first = block_at(0);
        first.data = BlockData::new(BlockContent::Text(TextData {
            text: "first words".into(),
        }));
        note.blocks = vec![first];
        assert_eq!(note.preview(), Some("first words"));
    }

    #[test]
    fn test_block_type_parsing() {
        assert_eq!("Table".parse::<BlockType>().unwrap(), BlockType::Table);
        assert!("video".parse::<BlockType>().is_err());
        assert_eq!("half".parse::<BlockSize>().unwrap(), BlockSize::Half);
    }
}
