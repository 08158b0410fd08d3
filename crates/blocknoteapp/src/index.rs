//! # Note and Block Identifiers: UUID vs Display Index
//!
//! Notes and blocks are identified by UUIDs, which are the right technical choice
//! and miserable to type. Users instead refer to things by a 1-based display index:
//!
//! - **Notes** are numbered in dashboard order, newest first (`1` is the newest).
//! - **Blocks** are numbered in display order within their note, that is by
//!   ascending `position`.
//!
//! Anything that parses as a UUID is taken as one, so scripts can stay exact while
//! people use the short form.
//!
//! ## Implementation
//!
//! - [`Selector`]: parsed user reference (`Index(n)` or `Id(uuid)`)
//! - [`index_notes`] / [`index_blocks`]: attach display indexes
//! - [`DisplayNote`] / [`DisplayBlock`]: an item paired with its index
//!
//! **Developer Note**: list and view paths should always go through
//! [`index_notes`] / [`index_blocks`]. Enumerating by hand elsewhere breaks the
//! association between what was printed and what `delete 2` resolves to.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::BlocknoteError;
use crate::model::{Block, Note};

/// A user reference to a note or block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    Index(usize),
    Id(Uuid),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Index(i) => write!(f, "{}", i),
            Selector::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for Selector {
    type Err = BlocknoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = Uuid::parse_str(s) {
            return Ok(Selector::Id(id));
        }
        match s.parse::<usize>() {
            Ok(0) => Err(BlocknoteError::Api(
                "Indexes start at 1, got: 0".to_string(),
            )),
            Ok(n) => Ok(Selector::Index(n)),
            Err(_) => Err(BlocknoteError::Api(format!(
                "Expected an index or a UUID, got: {}",
                s
            ))),
        }
    }
}

impl Selector {
    fn matches(&self, index: usize, id: &Uuid) -> bool {
        match self {
            Selector::Index(i) => *i == index,
            Selector::Id(uuid) => uuid == id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayNote {
    pub index: usize,
    pub note: Note,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayBlock {
    pub index: usize,
    pub block: Block,
}

/// Numbers notes in the order given, which is the dashboard order.
pub fn index_notes(notes: Vec<Note>) -> Vec<DisplayNote> {
    notes
        .into_iter()
        .enumerate()
        .map(|(i, note)| DisplayNote { index: i + 1, note })
        .collect()
}

/// Numbers a note's blocks in display order.
pub fn index_blocks(note: &Note) -> Vec<DisplayBlock> {
    note.sorted_blocks()
        .into_iter()
        .enumerate()
        .map(|(i, block)| DisplayBlock {
            index: i + 1,
            block,
        })
        .collect()
}

pub fn find_note<'a>(notes: &'a [DisplayNote], selector: &Selector) -> Option<&'a DisplayNote> {
    notes
        .iter()
        .find(|dn| selector.matches(dn.index, &dn.note.id))
}

pub fn find_block<'a>(
    blocks: &'a [DisplayBlock],
    selector: &Selector,
) -> Option<&'a DisplayBlock> {
    blocks
        .iter()
        .find(|db| selector.matches(db.index, &db.block.id))
}
