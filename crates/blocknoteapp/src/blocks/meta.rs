//! Presentation edits shared by every block type: collapsed state, width and title.

use crate::model::{BlockMeta, BlockSize};

pub fn set_collapsed(meta: &BlockMeta, collapsed: bool) -> BlockMeta {
    BlockMeta {
        collapsed: Some(collapsed),
        ..meta.clone()
    }
}

pub fn toggle_collapsed(meta: &BlockMeta) -> BlockMeta {
    set_collapsed(meta, !meta.is_collapsed())
}

/// Sets `layout.size`, keeping any other layout keys.
pub fn set_size(meta: &BlockMeta, size: BlockSize) -> BlockMeta {
    BlockMeta {
        size: Some(size),
        ..meta.clone()
    }
}

pub fn set_title(meta: &BlockMeta, title: &str) -> BlockMeta {
    BlockMeta {
        title: Some(title.to_string()),
        ..meta.clone()
    }
}
