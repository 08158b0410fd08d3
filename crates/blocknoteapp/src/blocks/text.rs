use crate::model::TextData;

/// A text block has a single body; an edit replaces it wholesale.
pub fn set_text(text: &str) -> TextData {
    TextData {
        text: text.to_string(),
    }
}
