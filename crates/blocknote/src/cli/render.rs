//! # Rendering Module
//!
//! Turns `CmdResult` pieces into terminal text. Every function returns a `String`
//! and never prints, so output can be tested without a terminal.
//!
//! Styling goes through `console`, which drops the escape codes when stdout is not
//! a terminal or `NO_COLOR` is set.
//!
//! ## List Layout
//!
//! Each dashboard line is `index. title  preview ... time_ago`, with the title and
//! preview truncated so the line fits [`LINE_WIDTH`] and the relative time
//! right-aligned in [`TIME_WIDTH`] columns.

use blocknoteapp::commands::{CmdMessage, MessageLevel};
use blocknoteapp::config::BlocknoteConfig;
use blocknoteapp::index::{DisplayBlock, DisplayNote};
use blocknoteapp::model::{BlockContent, BlockSize, TableData, TodoData};
use chrono::{DateTime, Utc};
use console::Style;
use std::fmt::Write;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
pub const EMPTY_PREVIEW: &str = "Empty note";

fn index_style() -> Style {
    Style::new().yellow()
}

fn muted() -> Style {
    Style::new().dim()
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let style = match message.level {
            MessageLevel::Info => muted(),
            MessageLevel::Success => Style::new().green(),
            MessageLevel::Warning => Style::new().yellow(),
            MessageLevel::Error => Style::new().red(),
        };
        let _ = writeln!(out, "{}", style.apply_to(&message.content));
    }
    out
}

pub fn render_note_list(notes: &[DisplayNote]) -> String {
    let mut out = String::new();
    for dn in notes {
        let idx = format!("{:>3}. ", dn.index);
        let preview = dn
            .note
            .preview()
            .map(|p| p.lines().next().unwrap_or("").trim())
            .filter(|p| !p.is_empty())
            .unwrap_or(EMPTY_PREVIEW);

        let available = LINE_WIDTH.saturating_sub(idx.width() + TIME_WIDTH);
        let title = truncate_to_width(&dn.note.title, available);
        let room = available.saturating_sub(title.width() + 2);
        let preview = if room > 3 {
            truncate_to_width(preview, room)
        } else {
            String::new()
        };
        let used = title.width() + if preview.is_empty() { 0 } else { preview.width() + 2 };
        let padding = available.saturating_sub(used);

        let _ = writeln!(
            out,
            "{}{}{}{}{}",
            index_style().apply_to(&idx),
            Style::new().bold().apply_to(&title),
            if preview.is_empty() {
                String::new()
            } else {
                format!("  {}", muted().apply_to(&preview))
            },
            " ".repeat(padding),
            muted().apply_to(format_time_ago(dn.note.updated_at))
        );
    }
    out
}

/// A note heading followed by each block in display order.
pub fn render_note(note: &DisplayNote, blocks: &[DisplayBlock]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        index_style().apply_to(format!("{}.", note.index)),
        Style::new().bold().apply_to(&note.note.title)
    );
    let _ = writeln!(out, "{}", muted().apply_to("-".repeat(32)));

    if blocks.is_empty() {
        let _ = writeln!(out, "{}", muted().apply_to("No blocks."));
    }
    for db in blocks {
        out.push('\n');
        out.push_str(&render_block(db));
    }
    out
}

pub fn render_block(db: &DisplayBlock) -> String {
    let block = &db.block;
    let meta = &block.data.meta;
    let mut out = String::new();

    let marker = if meta.is_collapsed() { "▸" } else { "▾" };
    let mut heading = format!("{} {}", marker, block.display_title());
    if block.data.meta.title.is_some() {
        let _ = write!(heading, " ({})", block.label());
    }
    if meta.size() == BlockSize::Half {
        heading.push_str(" · half");
    }
    let _ = writeln!(
        out,
        "{} {}",
        index_style().apply_to(format!("[{}]", db.index)),
        Style::new().bold().apply_to(heading)
    );

    if meta.is_collapsed() {
        return out;
    }

    let body = match block.data.content() {
        BlockContent::Text(text) if text.text.is_empty() => muted().apply_to("(empty)").to_string(),
        BlockContent::Text(text) => text.text.clone(),
        BlockContent::Todo(todo) => render_todo(todo),
        BlockContent::Table(table) => render_table(table),
        BlockContent::Calendar => muted().apply_to("(calendar)").to_string(),
    };
    for line in body.lines() {
        let _ = writeln!(out, "    {}", line);
    }
    out
}

fn render_todo(todo: &TodoData) -> String {
    if todo.items.is_empty() {
        return muted().apply_to("(no items)").to_string();
    }
    let mut out = String::new();
    for (i, item) in todo.items.iter().enumerate() {
        let check = if item.done { "[x]" } else { "[ ]" };
        let text = if item.done {
            muted().strikethrough().apply_to(&item.text).to_string()
        } else {
            item.text.clone()
        };
        let _ = writeln!(out, "{:>2}. {} {}", i + 1, check, text);
    }
    let _ = write!(
        out,
        "{}",
        muted().apply_to(format!("{} of {} left", todo.remaining(), todo.items.len()))
    );
    out
}

fn render_table(table: &TableData) -> String {
    let widths: Vec<usize> = (0..table.columns.len())
        .map(|c| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(c))
                .chain(std::iter::once(&table.columns[c]))
                .map(|cell| cell.width())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{}{}", cell, " ".repeat(w.saturating_sub(cell.width()))))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", Style::new().bold().apply_to(line(&table.columns)));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = write!(out, "{}", rule.join("-+-"));
    for row in &table.rows {
        let _ = write!(out, "\n{}", line(row));
    }
    out
}

pub fn render_config(config: &BlocknoteConfig) -> String {
    format!(
        "api_base = \"{}\"\nsave_debounce_ms = {}\nrequest_timeout_secs = {}\n",
        config.api_base, config.save_debounce_ms, config.request_timeout_secs
    )
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
