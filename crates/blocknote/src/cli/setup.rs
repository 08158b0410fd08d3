use anyhow::{anyhow, Result};
use blocknoteapp::blocks::BlockEdit;
use blocknoteapp::model::{BlockSize, BlockType};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BlockKind {
    Text,
    Todo,
    Table,
    Calendar,
}

impl From<BlockKind> for BlockType {
    fn from(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Text => BlockType::Text,
            BlockKind::Todo => BlockType::Todo,
            BlockKind::Table => BlockType::Table,
            BlockKind::Calendar => BlockType::Calendar,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SizeArg {
    Full,
    Half,
}

impl From<SizeArg> for BlockSize {
    fn from(size: SizeArg) -> Self {
        match size {
            SizeArg::Full => BlockSize::Full,
            SizeArg::Half => BlockSize::Half,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "blocknote",
    bin_name = "blocknote",
    version,
    disable_help_subcommand = true,
    about = "Block-based notes from the command line",
    long_about = None,
    after_help = "Notes are numbered newest first (1 is the newest); blocks are numbered in display order.\nA UUID works anywhere a number does."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text, help_heading = "Options")]
    pub output: OutputFormat,

    /// Base URL of the notes service (overrides config and BLOCKNOTE_API_BASE)
    #[arg(long, global = true, value_name = "URL", help_heading = "Options")]
    pub api_base: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes, newest first
    #[command(alias = "ls", display_order = 1)]
    List,

    /// Create a note
    #[command(alias = "n", display_order = 2)]
    Create {
        /// Title words (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// Show a note and its blocks
    #[command(alias = "v", display_order = 3)]
    View {
        /// Note index or UUID
        note: String,
    },

    /// Delete a note and all of its blocks
    #[command(alias = "rm", display_order = 4)]
    Delete {
        /// Note index or UUID
        note: String,
    },

    /// Append a block to a note
    #[command(display_order = 10)]
    Add {
        /// Note index or UUID
        note: String,
        /// Block type
        #[arg(value_enum)]
        kind: BlockKind,
    },

    /// Remove a block from a note
    #[command(display_order = 11)]
    Remove {
        /// Note index or UUID
        note: String,
        /// Block index or UUID
        block: String,
    },

    /// Edit a block
    #[command(display_order = 12)]
    Edit {
        /// Note index or UUID
        note: String,
        /// Block index or UUID
        block: String,
        #[command(subcommand)]
        edit: EditCommand,
    },

    /// Print the resolved configuration
    #[command(display_order = 20)]
    Config,

    /// Print a shell completion script
    #[command(display_order = 21)]
    Completions {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

/// Block edits. Rows, columns and todo items are numbered from 1.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Replace the text of a text block
    Text { value: String },

    /// Add an item to a todo block
    TodoAdd {
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Check or uncheck a todo item (number or id)
    TodoToggle { item: String },

    /// Change the text of a todo item
    TodoText { item: String, text: String },

    /// Remove a todo item
    TodoRemove { item: String },

    /// Rename a table column
    Header { column: usize, text: String },

    /// Set a table cell
    Cell {
        row: usize,
        column: usize,
        text: String,
    },

    /// Append an empty table row
    AddRow,

    /// Append a table column
    AddColumn,

    /// Delete a table row
    DeleteRow { row: usize },

    /// Delete a table column (the last one stays)
    DeleteColumn { column: usize },

    /// Collapse the block
    Collapse,

    /// Expand the block
    Expand,

    /// Set the block width
    Size {
        #[arg(value_enum)]
        size: SizeArg,
    },

    /// Set the block title
    Title { text: String },
}

fn zero_based(n: usize, what: &str) -> Result<usize> {
    n.checked_sub(1)
        .ok_or_else(|| anyhow!("{} numbers start at 1", what))
}

impl EditCommand {
    pub fn into_edit(self) -> Result<BlockEdit> {
        Ok(match self {
            EditCommand::Text { value } => BlockEdit::SetText(value),
            EditCommand::TodoAdd { text } => BlockEdit::AddItem(text.join(" ")),
            EditCommand::TodoToggle { item } => BlockEdit::ToggleItem(item),
            EditCommand::TodoText { item, text } => BlockEdit::SetItemText { id: item, text },
            EditCommand::TodoRemove { item } => BlockEdit::RemoveItem(item),
            EditCommand::Header { column, text } => BlockEdit::SetHeader {
                column: zero_based(column, "Column")?,
                text,
            },
            EditCommand::Cell { row, column, text } => BlockEdit::SetCell {
                row: zero_based(row, "Row")?,
                column: zero_based(column, "Column")?,
                text,
            },
            EditCommand::AddRow => BlockEdit::AddRow,
            EditCommand::AddColumn => BlockEdit::AddColumn,
            EditCommand::DeleteRow { row } => BlockEdit::DeleteRow(zero_based(row, "Row")?),
            EditCommand::DeleteColumn { column } => {
                BlockEdit::DeleteColumn(zero_based(column, "Column")?)
            }
            EditCommand::Collapse => BlockEdit::SetCollapsed(true),
            EditCommand::Expand => BlockEdit::SetCollapsed(false),
            EditCommand::Size { size } => BlockEdit::SetSize(size.into()),
            EditCommand::Title { text } => BlockEdit::SetTitle(text),
        })
    }
}

/// Builds the clap Command, for completion generation.
pub fn build_command() -> clap::Command {
    Cli::command()
}
