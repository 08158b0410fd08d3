//! # CLI Behavior
//!
//! This is **one possible UI client** for blocknote, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes and output
//! formatting.
//!
//! For the overall architecture, see the `blocknoteapp` crate documentation.
//!
//! ## Naked Execution
//!
//! Running `blocknote` with no arguments defaults to `blocknote list`.
//!
//! ## One Change per Invocation
//!
//! `add`, `remove` and `edit` each open the note in an editor session, make their
//! change and push it before exiting. Edits that a long-running client would
//! debounce are flushed right away, so nothing is lost when the process ends.
//!
//! ## References
//!
//! Notes are numbered newest first, blocks in display order, todo items, table rows
//! and columns from 1. A UUID is accepted wherever a note or block number is.
//!
//! ## Module Structure
//!
//! - `commands`: context setup, dispatch and printing
//! - `render`: output formatting (lists, blocks, messages)
//! - `setup`: argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
