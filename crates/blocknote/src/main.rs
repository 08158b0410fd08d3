//! # Blocknote CLI
//!
//! A command-line client for a block-based notes service. The binary is thin: the
//! CLI lives in `src/cli/`, this file only invokes `cli::run()` and handles process
//! termination.
//!
//! ## Workspace Structure
//!
//! - `crates/blocknoteapp/`: UI-agnostic library (backend client, editor, commands)
//! - `crates/blocknote/`: this CLI, a client of the library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/blocknote/src/cli/)                      │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal rendering (render.rs)                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/blocknoteapp/src/api.rs)                 │
//! │  - Parses note/block references into selectors              │
//! │  - Dispatches to commands, hands out editors                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands, Editor, Backend (crates/blocknoteapp/src/*)      │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! - **Library**: command, editor and backend tests against the in-memory backend;
//!   HTTP contract tests against a stub server.
//! - **CLI**: argument parsing and rendering unit tests in `src/cli/`, plus
//!   `tests/` driving the built binary through `assert_cmd`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
