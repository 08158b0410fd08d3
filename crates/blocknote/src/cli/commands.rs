//! # CLI Layer
//!
//! This module is **one possible UI client** for blocknote, not the application.
//!
//! It is the **only** place in the workspace that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the `tracing` subscriber
//! - Owns the async runtime
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: shell arguments into typed commands via clap
//! 2. **Context Setup**: logging, configuration layers, the HTTP backend and the API
//! 3. **Dispatch**: route each command to the matching API call
//! 4. **Output Formatting**: text via `render`, or the raw `CmdResult` as JSON
//!
//! Errors travel back to `main`, which prints `Error: ...` and exits with 1.

use super::render::{render_block, render_config, render_messages, render_note, render_note_list};
use super::setup::{build_command, Cli, Commands, CompletionShell, OutputFormat};
use anyhow::{Context, Result};
use blocknoteapp::api::BlocknoteApi;
use blocknoteapp::backend::http::HttpBackend;
use blocknoteapp::commands::CmdResult;
use blocknoteapp::config::BlocknoteConfig;
use clap::Parser;
use clap_complete::Shell;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::List);

    if let Commands::Completions { shell } = &command {
        print_completions(*shell);
        return Ok(());
    }

    let config = load_config(cli.api_base.as_deref(), cli.config.as_deref())?;
    debug!(api_base = %config.api_base, "configuration loaded");

    if let Commands::Config = command {
        match cli.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
            OutputFormat::Text => print!("{}", render_config(&config)),
        }
        return Ok(());
    }

    let is_view = matches!(command, Commands::View { .. });
    let backend = HttpBackend::from_config(&config)?;
    let api = BlocknoteApi::new(Arc::new(backend), config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    let result = runtime.block_on(dispatch(&api, command))?;

    print!("{}", render_result(&result, is_view, cli.output)?);
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(verbose)
        .with_writer(std::io::stderr);

    // A second init (tests calling run twice) is harmless.
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
}

/// Flag over env over file over defaults.
fn load_config(
    api_base: Option<&str>,
    file: Option<&std::path::Path>,
) -> Result<BlocknoteConfig> {
    let config = BlocknoteConfig::load(file)?;
    Ok(match api_base {
        Some(base) => config.with_api_base(base),
        None => config,
    })
}

async fn dispatch(api: &BlocknoteApi<HttpBackend>, command: Commands) -> Result<CmdResult> {
    let result = match command {
        Commands::List => api.list_notes().await?,
        Commands::Create { title } => api.create_note(&title.join(" ")).await?,
        Commands::View { note } => api.view_note(&note).await?,
        Commands::Delete { note } => api.delete_note(&note).await?,
        Commands::Add { note, kind } => api.add_block(&note, kind.into()).await?,
        Commands::Remove { note, block } => api.remove_block(&note, &block).await?,
        Commands::Edit { note, block, edit } => {
            let edit = edit.into_edit()?;
            api.edit_block(&note, &block, &edit).await?
        }
        Commands::Config | Commands::Completions { .. } => CmdResult::default(),
    };
    Ok(result)
}

fn render_result(result: &CmdResult, is_view: bool, output: OutputFormat) -> Result<String> {
    if output == OutputFormat::Json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(result)?));
    }

    let mut out = String::new();
    match result.listed_notes.first() {
        Some(note) if is_view => out.push_str(&render_note(note, &result.listed_blocks)),
        _ => out.push_str(&render_note_list(&result.listed_notes)),
    }
    for block in &result.affected_blocks {
        out.push_str(&render_block(block));
    }
    out.push_str(&render_messages(&result.messages));
    Ok(out)
}

fn print_completions(shell: CompletionShell) {
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Fish => Shell::Fish,
    };
    let mut cmd = build_command();
    clap_complete::generate(shell, &mut cmd, "blocknote", &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocknoteapp::commands::CmdMessage;
    use blocknoteapp::index::{index_notes, DisplayNote};
    use blocknoteapp::model::Note;

    #[test]
    fn test_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            load_config(Some("http://flag.test"), Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.api_base, "http://flag.test");
    }

    #[test]
    fn test_json_output_is_the_result() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success("done"));

        let out = render_result(&result, false, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["messages"][0]["level"], "success");
        assert_eq!(value["messages"][0]["content"], "done");
    }

    #[test]
    fn test_text_output_for_list_and_view() {
        let listed = CmdResult::default()
            .with_listed_notes(index_notes(vec![Note::new("One"), Note::new("Two")]));
        let out = console::strip_ansi_codes(&render_result(&listed, false, OutputFormat::Text).unwrap())
            .to_string();
        assert!(out.contains("1. One"));
        assert!(out.contains("2. Two"));

        let viewed = CmdResult::default().with_listed_notes(vec![DisplayNote {
            index: 1,
            note: Note::new("Solo"),
        }]);
        let out = console::strip_ansi_codes(&render_result(&viewed, true, OutputFormat::Text).unwrap())
            .to_string();
        assert!(out.contains("No blocks."));
    }
}
