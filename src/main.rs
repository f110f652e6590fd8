//! Relayed - a terminal code editor pane wired to an embedding host.
//!
//! # Usage
//!
//! ```bash
//! # Edit a file with the default setup
//! relayed src/lib.rs
//!
//! # No gutter, fixed eight-row pane
//! relayed --no-gutter --rows 8 src/lib.rs
//!
//! # Save the current flags as defaults
//! relayed --no-gutter --save src/lib.rs
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use relayed::app::App;
use relayed::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use relayed::editor::EditorOptions;
use relayed::form::{Field, Form};

/// A terminal code editor pane that relays edits to an embedding host
#[derive(Parser, Debug)]
#[command(name = "relayed", version, about, long_about = None)]
struct Cli {
    /// File to edit
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Hide the line-number gutter
    #[arg(long)]
    no_gutter: bool,

    /// Keep the pane at a fixed height instead of fitting the content
    #[arg(long)]
    fixed_height: bool,

    /// Pane height in rows (implies --fixed-height)
    #[arg(long, value_name = "N")]
    rows: Option<usize>,

    /// Do not register the Ctrl+S / Cmd+S save chord
    #[arg(long)]
    no_save_shortcut: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save the current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_tracing(log_file: Option<&std::path::Path>) -> Result<()> {
    if let Some(path) = log_file {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::WARN.into()),
            )
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args: Vec<String> = std::env::args().collect();
    let cli = Cli::parse();

    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    // Weakest layer first: global file, local rc file, then this command
    // line.
    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_tracing(effective.log_file.as_deref())?;

    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }

    // The form the host can reset; every control declares its default
    // right here.
    let form = Form::new(vec![
        Field::text("Title", "untitled"),
        Field::text("Language", "rust"),
        Field::checkbox("Autosave", false),
        Field::checkbox("Wrap lines", true),
    ]);

    let options = EditorOptions {
        auto_fit_height: !(effective.fixed_height || effective.rows.is_some()),
        save_shortcut: !effective.no_save_shortcut,
    };
    let mut app = App::new(cli.file)
        .with_gutter(!effective.no_gutter)
        .with_options(options)
        .with_form(form);
    if let Some(rows) = effective.rows {
        app = app.with_rows(rows);
    }

    app.run().context("Application error")
}
