//! Cursorline - an interactive shell built on the cursorline editor.
//!
//! # Usage
//!
//! ```bash
//! cursorline
//! cursorline --border --banner "Welcome" --complete help --complete history
//! cursorline --scroll --prompt "> " --save
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cursorline::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use cursorline::session::{
    AbortReason, DEFAULT_HISTORY_LIMIT, DEFAULT_PROMPT, LineEditor, Outcome, ReadOptions,
};
use cursorline::surface::{RawModeGuard, Surface, TerminalEvents, TerminalSurface};

const COMMANDS: [&str; 4] = ["help", "history", "clear", "exit"];

/// A small interactive shell demonstrating the cursorline editor
#[derive(Parser, Debug)]
#[command(name = "cursorline", version, about, long_about = None)]
struct Cli {
    /// Draw a box around the screen
    #[arg(long)]
    border: bool,

    /// Allow Ctrl-Up/Ctrl-Down to scroll back through earlier rows
    #[arg(long)]
    scroll: bool,

    /// Prompt shown before each line
    #[arg(long, value_name = "TEXT")]
    prompt: Option<String>,

    /// Banner shown on the first row
    #[arg(long, value_name = "TEXT")]
    banner: Option<String>,

    /// Extra word offered by Tab completion (repeatable)
    #[arg(long, value_name = "WORD")]
    complete: Vec<String>,

    /// Maximum number of remembered lines
    #[arg(long, value_name = "N")]
    history_limit: Option<usize>,

    /// Write debug logs to a file (filtered by RUST_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl From<&Cli> for ConfigFlags {
    fn from(cli: &Cli) -> Self {
        Self {
            border: cli.border,
            scroll: cli.scroll,
            prompt: cli.prompt.clone(),
            banner: cli.banner.clone(),
            complete: cli.complete.clone(),
            history_limit: cli.history_limit,
            log_file: cli.log_file.clone(),
        }
    }
}

// The terminal is in raw mode on the alternate screen for the whole run, so
// log lines go to a file or nowhere.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false);
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::sink).init(),
    }
    Ok(())
}

fn build_editor(flags: &ConfigFlags) -> LineEditor {
    let words = COMMANDS
        .iter()
        .map(ToString::to_string)
        .chain(flags.complete.iter().cloned());
    LineEditor::new()
        .with_border(flags.border)
        .with_prompt(flags.prompt.as_deref().unwrap_or(DEFAULT_PROMPT))
        .with_banner(flags.banner.clone().unwrap_or_default())
        .with_completions(words)
        .with_history_limit(flags.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
}

/// What the shell does after a committed line.
enum Flow {
    Continue,
    Exit,
}

fn run_command(
    editor: &mut LineEditor,
    surface: &mut TerminalSurface<std::io::Stdout>,
    line: &str,
) -> Result<Flow> {
    match line.trim() {
        "" => {}
        "exit" => return Ok(Flow::Exit),
        "help" => {
            let help = [
                "commands: help, history, clear, exit",
                "Tab completes, Up/Down browse history",
                "Ctrl-Up/Ctrl-Down scroll (with --scroll)",
                "Ctrl-C discards the line, Ctrl-D quits",
            ];
            for text in help {
                editor.write_line(surface, text)?;
            }
        }
        "history" => {
            let lines: Vec<String> = editor
                .history()
                .iter()
                .enumerate()
                .map(|(i, line)| format!("{:>4}  {line}", i + 1))
                .collect();
            for text in &lines {
                editor.write_line(surface, text)?;
            }
        }
        "clear" => {
            let (rows, cols) = surface.size();
            surface.reset(rows, cols);
            editor.begin(surface)?;
        }
        other => editor.write_line(surface, other)?,
    }
    Ok(Flow::Continue)
}

fn run_shell(editor: &mut LineEditor, options: ReadOptions) -> Result<()> {
    let _guard = RawModeGuard::enter().context("Failed to enter raw mode")?;
    let mut surface = TerminalSurface::stdout().context("Failed to query terminal size")?;
    let mut events = TerminalEvents;
    editor.begin(&mut surface)?;

    loop {
        match editor.read_line(&mut surface, &mut events, options)? {
            Outcome::Committed(line) => {
                editor.newline(&mut surface)?;
                if let Flow::Exit = run_command(editor, &mut surface, &line)? {
                    break;
                }
            }
            Outcome::Aborted(AbortReason::Interrupt) => editor.newline(&mut surface)?,
            Outcome::Aborted(AbortReason::EndOfInput) => break,
            Outcome::Aborted(AbortReason::Resize) => {
                surface
                    .refresh_size()
                    .context("Failed to query terminal size")?;
                editor.begin(&mut surface)?;
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = ConfigFlags::from(&cli);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::debug!(?effective, "starting shell");

    let mut editor = build_editor(&effective);
    let options = ReadOptions {
        scroll: effective.scroll,
        clear: false,
    };
    run_shell(&mut editor, options).context("Shell error")
}
