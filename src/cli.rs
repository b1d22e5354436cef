use crate::command::{Command, HELP};
use crate::logging::{self, LogTarget, Verbosity};
use crate::model::Priority;
use crate::store::RecordStore;
use crate::view::{RowAction, TableView};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "ticket-tracker",
    version,
    about = "In-memory ticket tracker with a terminal UI"
)]
pub struct Cli {
    /// Read commands from stdin and print the table after every change (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Print JSON snapshots instead of tables (implies --text)
    #[arg(long)]
    pub json: bool,

    /// Priority preselected in the form and used by `add` when none is given
    #[arg(long, default_value = "medium")]
    pub default_priority: Priority,

    /// Write the final ticket list as JSON on exit
    #[arg(long)]
    pub export_json: Option<PathBuf>,

    /// Log file (TUI default: <cache dir>/ticket-tracker/ticket-tracker.log; text mode logs to stderr)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn text_mode(&self) -> bool {
        self.text || self.json || cfg!(not(feature = "tui"))
    }

    fn log_target(&self) -> LogTarget {
        match (&self.log_file, self.text_mode()) {
            (Some(p), _) => LogTarget::File(p.clone()),
            (None, true) => LogTarget::Stderr,
            (None, false) => LogTarget::File(logging::default_log_path()),
        }
    }
}

pub fn run(args: Cli) -> Result<()> {
    logging::init_logging(
        Verbosity::from_flags(args.quiet, args.verbose),
        &args.log_target(),
    )?;

    let store = if args.text_mode() {
        run_text(&args)?
    } else {
        run_tui(&args)?
    };

    if let Some(p) = args.export_json.as_deref() {
        crate::snapshot::write_json(p, store.list()).context("export tickets")?;
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn run_tui(args: &Cli) -> Result<RecordStore> {
    Ok(crate::tui::run(args)?.store)
}

#[cfg(not(feature = "tui"))]
fn run_tui(args: &Cli) -> Result<RecordStore> {
    run_text(args)
}

fn run_text(args: &Cli) -> Result<RecordStore> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut out = std::io::LineWriter::new(stdout.lock());
    let mut err = stderr.lock();
    run_session(args, stdin.lock(), &mut out, &mut err)
}

/// Drive a text session: one command per line, full re-render to `out`
/// after every command that may change the table.
pub(crate) fn run_session<R: BufRead, W: Write, E: Write>(
    args: &Cli,
    input: R,
    out: &mut W,
    err: &mut E,
) -> Result<RecordStore> {
    let mut store = RecordStore::new();

    for (lineno, line) in input.lines().enumerate() {
        let line = line.context("read command")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let cmd = match trimmed.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(e) => {
                tracing::debug!(line = lineno + 1, error = %e, "rejected command");
                writeln!(err, "line {}: {e}", lineno + 1).context("write stderr")?;
                continue;
            }
        };

        match cmd {
            Command::Add {
                title,
                description,
                priority,
            } => {
                store.create(title, description, priority.unwrap_or(args.default_priority));
            }
            Command::Resolve(id) => {
                RowAction::Resolve(id).apply(&mut store);
            }
            Command::Delete(id) => {
                RowAction::Delete(id).apply(&mut store);
            }
            Command::List => {}
            Command::Help => {
                for l in HELP {
                    writeln!(out, "{l}").context("write stdout")?;
                }
                continue;
            }
            Command::Quit => break,
        }

        render(args, &store, out)?;
    }

    out.flush().context("flush stdout")?;
    Ok(store)
}

fn render<W: Write>(args: &Cli, store: &RecordStore, out: &mut W) -> Result<()> {
    if args.json {
        let json = crate::text_view::build_json_snapshot(store.list())?;
        writeln!(out, "{json}").context("write stdout")?;
    } else {
        let table = crate::text_view::build_text_table(&TableView::from_store(store), store.counts());
        for line in table.lines {
            writeln!(out, "{line}").context("write stdout")?;
        }
        writeln!(out).context("write stdout")?;
    }
    Ok(())
}
