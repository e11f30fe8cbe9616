pub mod config;
pub mod text;
pub mod watcher;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use quizlet_core::{parse_document, Group, ParseError};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::text::{create_document, load_text, save_text, DEMO_DOCUMENT, NEW_DOCUMENT};
use crate::watcher::DocumentWatcher;

/// Generate flashcard listings from Chinese vocabulary markup.
#[derive(Debug, Parser)]
#[command(name = "quizlet", version, about = "Generate flashcard listings from vocabulary markup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a markup file
    Render {
        /// Path to the markup file
        file: PathBuf,
        /// Save the rendered listing here instead of printing it
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print a JSON report with the parsed groups
        #[arg(long)]
        json: bool,
    },

    /// Re-render a markup file every time it changes
    Watch {
        /// Path to the markup file
        file: PathBuf,
    },

    /// Write a new markup file from the built-in template
    New {
        /// Destination; `.txt` is appended when missing
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the built-in demo document and its rendering
    Demo,
}

/// How a command finished, as far as the document is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Clean,
    /// The document was loaded but contains a markup error.
    DocumentError,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Clean => ExitCode::SUCCESS,
            Status::DocumentError => ExitCode::FAILURE,
        }
    }
}

/// JSON shape printed by `render --json`.
#[derive(Debug, Serialize)]
struct RenderReport<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    groups: Option<&'a [Group]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a ParseError>,
}

pub fn run() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_filter.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    execute(cli, &config, &mut stdout.lock()).map(ExitCode::from)
}

/// Run one command, writing user-facing output to `out`.
///
/// Returns [`Status::DocumentError`] when the rendered document contains an error.
pub fn execute(cli: Cli, config: &Config, out: &mut impl Write) -> anyhow::Result<Status> {
    match cli.command {
        Commands::Render { file, output, json } => render_file(&file, output, json, out),
        Commands::Watch { file } => watch_file(&file, config, out),
        Commands::New { path, force } => {
            let written = create_document(&path, NEW_DOCUMENT, force)?;
            tracing::info!(path = %written.display(), "created document");
            writeln!(out, "{}", written.display())?;
            Ok(Status::Clean)
        }
        Commands::Demo => {
            writeln!(out, "{DEMO_DOCUMENT}")?;
            write!(out, "{}", quizlet_core::render(DEMO_DOCUMENT))?;
            Ok(Status::Clean)
        }
    }
}

fn render_file(
    file: &Path,
    output: Option<PathBuf>,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<Status> {
    let text = load_text(file)?;
    let result = parse_document(&text);

    match &result {
        Ok(document) => tracing::info!(
            groups = document.groups.len(),
            terms = document.groups.iter().map(Group::len).sum::<usize>(),
            "rendered {}",
            file.display()
        ),
        Err(e) => tracing::warn!(line = e.line, "{}: {}", file.display(), e.kind),
    }

    if json {
        let report = match &result {
            Ok(document) => RenderReport {
                ok: true,
                output: Some(document.output.as_str()),
                groups: Some(document.groups.as_slice()),
                error: None,
            },
            Err(e) => RenderReport {
                ok: false,
                output: None,
                groups: None,
                error: Some(e),
            },
        };
        serde_json::to_writer_pretty(&mut *out, &report).context("failed to write JSON report")?;
        writeln!(out)?;
    } else {
        match (&result, output) {
            (Ok(document), Some(path)) => {
                save_text(&path, &document.output)?;
                tracing::info!(path = %path.display(), "saved listing");
            }
            (Ok(document), None) => write!(out, "{}", document.output)?,
            (Err(e), _) => writeln!(out, "{e}")?,
        }
    }

    Ok(if result.is_ok() {
        Status::Clean
    } else {
        Status::DocumentError
    })
}

fn watch_file(file: &Path, config: &Config, out: &mut impl Write) -> anyhow::Result<Status> {
    load_text(file)?;

    let watcher = DocumentWatcher::new(file, config)
        .with_context(|| format!("failed to watch {}", file.display()))?;
    watcher.run(|rendered| {
        writeln!(out, "{}", "=".repeat(60))?;
        write!(out, "{rendered}")?;
        out.flush()?;
        Ok(())
    })?;
    Ok(Status::Clean)
}
