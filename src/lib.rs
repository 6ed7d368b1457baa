// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use application::{DetailState, DetailView, Document, FeedView, NotesApi, Route};
use domain::DomainError;
use infrastructure::{Config, ContentRenderer, HttpNotesApi};
use ports::{HtmlPresenter, Shell, TerminalPresenter};
use tracing::{debug, info};

use crate::cli::args::{Args, Command};

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting minix with arguments");

    let config_path = match args.config {
        Some(path) => {
            debug!(?path, "Using provided config path");
            path
        }
        None => Config::default_path().context("Could not find config directory")?,
    };

    if let Command::Config { init } = args.command {
        return show_config(&config_path, init, args.api_url, args.user, std::io::stdout());
    }

    let config = Config::load_or_default(&config_path)?.with_overrides(args.api_url, args.user);
    info!(base_url = %config.api.base_url, user_id = config.api.user_id, "Using notes service");

    // Initialize infrastructure
    let api = HttpNotesApi::new(&config.api.base_url, config.api.timeout())?;

    // Views run on a single thread and only yield at network calls
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let stdin = std::io::stdin();
    runtime.block_on(execute(
        args.command,
        &api,
        config.api.user_id,
        stdin.lock(),
        std::io::stdout(),
    ))
}

/// Run one command against `api`, reading shell input from `input` and
/// writing pages to `output`.
///
/// Remote failures are logged by the views and do not fail the command.
pub async fn execute<A, I, O>(
    command: Command,
    api: &A,
    user_id: i64,
    input: I,
    mut output: O,
) -> Result<()>
where
    A: NotesApi,
    I: BufRead,
    O: Write,
{
    let presenter = TerminalPresenter::new();
    let document = Document::new();

    match command {
        Command::Feed => {
            let mut shell = Shell::start(api, user_id).await;
            shell.run(input, output).await?;
        }
        Command::List { json, open } => {
            let feed = FeedView::mount(api, user_id, &document).await;
            if json {
                writeln!(output, "{}", serde_json::to_string_pretty(feed.notes())?)?;
            } else if open {
                open_page("feed.html", &HtmlPresenter::new().render_feed(&feed))?;
            } else {
                write!(output, "{}", presenter.render_feed(&feed))?;
            }
        }
        Command::View { target, json, open } => {
            let route = parse_note_target(&target)?;
            info!(%route, "Viewing note");
            let detail = DetailView::open(api, &route).await;
            if json {
                let note = match detail.state() {
                    DetailState::Loaded(note) => Some(note),
                    DetailState::Loading | DetailState::NotFound => None,
                };
                writeln!(output, "{}", serde_json::to_string_pretty(&note)?)?;
            } else if open {
                open_page("note.html", &HtmlPresenter::new().render_detail(&detail))?;
            } else {
                write!(output, "{}", presenter.render_detail(&detail))?;
            }
        }
        Command::Add { text } => {
            let mut feed = FeedView::mount(api, user_id, &document).await;
            feed.set_composer(text.join(" "));
            feed.submit_create().await;
            write!(output, "{}", presenter.render_feed(&feed))?;
        }
        Command::Edit { note_id, text } => {
            let mut feed = FeedView::mount(api, user_id, &document).await;
            if !feed.begin_edit(note_id) {
                return Err(DomainError::NoteNotFound(note_id).into());
            }
            match text {
                None => writeln!(output, "{}", feed.edit_draft())?,
                Some(text) => {
                    feed.set_edit_draft(text);
                    feed.submit_edit().await;
                    write!(output, "{}", presenter.render_feed(&feed))?;
                }
            }
        }
        Command::Delete { note_id } => {
            let mut feed = FeedView::mount(api, user_id, &document).await;
            info!(note_id, "Deleting note");
            feed.delete(note_id).await;
            write!(output, "{}", presenter.render_feed(&feed))?;
        }
        Command::Config { .. } => bail!("config is handled before connecting"),
    }
    Ok(())
}

/// Accept either a bare note id or a `/view/<id>` path.
pub fn parse_note_target(target: &str) -> Result<Route> {
    let route = if target.starts_with('/') {
        Route::parse(target)
    } else {
        Route::Detail {
            id: target.trim().to_string(),
        }
    };
    match route {
        Route::Detail { .. } => Ok(route),
        Route::Feed | Route::Unknown(_) => bail!("Not a note path: {}", target),
    }
}

pub fn show_config<O: Write>(
    path: &Path,
    init: bool,
    api_url: Option<String>,
    user: Option<i64>,
    mut output: O,
) -> Result<()> {
    if init {
        if path.exists() {
            bail!("Config file already exists: {}", path.display());
        }
        Config::create_default(path)?;
        writeln!(output, "Wrote {}", path.display())?;
        return Ok(());
    }
    let config = Config::load_or_default(path)?.with_overrides(api_url, user);
    writeln!(output, "# {}", path.display())?;
    write!(output, "{}", config.to_toml()?)?;
    Ok(())
}

fn open_page(name: &str, html: &str) -> Result<()> {
    let mut renderer = ContentRenderer::new();
    let path = renderer.create_temp_file(name, html)?;
    debug!(?path, "Wrote page");
    renderer.open_in_browser(&path)
}
