// src/ports/shell.rs
//
// Line-oriented driver for the two views. Every input line is one user
// gesture; the current page is re-rendered after each one.
use crate::application::{DetailView, Document, FeedView, NotesApi, Route, Settled, Target};
use crate::ports::TerminalPresenter;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::debug;

const HELP: &str = "\
Feed:
  post <text>     write a note and save it
  draft <text>    put text in the composer
  submit          save the composer text
  menu <id>       toggle the ⋮ menu of a note
  view <id>       open a note
  edit <id>       edit a note inline
  set <text>      replace the edit text (\\n for a line break)
  save | cancel   finish editing
  delete <id>     delete a note
  click           click outside every menu
  refresh         reload the feed
Anywhere:
  open <path>     go to / or /view/<id>
  back            return to the feed
  help | quit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Post(String),
    Draft(String),
    Submit,
    Menu(i64),
    View(i64),
    Edit(i64),
    Set(String),
    Save,
    Cancel,
    Delete(i64),
    Click,
    Refresh,
    Open(String),
    Back,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_start()),
            None => (line, ""),
        };
        let id = || {
            rest.trim()
                .parse::<i64>()
                .map_err(|_| format!("'{}' expects a note id", word))
        };
        Ok(match word {
            "post" => ShellCommand::Post(unescape(rest)),
            "draft" => ShellCommand::Draft(unescape(rest)),
            "submit" => ShellCommand::Submit,
            "menu" => ShellCommand::Menu(id()?),
            "view" => ShellCommand::View(id()?),
            "edit" => ShellCommand::Edit(id()?),
            "set" => ShellCommand::Set(unescape(rest)),
            "save" => ShellCommand::Save,
            "cancel" => ShellCommand::Cancel,
            "delete" => ShellCommand::Delete(id()?),
            "click" => ShellCommand::Click,
            "refresh" => ShellCommand::Refresh,
            "open" => ShellCommand::Open(rest.trim().to_string()),
            "back" => ShellCommand::Back,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            "" => return Err("empty command".to_string()),
            other => return Err(format!("unknown command '{}', try 'help'", other)),
        })
    }

    /// The pointer-down this gesture produces on the feed page, if any.
    fn pointer_target(&self) -> Option<Target> {
        match self {
            ShellCommand::Menu(id)
            | ShellCommand::View(id)
            | ShellCommand::Edit(id)
            | ShellCommand::Delete(id) => Some(Target::Menu(*id)),
            ShellCommand::Help | ShellCommand::Quit | ShellCommand::Back => None,
            _ => Some(Target::Outside),
        }
    }
}

fn unescape(text: &str) -> String {
    text.replace("\\n", "\n")
}

enum Page<'a, A: NotesApi> {
    Feed(FeedView<&'a A>),
    Detail(DetailView<&'a A>),
}

pub struct Shell<'a, A: NotesApi> {
    api: &'a A,
    user_id: i64,
    document: Document,
    presenter: TerminalPresenter,
    page: Option<Page<'a, A>>,
}

impl<'a, A: NotesApi> Shell<'a, A> {
    /// Start on the feed page.
    pub async fn start(api: &'a A, user_id: i64) -> Self {
        let document = Document::new();
        let feed = FeedView::mount(api, user_id, &document).await;
        Self {
            api,
            user_id,
            document,
            presenter: TerminalPresenter::new(),
            page: Some(Page::Feed(feed)),
        }
    }

    pub fn render(&self) -> String {
        match &self.page {
            Some(Page::Feed(feed)) => self.presenter.render_feed(feed),
            Some(Page::Detail(detail)) => self.presenter.render_detail(detail),
            None => String::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn feed(&self) -> Option<&FeedView<&'a A>> {
        match &self.page {
            Some(Page::Feed(feed)) => Some(feed),
            _ => None,
        }
    }

    /// Read commands until `quit` or end of input.
    pub async fn run<I: BufRead, O: Write>(&mut self, input: I, mut output: O) -> Result<()> {
        write!(output, "{}", self.render()).context("Failed to write output")?;
        for line in input.lines() {
            let line = line.context("Failed to read input")?;
            if line.trim().is_empty() {
                continue;
            }
            let command = match ShellCommand::parse(&line) {
                Ok(command) => command,
                Err(message) => {
                    writeln!(output, "{}", message)?;
                    continue;
                }
            };
            match command {
                ShellCommand::Quit => break,
                ShellCommand::Help => write!(output, "{}", HELP)?,
                command => {
                    if let Some(message) = self.execute(command).await {
                        writeln!(output, "{}", message)?;
                    }
                    write!(output, "{}", self.render())?;
                }
            }
            output.flush()?;
        }
        Ok(())
    }

    /// Apply one gesture. Returns a hint for the user when the gesture does
    /// not apply to the current page.
    pub async fn execute(&mut self, command: ShellCommand) -> Option<String> {
        debug!(?command, "Shell command");
        match command {
            ShellCommand::Back => return self.navigate(Route::Feed).await,
            ShellCommand::Open(path) => return self.navigate(Route::parse(&path)).await,
            _ => {}
        }

        let target = command.pointer_target();
        let Some(Page::Feed(feed)) = &mut self.page else {
            return Some("Not available on this page, use 'back'".to_string());
        };
        if let Some(target) = target {
            self.document.pointer_down(target);
            feed.pump_pointer_events();
        }

        match command {
            ShellCommand::Post(text) => {
                feed.set_composer(text);
                settled_hint(feed.submit_create().await)
            }
            ShellCommand::Draft(text) => {
                feed.set_composer(text);
                None
            }
            ShellCommand::Submit => settled_hint(feed.submit_create().await),
            ShellCommand::Menu(id) => {
                feed.toggle_menu(id);
                None
            }
            ShellCommand::View(id) => self.navigate(Route::detail(id)).await,
            ShellCommand::Edit(id) => {
                if feed.begin_edit(id) {
                    None
                } else {
                    Some(format!("No note {} in the feed", id))
                }
            }
            ShellCommand::Set(text) => {
                if feed.editing().is_none() {
                    return Some("Not editing a note".to_string());
                }
                feed.set_edit_draft(text);
                None
            }
            ShellCommand::Save => settled_hint(feed.submit_edit().await),
            ShellCommand::Cancel => {
                feed.cancel_edit();
                None
            }
            ShellCommand::Delete(id) => settled_hint(feed.delete(id).await),
            ShellCommand::Refresh => settled_hint(feed.load().await),
            ShellCommand::Click
            | ShellCommand::Back
            | ShellCommand::Open(_)
            | ShellCommand::Help
            | ShellCommand::Quit => None,
        }
    }

    async fn navigate(&mut self, route: Route) -> Option<String> {
        debug!(%route, "Navigating");
        match route {
            Route::Feed => {
                self.unmount_page();
                let feed = FeedView::mount(self.api, self.user_id, &self.document).await;
                self.page = Some(Page::Feed(feed));
                None
            }
            Route::Detail { .. } => {
                self.unmount_page();
                self.page = Some(Page::Detail(DetailView::open(self.api, &route).await));
                None
            }
            Route::Unknown(path) => Some(format!("No page at {}", path)),
        }
    }

    /// The feed's pointer listener is released before the next page mounts.
    fn unmount_page(&mut self) {
        match self.page.take() {
            Some(Page::Feed(feed)) => feed.unmount(),
            Some(Page::Detail(_)) | None => {}
        }
    }
}

fn settled_hint(settled: Settled) -> Option<String> {
    match settled {
        Settled::Skipped => Some("Nothing to save".to_string()),
        Settled::Applied | Settled::Failed | Settled::Stale => None,
    }
}
