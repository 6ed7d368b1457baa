// src/ports/terminal.rs
use crate::application::{DetailState, DetailView, FeedView, NotesApi, Route};
use crate::constants::{
    APP_TAGLINE, APP_TITLE, EMPTY_FEED_MESSAGE, LOADING_MESSAGE, NOTE_NOT_FOUND_MESSAGE,
};
use crate::domain::Note;

/// Plain-text rendering of the two pages.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn render_feed<R: NotesApi>(&self, view: &FeedView<R>) -> String {
        if view.is_loading() {
            return format!("{}\n", LOADING_MESSAGE);
        }

        let mut out = header();
        out.push_str("Add Notes\n");
        if view.composer().is_empty() {
            out.push_str("> Write your own words...\n");
        } else {
            out.push_str(&format!("> {}\n", view.composer()));
        }
        out.push('\n');

        if view.notes().is_empty() {
            out.push_str(&format!("{}\n", EMPTY_FEED_MESSAGE));
            return out;
        }

        for note in view.notes() {
            out.push_str(&format!("[{}] @{}  ⋮\n", note.id, note.username));
            if view.is_menu_open(note.id) {
                out.push_str(&format!("    View ({}) | Edit | Delete\n", Route::detail(note.id)));
            }
            if view.editing() == Some(note.id) {
                for line in view.edit_draft().split('\n') {
                    out.push_str(&format!("  edit> {}\n", line));
                }
                out.push_str("  [save] [cancel]\n");
            } else {
                for line in note.body_lines() {
                    out.push_str(&format!("  {}\n", line));
                }
            }
            if view.tags_visible(note.id) {
                out.push_str(&chip_line(note));
            }
            out.push_str(&format!("  {}\n", note.time));
            out.push('\n');
        }
        out
    }

    pub fn render_detail<R: NotesApi>(&self, view: &DetailView<R>) -> String {
        let note = match view.state() {
            DetailState::Loading => return format!("{}\n", LOADING_MESSAGE),
            DetailState::NotFound => return format!("{}\n", NOTE_NOT_FOUND_MESSAGE),
            DetailState::Loaded(note) => note,
        };

        let mut out = header();
        out.push_str(&format!("@{}\n{}\n", note.username, note.notes));
        out.push_str(&chip_line(note));
        out.push_str(&format!("{}\n\n", note.time));
        out.push_str(&format!("Back home ({})\n", Route::Feed));
        out
    }
}

fn header() -> String {
    format!("{}\n{}\n\n", APP_TITLE, APP_TAGLINE)
}

/// One indented line of `[chip]` labels, or nothing for an untagged note.
fn chip_line(note: &Note) -> String {
    let chips = note.tag_chips();
    if chips.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = chips.iter().map(|chip| format!("[{}]", chip)).collect();
    format!("  {}\n", rendered.join(" "))
}
