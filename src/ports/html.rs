// src/ports/html.rs
use crate::application::{DetailState, DetailView, FeedView, NotesApi, Route};
use crate::constants::{
    APP_TAGLINE, APP_TITLE, EMPTY_FEED_MESSAGE, LOADING_MESSAGE, NOTE_NOT_FOUND_MESSAGE,
};
use crate::domain::Note;
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::instrument;

const STYLE: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            max-width: 640px;
            margin: 2rem auto;
            padding: 0 1rem;
            background-color: #f5f5f5;
        }
        .box {
            background: white;
            border-radius: 8px;
            padding: 1rem 1.5rem;
            margin-bottom: 1rem;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        .content p {
            margin: 0;
        }
        .tags {
            margin-top: 0.5rem;
        }
        .tag {
            display: inline-block;
            background: #e9ecef;
            padding: 2px 8px;
            border-radius: 4px;
            margin-right: 4px;
            font-size: 0.8em;
        }
        footer {
            margin-top: 0.5rem;
            color: #666;
        }
"#;

/// Standalone HTML pages for the feed and a single note.
#[derive(Debug, Default)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    #[instrument(level = "trace", skip_all)]
    pub fn render_feed<R: NotesApi>(&self, view: &FeedView<R>) -> String {
        if view.is_loading() {
            return page(&format!("<p>{}</p>", LOADING_MESSAGE));
        }
        let cards = if view.notes().is_empty() {
            format!("<p>{}</p>", EMPTY_FEED_MESSAGE)
        } else {
            view.notes()
                .iter()
                .map(|note| {
                    let paragraphs: String = note
                        .body_lines()
                        .map(|line| format!("<p>{}<br></p>", encode_text(line)))
                        .collect();
                    format!(
                        r#"<div class="box">
    <h4><a href="{link}">@{username}</a></h4>
    <div class="content">{paragraphs}</div>
    {tags}
    <footer><small>{time}</small></footer>
</div>"#,
                        link = encode_double_quoted_attribute(&Route::detail(note.id).to_string()),
                        username = encode_text(&note.username),
                        paragraphs = paragraphs,
                        tags = if view.tags_visible(note.id) { chips(note) } else { String::new() },
                        time = encode_text(&note.time),
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };
        page(&cards)
    }

    #[instrument(level = "trace", skip_all)]
    pub fn render_detail<R: NotesApi>(&self, view: &DetailView<R>) -> String {
        let note = match view.state() {
            DetailState::Loading => return page(&format!("<p>{}</p>", LOADING_MESSAGE)),
            DetailState::NotFound => return page(&format!("<p>{}</p>", NOTE_NOT_FOUND_MESSAGE)),
            DetailState::Loaded(note) => note,
        };
        page(&format!(
            r#"<div class="box">
    <h4>@{username}</h4>
    <div class="content">{body}</div>
    {tags}
    <footer><small>{time}</small></footer>
    <br>
    <center><a href="{home}">Back home</a></center>
</div>"#,
            username = encode_text(&note.username),
            body = encode_text(&note.notes),
            tags = chips(note),
            time = encode_text(&note.time),
            home = Route::Feed,
        ))
    }
}

fn chips(note: &Note) -> String {
    let chips: String = note
        .tag_chips()
        .into_iter()
        .map(|tag| format!(r#"<div class="tag">{}</div>"#, encode_text(tag)))
        .collect();
    format!(r#"<div class="tags">{}</div>"#, chips)
}

fn page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
    <center>
        <h1>{title}</h1>
        <p>{tagline}</p>
    </center>
{body}
</body>
</html>"#,
        title = APP_TITLE,
        tagline = APP_TAGLINE,
        style = STYLE,
        body = body,
    )
}
