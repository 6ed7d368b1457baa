// src/application/mod.rs
pub mod detail;
pub mod document;
pub mod feed;
pub mod notes_api;
pub mod route;

pub use detail::{DetailState, DetailView};
pub use document::{Document, PointerDown, PointerListener, Target};
pub use feed::{FeedView, LoadTicket};
pub use notes_api::NotesApi;
pub use route::Route;

/// How a view handler settled.
///
/// Remote failures never escape a view; they are logged and reported here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Applied,
    Failed,
    /// Nothing to do, no request was sent.
    Skipped,
    /// A newer request superseded this one; its result was discarded.
    Stale,
}
