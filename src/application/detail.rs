// src/application/detail.rs
use crate::application::{NotesApi, Route, Settled};
use crate::domain::{DomainError, Note};
use tracing::{debug, error, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    NotFound,
    Loaded(Note),
}

/// Read-only page for a single note, keyed by the route's id segment.
pub struct DetailView<R: NotesApi> {
    api: R,
    note_id: Option<String>,
    state: DetailState,
    generation: u64,
}

impl<R: NotesApi> DetailView<R> {
    /// Mount without a route id; the view shows loading until one arrives.
    pub fn mount(api: R) -> Self {
        Self {
            api,
            note_id: None,
            state: DetailState::Loading,
            generation: 0,
        }
    }

    /// Mount for `route` and fetch its note if the id is available.
    pub async fn open(api: R, route: &Route) -> Self {
        let mut view = Self::mount(api);
        view.set_route(route).await;
        view
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn note_id(&self) -> Option<&str> {
        self.note_id.as_deref()
    }

    /// React to a route change. Fetches only when the id segment is present
    /// and differs from the one already shown.
    pub async fn set_route(&mut self, route: &Route) -> Settled {
        let Some(segment) = route.note_id() else {
            debug!(%route, "Route has no note id yet");
            return Settled::Skipped;
        };
        if self.note_id.as_deref() == Some(segment) {
            return Settled::Skipped;
        }
        self.note_id = Some(segment.to_string());
        self.generation += 1;
        self.state = DetailState::Loading;
        let generation = self.generation;

        let Ok(id) = segment.parse::<i64>() else {
            warn!(segment, "Route id is not a note id");
            return self.settle(generation, Ok(None));
        };
        let result = self.api.get_note(id).await;
        self.settle(generation, result)
    }

    fn settle(&mut self, generation: u64, result: Result<Option<Note>, DomainError>) -> Settled {
        if generation != self.generation {
            debug!(generation, current = self.generation, "Discarding superseded note");
            return Settled::Stale;
        }
        match result {
            Ok(Some(note)) => {
                self.state = DetailState::Loaded(note);
                Settled::Applied
            }
            Ok(None) => {
                self.state = DetailState::NotFound;
                Settled::Applied
            }
            Err(e) => {
                error!(error = %e, "Error fetching note");
                self.state = DetailState::NotFound;
                Settled::Failed
            }
        }
    }
}
