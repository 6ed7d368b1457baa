// src/util/testing.rs

use anyhow::Result;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::NotesApi;
use crate::domain::{DomainError, Note, NoteUpsert};

/// A request received by [`MockNotesApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ListByUser(i64),
    GetById(i64),
    Upsert(NoteUpsert),
    Delete(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    List,
    Get,
    Upsert,
    Delete,
}

struct MockState {
    notes: BTreeMap<i64, Note>,
    failing: HashSet<Endpoint>,
    calls: Vec<ApiCall>,
    next_id: i64,
}

/// In-memory stand-in for the remote notes service.
///
/// Clones share state, so a test can keep one handle while a view owns
/// another and inspect the recorded calls afterwards. Writes are applied to
/// the stored notes so reloads observe them.
///
/// # Examples
///
/// ```
/// use minix::util::testing::MockNotesApi;
/// use minix::domain::Note;
///
/// let mock = MockNotesApi::builder()
///     .with_note(Note {
///         id: 42,
///         username: "ana".to_string(),
///         notes: "Hello".to_string(),
///         tags: Some("a, b".to_string()),
///         time: "today".to_string(),
///     })
///     .with_delete_failure()
///     .build();
/// assert_eq!(mock.notes().len(), 1);
/// ```
#[derive(Clone)]
pub struct MockNotesApi {
    state: Rc<RefCell<MockState>>,
}

impl MockNotesApi {
    pub fn builder() -> MockNotesApiBuilder {
        MockNotesApiBuilder::new()
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.state.borrow().calls.clone()
    }

    pub fn notes(&self) -> Vec<Note> {
        self.state.borrow().notes.values().cloned().collect()
    }

    /// Make an endpoint fail (or recover) from now on.
    pub fn set_failing(&self, endpoint: Endpoint, failing: bool) {
        let mut state = self.state.borrow_mut();
        if failing {
            state.failing.insert(endpoint);
        } else {
            state.failing.remove(&endpoint);
        }
    }

    /// Remove a note behind the views' back.
    pub fn remove_note(&self, id: i64) {
        self.state.borrow_mut().notes.remove(&id);
    }

    fn record(&self, call: ApiCall, endpoint: Endpoint) -> Result<(), DomainError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        if state.failing.contains(&endpoint) {
            return Err(DomainError::Transport {
                url: format!("mock://{:?}", endpoint),
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }
}

impl NotesApi for MockNotesApi {
    async fn list_notes_by_user(&self, user_id: i64) -> Result<Vec<Note>, DomainError> {
        self.record(ApiCall::ListByUser(user_id), Endpoint::List)?;
        Ok(self.notes())
    }

    async fn get_note(&self, id: i64) -> Result<Option<Note>, DomainError> {
        self.record(ApiCall::GetById(id), Endpoint::Get)?;
        Ok(self.state.borrow().notes.get(&id).cloned())
    }

    async fn upsert_note(&self, request: &NoteUpsert) -> Result<(), DomainError> {
        self.record(ApiCall::Upsert(request.clone()), Endpoint::Upsert)?;
        let mut state = self.state.borrow_mut();
        match request.id {
            Some(id) => {
                let note = state.notes.get_mut(&id).ok_or_else(|| DomainError::Status {
                    method: "POST".to_string(),
                    url: "mock://updateNotes".to_string(),
                    status: 404,
                })?;
                note.notes = request.note.clone();
            }
            None => {
                let id = state.next_id;
                state.next_id += 1;
                state.notes.insert(
                    id,
                    Note {
                        id,
                        username: "mock".to_string(),
                        notes: request.note.clone(),
                        tags: None,
                        time: "just now".to_string(),
                    },
                );
            }
        }
        Ok(())
    }

    async fn delete_note(&self, id: i64) -> Result<(), DomainError> {
        self.record(ApiCall::Delete(id), Endpoint::Delete)?;
        match self.state.borrow_mut().notes.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DomainError::Status {
                method: "DELETE".to_string(),
                url: format!("mock://deleteNotes/{}", id),
                status: 404,
            }),
        }
    }
}

/// Builder for MockNotesApi
pub struct MockNotesApiBuilder {
    notes: BTreeMap<i64, Note>,
    failing: HashSet<Endpoint>,
}

impl MockNotesApiBuilder {
    pub fn new() -> Self {
        Self {
            notes: BTreeMap::new(),
            failing: HashSet::new(),
        }
    }

    /// Add a note served by list and get
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.insert(note.id, note);
        self
    }

    pub fn with_list_failure(mut self) -> Self {
        self.failing.insert(Endpoint::List);
        self
    }

    pub fn with_get_failure(mut self) -> Self {
        self.failing.insert(Endpoint::Get);
        self
    }

    pub fn with_upsert_failure(mut self) -> Self {
        self.failing.insert(Endpoint::Upsert);
        self
    }

    pub fn with_delete_failure(mut self) -> Self {
        self.failing.insert(Endpoint::Delete);
        self
    }

    pub fn build(self) -> MockNotesApi {
        let next_id = self.notes.keys().max().map_or(1, |max| max + 1);
        MockNotesApi {
            state: Rc::new(RefCell::new(MockState {
                notes: self.notes,
                failing: self.failing,
                calls: Vec::new(),
                next_id,
            })),
        }
    }
}

impl Default for MockNotesApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "rustls", "h2", "mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
