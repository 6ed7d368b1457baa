// src/application/feed.rs
use crate::application::{Document, NotesApi, PointerListener, Settled, Target};
use crate::domain::{DomainError, Note, NoteUpsert};
use std::collections::{HashMap, HashSet};
use tracing::{debug, error, info, instrument, warn};

/// Identifies one list load so late responses can be recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// The list page: every note of one user plus composer, menus and inline edit.
///
/// All state is owned here and dropped with the view. The note collection is
/// only ever replaced wholesale by a list load.
pub struct FeedView<R: NotesApi> {
    api: R,
    user_id: i64,
    notes: Vec<Note>,
    loading: bool,
    composer: String,
    menus: HashMap<i64, bool>,
    editing: Option<i64>,
    edit_draft: String,
    tag_visibility: HashMap<i64, bool>,
    generation: u64,
    pointer: PointerListener,
}

impl<R: NotesApi> FeedView<R> {
    /// Mount the view: subscribe to pointer events and load the notes.
    pub async fn mount(api: R, user_id: i64, document: &Document) -> Self {
        let mut view = Self::mount_idle(api, user_id, document);
        view.load().await;
        view
    }

    /// Mount without issuing the initial load. The view reports loading until
    /// a load settles.
    pub fn mount_idle(api: R, user_id: i64, document: &Document) -> Self {
        debug!(user_id, "Mounting feed view");
        Self {
            api,
            user_id,
            notes: Vec::new(),
            loading: true,
            composer: String::new(),
            menus: HashMap::new(),
            editing: None,
            edit_draft: String::new(),
            tag_visibility: HashMap::new(),
            generation: 0,
            pointer: document.add_pointer_listener(),
        }
    }

    /// Tear the view down, releasing its pointer listener.
    pub fn unmount(self) {
        debug!(user_id = self.user_id, "Unmounting feed view");
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: i64) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn composer(&self) -> &str {
        &self.composer
    }

    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    pub fn edit_draft(&self) -> &str {
        &self.edit_draft
    }

    pub fn is_menu_open(&self, id: i64) -> bool {
        self.menus.get(&id).copied().unwrap_or(false)
    }

    pub fn open_menus(&self) -> Vec<i64> {
        let mut open: Vec<i64> = self
            .menus
            .iter()
            .filter(|(_, open)| **open)
            .map(|(id, _)| *id)
            .collect();
        open.sort_unstable();
        open
    }

    /// Tag chips are shown unless the note is being edited.
    pub fn tags_visible(&self, id: i64) -> bool {
        self.tag_visibility.get(&id).copied().unwrap_or(true)
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Apply the result of a list load.
    ///
    /// Results for a ticket older than the latest `begin_load` are dropped.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Note>, DomainError>,
    ) -> Settled {
        if ticket.0 != self.generation {
            debug!(
                ticket = ticket.0,
                current = self.generation,
                "Discarding superseded note list"
            );
            return Settled::Stale;
        }
        self.loading = false;
        match result {
            Ok(notes) => {
                debug!(count = notes.len(), "Loaded notes");
                self.notes = notes;
                self.prune_detached_state();
                Settled::Applied
            }
            Err(e) => {
                error!(error = %e, "Error fetching data");
                Settled::Failed
            }
        }
    }

    #[instrument(level = "debug", skip(self), fields(user_id = self.user_id))]
    pub async fn load(&mut self) -> Settled {
        let ticket = self.begin_load();
        let result = self.api.list_notes_by_user(self.user_id).await;
        self.finish_load(ticket, result)
    }

    pub fn set_composer(&mut self, text: impl Into<String>) {
        self.composer = text.into();
    }

    /// Post the composer draft as a new note.
    ///
    /// Whitespace-only drafts send nothing and are kept as typed.
    pub async fn submit_create(&mut self) -> Settled {
        if self.composer.trim().is_empty() {
            debug!("Ignoring empty composer draft");
            return Settled::Skipped;
        }
        let request = NoteUpsert::create(self.composer.clone());
        match self.api.upsert_note(&request).await {
            Ok(()) => {
                info!("Created note");
                self.composer.clear();
                self.load().await;
                Settled::Applied
            }
            Err(e) => {
                error!(error = %e, "Error posting data");
                Settled::Failed
            }
        }
    }

    pub fn toggle_menu(&mut self, id: i64) {
        let open = self.menus.entry(id).or_insert(false);
        *open = !*open;
        debug!(note_id = id, open = *open, "Toggled menu");
    }

    /// Apply queued pointer-downs: each one closes every open menu that does
    /// not contain its target.
    pub fn pump_pointer_events(&mut self) -> usize {
        let events = self.pointer.drain();
        for event in &events {
            for (id, open) in self.menus.iter_mut() {
                if *open && event.target != Target::Menu(*id) {
                    *open = false;
                }
            }
        }
        events.len()
    }

    /// Switch a card into inline edit mode, seeding the draft with its body
    /// and hashtags. Returns `false` if the note is not in the feed.
    pub fn begin_edit(&mut self, id: i64) -> bool {
        let Some(seed) = self.note(id).map(Note::edit_seed) else {
            warn!(note_id = id, "Cannot edit note missing from feed");
            return false;
        };
        if let Some(previous) = self.editing.filter(|prev| *prev != id) {
            self.tag_visibility.insert(previous, true);
        }
        self.editing = Some(id);
        self.edit_draft = seed;
        self.tag_visibility.insert(id, false);
        debug!(note_id = id, "Editing note");
        true
    }

    pub fn set_edit_draft(&mut self, text: impl Into<String>) {
        self.edit_draft = text.into();
    }

    /// Store the edit draft verbatim as the note body.
    ///
    /// Edit mode ends whether or not the request succeeds; only success
    /// reloads the feed.
    pub async fn submit_edit(&mut self) -> Settled {
        let Some(id) = self.editing else {
            return Settled::Skipped;
        };
        let request = NoteUpsert::edit(id, self.edit_draft.clone());
        let result = self.api.upsert_note(&request).await;
        self.exit_edit(id);
        match result {
            Ok(()) => {
                info!(note_id = id, "Updated note");
                self.load().await;
                Settled::Applied
            }
            Err(e) => {
                error!(note_id = id, error = %e, "Error updating note");
                Settled::Failed
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        if let Some(id) = self.editing {
            debug!(note_id = id, "Cancelled edit");
            self.exit_edit(id);
        }
    }

    /// Delete a note. Menu state is left alone.
    pub async fn delete(&mut self, id: i64) -> Settled {
        match self.api.delete_note(id).await {
            Ok(()) => {
                info!(note_id = id, "Deleted note");
                self.load().await;
                Settled::Applied
            }
            Err(e) => {
                error!(note_id = id, error = %e, "Error deleting data");
                Settled::Failed
            }
        }
    }

    fn exit_edit(&mut self, id: i64) {
        self.editing = None;
        self.edit_draft.clear();
        self.tag_visibility.insert(id, true);
    }

    fn prune_detached_state(&mut self) {
        let present: HashSet<i64> = self.notes.iter().map(|n| n.id).collect();
        self.menus.retain(|id, _| present.contains(id));
        self.tag_visibility.retain(|id, _| present.contains(id));
        if let Some(id) = self.editing.filter(|id| !present.contains(id)) {
            debug!(note_id = id, "Dropping edit of note gone from feed");
            self.editing = None;
            self.edit_draft.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{ApiCall, MockNotesApi};

    fn note(id: i64, body: &str, tags: Option<&str>) -> Note {
        Note {
            id,
            username: "ana".to_string(),
            notes: body.to_string(),
            tags: tags.map(str::to_string),
            time: "2024-05-01 10:00".to_string(),
        }
    }

    #[tokio::test]
    async fn given_list_failure_when_mounting_then_feed_is_empty_and_not_loading() {
        // Arrange
        let mock = MockNotesApi::builder().with_list_failure().build();
        let document = Document::new();

        // Act
        let view = FeedView::mount(mock, 1, &document).await;

        // Assert
        assert!(!view.is_loading());
        assert!(view.notes().is_empty());
    }

    #[tokio::test]
    async fn given_mount_idle_when_not_loaded_then_reports_loading() {
        let document = Document::new();
        let view = FeedView::mount_idle(MockNotesApi::builder().build(), 1, &document);
        assert!(view.is_loading());
        assert_eq!(document.listener_count(), 1);
    }

    #[tokio::test]
    async fn given_superseded_ticket_when_finishing_load_then_result_is_discarded() {
        // Arrange
        let document = Document::new();
        let mut view = FeedView::mount_idle(MockNotesApi::builder().build(), 1, &document);
        let first = view.begin_load();
        let second = view.begin_load();

        // Act
        let late = view.finish_load(first, Ok(vec![note(1, "old", None)]));
        let fresh = view.finish_load(second, Ok(vec![note(2, "new", None)]));

        // Assert
        assert_eq!(late, Settled::Stale);
        assert_eq!(fresh, Settled::Applied);
        assert_eq!(view.notes().len(), 1);
        assert_eq!(view.notes()[0].id, 2);
    }

    #[tokio::test]
    async fn given_stale_ticket_only_when_finishing_then_still_loading() {
        let document = Document::new();
        let mut view = FeedView::mount_idle(MockNotesApi::builder().build(), 1, &document);
        let first = view.begin_load();
        let _second = view.begin_load();

        view.finish_load(first, Ok(vec![]));

        assert!(view.is_loading());
    }

    #[tokio::test]
    async fn given_open_menu_when_clicking_inside_it_then_stays_open() {
        // Arrange
        let mock = MockNotesApi::builder()
            .with_note(note(1, "a", None))
            .with_note(note(2, "b", None))
            .build();
        let document = Document::new();
        let mut view = FeedView::mount(mock, 1, &document).await;
        view.toggle_menu(1);
        view.toggle_menu(2);

        // Act
        document.pointer_down(Target::Menu(1));
        view.pump_pointer_events();

        // Assert
        assert!(view.is_menu_open(1));
        assert!(!view.is_menu_open(2));
    }

    #[tokio::test]
    async fn given_reload_without_note_when_applied_then_prunes_its_menu() {
        // Arrange
        let mock = MockNotesApi::builder().with_note(note(1, "a", None)).build();
        let document = Document::new();
        let mut view = FeedView::mount(mock.clone(), 1, &document).await;
        view.toggle_menu(1);
        mock.remove_note(1);

        // Act
        view.load().await;

        // Assert
        assert!(view.open_menus().is_empty());
    }

    #[tokio::test]
    async fn given_note_deleted_while_editing_when_reloaded_then_edit_is_dropped() {
        // Arrange
        let mock = MockNotesApi::builder()
            .with_note(note(42, "Hello", Some("a, b")))
            .build();
        let document = Document::new();
        let mut view = FeedView::mount(mock.clone(), 1, &document).await;
        view.begin_edit(42);

        // Act
        view.delete(42).await;
        let settled = view.submit_edit().await;

        // Assert
        assert_eq!(view.editing(), None);
        assert_eq!(view.edit_draft(), "");
        assert_eq!(settled, Settled::Skipped);
        assert_eq!(
            mock.calls(),
            vec![ApiCall::ListByUser(1), ApiCall::Delete(42), ApiCall::ListByUser(1)]
        );
    }

    #[tokio::test]
    async fn given_other_note_removed_while_editing_when_reloaded_then_edit_survives() {
        let mock = MockNotesApi::builder()
            .with_note(note(1, "a", None))
            .with_note(note(2, "b", None))
            .build();
        let document = Document::new();
        let mut view = FeedView::mount(mock.clone(), 1, &document).await;
        view.begin_edit(1);
        view.set_edit_draft("a changed");
        mock.remove_note(2);

        view.load().await;

        assert_eq!(view.editing(), Some(1));
        assert_eq!(view.edit_draft(), "a changed");
    }

    #[tokio::test]
    async fn given_second_edit_when_switching_then_restores_first_tags() {
        // Arrange
        let mock = MockNotesApi::builder()
            .with_note(note(1, "a", Some("x")))
            .with_note(note(2, "b", Some("y")))
            .build();
        let document = Document::new();
        let mut view = FeedView::mount(mock, 1, &document).await;
        view.begin_edit(1);

        // Act
        view.begin_edit(2);

        // Assert
        assert!(view.tags_visible(1));
        assert!(!view.tags_visible(2));
        assert_eq!(view.editing(), Some(2));
        assert_eq!(view.edit_draft(), "b #y");
    }

    #[tokio::test]
    async fn given_unknown_note_when_beginning_edit_then_returns_false() {
        let document = Document::new();
        let mut view = FeedView::mount(MockNotesApi::builder().build(), 1, &document).await;

        assert!(!view.begin_edit(99));
        assert_eq!(view.editing(), None);
    }

    #[tokio::test]
    async fn given_not_editing_when_submitting_edit_then_skips_request() {
        let mock = MockNotesApi::builder().build();
        let document = Document::new();
        let mut view = FeedView::mount(mock.clone(), 1, &document).await;

        let settled = view.submit_edit().await;

        assert_eq!(settled, Settled::Skipped);
        assert_eq!(mock.calls(), vec![ApiCall::ListByUser(1)]);
    }

    #[tokio::test]
    async fn given_unmounted_view_when_dropping_then_listener_is_released() {
        let document = Document::new();
        let view = FeedView::mount(MockNotesApi::builder().build(), 1, &document).await;
        assert_eq!(document.listener_count(), 1);

        view.unmount();

        assert_eq!(document.listener_count(), 0);
    }
}
