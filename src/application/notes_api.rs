// src/application/notes_api.rs
use crate::domain::{DomainError, Note, NoteUpsert};

/// Remote notes service as seen by the views.
#[allow(async_fn_in_trait)]
pub trait NotesApi {
    async fn list_notes_by_user(&self, user_id: i64) -> Result<Vec<Note>, DomainError>;

    /// Fetch a single note. `Ok(None)` means the service has no such note.
    async fn get_note(&self, id: i64) -> Result<Option<Note>, DomainError>;

    /// Create a note (`id` absent) or replace the body of an existing one.
    async fn upsert_note(&self, request: &NoteUpsert) -> Result<(), DomainError>;

    async fn delete_note(&self, id: i64) -> Result<(), DomainError>;
}

impl<R: NotesApi> NotesApi for &R {
    async fn list_notes_by_user(&self, user_id: i64) -> Result<Vec<Note>, DomainError> {
        (**self).list_notes_by_user(user_id).await
    }

    async fn get_note(&self, id: i64) -> Result<Option<Note>, DomainError> {
        (**self).get_note(id).await
    }

    async fn upsert_note(&self, request: &NoteUpsert) -> Result<(), DomainError> {
        (**self).upsert_note(request).await
    }

    async fn delete_note(&self, id: i64) -> Result<(), DomainError> {
        (**self).delete_note(id).await
    }
}
