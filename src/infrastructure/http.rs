// src/infrastructure/http.rs
use crate::application::NotesApi;
use crate::domain::{DomainError, Note, NoteUpsert};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument, trace};

/// Notes service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpNotesApi {
    base_url: String,
    http: Client,
}

impl HttpNotesApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DomainError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&NoteUpsert>,
    ) -> Result<Response, DomainError> {
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").json(body);
        }
        request.send().await.map_err(|e| DomainError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    async fn body_text(url: &str, response: Response) -> Result<String, DomainError> {
        response.text().await.map_err(|e| DomainError::Transport {
            url: url.to_string(),
            message: format!("Failed to read response: {}", e),
        })
    }
}

fn status_error(method: &str, url: &str, status: StatusCode) -> DomainError {
    DomainError::Status {
        method: method.to_string(),
        url: url.to_string(),
        status: status.as_u16(),
    }
}

/// Decode a single-note body. Empty and `null` bodies mean "no such note".
pub fn decode_note(url: &str, body: &str) -> Result<Option<Note>, DomainError> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<Option<Note>>(body).map_err(|e| DomainError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Decode a note list body. A `null` body is an empty list.
pub fn decode_notes(url: &str, body: &str) -> Result<Vec<Note>, DomainError> {
    serde_json::from_str::<Option<Vec<Note>>>(body.trim())
        .map(Option::unwrap_or_default)
        .map_err(|e| DomainError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
}

impl NotesApi for HttpNotesApi {
    #[instrument(level = "debug", skip(self))]
    async fn list_notes_by_user(&self, user_id: i64) -> Result<Vec<Note>, DomainError> {
        let url = self.url(&format!("getNotesByUser/{}", user_id));
        let response = self.send(Method::GET, &url, None).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error("GET", &url, status));
        }
        let body = Self::body_text(&url, response).await?;
        trace!(%body, "Note list response");
        decode_notes(&url, &body)
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_note(&self, id: i64) -> Result<Option<Note>, DomainError> {
        let url = self.url(&format!("getNotesById/{}", id));
        let response = self.send(Method::GET, &url, None).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(note_id = id, "Service reports no such note");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(status_error("GET", &url, status));
        }
        let body = Self::body_text(&url, response).await?;
        decode_note(&url, &body)
    }

    #[instrument(level = "debug", skip(self))]
    async fn upsert_note(&self, request: &NoteUpsert) -> Result<(), DomainError> {
        let url = self.url("updateNotes");
        let response = self.send(Method::POST, &url, Some(request)).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error("POST", &url, status));
        }
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_note(&self, id: i64) -> Result<(), DomainError> {
        let url = self.url(&format!("deleteNotes/{}", id));
        let response = self.send(Method::DELETE, &url, None).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error("DELETE", &url, status));
        }
        Ok(())
    }
}
