// src/domain/note.rs
use serde::{Deserialize, Serialize};

/// A note as served by the remote API.
///
/// `tags` is a comma-separated string owned by the server; `time` is
/// preformatted and displayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub time: String,
}

impl Note {
    /// Tag chips as displayed: the raw fragments of `tags` split on `,`.
    ///
    /// No trimming is applied, so `"a, b"` yields `["a", " b"]`. An absent or
    /// empty tag string yields no chips.
    pub fn tag_chips(&self) -> Vec<&str> {
        match self.tags.as_deref() {
            Some(tags) if !tags.is_empty() => tags.split(',').collect(),
            _ => Vec::new(),
        }
    }

    /// Body lines, one paragraph per embedded line break.
    pub fn body_lines(&self) -> impl Iterator<Item = &str> {
        self.notes.split('\n')
    }

    /// Text used to seed the inline editor.
    ///
    /// Tags are re-embedded into the body as space-separated `#tag` tokens.
    ///
    /// ```
    /// use minix::domain::Note;
    ///
    /// let note = Note {
    ///     id: 1,
    ///     username: "ana".to_string(),
    ///     notes: "Hello".to_string(),
    ///     tags: Some("a, b".to_string()),
    ///     time: String::new(),
    /// };
    /// assert_eq!(note.edit_seed(), "Hello #a #b");
    /// ```
    pub fn edit_seed(&self) -> String {
        let hashtags = match self.tags.as_deref() {
            Some(tags) if !tags.is_empty() => tags
                .split(',')
                .map(|tag| format!("#{}", tag.trim()))
                .collect::<Vec<_>>()
                .join(" "),
            _ => String::new(),
        };
        format!("{} {}", self.notes, hashtags).trim().to_string()
    }
}

/// Request body for `POST /updateNotes`.
///
/// Serializes as `{"note": ...}` when creating and `{"id": ..., "note": ...}`
/// when editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteUpsert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub note: String,
}

impl NoteUpsert {
    pub fn create(note: impl Into<String>) -> Self {
        Self {
            id: None,
            note: note.into(),
        }
    }

    pub fn edit(id: i64, note: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            note: note.into(),
        }
    }
}
