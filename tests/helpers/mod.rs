use minix::domain::Note;
use minix::util::testing::{MockNotesApi, MockNotesApiBuilder};

/// Known note ids in the sample feed
#[allow(dead_code)]
pub mod test_notes {
    // Has comma-separated tags with a space after the comma
    pub const TAGGED: i64 = 42;
    // Multi-line body, no tags
    pub const MULTILINE: i64 = 43;
    // Empty tag string
    pub const EMPTY_TAGS: i64 = 44;

    // For testing error cases
    pub const NONEXISTENT: i64 = 999999;
}

#[allow(dead_code)]
pub fn sample_notes() -> Vec<Note> {
    vec![
        Note {
            id: test_notes::TAGGED,
            username: "ana".to_string(),
            notes: "Hello".to_string(),
            tags: Some("a, b".to_string()),
            time: "2024-05-01 10:00".to_string(),
        },
        Note {
            id: test_notes::MULTILINE,
            username: "budi".to_string(),
            notes: "First line\nSecond line".to_string(),
            tags: None,
            time: "2024-05-02 08:30".to_string(),
        },
        Note {
            id: test_notes::EMPTY_TAGS,
            username: "citra".to_string(),
            notes: "No tags here".to_string(),
            tags: Some(String::new()),
            time: "2024-05-03 19:45".to_string(),
        },
    ]
}

/// Builder preloaded with the sample feed
#[allow(dead_code)]
pub fn sample_api() -> MockNotesApiBuilder {
    sample_notes()
        .into_iter()
        .fold(MockNotesApi::builder(), |builder, note| builder.with_note(note))
}
