// src/application/route.rs
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Pages reachable by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Feed,
    /// `/view/{id}`; `id` is the raw path segment and may be empty while the
    /// identifier is not yet known.
    Detail { id: String },
    Unknown(String),
}

fn detail_regex() -> &'static Regex {
    static DETAIL: OnceLock<Regex> = OnceLock::new();
    DETAIL.get_or_init(|| Regex::new(r"^/view/([^/?#]*)/?$").expect("valid detail route regex"))
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        if path.is_empty() || path == "/" {
            return Route::Feed;
        }
        match detail_regex().captures(path) {
            Some(caps) => Route::Detail {
                id: caps[1].to_string(),
            },
            None => Route::Unknown(path.to_string()),
        }
    }

    pub fn detail(id: i64) -> Self {
        Route::Detail { id: id.to_string() }
    }

    /// Route-derived note id, if the segment is present.
    pub fn note_id(&self) -> Option<&str> {
        match self {
            Route::Detail { id } if !id.is_empty() => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Feed => write!(f, "/"),
            Route::Detail { id } => write!(f, "/view/{}", id),
            Route::Unknown(path) => write!(f, "{}", path),
        }
    }
}
