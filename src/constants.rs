// src/constants.rs
//
// Application-wide constants. Each is documented with where it is used.

/// Notes service used when no config file or flag overrides it.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_API_BASE_URL: &str = "https://gonobe.belajar-it.org";

/// User whose feed is loaded. There is no session, so this is fixed unless
/// overridden by config or `--user`.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_USER_ID: i64 = 1;

/// Per-request timeout for the notes service.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Delay in milliseconds after spawning the browser before the temp
/// directory holding the page may be removed.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;

pub const APP_TITLE: &str = "Mini-X";
pub const APP_TAGLINE: &str = "Inspired by X";

pub const LOADING_MESSAGE: &str = "Loading...";
pub const EMPTY_FEED_MESSAGE: &str = "No data available";
pub const NOTE_NOT_FOUND_MESSAGE: &str = "Note not found";
