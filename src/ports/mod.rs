// src/ports/mod.rs
pub mod html;
pub mod shell;
pub mod terminal;

pub use html::HtmlPresenter;
pub use shell::{Shell, ShellCommand};
pub use terminal::TerminalPresenter;
