//! Presentation layer with terminal views.

/// Plain-text console views.
pub mod console;

pub use console::ConsoleView;
