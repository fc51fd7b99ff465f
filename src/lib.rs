//! Rickdex - a Rick and Morty catalog browser.
//!
//! This crate fetches characters and episodes from the public Rick and Morty
//! API, resolves each character's episode list with a single batch request,
//! and keeps decoded character thumbnails in a bounded in-memory cache.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing presenters and services.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing terminal views.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "rickdex";
