//! Plain-text views writing to a terminal.

use std::io::{self, Write};

use parking_lot::Mutex;
use tracing::warn;

use crate::domain::entities::{Character, CharacterId, Episode};
use crate::domain::errors::FetchError;
use crate::domain::ports::{CharacterListView, EpisodeListView};

/// Line-oriented view over any writer. Remembers the last character list
/// it showed so a row can be selected afterwards.
pub struct ConsoleView<W: Write + Send = io::Stdout> {
    out: Mutex<W>,
    shown: Mutex<Vec<Character>>,
}

impl ConsoleView {
    /// Creates a view printing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleView<W> {
    /// Creates a view printing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            shown: Mutex::new(Vec::new()),
        }
    }

    /// Returns the characters from the last successful list.
    pub fn shown_characters(&self) -> Vec<Character> {
        self.shown.lock().clone()
    }

    /// Finds a shown character by ID.
    pub fn select(&self, id: CharacterId) -> Option<Character> {
        self.shown.lock().iter().find(|c| c.id() == id).cloned()
    }

    /// Consumes the view, returning the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn write_lines<I>(&self, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut out = self.out.lock();
        for line in lines {
            if let Err(e) = writeln!(out, "{line}") {
                warn!(error = %e, "Failed to write to console");
                return;
            }
        }
        if let Err(e) = out.flush() {
            warn!(error = %e, "Failed to flush console");
        }
    }
}

/// Formats one character row.
#[must_use]
pub fn format_character(character: &Character) -> String {
    let mut line = format!("{:>4}  {}", character.id().as_u32(), character.name());
    let details: Vec<&str> = [character.status(), character.species()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !details.is_empty() {
        line.push_str(&format!(" ({})", details.join(", ")));
    }
    line
}

/// Formats one episode row.
#[must_use]
pub fn format_episode(episode: &Episode) -> String {
    if episode.air_date().is_empty() {
        format!("{:>4}  {}  {}", episode.id().as_u32(), episode.code(), episode.name())
    } else {
        format!(
            "{:>4}  {}  {} ({})",
            episode.id().as_u32(),
            episode.code(),
            episode.name(),
            episode.air_date()
        )
    }
}

impl<W: Write + Send> CharacterListView for ConsoleView<W> {
    fn show_characters(&self, characters: &[Character]) {
        let header = format!("{} characters", characters.len());
        self.write_lines(std::iter::once(header).chain(characters.iter().map(format_character)));
        *self.shown.lock() = characters.to_vec();
    }

    fn show_error(&self, error: &FetchError) {
        self.write_lines([format!("Could not load characters: {error}")]);
    }
}

impl<W: Write + Send> EpisodeListView for ConsoleView<W> {
    fn display_episodes(&self, episodes: &[Episode]) {
        let header = format!("{} episodes", episodes.len());
        self.write_lines(std::iter::once(header).chain(episodes.iter().map(format_episode)));
    }

    fn display_error(&self, error: &FetchError) {
        self.write_lines([format!("Could not load episodes: {error}")]);
    }
}
