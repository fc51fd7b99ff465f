//! Rick and Morty API client.

mod client;
mod dto;

pub use client::{RICK_AND_MORTY_API_BASE, RickAndMortyClient};
