//! Domain error types.

mod fetch_error;
mod image_error;

pub use fetch_error::FetchError;
pub use image_error::{ImageError, ImageResult};
