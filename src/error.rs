use crate::prelude::*;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid cube configuration: {0}")]
    Format(String),

    #[error(
        "Invalid cube configuration: every color must appear {expected} times, found {counts:?}"
    )]
    Validity {
        expected: usize,
        counts: Vec<(Color, usize)>,
    },

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Could not read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Layer {layer} is out of range for a cube of size {size}")]
    LayerOutOfRange { layer: usize, size: usize },

    #[error("Unrecognized move {0:?}")]
    InvalidMove(String),

    #[error("No solution found: {0}")]
    SearchExhausted(Exhaustion),
}
