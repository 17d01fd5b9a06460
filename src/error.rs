// src/error.rs
// =============================================================================
// Error types for reading and walking a markdown document.
//
// Only two things can go wrong, and both are fatal for the CLI:
// - the document could not be read at all
// - the traversal driver found the event stream malformed
//
// Lists that don't qualify are NOT errors, they just produce no output.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("markdown traversal failed: {0}")]
    Traversal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
