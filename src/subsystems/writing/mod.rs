//! Writing subsystem: posts rendered from markup files on disk.
//!
//! The content directory is read once at startup; pages are served from the
//! pre-rendered index.

pub mod front_matter;
pub mod render;
pub mod store;

use thiserror::Error;

pub use front_matter::FrontMatter;
pub use store::{Post, WritingEntry, WritingStore};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad front-matter: {0}")]
    FrontMatter(String),
    #[error("markdown render failed: {0}")]
    Render(String),
    #[error("no post named '{0}'")]
    NotFound(String),
}

impl From<ContentError> for crate::error::AppError {
    fn from(e: ContentError) -> Self {
        crate::error::AppError::Content(e.to_string())
    }
}
