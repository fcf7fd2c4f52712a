use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A stored post whose metadata failed validation. In a listing this
    /// aborts the whole batch.
    #[error("post {}: front-matter is missing a non-empty title", .path.display())]
    MissingTitle { path: PathBuf },

    #[error("post {}: {reason}", .path.display())]
    InvalidFrontmatter { path: PathBuf, reason: String },

    #[error("invalid slug {0:?}: slugs must be non-empty and contain no path separators")]
    InvalidSlug(String),

    #[error("post title cannot be empty")]
    EmptyTitle,

    #[error("front-matter block is never closed")]
    UnclosedFrontmatter,

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
