//! Post models

use chrono::{DateTime, Local};
use serde::Serialize;

use super::Slug;

/// A post summary, as returned by a listing
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Post identifier, derived from the stored file name
    pub slug: Slug,

    /// Post title from the front-matter
    pub title: String,

    /// Publication date from the front-matter, when present
    pub date: Option<DateTime<Local>>,
}

/// A fully rendered post
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    /// Post identifier
    pub slug: Slug,

    /// Post title from the front-matter
    pub title: String,

    /// Body rendered to HTML
    pub html: String,
}

/// Input for creating a post
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Identifier the post will be stored under
    pub slug: Slug,

    /// Post title, written into the front-matter
    pub title: String,

    /// Raw markdown body
    pub markdown: String,
}
