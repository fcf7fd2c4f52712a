//! inkpost: a markdown-backed blog post store
//!
//! Posts live one file per post in a single directory, each file a YAML
//! front-matter header followed by a markdown body. The repository in
//! [`content`] exposes list/get/create over that directory; nothing is
//! cached, every call re-reads the filesystem.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;

use std::path::{Path, PathBuf};

use crate::config::BlogConfig;
use crate::content::{MarkdownRenderer, PostRepository};
use crate::error::Result;

/// The main application handle
#[derive(Clone)]
pub struct Blog {
    /// Blog configuration
    pub config: BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Posts directory
    pub posts_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("blog.yml");

        let config = if config_path.exists() {
            tracing::debug!("Loading configuration from {:?}", config_path);
            BlogConfig::load(&config_path)?
        } else {
            BlogConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
        })
    }

    /// Build a repository over the configured posts directory
    pub fn repository(&self) -> PostRepository {
        let renderer = MarkdownRenderer::new(
            &self.config.highlight.theme,
            self.config.highlight.line_number,
        );
        PostRepository::new(self.posts_dir.clone(), renderer)
    }
}
