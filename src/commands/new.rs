//! Create a new post

use anyhow::Result;
use tokio::fs;

use crate::content::{NewPost, Slug};
use crate::Blog;

/// Create a post. The slug defaults to a slugified title; an existing
/// post with the same slug is overwritten.
pub async fn run(blog: &Blog, title: &str, slug_arg: Option<&str>, markdown: &str) -> Result<()> {
    let post_slug = match slug_arg {
        Some(s) => Slug::new(s)?,
        None => Slug::new(slug::slugify(title))?,
    };

    fs::create_dir_all(&blog.posts_dir).await?;

    let detail = blog
        .repository()
        .create(NewPost {
            slug: post_slug,
            title: title.to_string(),
            markdown: markdown.to_string(),
        })
        .await?;

    println!("Created: {:?}", blog.posts_dir.join(detail.slug.file_name()));

    Ok(())
}
