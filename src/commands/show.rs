//! Render a single post

use anyhow::Result;

use crate::content::Slug;
use crate::Blog;

/// Print the rendered HTML of one post to stdout
pub async fn run(blog: &Blog, slug: &str) -> Result<()> {
    let slug: Slug = slug.parse()?;
    let detail = blog.repository().get(&slug).await?;

    tracing::debug!("Rendering {} ({})", detail.slug, detail.title);
    println!("{}", detail.html);

    Ok(())
}
