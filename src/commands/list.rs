//! List stored posts

use anyhow::Result;

use crate::Blog;

/// Print every post in the repository
pub async fn run(blog: &Blog) -> Result<()> {
    let posts = blog.repository().list().await?;

    println!("Posts ({}):", posts.len());
    for post in posts {
        match post.date {
            Some(date) => println!(
                "  {}  {} - {}",
                date.format("%Y-%m-%d"),
                post.slug,
                post.title
            ),
            None => println!("  {} - {}", post.slug, post.title),
        }
    }

    Ok(())
}
