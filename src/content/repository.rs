//! Markdown-backed post store

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use tokio::fs;

use super::{FrontMatter, MarkdownRenderer, NewPost, Post, PostDetail, Slug};
use crate::error::{Error, Result};

/// A repository of posts stored one file per post in a single directory.
///
/// Every operation is a stateless transaction against the filesystem:
/// nothing is cached between calls, so a listing always reflects the
/// directory at the time of the call.
pub struct PostRepository {
    posts_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl PostRepository {
    pub fn new(posts_dir: impl Into<PathBuf>, renderer: MarkdownRenderer) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            renderer,
        }
    }

    /// List every post in the directory, in enumeration order.
    ///
    /// All entries are read concurrently; the first read, parse, or
    /// validation failure aborts the whole listing with that error.
    pub async fn list(&self) -> Result<Vec<Post>> {
        let mut entries = fs::read_dir(&self.posts_dir).await?;

        let mut reads = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            reads.push(self.read_summary(entry.path(), entry.file_name()));
        }

        let posts = try_join_all(reads).await?;
        tracing::debug!("Listed {} posts in {:?}", posts.len(), self.posts_dir);

        Ok(posts)
    }

    /// Read and render a single post
    pub async fn get(&self, slug: &Slug) -> Result<PostDetail> {
        let path = self.posts_dir.join(slug.file_name());
        let raw = fs::read_to_string(&path).await?;

        let (fm, body) = parse_front_matter(&raw, &path)?;
        let title = require_title(&fm, &path)?;
        let html = self.renderer.render(body)?;

        Ok(PostDetail {
            slug: slug.clone(),
            title,
            html,
        })
    }

    /// Write a new post and return it rendered.
    ///
    /// An existing file with the same slug is overwritten. The result is
    /// produced by re-reading the file just written, not by rendering in
    /// memory, so the caller sees exactly what a later `get` would see.
    pub async fn create(&self, post: NewPost) -> Result<PostDetail> {
        if post.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }

        let path = self.posts_dir.join(post.slug.file_name());
        let stored = FrontMatter::serialize(&post.title, &post.markdown);
        fs::write(&path, stored).await?;
        tracing::debug!("Wrote post {:?}", path);

        self.get(&post.slug).await
    }

    /// Read one directory entry into a post summary
    async fn read_summary(&self, path: PathBuf, file_name: OsString) -> Result<Post> {
        let raw = fs::read_to_string(&path).await?;

        let (fm, _body) = parse_front_matter(&raw, &path)?;
        let title = require_title(&fm, &path)?;
        let date = fm.parse_date();
        let slug = Slug::from_file_name(&file_name.to_string_lossy())?;

        Ok(Post { slug, title, date })
    }
}

fn parse_front_matter<'a>(raw: &'a str, path: &Path) -> Result<(FrontMatter, &'a str)> {
    FrontMatter::parse(raw).map_err(|e| Error::InvalidFrontmatter {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn require_title(fm: &FrontMatter, path: &Path) -> Result<String> {
    match fm.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => Ok(title.to_string()),
        _ => Err(Error::MissingTitle {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;
    use tempfile::tempdir;

    fn repository(dir: &Path) -> PostRepository {
        PostRepository::new(dir, MarkdownRenderer::default())
    }

    fn write_file(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    fn slug(s: &str) -> Slug {
        Slug::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_list_returns_every_valid_post() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "first.md", "---\ntitle: First\n---\n\nbody one");
        write_file(dir.path(), "second.md", "---\ntitle: Second\n---\n\nbody two");

        let mut posts = repository(dir.path()).list().await.unwrap();
        posts.sort_by(|a, b| a.slug.as_str().cmp(b.slug.as_str()));

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug.as_str(), "first");
        assert_eq!(posts[0].title, "First");
        assert_eq!(posts[1].slug.as_str(), "second");
        assert_eq!(posts[1].title, "Second");
    }

    #[tokio::test]
    async fn test_list_empty_directory() {
        let dir = tempdir().unwrap();
        let posts = repository(dir.path()).list().await.unwrap();
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_list_parses_dates() {
        let dir = tempdir().unwrap();
        write_file(
            dir.path(),
            "dated.md",
            "---\ntitle: Dated\ndate: 2024-01-15\n---\n\nbody",
        );

        let posts = repository(dir.path()).list().await.unwrap();
        let date = posts[0].date.unwrap();
        assert_eq!(date.format("%Y-%m-%d").to_string(), "2024-01-15");
    }

    #[tokio::test]
    async fn test_list_aborts_on_missing_title() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "good.md", "---\ntitle: Good\n---\n\nok");
        write_file(dir.path(), "bad.md", "---\ndate: 2024-01-01\n---\n\nno title");

        let err = repository(dir.path()).list().await.unwrap_err();
        assert!(matches!(err, Error::MissingTitle { ref path } if path.ends_with("bad.md")));
    }

    #[tokio::test]
    async fn test_list_aborts_on_empty_title() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "empty.md", "---\ntitle: \"\"\n---\n\nbody");

        let err = repository(dir.path()).list().await.unwrap_err();
        assert!(matches!(err, Error::MissingTitle { .. }));
    }

    #[tokio::test]
    async fn test_list_aborts_on_corrupt_header() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "broken.md", "---\ntitle: Never Closed");

        let err = repository(dir.path()).list().await.unwrap_err();
        assert!(matches!(err, Error::InvalidFrontmatter { ref path, .. } if path.ends_with("broken.md")));
    }

    #[tokio::test]
    async fn test_get_renders_markdown_body() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "hello.md", "---\ntitle: Hello\n---\n\n**hi**");

        let detail = repository(dir.path()).get(&slug("hello")).await.unwrap();
        assert_eq!(detail.slug.as_str(), "hello");
        assert_eq!(detail.title, "Hello");
        assert!(detail.html.contains("<strong>hi</strong>"));
    }

    #[tokio::test]
    async fn test_get_missing_post_is_not_found() {
        let dir = tempdir().unwrap();

        let err = repository(dir.path()).get(&slug("nope")).await.unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_create_writes_exact_stored_format() {
        let dir = tempdir().unwrap();

        let detail = repository(dir.path())
            .create(NewPost {
                slug: slug("s"),
                title: "T".to_string(),
                markdown: "**hi**".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(detail.title, "T");
        assert!(detail.html.contains("<strong>hi</strong>"));

        let stored = std::fs::read_to_string(dir.path().join("s.md")).unwrap();
        assert_eq!(stored, "---\ntitle: T\n---\n\n**hi**");
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        repo.create(NewPost {
            slug: slug("note"),
            title: "A Note".to_string(),
            markdown: "text".to_string(),
        })
        .await
        .unwrap();

        let posts = repo.list().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug.as_str(), "note");
        assert_eq!(posts[0].title, "A Note");
    }

    #[tokio::test]
    async fn test_create_overwrites_existing_slug() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        for title in ["Old", "New"] {
            repo.create(NewPost {
                slug: slug("same"),
                title: title.to_string(),
                markdown: "body".to_string(),
            })
            .await
            .unwrap();
        }

        let stored = std::fs::read_to_string(dir.path().join("same.md")).unwrap();
        assert_eq!(stored, "---\ntitle: New\n---\n\nbody");
    }

    #[tokio::test]
    async fn test_create_is_idempotent() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        let post = NewPost {
            slug: slug("twice"),
            title: "Twice".to_string(),
            markdown: "**hi**".to_string(),
        };
        repo.create(post.clone()).await.unwrap();
        repo.create(post).await.unwrap();

        let stored = std::fs::read_to_string(dir.path().join("twice.md")).unwrap();
        assert_eq!(stored, "---\ntitle: Twice\n---\n\n**hi**");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        let dir = tempdir().unwrap();

        let err = repository(dir.path())
            .create(NewPost {
                slug: slug("untitled"),
                title: "  ".to_string(),
                markdown: "body".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::EmptyTitle));
        assert!(!dir.path().join("untitled.md").exists());
    }
}
