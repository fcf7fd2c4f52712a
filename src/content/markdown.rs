//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::error::Result;

/// Renders post bodies to HTML.
///
/// Fenced code blocks are lifted out of the event stream and replaced
/// with syntect-highlighted HTML; everything else passes through
/// pulldown-cmark untouched.
pub struct MarkdownRenderer {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
    theme: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    pub fn new(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
            theme: theme.to_string(),
            line_numbers,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;

        let mut events: Vec<Event> = Vec::new();
        // (language, accumulated source) of the code block being collected
        let mut code: Option<(Option<String>, String)> = None;

        for event in Parser::new_ext(markdown, options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code = Some((lang, String::new()));
                }
                Event::Text(text) if code.is_some() => {
                    if let Some((_, source)) = code.as_mut() {
                        source.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, source)) = code.take() {
                        let highlighted = self.highlight(&source, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                other => events.push(other),
            }
        }

        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());

        Ok(out)
    }

    /// Highlight one code block
    fn highlight(&self, source: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntaxes
            .find_syntax_by_token(lang)
            .or_else(|| self.syntaxes.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());

        let theme = match self
            .themes
            .themes
            .get(&self.theme)
            .or_else(|| self.themes.themes.values().next())
        {
            Some(theme) => theme,
            None => return plain_code_block(source, lang),
        };

        match highlighted_html_for_string(source, &self.syntaxes, syntax, theme) {
            Ok(highlighted) if self.line_numbers => self.with_gutter(&highlighted, lang),
            Ok(highlighted) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang, highlighted
            ),
            Err(_) => plain_code_block(source, lang),
        }
    }

    /// Wrap highlighted code in a line-number gutter table
    fn with_gutter(&self, highlighted: &str, lang: &str) -> String {
        let mut gutter = String::new();
        let mut code = String::new();

        for (i, line) in highlighted.lines().enumerate() {
            if i > 0 {
                gutter.push('\n');
                code.push('\n');
            }
            gutter.push_str(&format!(r#"<span class="line-number">{}</span>"#, i + 1));
            code.push_str(line);
        }

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
            lang, gutter, code
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new("base16-ocean.dark", true)
    }
}

/// Escaped fallback for code that could not be highlighted
fn plain_code_block(source: &str, lang: &str) -> String {
    format!(
        r#"<pre><code class="language-{}">{}</code></pre>"#,
        lang,
        escape_html(source)
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::default();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_emphasis() {
        let renderer = MarkdownRenderer::default();
        let html = renderer.render("**hi**").unwrap();
        assert!(html.contains("<strong>hi</strong>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::default();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains("highlight"));
    }

    #[test]
    fn test_render_code_block_without_gutter() {
        let renderer = MarkdownRenderer::new("base16-ocean.dark", false);
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(!html.contains("gutter"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b> & \"q\""), "&lt;b&gt; &amp; &quot;q&quot;");
    }
}
