//! Markdown rendering with optional syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use thiserror::Error;

use crate::config::MarkdownConfig;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("content is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

/// Markdown renderer
///
/// Plain CommonMark by default. Extensions and code highlighting are opt-in
/// through [`MarkdownConfig`].
pub struct MarkdownRenderer {
    options: Options,
    highlighter: Option<Highlighter>,
}

impl MarkdownRenderer {
    /// Create a plain CommonMark renderer
    pub fn new() -> Self {
        Self {
            options: Options::empty(),
            highlighter: None,
        }
    }

    /// Create with custom settings
    pub fn with_options(config: &MarkdownConfig) -> Self {
        let options = if config.extensions {
            Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        };

        let highlighter = config.highlight.then(|| Highlighter {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: config.highlight_theme.clone(),
            line_numbers: config.line_number,
        });

        Self {
            options,
            highlighter,
        }
    }

    /// Render raw markdown bytes to HTML
    pub fn render_bytes(&self, source: &[u8]) -> Result<String, ConvertError> {
        let markdown = std::str::from_utf8(source)?;
        Ok(self.render(markdown))
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);

        let mut html_output = String::new();
        match &self.highlighter {
            Some(highlighter) => html::push_html(&mut html_output, highlighter.apply(parser)),
            None => html::push_html(&mut html_output, parser),
        }

        html_output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Replace fenced and indented code blocks with highlighted HTML
    fn apply<'a>(&self, parser: Parser<'a>) -> std::vec::IntoIter<Event<'a>> {
        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => {
                            lang.split_whitespace().next().map(str::to_string)
                        }
                        _ => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                _ => events.push(event),
            }
        }

        events.into_iter()
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let (body, style) = match theme.and_then(|theme| self.highlight_lines(code, syntax, theme)) {
            Some(highlighted) => highlighted,
            None => (html_escape(code.trim_end_matches('\n')), String::new()),
        };

        if self.line_numbers {
            self.add_line_numbers(&body, code.lines().count(), lang, &style)
        } else {
            format!(
                r#"<pre{}><code class="language-{}">{}</code></pre>"#,
                style, lang, body
            )
        }
    }

    /// Highlight each source line into inline-styled spans, one output line
    /// per source line. Returns the spans and the `style` attribute carrying
    /// the theme background.
    fn highlight_lines(
        &self,
        code: &str,
        syntax: &SyntaxReference,
        theme: &Theme,
    ) -> Option<(String, String)> {
        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut lines = Vec::new();

        for line in code.lines() {
            // the newline-aware syntaxes expect every line to end in '\n'
            let source = format!("{}\n", line);
            let mut regions = highlighter.highlight_line(&source, &self.syntax_set).ok()?;
            if let Some((_, last)) = regions.last_mut() {
                let text: &str = *last;
                *last = text.trim_end_matches('\n');
            }
            lines.push(styled_line_to_highlighted_html(&regions, IncludeBackground::No).ok()?);
        }

        let style = theme
            .settings
            .background
            .map(|c| format!(r#" style="background-color:#{:02x}{:02x}{:02x};""#, c.r, c.g, c.b))
            .unwrap_or_default();

        Some((lines.join("\n"), style))
    }

    /// Wrap highlighted lines in a table with a line-number gutter
    fn add_line_numbers(&self, body: &str, line_count: usize, lang: &str, style: &str) -> String {
        let gutter = (1..=line_count)
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre{}>{}</pre></td></tr></table></figure>"#,
            lang, gutter, style, body
        )
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
