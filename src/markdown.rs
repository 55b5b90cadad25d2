//! Markdown to HTML rendering for post bodies.
//!
//! Rendering happens at read time; the HTML is never stored. The output
//! is injected into pages unescaped, so this is the trust boundary for
//! post content.

use pulldown_cmark::{Options, Parser, html};

/// Render a markdown document to an HTML fragment.
pub fn render(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html_output, parser);
    html_output
}
