//! Markdown to HTML conversion.

use pulldown_cmark::{html, Options, Parser};

/// Convert raw note text to an HTML fragment.
///
/// CommonMark plus tables, strikethrough, and task lists. The status marker
/// on line 1 is an HTML comment and passes through untouched.
#[must_use]
pub fn markdown_to_html(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(text, options);
    let mut output = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}
