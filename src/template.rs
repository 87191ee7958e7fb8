//! The class log template: three placeholders, escaped values.

use crate::config::log_name;

const CLASS_LOG_TEMPLATE: &str = include_str!("../templates/classlog.md");

/// Rendered Markdown for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDocument {
    pub date: String,
    /// `Log-{date}.md`
    pub file_name: String,
    pub author: Option<String>,
    pub url: String,
    pub body: String,
}

/// Escapes text the way an autoescaping template engine does, so values
/// cannot inject markup into the rendered Markdown.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Renders the class log template. An absent author renders as empty text.
pub fn render_log(author: Option<&str>, date: &str, url: &str) -> LogDocument {
    let body = CLASS_LOG_TEMPLATE
        .replace("{{ author }}", &escape(author.unwrap_or("")))
        .replace("{{ date }}", &escape(date))
        .replace("{{ url }}", &escape(url));

    LogDocument {
        date: date.to_string(),
        file_name: format!("{}.md", log_name(date)),
        author: author.map(str::to_string),
        url: url.to_string(),
        body,
    }
}
