//! Writers for the pidgin tag vocabulary.
//!
//! The vocabulary is closed. Attribute values are always double-quoted.
//! `<file>` and `<a>` are leaf tags; `<asset>` and `<input>` wrap an
//! encoded content block and may contain anything else.
//!
//! ```text
//! ┌──────────────────────────────────────┬─────────────────────────────────┐
//! │ Tag                                  │ Meaning                         │
//! ├──────────────────────────────────────┼─────────────────────────────────┤
//! │ <asset title="T">..</asset>          │ caller-supplied content block   │
//! │ <input source-agent="T">..</input>   │ another agent's output block    │
//! │ <content src="P">TEXT</content>      │ long text, inline + by handle   │
//! │ <file src="P" />                     │ non-text part, by handle        │
//! │ <a href="P">TITLE</a>                │ routing link                    │
//! └──────────────────────────────────────┴─────────────────────────────────┘
//! ```
//!
//! Handles and route tokens are written as issued by the content store and
//! are not escaped: the decoder reads them back byte for byte.

/// `<asset title="T">\n{inner}\n</asset>`
#[must_use]
pub fn asset(title: &str, inner: &str) -> String {
    format!("<asset title=\"{}\">\n{inner}\n</asset>", escape_attr(title))
}

/// `<input source-agent="T">\n{inner}\n</input>`
#[must_use]
pub fn input(title: &str, inner: &str) -> String {
    format!(
        "<input source-agent=\"{}\">\n{inner}\n</input>",
        escape_attr(title)
    )
}

/// `<content src="P">\n{text}</content>`
#[must_use]
pub fn content(src: &str, text: &str) -> String {
    format!("<content src=\"{src}\">\n{text}</content>")
}

/// `<file src="P" />`
#[must_use]
pub fn file(src: &str) -> String {
    format!("<file src=\"{src}\" />")
}

/// `<a href="P">TITLE</a>`
#[must_use]
pub fn link(href: &str, title: &str) -> String {
    format!("<a href=\"{href}\">{title}</a>")
}

/// Escape XML special characters in attribute values.
#[must_use]
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
