//! Input sanitization and output escaping for the greeting form.
//!
//! Two independent layers protect the greeting page:
//!
//! - [`sanitize`] reduces untrusted input to ASCII letters, digits and
//!   whitespace, bounded to [`MAX_NAME_LEN`] characters.
//! - [`escape_html`] encodes HTML special characters right before a value is
//!   embedded in a page.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Maximum number of characters kept from a tag-stripped input.
pub const MAX_NAME_LEN: usize = 50;

/// Naive angle-bracket tag pattern. `[^>]` also matches newlines.
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is a valid regex"));

/// Whitespace as the form treats it: Unicode `White_Space` plus the ASCII
/// information separators U+001C..=U+001F.
///
/// ```
/// use greeter_app::sanitize::is_space;
///
/// assert!(is_space(' '));
/// assert!(is_space('\u{1f}'));
/// assert!(!is_space('_'));
/// ```
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{1c}'..='\u{1f}')
}

/// Sanitizes untrusted text for display.
///
/// The pipeline runs in a fixed order:
///
/// 1. Remove every `<...>` tag-shaped substring.
/// 2. Keep the first [`MAX_NAME_LEN`] characters.
/// 3. Drop every character that is not an ASCII letter, ASCII digit or
///    whitespace.
/// 4. Trim leading and trailing whitespace.
///
/// Truncation runs before filtering, so markup-heavy input can come out
/// shorter than the limit, or empty.
///
/// # Examples
///
/// ```
/// use greeter_app::sanitize::sanitize;
///
/// assert_eq!(sanitize("<script>alert(1)</script>"), "alert1");
/// assert_eq!(sanitize("  Hello World!!  "), "Hello World");
/// assert_eq!(sanitize(""), "");
/// ```
pub fn sanitize(text: &str) -> String {
    let stripped = TAG_PATTERN.replace_all(text, "");

    let filtered: String = stripped
        .chars()
        .take(MAX_NAME_LEN)
        .filter(|&c| c.is_ascii_alphanumeric() || is_space(c))
        .collect();

    filtered.trim_matches(is_space).to_string()
}

/// Text that has been HTML-entity escaped and may be embedded in markup as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapedText(String);

impl EscapedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EscapedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escapes HTML entities so the text can be embedded in a page.
///
/// This function replaces dangerous HTML characters with their entity equivalents:
/// - `&` -> `&amp;`
/// - `<` -> `&lt;`
/// - `>` -> `&gt;`
/// - `"` -> `&quot;`
/// - `'` -> `&#x27;`
/// - `/` -> `&#x2F;`
/// - `` ` `` -> `&#x60;`
///
/// # Examples
///
/// ```
/// use greeter_app::sanitize::escape_html;
///
/// let escaped = escape_html("<b>Tom & Jerry</b>");
/// assert_eq!(escaped.as_str(), "&lt;b&gt;Tom &amp; Jerry&lt;&#x2F;b&gt;");
/// ```
pub fn escape_html(input: &str) -> EscapedText {
    let mut result = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            '/' => result.push_str("&#x2F;"),
            '`' => result.push_str("&#x60;"),
            _ => result.push(c),
        }
    }
    EscapedText(result)
}
