//! Escaping for ffmpeg option values and filtergraph descriptions.
//!
//! A text value that ends up inside `-filter_complex` (or a lavfi input) is
//! parsed twice by ffmpeg: first the filtergraph parser splits filters and
//! chains and removes one level of backslashes, then the option parser of the
//! individual filter splits `key=value` pairs on `:` and removes the second
//! level. [`escape`] applies both levels, innermost first:
//!
//! | level       | reserved characters (in order)   |
//! |-------------|----------------------------------|
//! | expression  | `\` `'` `:` `%`                  |
//! | filtergraph | `\` `'` `[` `]` `,` `;`          |
//!
//! ```
//! use ffcompose_args::escape;
//!
//! assert_eq!(escape("Hello: World").as_str(), r"Hello\\: World");
//! assert_eq!(escape("plain").as_str(), "plain");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Characters with special meaning inside a single filter option value.
///
/// `%` guards the `%{...}` expansion syntax used by drawtext.
pub const EXPRESSION_RESERVED: [char; 4] = ['\\', '\'', ':', '%'];

/// Characters with special meaning in the filter chain syntax.
pub const FILTERGRAPH_RESERVED: [char; 6] = ['\\', '\'', '[', ']', ',', ';'];

/// A value that has been escaped exactly once.
///
/// The only way to obtain one is through [`escape`] (or
/// [`EscapeLevel::apply`] with [`EscapeLevel::Full`]), so a value of this type
/// is never fed back into the escaper by the renderers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Escaped(String);

impl Escaped {
    /// The escaped text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the escaped text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Escaped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Escaped {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn escape_chars(raw: &str, reserved: &[char]) -> String {
    // Single pass: every reserved character (backslash included) gets exactly
    // one backslash, so earlier escapes are never re-escaped within a level.
    let mut out = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        if reserved.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Escape a value for use as a filter option value (first level only).
pub fn escape_expression(raw: &str) -> String {
    escape_chars(raw, &EXPRESSION_RESERVED)
}

/// Escape a string for embedding in a filtergraph description (second level only).
pub fn escape_filtergraph(raw: &str) -> String {
    escape_chars(raw, &FILTERGRAPH_RESERVED)
}

/// Escape a raw value for both quoting levels.
pub fn escape(raw: &str) -> Escaped {
    Escaped(escape_filtergraph(&escape_expression(raw)))
}

/// Escape an optional value; absent values stay absent.
pub fn escape_opt<S: AsRef<str>>(raw: Option<S>) -> Option<Escaped> {
    raw.map(|s| escape(s.as_ref()))
}

/// Wrap a metadata value in double quotes when it contains whitespace or
/// quote characters.
///
/// Embedded `"` and `\` are backslash-escaped inside the quotes. Values
/// without such characters are returned unchanged.
pub fn wrap_quotes(value: &str) -> Cow<'_, str> {
    let needs_quotes = value
        .chars()
        .any(|c| c.is_whitespace() || c == '"' || c == '\'');
    if !needs_quotes {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    Cow::Owned(out)
}

/// Which escaping levels to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeLevel {
    /// Option value level only.
    Expression,
    /// Filtergraph level only.
    Filtergraph,
    /// Both levels, as used for text-bearing filter options.
    #[default]
    Full,
}

impl EscapeLevel {
    /// Escape `raw` at this level.
    pub fn apply(&self, raw: &str) -> String {
        match self {
            EscapeLevel::Expression => escape_expression(raw),
            EscapeLevel::Filtergraph => escape_filtergraph(raw),
            EscapeLevel::Full => escape(raw).into_string(),
        }
    }
}

impl FromStr for EscapeLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expression" | "expr" | "option" => Ok(EscapeLevel::Expression),
            "filtergraph" | "graph" => Ok(EscapeLevel::Filtergraph),
            "full" | "both" => Ok(EscapeLevel::Full),
            _ => Err(format!("Unknown escape level: {}", s)),
        }
    }
}

/// True if `value` contains a character the filtergraph or option parser
/// would interpret.
pub(crate) fn has_reserved(value: &str) -> bool {
    value
        .chars()
        .any(|c| (c != '%' && EXPRESSION_RESERVED.contains(&c)) || FILTERGRAPH_RESERVED.contains(&c))
}
