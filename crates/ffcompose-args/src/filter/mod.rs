//! Filter nodes and their filtergraph rendering.
//!
//! A [`Filter`] renders as `name=key=value:key=value`. Text-bearing options
//! must be escaped when the filter is constructed (see [`Filter::text_option`]);
//! a raw string that still contains a reserved character makes
//! [`Filter::render`] fail with [`Error::UnescapedValue`].

pub mod drawtext;
pub mod graph;
pub mod subtitles;

pub use drawtext::DrawText;
pub use graph::{FilterChain, FilterGraph};
pub use subtitles::Subtitles;

use crate::error::{Error, Result};
use crate::escape::{escape, has_reserved, Escaped};
use crate::flags::{FlagSet, Value};

/// A single filter (or lavfi source) with its options.
///
/// ```
/// use ffcompose_args::Filter;
///
/// let scale = Filter::new("scale")?.option("w", 1280).option("h", -2);
/// assert_eq!(scale.render()?, "scale=w=1280:h=-2");
/// # Ok::<(), ffcompose_args::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    name: String,
    flags: FlagSet,
    enable: Option<Escaped>,
}

impl Filter {
    /// Create a filter with no options.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_flags(name, FlagSet::new())
    }

    /// Create a filter from a prepared flag set.
    pub fn with_flags(name: impl Into<String>, flags: FlagSet) -> Result<Self> {
        let name = name.into();
        Error::require_non_empty("filter", "name", &name)?;
        if name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '=' | ':' | ',' | ';' | '[' | ']' | '\'' | '\\'))
        {
            return Err(Error::configuration(
                "filter",
                format!("name {name:?} contains reserved characters"),
            ));
        }
        Ok(Self {
            name,
            flags,
            enable: None,
        })
    }

    /// The filter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The filter's options, excluding the timeline `enable` expression.
    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    /// Set an unchecked option. String values are passed through as-is and
    /// are rejected at render time if they contain reserved characters.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.flags.set(key, value);
        self
    }

    /// Set an option that may be absent.
    pub fn option_opt<V: Into<Value>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.flags.set_opt(key, value);
        self
    }

    /// Set a text-bearing option, escaping it once.
    pub fn text_option(mut self, key: impl Into<String>, raw: &str) -> Self {
        self.flags.set(key, escape(raw));
        self
    }

    /// Enable the filter only while `expr` evaluates to non-zero.
    ///
    /// The expression is escaped and always rendered after every other
    /// option.
    pub fn with_enable(mut self, expr: &str) -> Self {
        self.enable = Some(escape(expr));
        self
    }

    /// Enable the filter between `start` and `end` seconds.
    pub fn enable_between(self, start: f64, end: f64) -> Self {
        self.with_enable(&format!("between(t,{start},{end})"))
    }

    /// The escaped timeline expression, if set.
    pub fn enable(&self) -> Option<&Escaped> {
        self.enable.as_ref()
    }

    /// Render as `name=key=value:...`; a filter without options renders as
    /// its bare name.
    pub fn render(&self) -> Result<String> {
        let mut pairs = Vec::with_capacity(self.flags.len() + 1);
        for (key, value) in self.flags.present() {
            if let Some(raw) = value.as_raw_str() {
                if has_reserved(raw) {
                    return Err(Error::unescaped_value(&self.name, key, raw));
                }
            }
            pairs.push(format!("{key}={value}"));
        }
        if let Some(expr) = &self.enable {
            pairs.push(format!("enable={expr}"));
        }

        if pairs.is_empty() {
            Ok(self.name.clone())
        } else {
            Ok(format!("{}={}", self.name, pairs.join(":")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_filter() {
        assert_eq!(Filter::new("hflip").unwrap().render().unwrap(), "hflip");
    }

    #[test]
    fn test_invalid_names() {
        assert!(matches!(
            Filter::new(""),
            Err(Error::Configuration { .. })
        ));
        assert!(Filter::new("scale=1").is_err());
        assert!(Filter::new("a b").is_err());
        assert!(Filter::new("drawtext@title").is_ok());
    }

    #[test]
    fn test_absent_options_omitted() {
        let f = Filter::new("fade")
            .unwrap()
            .option("t", "in")
            .option_opt("st", None::<f64>)
            .option("d", 1.5);
        assert_eq!(f.render().unwrap(), "fade=t=in:d=1.5");
    }

    #[test]
    fn test_text_option_is_escaped_once() {
        let f = Filter::new("drawtext").unwrap().text_option("text", "a:b");
        assert_eq!(f.render().unwrap(), r"drawtext=text=a\\:b");
        assert!(f.flags().get("text").unwrap().is_escaped());
    }

    #[test]
    fn test_unescaped_value_rejected() {
        let f = Filter::new("drawtext").unwrap().option("text", "a:b");
        let err = f.render().unwrap_err();
        assert_eq!(
            err,
            Error::UnescapedValue {
                filter: "drawtext".into(),
                key: "text".into(),
                value: "a:b".into(),
            }
        );
    }

    #[test]
    fn test_enable_appended_last() {
        let f = Filter::new("drawbox")
            .unwrap()
            .option("x", 10)
            .option("y", 20)
            .enable_between(1.0, 2.5)
            .option("color", "red");
        assert_eq!(
            f.render().unwrap(),
            r"drawbox=x=10:y=20:color=red:enable=between(t\,1\,2.5)"
        );
    }

    #[test]
    fn test_enable_keeps_existing_order() {
        let base = Filter::new("overlay").unwrap().option("x", 0).option("y", 0);
        let timed = base.clone().with_enable("gte(t,3)");
        let base_out = base.render().unwrap();
        let timed_out = timed.render().unwrap();
        assert!(timed_out.starts_with(&base_out));
        assert!(timed_out.ends_with(r"enable=gte(t\,3)"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let f = Filter::new("scale").unwrap().option("w", 640).option("h", 360);
        assert_eq!(f.render().unwrap(), f.render().unwrap());
    }
}
