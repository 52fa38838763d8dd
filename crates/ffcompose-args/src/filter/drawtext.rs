//! The `drawtext` filter.

use crate::error::{Error, Result};
use crate::escape::escape;
use crate::filter::Filter;
use crate::flags::{FlagSet, Value};
use crate::font::{FontResolver, PlatformFontResolver};

/// Draw text on top of video.
///
/// `text` and the resolved font path are escaped when the filter is built.
/// `x` and `y` are passed through unescaped, so expressions containing
/// commas must be given as [`crate::Escaped`] values.
///
/// ```
/// use ffcompose_args::{DrawText, DirectoryFontResolver};
///
/// let filter = DrawText::new("Hello", 10, 20)
///     .fontsize(32)
///     .build_with(&DirectoryFontResolver::new("/fonts"))?;
/// assert_eq!(
///     filter.render()?,
///     "drawtext=text=Hello:fontfile=/fonts/arial.ttf:fontsize=32:x=10:y=20:fontcolor=white"
/// );
/// # Ok::<(), ffcompose_args::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DrawText {
    text: String,
    x: Value,
    y: Value,
    fontsize: u32,
    color: String,
    fontname: String,
    extra: FlagSet,
}

impl DrawText {
    /// Default font size.
    pub const DEFAULT_FONTSIZE: u32 = 16;
    /// Default font color.
    pub const DEFAULT_COLOR: &'static str = "white";
    /// Default font file name.
    pub const DEFAULT_FONTNAME: &'static str = "arial.ttf";

    /// Draw `text` at (`x`, `y`).
    pub fn new(text: impl Into<String>, x: impl Into<Value>, y: impl Into<Value>) -> Self {
        Self {
            text: text.into(),
            x: x.into(),
            y: y.into(),
            fontsize: Self::DEFAULT_FONTSIZE,
            color: Self::DEFAULT_COLOR.to_string(),
            fontname: Self::DEFAULT_FONTNAME.to_string(),
            extra: FlagSet::new(),
        }
    }

    /// Font size in points.
    pub fn fontsize(mut self, size: u32) -> Self {
        self.fontsize = size;
        self
    }

    /// Font color, e.g. `white` or `0xFF0000@0.5`.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Font file name handed to the font resolver.
    pub fn fontname(mut self, name: impl Into<String>) -> Self {
        self.fontname = name.into();
        self
    }

    /// Additional unchecked drawtext option, rendered after the fixed ones.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.set(key, value);
        self
    }

    /// Build with the platform font directory.
    pub fn build(self) -> Result<Filter> {
        self.build_with(&PlatformFontResolver)
    }

    /// Build, resolving the font file through `fonts`.
    pub fn build_with(self, fonts: &dyn FontResolver) -> Result<Filter> {
        if self.text.is_empty() {
            return Err(Error::configuration("drawtext", "text must not be empty"));
        }
        let fontfile = fonts.resolve_font_path(&self.fontname);

        let mut flags = FlagSet::new()
            .with("text", escape(&self.text))
            .with("fontfile", escape(&fontfile.to_string_lossy()))
            .with("fontsize", self.fontsize)
            .with("x", self.x)
            .with("y", self.y)
            .with("fontcolor", self.color);
        flags.extend(self.extra);

        Filter::with_flags("drawtext", flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::DirectoryFontResolver;
    use std::path::PathBuf;

    fn fonts() -> DirectoryFontResolver {
        DirectoryFontResolver::new("/usr/share/fonts/truetype/freefont")
    }

    #[test]
    fn test_colon_is_escaped() {
        let filter = DrawText::new("Hello: World", 10, 20)
            .build_with(&fonts())
            .unwrap();
        assert_eq!(
            filter.flags().get("text").map(|v| v.to_string()),
            Some(r"Hello\\: World".to_string())
        );
        assert_eq!(
            filter.render().unwrap(),
            r"drawtext=text=Hello\\: World:fontfile=/usr/share/fonts/truetype/freefont/arial.ttf:fontsize=16:x=10:y=20:fontcolor=white"
        );
    }

    #[test]
    fn test_platform_font_default() {
        let filter = DrawText::new("x", 0, 0).build().unwrap();
        let expected = PlatformFontResolver.resolve_font_path("arial.ttf");
        assert_eq!(
            filter.flags().get("fontfile").map(|v| v.to_string()),
            Some(escape(&expected.to_string_lossy()).into_string())
        );
    }

    #[test]
    fn test_windows_style_font_path_escaped() {
        let resolver = |name: &str| PathBuf::from(format!("C://Windows/Fonts/{name}"));
        let filter = DrawText::new("x", 0, 0).build_with(&resolver).unwrap();
        assert_eq!(
            filter.flags().get("fontfile").map(|v| v.to_string()),
            Some(r"C\\://Windows/Fonts/arial.ttf".to_string())
        );
    }

    #[test]
    fn test_extra_options_follow_fixed_ones() {
        let filter = DrawText::new("hi", "(w-text_w)/2", 5)
            .color("yellow")
            .fontsize(24)
            .option("borderw", 2)
            .build_with(&fonts())
            .unwrap();
        let rendered = filter.render().unwrap();
        assert!(rendered.contains(":x=(w-text_w)/2:y=5:fontcolor=yellow:borderw=2"));
        assert!(rendered.contains(":fontsize=24:"));
    }

    #[test]
    fn test_empty_text_rejected() {
        let err = DrawText::new("", 0, 0).build_with(&fonts()).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_timeline_enable() {
        let filter = DrawText::new("title", 0, 0)
            .build_with(&fonts())
            .unwrap()
            .enable_between(0.0, 3.0);
        assert!(filter.render().unwrap().ends_with(r":enable=between(t\,0\,3)"));
    }
}
