//! The `subtitles` filter (libass).

use crate::error::{Error, Result};
use crate::escape::escape_opt;
use crate::filter::Filter;
use crate::flags::FlagSet;

/// Burn subtitles from a file into the video.
///
/// Only `filename` is required; every other option is omitted from the
/// rendered filter unless set.
#[derive(Debug, Clone, Default)]
pub struct Subtitles {
    filename: String,
    original_size: Option<(u32, u32)>,
    fontsdir: Option<String>,
    alpha: Option<bool>,
    charenc: Option<String>,
    stream_index: Option<u32>,
    force_style: Option<String>,
    wrap_unicode: Option<bool>,
}

impl Subtitles {
    /// Read subtitles from `filename`.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Default::default()
        }
    }

    /// Size of the video the subtitle file was authored for. Both
    /// dimensions must be non-zero to take effect.
    pub fn original_size(mut self, width: u32, height: u32) -> Self {
        self.original_size = Some((width, height));
        self
    }

    /// Extra directory to search for fonts.
    pub fn fontsdir(mut self, dir: impl Into<String>) -> Self {
        self.fontsdir = Some(dir.into());
        self
    }

    /// Process the alpha channel.
    pub fn alpha(mut self, alpha: bool) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Input character encoding, when not UTF-8.
    pub fn charenc(mut self, charenc: impl Into<String>) -> Self {
        self.charenc = Some(charenc.into());
        self
    }

    /// Subtitle stream index inside `filename`.
    pub fn stream_index(mut self, index: u32) -> Self {
        self.stream_index = Some(index);
        self
    }

    /// ASS style overrides as comma separated `KEY=VALUE` pairs.
    pub fn force_style(mut self, style: impl Into<String>) -> Self {
        self.force_style = Some(style.into());
        self
    }

    /// Break lines with the Unicode line breaking algorithm.
    pub fn wrap_unicode(mut self, wrap: bool) -> Self {
        self.wrap_unicode = Some(wrap);
        self
    }

    /// Build the filter, escaping the path and style options.
    pub fn build(self) -> Result<Filter> {
        Error::require_non_empty("subtitles", "filename", &self.filename)?;

        let original_size = self
            .original_size
            .filter(|(w, h)| *w > 0 && *h > 0)
            .map(|(w, h)| format!("{w}x{h}"));

        let flags = FlagSet::new()
            .with_opt("filename", escape_opt(Some(&self.filename)))
            .with_opt("original_size", original_size)
            .with_opt("fontsdir", escape_opt(self.fontsdir.as_deref()))
            .with_opt("alpha", self.alpha)
            .with_opt("charenc", self.charenc)
            .with_opt("stream_index", self.stream_index)
            .with_opt("force_style", escape_opt(self.force_style.as_deref()))
            .with_opt("wrap_unicode", self.wrap_unicode);

        Filter::with_flags("subtitles", flags)
    }
}
