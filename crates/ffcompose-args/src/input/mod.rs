//! Input sources and the handles used to address their streams.

pub mod virtual_source;

pub use virtual_source::{
    ColorSource, ExpressionSource, NoiseColor, NoiseSource, SineSource, TestPattern,
    TestPatternSource, VirtualSource,
};

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::flags::{FlagSet, Value};
use crate::stream::{InputId, StreamSpecifier, StreamType};

/// What kind of file an input reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    /// A video (or generic media) file.
    #[default]
    Video,
    /// An audio-only file.
    Audio,
    /// A still image.
    Image,
}

#[derive(Debug, Clone, PartialEq)]
enum Source {
    File { path: PathBuf, kind: InputKind },
    Virtual { generator: Filter },
}

/// One `-i` argument together with the options that precede it.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    source: Source,
    format: Option<String>,
    options: FlagSet,
}

impl Input {
    /// Format used for generated inputs.
    pub const LAVFI: &'static str = "lavfi";

    fn from_file(path: impl Into<PathBuf>, kind: InputKind) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(Error::configuration("input", "path must not be empty"));
        }
        Ok(Self {
            source: Source::File { path, kind },
            format: None,
            options: FlagSet::new(),
        })
    }

    /// A media file read as video.
    pub fn file(path: impl Into<PathBuf>) -> Result<Self> {
        Self::from_file(path, InputKind::Video)
    }

    /// An audio file.
    pub fn audio_file(path: impl Into<PathBuf>) -> Result<Self> {
        Self::from_file(path, InputKind::Audio)
    }

    /// A still image.
    pub fn image(path: impl Into<PathBuf>) -> Result<Self> {
        Self::from_file(path, InputKind::Image)
    }

    /// An input generated by a lavfi source filter.
    pub fn generated(generator: Filter) -> Self {
        Self {
            source: Source::Virtual { generator },
            format: Some(Self::LAVFI.to_string()),
            options: FlagSet::new(),
        }
    }

    /// Force the input format (`-f`).
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set an unchecked input option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.set(key, value);
        self
    }

    /// Start reading at `seconds` (`-ss`).
    pub fn seek(self, seconds: f64) -> Self {
        self.option("ss", seconds)
    }

    /// Read at most `seconds` (`-t`).
    pub fn duration(self, seconds: f64) -> Self {
        self.option("t", seconds)
    }

    /// Loop the input `count` times, `-1` for forever (`-stream_loop`).
    pub fn stream_loop(self, count: i32) -> Self {
        self.option("stream_loop", count)
    }

    /// Input frame rate, e.g. `30` or `30000/1001` (`-framerate`).
    pub fn framerate(self, rate: impl Into<Value>) -> Self {
        self.option("framerate", rate)
    }

    /// Explicit frame size for raw inputs (`-s`).
    pub fn size(self, width: u32, height: u32) -> Self {
        self.option("s", format!("{width}x{height}"))
    }

    /// Repeat a still image as a video stream (`-loop 1`).
    pub fn looped(self) -> Self {
        self.option("loop", 1)
    }

    /// The file kind, `None` for generated inputs.
    pub fn kind(&self) -> Option<InputKind> {
        match &self.source {
            Source::File { kind, .. } => Some(*kind),
            Source::Virtual { .. } => None,
        }
    }

    /// The file path, `None` for generated inputs.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::File { path, .. } => Some(path),
            Source::Virtual { .. } => None,
        }
    }

    /// The generator filter, `None` for file inputs.
    pub fn generator(&self) -> Option<&Filter> {
        match &self.source {
            Source::File { .. } => None,
            Source::Virtual { generator } => Some(generator),
        }
    }

    /// Whether this input is generated rather than read from a file.
    pub fn is_virtual(&self) -> bool {
        matches!(self.source, Source::Virtual { .. })
    }

    /// Input options in order.
    pub fn options(&self) -> &FlagSet {
        &self.options
    }

    /// Render `[-f format] [options] -i source`.
    pub fn build(&self) -> Result<Vec<String>> {
        let mut args = Vec::new();
        if let Some(format) = &self.format {
            args.push("-f".to_string());
            args.push(format.clone());
        }
        args.extend(self.options.to_args());
        args.push("-i".to_string());
        match &self.source {
            Source::File { path, .. } => args.push(path.to_string_lossy().into_owned()),
            Source::Virtual { generator } => args.push(generator.render()?),
        }
        Ok(args)
    }
}

/// A registered input, used to address its streams.
///
/// Handles are returned by [`crate::Command::add_input`] and only carry the
/// input's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputHandle {
    id: InputId,
}

impl InputHandle {
    pub(crate) fn new(index: usize) -> Self {
        Self { id: InputId(index) }
    }

    /// The input's id.
    pub fn id(&self) -> InputId {
        self.id
    }

    /// Streams of one type, optionally narrowed to the n-th of that type.
    pub fn stream(&self, stream_type: StreamType, index: Option<u32>) -> StreamSpecifier {
        StreamSpecifier::new(self.id, Some(stream_type), index)
    }

    /// Video streams (`N:v`).
    pub fn video(&self) -> StreamSpecifier {
        self.stream(StreamType::Video, None)
    }

    /// The n-th video stream (`N:v:n`).
    pub fn video_at(&self, index: u32) -> StreamSpecifier {
        self.stream(StreamType::Video, Some(index))
    }

    /// Audio streams (`N:a`).
    pub fn audio(&self) -> StreamSpecifier {
        self.stream(StreamType::Audio, None)
    }

    /// The n-th audio stream (`N:a:n`).
    pub fn audio_at(&self, index: u32) -> StreamSpecifier {
        self.stream(StreamType::Audio, Some(index))
    }

    /// Subtitle streams (`N:s`).
    pub fn subtitle(&self) -> StreamSpecifier {
        self.stream(StreamType::Subtitle, None)
    }
}

impl From<InputHandle> for crate::stream::StreamRef {
    fn from(handle: InputHandle) -> Self {
        crate::stream::StreamRef::Input(handle.id)
    }
}
