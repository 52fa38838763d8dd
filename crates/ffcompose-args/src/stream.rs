//! Stream types, stream specifiers and filtergraph pad labels.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Stream type letter used in ffmpeg stream specifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamType {
    /// `v`: video streams, including attached pictures.
    Video,
    /// `V`: video streams that are not attached pictures or thumbnails.
    VideoOnly,
    /// `a`: audio streams.
    Audio,
    /// `s`: subtitle streams.
    Subtitle,
    /// `d`: data streams.
    Data,
    /// `t`: attachment streams.
    Attachment,
}

impl StreamType {
    /// The specifier letter.
    pub fn as_char(&self) -> char {
        match self {
            StreamType::Video => 'v',
            StreamType::VideoOnly => 'V',
            StreamType::Audio => 'a',
            StreamType::Subtitle => 's',
            StreamType::Data => 'd',
            StreamType::Attachment => 't',
        }
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for StreamType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // Case matters: `V` and `v` select different streams.
        match s {
            "v" | "video" => Ok(StreamType::Video),
            "V" => Ok(StreamType::VideoOnly),
            "a" | "audio" => Ok(StreamType::Audio),
            "s" | "subtitle" => Ok(StreamType::Subtitle),
            "d" | "data" => Ok(StreamType::Data),
            "t" | "attachment" => Ok(StreamType::Attachment),
            _ => Err(Error::InvalidStreamType(s.to_string())),
        }
    }
}

/// Position of an input in the command's input list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputId(pub(crate) usize);

impl InputId {
    /// Zero-based input index as ffmpeg numbers `-i` arguments.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to a stream (or streams of a type) of one input.
///
/// Holds the input's id, not the input itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamSpecifier {
    input: InputId,
    stream_type: Option<StreamType>,
    index: Option<u32>,
}

impl StreamSpecifier {
    /// Create a specifier. An index without a type addresses the n-th stream
    /// of the input regardless of type.
    pub fn new(input: InputId, stream_type: Option<StreamType>, index: Option<u32>) -> Self {
        Self {
            input,
            stream_type,
            index,
        }
    }

    /// The input this stream belongs to.
    pub fn input(&self) -> InputId {
        self.input
    }

    /// Requested stream type, if any.
    pub fn stream_type(&self) -> Option<StreamType> {
        self.stream_type
    }

    /// Explicit stream index, if any.
    pub fn index(&self) -> Option<u32> {
        self.index
    }
}

impl fmt::Display for StreamSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.input)?;
        if let Some(t) = self.stream_type {
            write!(f, ":{t}")?;
        }
        if let Some(i) = self.index {
            write!(f, ":{i}")?;
        }
        Ok(())
    }
}

/// A named filtergraph pad such as `outv`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    /// Create a label. Names must be non-empty and free of whitespace and
    /// filtergraph punctuation.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Error::require_non_empty("label", "name", &name)?;
        if let Some(bad) = name
            .chars()
            .find(|c| c.is_whitespace() || matches!(c, '[' | ']' | ',' | ';' | '\'' | '\\'))
        {
            return Err(Error::configuration(
                "label",
                format!("{name:?} contains reserved character {bad:?}"),
            ));
        }
        Ok(Self(name))
    }

    /// The bare label name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

/// Anything that can be selected with `-map` or fed into a filter chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StreamRef {
    /// Every stream of an input.
    Input(InputId),
    /// A specific stream of an input.
    Stream(StreamSpecifier),
    /// A labelled filtergraph output.
    Label(Label),
}

impl StreamRef {
    /// Text for `-map`: `0`, `0:a:1` or `[outv]`.
    pub fn selector(&self) -> String {
        match self {
            StreamRef::Input(id) => id.to_string(),
            StreamRef::Stream(spec) => spec.to_string(),
            StreamRef::Label(label) => label.to_string(),
        }
    }

    /// Text for a filter chain input pad, always bracketed.
    pub fn pad(&self) -> String {
        match self {
            StreamRef::Label(label) => label.to_string(),
            other => format!("[{}]", other.selector()),
        }
    }

    /// The referenced input, unless this is a filter label.
    pub fn input(&self) -> Option<InputId> {
        match self {
            StreamRef::Input(id) => Some(*id),
            StreamRef::Stream(spec) => Some(spec.input()),
            StreamRef::Label(_) => None,
        }
    }
}

impl From<InputId> for StreamRef {
    fn from(id: InputId) -> Self {
        StreamRef::Input(id)
    }
}

impl From<StreamSpecifier> for StreamRef {
    fn from(spec: StreamSpecifier) -> Self {
        StreamRef::Stream(spec)
    }
}

impl From<Label> for StreamRef {
    fn from(label: Label) -> Self {
        StreamRef::Label(label)
    }
}

impl From<&Label> for StreamRef {
    fn from(label: &Label) -> Self {
        StreamRef::Label(label.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_type_roundtrip_letters() {
        for letter in ["v", "V", "a", "s", "d", "t"] {
            let parsed: StreamType = letter.parse().unwrap();
            assert_eq!(parsed.to_string(), letter);
        }
        assert!("x".parse::<StreamType>().is_err());
    }

    #[test]
    fn test_specifier_display() {
        let id = InputId(2);
        assert_eq!(StreamSpecifier::new(id, None, None).to_string(), "2");
        assert_eq!(
            StreamSpecifier::new(id, Some(StreamType::Audio), None).to_string(),
            "2:a"
        );
        assert_eq!(
            StreamSpecifier::new(id, Some(StreamType::Audio), Some(1)).to_string(),
            "2:a:1"
        );
        assert_eq!(StreamSpecifier::new(id, None, Some(3)).to_string(), "2:3");
    }

    #[test]
    fn test_label_validation() {
        assert!(Label::new("outv").is_ok());
        assert!(Label::new("").is_err());
        assert!(Label::new("out v").is_err());
        assert!(Label::new("a[b").is_err());
    }

    #[test]
    fn test_selector_and_pad() {
        let spec = StreamRef::from(StreamSpecifier::new(InputId(0), Some(StreamType::Video), None));
        assert_eq!(spec.selector(), "0:v");
        assert_eq!(spec.pad(), "[0:v]");

        let label = StreamRef::from(Label::new("outv").unwrap());
        assert_eq!(label.selector(), "[outv]");
        assert_eq!(label.pad(), "[outv]");
        assert_eq!(label.input(), None);

        let whole = StreamRef::from(InputId(1));
        assert_eq!(whole.selector(), "1");
        assert_eq!(whole.input(), Some(InputId(1)));
    }
}
