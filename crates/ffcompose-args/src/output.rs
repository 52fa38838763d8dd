//! Stream maps and output files.
//!
//! A [`Map`] renders its options for a given position inside its output,
//! and an [`Output`] renders its own options, metadata and destination:
//!
//! ```
//! use ffcompose_args::{Command, Input, Map, Output, StreamType};
//!
//! let mut cmd = Command::new();
//! let src = cmd.add_input(Input::file("in.mp4")?);
//! let map = Map::new(src.video())
//!     .stream_type(StreamType::Video)
//!     .suffix_flag("c", "libx264");
//! assert_eq!(map.build(0), ["-c:v:0", "libx264"]);
//!
//! let out = Output::new("out.mp4", [map])?.flag("crf", 23);
//! assert_eq!(out.build(), ["-crf", "23", "out.mp4"]);
//! # Ok::<(), ffcompose_args::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::escape::wrap_quotes;
use crate::flags::{FlagSet, Value};
use crate::stream::{StreamRef, StreamType};

/// Ordered `key=value` metadata, rendered as `-metadata[spec] key=value`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a key.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// The value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render every entry; `stream_spec` (e.g. `:v`) is appended to
    /// `-metadata` when non-empty.
    pub fn build(&self, stream_spec: &str) -> Vec<String> {
        let mut args = Vec::with_capacity(self.entries.len() * 2);
        for (key, value) in &self.entries {
            args.push(format!("-metadata{stream_spec}"));
            args.push(format!("{key}={}", wrap_quotes(value)));
        }
        args
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (k, v) in iter {
            metadata.add(k, v);
        }
        metadata
    }
}

/// Selects one input, stream or filter output for an output file.
///
/// Suffix flags are qualified per output stream: with stream type `v`, the
/// suffix flag `c` renders as `-c:v:<map_index>`. The index is supplied at
/// render time by whoever owns the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    target: StreamRef,
    stream_type: Option<StreamType>,
    suffix_flags: FlagSet,
    flags: FlagSet,
    metadata: Metadata,
}

impl Map {
    /// Map `target` into the output.
    pub fn new(target: impl Into<StreamRef>) -> Self {
        Self {
            target: target.into(),
            stream_type: None,
            suffix_flags: FlagSet::new(),
            flags: FlagSet::new(),
            metadata: Metadata::new(),
        }
    }

    /// Stream type used to qualify suffix flags and metadata.
    pub fn stream_type(mut self, stream_type: StreamType) -> Self {
        self.stream_type = Some(stream_type);
        self
    }

    /// Add a per-stream option such as `c` or `b`.
    pub fn suffix_flag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.suffix_flags.set(key, value);
        self
    }

    /// Merge per-stream options.
    pub fn suffix_flags(mut self, flags: FlagSet) -> Self {
        self.suffix_flags.extend(flags);
        self
    }

    /// Add an unqualified option.
    pub fn flag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.flags.set(key, value);
        self
    }

    /// Merge unqualified options.
    pub fn flags(mut self, flags: FlagSet) -> Self {
        self.flags.extend(flags);
        self
    }

    /// Builder form of [`Map::add_metadata`].
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.add(key, value);
        self
    }

    /// Add a metadata entry.
    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.add(key, value);
    }

    /// What this map selects.
    pub fn target(&self) -> &StreamRef {
        &self.target
    }

    /// The stream type shortcut, if any.
    pub fn stream_type_shortcut(&self) -> Option<StreamType> {
        self.stream_type
    }

    /// Metadata entries.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// `-map <target>`.
    pub fn selector_args(&self) -> [String; 2] {
        ["-map".to_string(), self.target.selector()]
    }

    /// Render the map's options for position `map_index` in its output.
    pub fn build(&self, map_index: usize) -> Vec<String> {
        let type_suffix = self
            .stream_type
            .map(|t| format!(":{t}"))
            .unwrap_or_default();

        let mut args = Vec::new();
        for (key, value) in self.suffix_flags.present() {
            args.push(format!("-{key}{type_suffix}:{map_index}"));
            args.push(value.to_string());
        }
        args.extend(self.flags.to_args());
        args.extend(self.metadata.build(&type_suffix));
        args
    }
}

/// An output file: its maps, options, metadata and destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    maps: Vec<Map>,
    path: String,
    flags: FlagSet,
    metadata: Metadata,
}

impl Output {
    /// Write `maps` to `path`.
    pub fn new(path: impl Into<String>, maps: impl IntoIterator<Item = Map>) -> Result<Self> {
        let path = path.into();
        Error::require_non_empty("output", "path", &path)?;
        Ok(Self {
            maps: maps.into_iter().collect(),
            path,
            flags: FlagSet::new(),
            metadata: Metadata::new(),
        })
    }

    /// Append a map; its index is its position after existing maps.
    pub fn map(mut self, map: Map) -> Self {
        self.maps.push(map);
        self
    }

    /// Add an output option.
    pub fn flag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.flags.set(key, value);
        self
    }

    /// Merge output options.
    pub fn flags(mut self, flags: FlagSet) -> Self {
        self.flags.extend(flags);
        self
    }

    /// Builder form of [`Output::add_metadata`].
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.add(key, value);
        self
    }

    /// Add a metadata entry.
    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.add(key, value);
    }

    /// Replace all metadata.
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Maps paired with their map index.
    pub fn maps(&self) -> impl Iterator<Item = (usize, &Map)> {
        self.maps.iter().enumerate()
    }

    /// Destination path or URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Output options, then metadata, then the destination.
    pub fn build(&self) -> Vec<String> {
        let mut args = self.flags.to_args();
        args.extend(self.metadata.build(""));
        args.push(self.path.clone());
        args
    }

    /// Every map's options in order, followed by [`Output::build`].
    pub fn build_with_maps(&self) -> Vec<String> {
        let mut args: Vec<String> = self.maps().flat_map(|(i, m)| m.build(i)).collect();
        args.extend(self.build());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputHandle;

    fn src() -> InputHandle {
        InputHandle::new(0)
    }

    #[test]
    fn test_suffix_flag_with_stream_type() {
        let map = Map::new(src().video())
            .stream_type(StreamType::Video)
            .suffix_flag("c", "libx264");
        assert_eq!(map.build(0), ["-c:v:0", "libx264"]);
    }

    #[test]
    fn test_suffix_flag_without_stream_type() {
        let map = Map::new(src()).suffix_flag("c", "copy");
        assert_eq!(map.build(2), ["-c:2", "copy"]);
    }

    #[test]
    fn test_map_is_stateless_over_index() {
        let map = Map::new(src().audio())
            .stream_type(StreamType::Audio)
            .suffix_flag("c", "aac")
            .suffix_flag("b", "192k");
        for index in [0, 1, 7] {
            assert_eq!(
                map.build(index),
                [
                    format!("-c:a:{index}"),
                    "aac".to_string(),
                    format!("-b:a:{index}"),
                    "192k".to_string(),
                ]
            );
        }
    }

    #[test]
    fn test_map_token_order() {
        let map = Map::new(src().audio())
            .stream_type(StreamType::Audio)
            .suffix_flag("c", "aac")
            .flag("ac", 2)
            .with_metadata("language", "eng");
        assert_eq!(
            map.build(1),
            ["-c:a:1", "aac", "-ac", "2", "-metadata:a", "language=eng"]
        );
    }

    #[test]
    fn test_map_absent_flags_skipped() {
        let map = Map::new(src())
            .suffix_flags(FlagSet::new().with_opt("c", None::<&str>))
            .flags(FlagSet::new().with_opt("ac", None::<u32>).with("ar", 48000));
        assert_eq!(map.build(0), ["-ar", "48000"]);
    }

    #[test]
    fn test_selector_args() {
        assert_eq!(Map::new(src().audio_at(1)).selector_args(), ["-map", "0:a:1"]);
    }

    #[test]
    fn test_metadata_quoting() {
        let metadata: Metadata = [("title", "My Video"), ("artist", "me")].into_iter().collect();
        assert_eq!(
            metadata.build(""),
            ["-metadata", "title=\"My Video\"", "-metadata", "artist=me"]
        );
    }

    #[test]
    fn test_metadata_last_write_wins() {
        let mut metadata = Metadata::new();
        metadata.add("title", "a");
        metadata.add("title", "b");
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata.get("title"), Some("b"));
    }

    #[test]
    fn test_output_build_ends_with_path() {
        let out = Output::new("out.mkv", [])
            .unwrap()
            .flag("preset", "fast")
            .with_metadata("title", "t");
        let args = out.build();
        assert_eq!(args, ["-preset", "fast", "-metadata", "title=t", "out.mkv"]);
        assert_eq!(args.last().map(String::as_str), Some("out.mkv"));
    }

    #[test]
    fn test_output_with_two_maps() {
        let out = Output::new(
            "out.mp4",
            [
                Map::new(src().video())
                    .stream_type(StreamType::Video)
                    .suffix_flag("c", "libx264"),
                Map::new(src().audio())
                    .stream_type(StreamType::Audio)
                    .suffix_flag("c", "aac"),
            ],
        )
        .unwrap()
        .with_metadata("title", "t");

        assert_eq!(
            out.build_with_maps(),
            [
                "-c:v:0", "libx264", "-c:a:1", "aac", "-metadata", "title=t", "out.mp4"
            ]
        );
    }

    #[test]
    fn test_empty_path_rejected() {
        assert!(matches!(
            Output::new("  ", []),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_build_is_idempotent() {
        let mut out = Output::new("o.mp4", [Map::new(src())]).unwrap();
        out.add_metadata("comment", "x");
        assert_eq!(out.build_with_maps(), out.build_with_maps());
    }
}
