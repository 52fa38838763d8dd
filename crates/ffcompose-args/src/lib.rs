//! # ffcompose-args
//!
//! Typed builder for ffmpeg command lines.
//!
//! This crate turns inputs, filters, stream maps and outputs into the exact
//! argument vector ffmpeg expects:
//! - Escaping text for filter option values and filtergraph descriptions
//! - Rendering ordered option sets as `-name value` pairs
//! - Filters (`drawtext`, `subtitles`, or any named filter) and filter chains
//! - File and generated (lavfi) inputs with addressable streams
//! - Stream maps with per-output-stream options, and output files
//!
//! No process is spawned; the result is a `Vec<String>` to hand to
//! `std::process::Command::args` or similar.
//!
//! ## Features
//!
//! - `serialize` - Deserialize [`Value`] and [`FlagSet`] from config files
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```
//! use ffcompose_args::{
//!     Command, DirectoryFontResolver, DrawText, FilterChain, Input, Label, Map, Output,
//!     StreamType,
//! };
//!
//! let mut cmd = Command::new().overwrite(true);
//! let src = cmd.add_input(Input::file("in.mp4")?);
//!
//! let title = DrawText::new("Hello: World", 10, 20)
//!     .build_with(&DirectoryFontResolver::new("/fonts"))?
//!     .enable_between(0.0, 3.0);
//! let outv = Label::new("outv")?;
//! cmd.add_chain(FilterChain::new([title])?.input(src.video()).output(outv.clone()));
//!
//! cmd.add_output(
//!     Output::new("out.mp4", [
//!         Map::new(&outv).stream_type(StreamType::Video).suffix_flag("c", "libx264"),
//!         Map::new(src.audio()).stream_type(StreamType::Audio).suffix_flag("c", "copy"),
//!     ])?
//!     .with_metadata("title", "Greeting"),
//! );
//!
//! let args = cmd.build()?;
//! assert_eq!(args.last().map(String::as_str), Some("out.mp4"));
//! # Ok::<(), ffcompose_args::Error>(())
//! ```

mod error;
pub mod command;
pub mod escape;
pub mod filter;
pub mod flags;
pub mod font;
pub mod input;
pub mod output;
pub mod stream;

// Re-exports
pub use command::Command;
pub use error::{Error, Result};
pub use escape::{escape, escape_expression, escape_filtergraph, wrap_quotes, EscapeLevel, Escaped};
pub use filter::{DrawText, Filter, FilterChain, FilterGraph, Subtitles};
pub use flags::{render_flags, FlagSet, Value};
pub use font::{DirectoryFontResolver, FontResolver, PlatformFontResolver};
pub use input::{
    ColorSource, ExpressionSource, Input, InputHandle, InputKind, NoiseColor, NoiseSource,
    SineSource, TestPattern, TestPatternSource, VirtualSource,
};
pub use output::{Map, Metadata, Output};
pub use stream::{InputId, Label, StreamRef, StreamSpecifier, StreamType};
