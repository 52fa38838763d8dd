//! Generated (lavfi) inputs: noise, expressions, tones, colors and test
//! patterns.
//!
//! Each source only fills in a generator's options; the result is rendered
//! like any other filter and read with `-f lavfi`.
//!
//! ```
//! use ffcompose_args::{NoiseColor, NoiseSource, VirtualSource};
//!
//! let noise = NoiseSource { color: NoiseColor::Pink, duration: Some(3.0), ..Default::default() };
//! assert_eq!(
//!     noise.input()?.build()?,
//!     ["-f", "lavfi", "-i", "anoisesrc=color=pink:amplitude=1:r=44100:d=3"]
//! );
//! # Ok::<(), ffcompose_args::Error>(())
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::escape::escape;
use crate::filter::Filter;
use crate::flags::{FlagSet, Value};
use crate::input::Input;

/// A lavfi source that can be read as an input.
pub trait VirtualSource {
    /// The generator filter.
    fn generator(&self) -> Result<Filter>;

    /// Wrap the generator in an `-f lavfi` input.
    fn input(&self) -> Result<Input> {
        Ok(Input::generated(self.generator()?))
    }
}

/// Noise colors supported by `anoisesrc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseColor {
    #[default]
    White,
    Pink,
    Brown,
    Blue,
    Violet,
    Velvet,
}

impl NoiseColor {
    /// Name as understood by `anoisesrc`.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseColor::White => "white",
            NoiseColor::Pink => "pink",
            NoiseColor::Brown => "brown",
            NoiseColor::Blue => "blue",
            NoiseColor::Violet => "violet",
            NoiseColor::Velvet => "velvet",
        }
    }
}

impl fmt::Display for NoiseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoiseColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "white" => Ok(NoiseColor::White),
            "pink" => Ok(NoiseColor::Pink),
            "brown" => Ok(NoiseColor::Brown),
            "blue" => Ok(NoiseColor::Blue),
            "violet" => Ok(NoiseColor::Violet),
            "velvet" => Ok(NoiseColor::Velvet),
            _ => Err(Error::configuration(
                "noise source",
                format!("unknown noise color: {s}"),
            )),
        }
    }
}

/// Noise audio (`anoisesrc`).
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseSource {
    pub color: NoiseColor,
    pub amplitude: f64,
    /// Seconds; unlimited when `None`.
    pub duration: Option<f64>,
    pub sample_rate: u32,
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self {
            color: NoiseColor::White,
            amplitude: 1.0,
            duration: None,
            sample_rate: 44100,
        }
    }
}

impl VirtualSource for NoiseSource {
    fn generator(&self) -> Result<Filter> {
        let flags = FlagSet::new()
            .with("color", self.color.as_str())
            .with("amplitude", self.amplitude)
            .with("r", self.sample_rate)
            .with_opt("d", self.duration);
        Filter::with_flags("anoisesrc", flags)
    }
}

/// Audio generated from a per-channel expression (`aevalsrc`).
///
/// The expression is escaped like any text-bearing filter option, so
/// commas in function calls are safe: `abs(mod(n*0.01,2)-1)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpressionSource {
    pub expr: String,
    pub duration: Option<f64>,
    pub sample_rate: Option<u32>,
    /// Channel layout such as `stereo`.
    pub channels: Option<String>,
}

impl ExpressionSource {
    /// Generate audio from `expr`.
    pub fn new(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            ..Default::default()
        }
    }
}

impl VirtualSource for ExpressionSource {
    fn generator(&self) -> Result<Filter> {
        Error::require_non_empty("expression source", "expr", &self.expr)?;
        let flags = FlagSet::new()
            .with("exprs", escape(&self.expr))
            .with_opt("s", self.sample_rate)
            .with_opt("c", self.channels.as_deref())
            .with_opt("d", self.duration);
        Filter::with_flags("aevalsrc", flags)
    }
}

/// A sine tone (`sine`).
#[derive(Debug, Clone, PartialEq)]
pub struct SineSource {
    pub frequency: f64,
    pub sample_rate: Option<u32>,
    pub duration: Option<f64>,
}

impl Default for SineSource {
    fn default() -> Self {
        Self {
            frequency: 440.0,
            sample_rate: None,
            duration: None,
        }
    }
}

impl VirtualSource for SineSource {
    fn generator(&self) -> Result<Filter> {
        let flags = FlagSet::new()
            .with("frequency", self.frequency)
            .with_opt("sample_rate", self.sample_rate)
            .with_opt("duration", self.duration);
        Filter::with_flags("sine", flags)
    }
}

fn size_value(size: Option<(u32, u32)>) -> Option<String> {
    size.map(|(w, h)| format!("{w}x{h}"))
}

/// A solid color video (`color`).
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSource {
    /// Color name or `0xRRGGBB[AA]`.
    pub color: String,
    pub size: Option<(u32, u32)>,
    /// Frame rate such as `30` or `30000/1001`.
    pub rate: Option<Value>,
    pub duration: Option<f64>,
}

impl Default for ColorSource {
    fn default() -> Self {
        Self {
            color: "black".to_string(),
            size: None,
            rate: None,
            duration: None,
        }
    }
}

impl VirtualSource for ColorSource {
    fn generator(&self) -> Result<Filter> {
        Error::require_non_empty("color source", "color", &self.color)?;
        let flags = FlagSet::new()
            .with("c", self.color.as_str())
            .with_opt("s", size_value(self.size))
            .with_opt("r", self.rate.clone())
            .with_opt("d", self.duration);
        Filter::with_flags("color", flags)
    }
}

/// Built-in video test patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestPattern {
    #[default]
    TestSrc,
    TestSrc2,
    SmpteBars,
    SmpteHdBars,
    RgbTestSrc,
}

impl TestPattern {
    /// Generator filter name.
    pub fn filter_name(&self) -> &'static str {
        match self {
            TestPattern::TestSrc => "testsrc",
            TestPattern::TestSrc2 => "testsrc2",
            TestPattern::SmpteBars => "smptebars",
            TestPattern::SmpteHdBars => "smptehdbars",
            TestPattern::RgbTestSrc => "rgbtestsrc",
        }
    }
}

impl FromStr for TestPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "testsrc" => Ok(TestPattern::TestSrc),
            "testsrc2" => Ok(TestPattern::TestSrc2),
            "smptebars" => Ok(TestPattern::SmpteBars),
            "smptehdbars" => Ok(TestPattern::SmpteHdBars),
            "rgbtestsrc" => Ok(TestPattern::RgbTestSrc),
            _ => Err(Error::configuration(
                "test pattern",
                format!("unknown pattern: {s}"),
            )),
        }
    }
}

/// A test pattern video (`testsrc`, `smptebars`, ...).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TestPatternSource {
    pub pattern: TestPattern,
    pub size: Option<(u32, u32)>,
    pub rate: Option<Value>,
    pub duration: Option<f64>,
}

impl VirtualSource for TestPatternSource {
    fn generator(&self) -> Result<Filter> {
        let flags = FlagSet::new()
            .with_opt("size", size_value(self.size))
            .with_opt("rate", self.rate.clone())
            .with_opt("duration", self.duration);
        Filter::with_flags(self.pattern.filter_name(), flags)
    }
}

impl Input {
    /// Noise audio of the given color.
    pub fn noise(color: NoiseColor, duration: Option<f64>) -> Result<Self> {
        NoiseSource {
            color,
            duration,
            ..Default::default()
        }
        .input()
    }

    /// Audio evaluated from `expr`.
    pub fn expression(expr: impl Into<String>, duration: Option<f64>) -> Result<Self> {
        ExpressionSource {
            duration,
            ..ExpressionSource::new(expr)
        }
        .input()
    }

    /// A sine tone at `frequency` Hz.
    pub fn sine(frequency: f64, duration: Option<f64>) -> Result<Self> {
        SineSource {
            frequency,
            duration,
            ..Default::default()
        }
        .input()
    }

    /// A solid color frame of `width`x`height`.
    pub fn color(color: impl Into<String>, width: u32, height: u32) -> Result<Self> {
        ColorSource {
            color: color.into(),
            size: Some((width, height)),
            ..Default::default()
        }
        .input()
    }

    /// The `testsrc` pattern.
    pub fn test_source(width: u32, height: u32) -> Result<Self> {
        TestPatternSource {
            size: Some((width, height)),
            ..Default::default()
        }
        .input()
    }

    /// SMPTE color bars.
    pub fn smpte_bars(width: u32, height: u32) -> Result<Self> {
        TestPatternSource {
            pattern: TestPattern::SmpteBars,
            size: Some((width, height)),
            ..Default::default()
        }
        .input()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_constructors() {
        assert_eq!(
            Input::sine(1000.0, Some(0.5)).unwrap().build().unwrap(),
            ["-f", "lavfi", "-i", "sine=frequency=1000:duration=0.5"]
        );
        assert_eq!(
            Input::smpte_bars(1280, 720).unwrap().build().unwrap(),
            ["-f", "lavfi", "-i", "smptebars=size=1280x720"]
        );
        assert_eq!(
            Input::color("blue", 320, 240).unwrap().build().unwrap(),
            ["-f", "lavfi", "-i", "color=c=blue:s=320x240"]
        );
        assert!(Input::expression("", None).is_err());
        assert!(Input::noise(NoiseColor::Velvet, None).unwrap().is_virtual());
    }

    #[test]
    fn test_noise_defaults() {
        let noise = NoiseSource::default();
        assert_eq!(
            noise.generator().unwrap().render().unwrap(),
            "anoisesrc=color=white:amplitude=1:r=44100"
        );
    }

    #[test]
    fn test_noise_with_duration() {
        let noise = NoiseSource {
            color: NoiseColor::Brown,
            amplitude: 0.5,
            duration: Some(10.0),
            sample_rate: 48000,
        };
        assert_eq!(
            noise.generator().unwrap().render().unwrap(),
            "anoisesrc=color=brown:amplitude=0.5:r=48000:d=10"
        );
    }

    #[test]
    fn test_noise_color_parse() {
        assert_eq!("Pink".parse::<NoiseColor>().unwrap(), NoiseColor::Pink);
        assert!("green".parse::<NoiseColor>().is_err());
    }

    #[test]
    fn test_expression_is_escaped() {
        let source = ExpressionSource {
            duration: Some(5.0),
            ..ExpressionSource::new("abs(mod(n*0.01,2)-1)")
        };
        assert_eq!(
            source.generator().unwrap().render().unwrap(),
            r"aevalsrc=exprs=abs(mod(n*0.01\,2)-1):d=5"
        );
    }

    #[test]
    fn test_expression_optional_fields() {
        let source = ExpressionSource {
            sample_rate: Some(8000),
            channels: Some("mono".into()),
            ..ExpressionSource::new("sin(440*2*PI*t)")
        };
        assert_eq!(
            source.input().unwrap().build().unwrap(),
            ["-f", "lavfi", "-i", "aevalsrc=exprs=sin(440*2*PI*t):s=8000:c=mono"]
        );
    }

    #[test]
    fn test_empty_expression_rejected() {
        assert!(matches!(
            ExpressionSource::new("").generator(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_sine() {
        let sine = SineSource {
            duration: Some(1.0),
            ..Default::default()
        };
        assert_eq!(
            sine.generator().unwrap().render().unwrap(),
            "sine=frequency=440:duration=1"
        );
    }

    #[test]
    fn test_color_source() {
        let color = ColorSource {
            color: "red".into(),
            size: Some((1920, 1080)),
            rate: Some(Value::from("30000/1001")),
            duration: Some(2.5),
        };
        assert_eq!(
            color.generator().unwrap().render().unwrap(),
            "color=c=red:s=1920x1080:r=30000/1001:d=2.5"
        );
    }

    #[test]
    fn test_test_pattern() {
        let bars = TestPatternSource {
            pattern: TestPattern::SmpteBars,
            size: Some((640, 480)),
            rate: Some(Value::from(25)),
            duration: None,
        };
        assert_eq!(
            bars.generator().unwrap().render().unwrap(),
            "smptebars=size=640x480:rate=25"
        );
        assert_eq!(
            TestPatternSource::default().generator().unwrap().render().unwrap(),
            "testsrc"
        );
    }
}
