use ffcompose_args::{FlagSet, Value};
use serde::Deserialize;
use std::path::PathBuf;

/// A declarative ffmpeg invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    /// Global options rendered after `-hide_banner`/`-y`.
    #[serde(default)]
    pub global: FlagSet,

    #[serde(default)]
    pub inputs: Vec<InputSpec>,

    #[serde(default)]
    pub chains: Vec<ChainSpec>,

    pub outputs: Vec<OutputSpec>,
}

/// A named input; the name is how chains and maps refer to it.
#[derive(Debug, Clone, Deserialize)]
pub struct InputSpec {
    pub name: String,

    #[serde(flatten)]
    pub source: SourceSpec,

    /// Options rendered before `-i`, in file order.
    #[serde(default)]
    pub options: FlagSet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceSpec {
    File {
        path: PathBuf,
        format: Option<String>,
    },
    Video {
        path: PathBuf,
    },
    Audio {
        path: PathBuf,
    },
    Image {
        path: PathBuf,
        #[serde(default)]
        looped: bool,
    },
    Noise {
        color: Option<String>,
        amplitude: Option<f64>,
        duration: Option<f64>,
        sample_rate: Option<u32>,
    },
    Expression {
        expr: String,
        duration: Option<f64>,
        sample_rate: Option<u32>,
        channels: Option<String>,
    },
    Sine {
        frequency: Option<f64>,
        duration: Option<f64>,
        sample_rate: Option<u32>,
    },
    Color {
        color: Option<String>,
        size: Option<String>,
        rate: Option<Value>,
        duration: Option<f64>,
    },
    Testsrc(PatternSpec),
    Smptebars(PatternSpec),
    /// Any lavfi source filter.
    Lavfi {
        generator: String,
        #[serde(default)]
        flags: FlagSet,
        /// Keys of `flags` whose values are escaped before rendering.
        #[serde(default)]
        escaped: Vec<String>,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatternSpec {
    pub size: Option<String>,
    pub rate: Option<Value>,
    pub duration: Option<f64>,
}

/// One filter chain: `[in][in]f1,f2[out]`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainSpec {
    /// `name`, `name:a`, `name:v:0` or a bracketed label such as `[bg]`.
    #[serde(default)]
    pub inputs: Vec<String>,

    pub filters: Vec<FilterSpec>,

    /// Output labels, with or without brackets.
    #[serde(default)]
    pub outputs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilterSpec {
    #[serde(flatten)]
    pub kind: FilterKind,

    /// Timeline expression, e.g. `gte(t,2)`.
    pub enable: Option<String>,

    /// `[start, end]` in seconds; shorthand for `between(t,start,end)`.
    pub between: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterKind {
    Drawtext {
        text: String,
        x: Option<Value>,
        y: Option<Value>,
        fontsize: Option<u32>,
        color: Option<String>,
        font: Option<String>,
        #[serde(default)]
        options: FlagSet,
    },
    Subtitles {
        filename: String,
        original_size: Option<String>,
        fontsdir: Option<String>,
        alpha: Option<bool>,
        charenc: Option<String>,
        stream_index: Option<u32>,
        force_style: Option<String>,
        wrap_unicode: Option<bool>,
    },
    Custom {
        name: String,
        #[serde(default)]
        options: FlagSet,
        /// Keys of `options` whose values are escaped before rendering.
        #[serde(default)]
        escaped: Vec<String>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSpec {
    pub path: String,

    #[serde(default)]
    pub maps: Vec<MapSpec>,

    #[serde(default)]
    pub flags: FlagSet,

    #[serde(default)]
    pub metadata: FlagSet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapSpec {
    /// Same reference syntax as chain inputs.
    pub source: String,

    pub stream_type: Option<String>,

    #[serde(default)]
    pub suffix_flags: FlagSet,

    #[serde(default)]
    pub flags: FlagSet,

    #[serde(default)]
    pub metadata: FlagSet,
}
