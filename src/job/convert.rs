use super::types::*;
use crate::config::Config;

use anyhow::{Context, Result};
use ffcompose_args::{
    escape, ColorSource, Command, DrawText, ExpressionSource, Filter, FilterChain, FlagSet,
    FontResolver, Input, InputHandle, Label, Map, NoiseSource, Output, SineSource, StreamRef,
    StreamType, Subtitles, TestPattern, TestPatternSource, Value, VirtualSource,
};
use std::collections::HashMap;

type Registry<'a> = HashMap<&'a str, InputHandle>;

/// Turn a job into a command carrying the configured global options.
pub fn build_command(job: &Job, config: &Config) -> Result<Command> {
    let fonts = config.font_resolver();

    let mut cmd = config.base_command();
    for (key, value) in job.global.present() {
        cmd = cmd.global_option(key, value.clone());
    }

    let mut registry = Registry::new();
    for spec in &job.inputs {
        let input = build_input(spec).with_context(|| format!("Input '{}'", spec.name))?;
        let handle = cmd.add_input(input);
        tracing::debug!("Registered input '{}' as #{}", spec.name, handle.id());
        registry.insert(spec.name.as_str(), handle);
    }

    for (i, spec) in job.chains.iter().enumerate() {
        let chain = build_chain(spec, &registry, &*fonts)
            .with_context(|| format!("Chain {}", i))?;
        cmd.add_chain(chain);
    }

    for spec in &job.outputs {
        let output = build_output(spec, &registry)
            .with_context(|| format!("Output '{}'", spec.path))?;
        cmd.add_output(output);
    }

    Ok(cmd)
}

/// Parse `WIDTHxHEIGHT`.
pub fn parse_size(size: &str) -> Result<(u32, u32)> {
    let (w, h) = size
        .split_once(['x', 'X'])
        .with_context(|| format!("Invalid size '{}', expected WIDTHxHEIGHT", size))?;
    let w = w
        .trim()
        .parse()
        .with_context(|| format!("Invalid width in '{}'", size))?;
    let h = h
        .trim()
        .parse()
        .with_context(|| format!("Invalid height in '{}'", size))?;
    Ok((w, h))
}

/// Resolve a stream reference.
///
/// `[label]` names a filtergraph pad; anything else is
/// `input[:type[:index]]` where `input` is a declared input name.
pub fn resolve_ref(reference: &str, registry: &HashMap<&str, InputHandle>) -> Result<StreamRef> {
    let reference = reference.trim();
    if let Some(name) = reference
        .strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
    {
        return Ok(Label::new(name)?.into());
    }

    let mut parts = reference.split(':');
    let name = parts.next().unwrap_or_default();
    let handle = registry
        .get(name)
        .with_context(|| format!("Unknown input '{}' in reference '{}'", name, reference))?;

    let stream_type = parts.next().map(str::parse::<StreamType>).transpose()?;
    let index = parts
        .next()
        .map(|i| {
            i.parse::<u32>()
                .with_context(|| format!("Invalid stream index '{}' in '{}'", i, reference))
        })
        .transpose()?;
    if parts.next().is_some() {
        anyhow::bail!("Too many ':' separators in reference '{}'", reference);
    }

    Ok(match (stream_type, index) {
        (None, _) => (*handle).into(),
        (Some(t), index) => handle.stream(t, index).into(),
    })
}

fn output_label(name: &str) -> Result<Label> {
    let name = name.trim();
    let bare = name
        .strip_prefix('[')
        .and_then(|n| n.strip_suffix(']'))
        .unwrap_or(name);
    Ok(Label::new(bare)?)
}

fn escape_keys(flags: &FlagSet, keys: &[String]) -> FlagSet {
    flags
        .present()
        .map(|(key, value)| {
            let value = match value.as_raw_str() {
                Some(raw) if keys.iter().any(|k| k == key) => Value::from(escape(raw)),
                _ => value.clone(),
            };
            (key.to_string(), value)
        })
        .collect()
}

fn position(value: &Option<Value>) -> Value {
    match value {
        Some(Value::Str(s)) => escape(s).into(),
        Some(other) => other.clone(),
        None => Value::Int(0),
    }
}

fn build_input(spec: &InputSpec) -> Result<Input> {
    let mut input = match &spec.source {
        SourceSpec::File { path, format } => {
            let input = Input::file(path)?;
            match format {
                Some(format) => input.format(format.as_str()),
                None => input,
            }
        }
        SourceSpec::Video { path } => Input::file(path)?,
        SourceSpec::Audio { path } => Input::audio_file(path)?,
        SourceSpec::Image { path, looped } => {
            let input = Input::image(path)?;
            if *looped {
                input.looped()
            } else {
                input
            }
        }
        SourceSpec::Noise {
            color,
            amplitude,
            duration,
            sample_rate,
        } => {
            let defaults = NoiseSource::default();
            NoiseSource {
                color: match color {
                    Some(c) => c.parse()?,
                    None => defaults.color,
                },
                amplitude: amplitude.unwrap_or(defaults.amplitude),
                duration: *duration,
                sample_rate: sample_rate.unwrap_or(defaults.sample_rate),
            }
            .input()?
        }
        SourceSpec::Expression {
            expr,
            duration,
            sample_rate,
            channels,
        } => ExpressionSource {
            expr: expr.clone(),
            duration: *duration,
            sample_rate: *sample_rate,
            channels: channels.clone(),
        }
        .input()?,
        SourceSpec::Sine {
            frequency,
            duration,
            sample_rate,
        } => {
            let defaults = SineSource::default();
            SineSource {
                frequency: frequency.unwrap_or(defaults.frequency),
                sample_rate: *sample_rate,
                duration: *duration,
            }
            .input()?
        }
        SourceSpec::Color {
            color,
            size,
            rate,
            duration,
        } => {
            let defaults = ColorSource::default();
            ColorSource {
                color: color.clone().unwrap_or(defaults.color),
                size: size.as_deref().map(parse_size).transpose()?,
                rate: rate.clone(),
                duration: *duration,
            }
            .input()?
        }
        SourceSpec::Testsrc(pattern) => pattern_input(TestPattern::TestSrc, pattern)?,
        SourceSpec::Smptebars(pattern) => pattern_input(TestPattern::SmpteBars, pattern)?,
        SourceSpec::Lavfi {
            generator,
            flags,
            escaped,
        } => Input::generated(Filter::with_flags(
            generator.as_str(),
            escape_keys(flags, escaped),
        )?),
    };

    for (key, value) in spec.options.present() {
        input = input.option(key, value.clone());
    }
    Ok(input)
}

fn pattern_input(pattern: TestPattern, spec: &PatternSpec) -> Result<Input> {
    Ok(TestPatternSource {
        pattern,
        size: spec.size.as_deref().map(parse_size).transpose()?,
        rate: spec.rate.clone(),
        duration: spec.duration,
    }
    .input()?)
}

fn build_filter(spec: &FilterSpec, fonts: &dyn FontResolver) -> Result<Filter> {
    let filter = match &spec.kind {
        FilterKind::Drawtext {
            text,
            x,
            y,
            fontsize,
            color,
            font,
            options,
        } => {
            let mut drawtext = DrawText::new(text.as_str(), position(x), position(y));
            if let Some(size) = fontsize {
                drawtext = drawtext.fontsize(*size);
            }
            if let Some(color) = color {
                drawtext = drawtext.color(color.as_str());
            }
            if let Some(font) = font {
                drawtext = drawtext.fontname(font.as_str());
            }
            for (key, value) in options.present() {
                drawtext = drawtext.option(key, value.clone());
            }
            drawtext.build_with(fonts)?
        }
        FilterKind::Subtitles {
            filename,
            original_size,
            fontsdir,
            alpha,
            charenc,
            stream_index,
            force_style,
            wrap_unicode,
        } => {
            let mut subs = Subtitles::new(filename.as_str());
            if let Some(size) = original_size {
                let (w, h) = parse_size(size)?;
                subs = subs.original_size(w, h);
            }
            if let Some(dir) = fontsdir {
                subs = subs.fontsdir(dir.as_str());
            }
            if let Some(alpha) = alpha {
                subs = subs.alpha(*alpha);
            }
            if let Some(charenc) = charenc {
                subs = subs.charenc(charenc.as_str());
            }
            if let Some(index) = stream_index {
                subs = subs.stream_index(*index);
            }
            if let Some(style) = force_style {
                subs = subs.force_style(style.as_str());
            }
            if let Some(wrap) = wrap_unicode {
                subs = subs.wrap_unicode(*wrap);
            }
            subs.build()?
        }
        FilterKind::Custom {
            name,
            options,
            escaped,
        } => Filter::with_flags(name.as_str(), escape_keys(options, escaped))?,
    };

    match (&spec.enable, spec.between) {
        (Some(_), Some(_)) => anyhow::bail!("Filter cannot set both 'enable' and 'between'"),
        (Some(expr), None) => Ok(filter.with_enable(expr)),
        (None, Some([start, end])) => Ok(filter.enable_between(start, end)),
        (None, None) => Ok(filter),
    }
}

fn build_chain(spec: &ChainSpec, registry: &Registry, fonts: &dyn FontResolver) -> Result<FilterChain> {
    let filters = spec
        .filters
        .iter()
        .enumerate()
        .map(|(i, f)| build_filter(f, fonts).with_context(|| format!("Filter {}", i)))
        .collect::<Result<Vec<_>>>()?;

    let mut chain = FilterChain::new(filters)?;
    for reference in &spec.inputs {
        chain = chain.input(resolve_ref(reference, registry)?);
    }
    for name in &spec.outputs {
        chain = chain.output(output_label(name)?);
    }
    Ok(chain)
}

fn build_map(spec: &MapSpec, registry: &Registry) -> Result<Map> {
    let mut map = Map::new(resolve_ref(&spec.source, registry)?)
        .suffix_flags(spec.suffix_flags.clone())
        .flags(spec.flags.clone());
    if let Some(t) = &spec.stream_type {
        map = map.stream_type(t.parse()?);
    }
    for (key, value) in spec.metadata.present() {
        map.add_metadata(key, value.to_string());
    }
    Ok(map)
}

fn build_output(spec: &OutputSpec, registry: &Registry) -> Result<Output> {
    let maps = spec
        .maps
        .iter()
        .map(|m| build_map(m, registry))
        .collect::<Result<Vec<_>>>()?;

    let mut output = Output::new(spec.path.as_str(), maps)?.flags(spec.flags.clone());
    for (key, value) in spec.metadata.present() {
        output.add_metadata(key, value.to_string());
    }
    Ok(output)
}
