//! Assembles inputs, a filtergraph and outputs into one argument vector.

use crate::error::{Error, Result};
use crate::filter::{FilterChain, FilterGraph};
use crate::flags::{FlagSet, Value};
use crate::input::{Input, InputHandle};
use crate::output::Output;
use crate::stream::InputId;

/// A complete ffmpeg invocation, minus the program name.
///
/// Arguments are emitted in this order: global switches and options, one
/// block per input, `-filter_complex`, then per output every map
/// (`-map <target>` followed by the map's own options at its index) and
/// finally the output's options, metadata and path.
///
/// ```
/// use ffcompose_args::{Command, Input, Map, Output, StreamType};
///
/// let mut cmd = Command::new().overwrite(true);
/// let src = cmd.add_input(Input::file("in.mkv")?);
/// cmd.add_output(Output::new("out.mp4", [
///     Map::new(src.video()).stream_type(StreamType::Video).suffix_flag("c", "copy"),
/// ])?);
///
/// assert_eq!(
///     cmd.build()?,
///     ["-y", "-i", "in.mkv", "-map", "0:v", "-c:v:0", "copy", "out.mp4"]
/// );
/// # Ok::<(), ffcompose_args::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Command {
    hide_banner: bool,
    overwrite: bool,
    global: FlagSet,
    inputs: Vec<Input>,
    graph: FilterGraph,
    outputs: Vec<Output>,
}

impl Command {
    /// Create an empty command.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `-hide_banner`.
    pub fn hide_banner(mut self, hide: bool) -> Self {
        self.hide_banner = hide;
        self
    }

    /// Emit `-y` so existing outputs are overwritten.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set the log level (`-loglevel`).
    pub fn loglevel(self, level: impl Into<String>) -> Self {
        self.global_option("loglevel", level.into())
    }

    /// Set an unchecked global option.
    pub fn global_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.global.set(key, value);
        self
    }

    /// Register an input and return a handle addressing its streams.
    pub fn add_input(&mut self, input: Input) -> InputHandle {
        self.inputs.push(input);
        InputHandle::new(self.inputs.len() - 1)
    }

    /// Append a filter chain to the filtergraph.
    pub fn add_chain(&mut self, chain: FilterChain) {
        self.graph.push(chain);
    }

    /// Replace the filtergraph.
    pub fn set_filter_graph(&mut self, graph: FilterGraph) {
        self.graph = graph;
    }

    /// Append an output file.
    pub fn add_output(&mut self, output: Output) {
        self.outputs.push(output);
    }

    /// Registered inputs in order.
    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    /// The filtergraph.
    pub fn filter_graph(&self) -> &FilterGraph {
        &self.graph
    }

    /// Outputs in order.
    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    fn check_input(&self, id: InputId) -> Result<()> {
        if id.index() >= self.inputs.len() {
            return Err(Error::UnknownInput {
                index: id.index(),
                inputs: self.inputs.len(),
            });
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for id in self.graph.referenced_inputs() {
            self.check_input(id)?;
        }
        for output in &self.outputs {
            for (_, map) in output.maps() {
                if let Some(id) = map.target().input() {
                    self.check_input(id)?;
                }
            }
        }
        Ok(())
    }

    /// Render the full argument vector.
    pub fn build(&self) -> Result<Vec<String>> {
        self.validate()?;

        let mut args = Vec::new();
        if self.hide_banner {
            args.push("-hide_banner".to_string());
        }
        if self.overwrite {
            args.push("-y".to_string());
        }
        args.extend(self.global.to_args());

        for input in &self.inputs {
            args.extend(input.build()?);
        }

        if !self.graph.is_empty() {
            args.push("-filter_complex".to_string());
            args.push(self.graph.render()?);
        }

        for output in &self.outputs {
            for (index, map) in output.maps() {
                args.extend(map.selector_args());
                args.extend(map.build(index));
            }
            args.extend(output.build());

            #[cfg(feature = "tracing")]
            tracing::trace!(path = output.path(), "rendered output arguments");
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            inputs = self.inputs.len(),
            outputs = self.outputs.len(),
            tokens = args.len(),
            "built ffmpeg arguments"
        );

        Ok(args)
    }

    /// Render a shell-quoted command line starting with `program`.
    pub fn to_shell_string(&self, program: &str) -> Result<String> {
        let args = self.build()?;
        Ok(shell_words::join(
            std::iter::once(program).chain(args.iter().map(String::as_str)),
        ))
    }
}
