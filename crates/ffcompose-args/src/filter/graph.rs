//! Filter chains and `-filter_complex` graphs.

use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::stream::{InputId, Label, StreamRef};

/// A linear chain of filters with optional input and output pads.
///
/// Renders as `[0:v][1:v]f1,f2[out]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterChain {
    inputs: Vec<StreamRef>,
    filters: Vec<Filter>,
    outputs: Vec<Label>,
}

impl FilterChain {
    /// Create a chain from at least one filter.
    pub fn new(filters: impl IntoIterator<Item = Filter>) -> Result<Self> {
        let filters: Vec<Filter> = filters.into_iter().collect();
        if filters.is_empty() {
            return Err(Error::configuration(
                "filter chain",
                "at least one filter is required",
            ));
        }
        Ok(Self {
            inputs: Vec::new(),
            filters,
            outputs: Vec::new(),
        })
    }

    /// Feed `source` into the chain's next input pad.
    pub fn input(mut self, source: impl Into<StreamRef>) -> Self {
        self.inputs.push(source.into());
        self
    }

    /// Name the chain's next output pad.
    pub fn output(mut self, label: Label) -> Self {
        self.outputs.push(label);
        self
    }

    /// Append a filter to the end of the chain.
    pub fn then(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Input pads in order.
    pub fn inputs(&self) -> &[StreamRef] {
        &self.inputs
    }

    /// Filters in order.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Output pads in order.
    pub fn outputs(&self) -> &[Label] {
        &self.outputs
    }

    /// Render the chain.
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        for pad in &self.inputs {
            out.push_str(&pad.pad());
        }
        let filters = self
            .filters
            .iter()
            .map(Filter::render)
            .collect::<Result<Vec<_>>>()?;
        out.push_str(&filters.join(","));
        for label in &self.outputs {
            out.push_str(&label.to_string());
        }
        Ok(out)
    }
}

/// A complete filtergraph made of `;` separated chains.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterGraph {
    chains: Vec<FilterChain>,
}

impl FilterGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chain.
    pub fn chain(mut self, chain: FilterChain) -> Self {
        self.chains.push(chain);
        self
    }

    /// Append a chain in place.
    pub fn push(&mut self, chain: FilterChain) {
        self.chains.push(chain);
    }

    /// Chains in order.
    pub fn chains(&self) -> &[FilterChain] {
        &self.chains
    }

    /// Whether the graph has no chains.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Inputs referenced by any chain's input pads.
    pub fn referenced_inputs(&self) -> impl Iterator<Item = InputId> + '_ {
        self.chains
            .iter()
            .flat_map(|c| c.inputs.iter())
            .filter_map(StreamRef::input)
    }

    /// Render the graph text passed to `-filter_complex`.
    pub fn render(&self) -> Result<String> {
        let chains = self
            .chains
            .iter()
            .map(FilterChain::render)
            .collect::<Result<Vec<_>>>()?;

        #[cfg(feature = "tracing")]
        tracing::trace!(chains = chains.len(), "rendered filtergraph");

        Ok(chains.join(";"))
    }
}

impl FromIterator<FilterChain> for FilterGraph {
    fn from_iter<I: IntoIterator<Item = FilterChain>>(iter: I) -> Self {
        Self {
            chains: iter.into_iter().collect(),
        }
    }
}
