//! Run time options for building and sampling a permutation QUBO, loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::builder::PenaltyQuboBuilder;
use crate::error::{QuboError, Result};
use crate::grid::VariableGrid;
use crate::penalty::PenaltyWeights;
use crate::sampler::{EnumerationSampler, LocalSearchSampler, Sampler};

/// Which in-process sampler to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplerSelection {
    Enumerate,
    #[default]
    LocalSearch,
}

/// Options for a build and solve run.
///
/// Example:
/// ``` rust
/// use permqubo::solver_options::{SamplerSelection, SolverOptions};
///
/// let options = SolverOptions::from_toml_str(r#"
///     n_nodes = 3
///     penalty_b = 2.0
///     sampler = "enumerate"
/// "#).unwrap();
///
/// assert_eq!(options.n_nodes, 3);
/// assert_eq!(options.n_orders, None);
/// assert_eq!(options.n_orders(), 3);
/// assert_eq!(options.sampler, SamplerSelection::Enumerate);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SolverOptions {
    pub n_nodes: usize,
    /// Defaults to `n_nodes` when absent.
    pub n_orders: Option<usize>,
    pub penalty_b: f64,
    /// Overrides `1.5 * penalty_b` for the "each node has exactly one order" constraints.
    pub node_multiplier: Option<f64>,
    /// Overrides `1.5 * penalty_b` for the "each order has exactly one node" constraints.
    pub order_multiplier: Option<f64>,
    pub sampler: SamplerSelection,
    pub num_reads: usize,
    pub max_steps: usize,
    pub seed: u64,
    pub verbose: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            n_nodes: 5,
            n_orders: None,
            penalty_b: 1.0,
            node_multiplier: None,
            order_multiplier: None,
            sampler: SamplerSelection::LocalSearch,
            num_reads: 100,
            max_steps: 1000,
            seed: 0,
            verbose: 1,
        }
    }
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`QuboError::Config`] if the file cannot be read or is not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| QuboError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Parses options from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| QuboError::Config(e.to_string()))
    }

    /// Order count, falling back to the node count for a square grid.
    pub fn n_orders(&self) -> usize {
        self.n_orders.unwrap_or(self.n_nodes)
    }

    pub fn set_sampler(&mut self, sampler: Option<String>) -> Result<()> {
        if let Some(s) = sampler {
            self.sampler = match s.as_str() {
                "enumerate" => SamplerSelection::Enumerate,
                "local" | "local_search" => SamplerSelection::LocalSearch,
                other => return Err(QuboError::Config(format!("unknown sampler '{other}'"))),
            };
        }
        Ok(())
    }

    /// Validated builder for these options.
    pub fn builder(&self) -> Result<PenaltyQuboBuilder> {
        let grid = VariableGrid::new(self.n_nodes, self.n_orders())?;
        let base = PenaltyWeights::from_base(self.penalty_b)?;
        let weights = PenaltyWeights::with_multipliers(
            self.node_multiplier.unwrap_or(base.node),
            self.order_multiplier.unwrap_or(base.order),
        )?;

        Ok(PenaltyQuboBuilder::with_weights(grid, weights))
    }

    pub fn make_sampler(&self) -> Box<dyn Sampler> {
        match self.sampler {
            SamplerSelection::Enumerate => Box::new(EnumerationSampler {
                keep: self.num_reads,
                ..EnumerationSampler::default()
            }),
            SamplerSelection::LocalSearch => Box::new(LocalSearchSampler {
                num_reads: self.num_reads,
                max_steps: self.max_steps,
                seed: self.seed,
                ..LocalSearchSampler::default()
            }),
        }
    }
}
