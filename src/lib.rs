//! # permqubo
//!
//! Builds QUBO models for permutation-assignment problems, the core of a Hamiltonian-cycle formulation:
//! `n_nodes` nodes each take exactly one of `n_orders` visit slots and every slot is taken exactly once.
//! Both constraints are encoded as quadratic penalties over a node×order grid of binary variables and folded
//! into a single upper-triangular coefficient table ready for an annealer or heuristic sampler.
//!
//! ``` rust
//! use permqubo::builder::PenaltyQuboBuilder;
//! use permqubo::decode::AssignmentGrid;
//! use permqubo::sampler::{EnumerationSampler, Sampler};
//!
//! let qubo = PenaltyQuboBuilder::new(3, 3, 1.0).unwrap().build();
//! let samples = EnumerationSampler::default().sample(&qubo).unwrap();
//! let best = samples.first().unwrap();
//!
//! let decoded = AssignmentGrid::decode(qubo.grid(), &best.assignment).unwrap();
//! assert!(decoded.is_feasible());
//! ```

pub mod builder;
pub mod coefficients;
pub mod decode;
pub mod error;
pub mod grid;
pub mod initial_points;
pub mod local_search;
pub mod local_search_utils;
pub mod penalty;
pub mod qubo;
pub mod sampler;
pub mod solver_logger;
pub mod solver_options;

#[cfg(feature = "python")]
pub mod python_interopt;

pub use error::{QuboError, Result};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn permqubo(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(python_interopt::build_qubo, m)?)?;
    m.add_function(wrap_pyfunction!(python_interopt::decode, m)?)?;
    m.add_function(wrap_pyfunction!(python_interopt::solve, m)?)?;
    Ok(())
}
