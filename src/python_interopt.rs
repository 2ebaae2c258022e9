//! Acts as the interface to rust code from python. The QUBO is built here and handed back as a plain dict so
//! it can be passed straight to a Python-side annealer or heuristic sampler, and the returned sample can be
//! decoded back onto the node×order grid.
use std::collections::HashMap;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::builder::PenaltyQuboBuilder;
use crate::decode::AssignmentGrid;
use crate::error::QuboError;
use crate::grid::VariableGrid;
use crate::sampler::{LocalSearchSampler, Sampler};

// type alias for the Q dict handed to python
type QDict = HashMap<(usize, usize), f64>;

fn to_py_err(e: QuboError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Builds the penalty QUBO and returns the non-zero entries of Q together with the energy offset.
///
/// Example
/// ``` python
/// import permqubo
/// from dwave_qbsolv import QBSolv
///
/// Q, offset = permqubo.build_qubo(5, 5, 1.0)
/// response = QBSolv().sample_qubo(Q)
/// ```
///
/// # Errors
///
/// Raises `ValueError` for an empty grid or a non-positive penalty.
#[pyfunction]
#[pyo3(signature = (n_nodes, n_orders, penalty_b=1.0))]
pub fn build_qubo(n_nodes: usize, n_orders: usize, penalty_b: f64) -> PyResult<(QDict, f64)> {
    let qubo = PenaltyQuboBuilder::new(n_nodes, n_orders, penalty_b)
        .map_err(to_py_err)?
        .build();

    Ok((qubo.q_entries().into_iter().collect(), qubo.offset()))
}

/// Decodes a sample, indexed by variable, into a `n_nodes x n_orders` grid of 0/1.
///
/// Example
/// ``` python
/// import permqubo
///
/// grid = permqubo.decode(2, 2, [0, 1, 1, 0])
/// ```
///
/// # Errors
///
/// Raises `ValueError` if the sample has the wrong length or is not binary.
#[pyfunction]
pub fn decode(n_nodes: usize, n_orders: usize, sample: Vec<usize>) -> PyResult<Vec<Vec<usize>>> {
    let grid = VariableGrid::new(n_nodes, n_orders).map_err(to_py_err)?;
    let decoded = AssignmentGrid::decode(grid, &sample).map_err(to_py_err)?;

    Ok(decoded
        .cells()
        .rows()
        .into_iter()
        .map(|row| row.to_vec())
        .collect())
}

/// Builds and solves the QUBO with multi-start local search, returning the best sample and its energy.
///
/// Example
/// ``` python
/// import permqubo
///
/// x, energy = permqubo.solve(4, 4, 1.0, num_reads=50, seed=0)
/// ```
///
/// # Errors
///
/// Raises `ValueError` for an empty grid or a non-positive penalty.
#[pyfunction]
#[pyo3(signature = (n_nodes, n_orders, penalty_b=1.0, num_reads=100, seed=0))]
pub fn solve(
    n_nodes: usize,
    n_orders: usize,
    penalty_b: f64,
    num_reads: usize,
    seed: u64,
) -> PyResult<(Vec<usize>, f64)> {
    let qubo = PenaltyQuboBuilder::new(n_nodes, n_orders, penalty_b)
        .map_err(to_py_err)?
        .build();

    let sampler = LocalSearchSampler {
        num_reads,
        seed,
        ..LocalSearchSampler::default()
    };
    let set = sampler.sample(&qubo).map_err(to_py_err)?;

    match set.first() {
        Some(best) => Ok((best.assignment.clone(), best.energy)),
        None => Err(PyValueError::new_err("num_reads must be at least 1")),
    }
}
