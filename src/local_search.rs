//! # Local search used by the in-process heuristic sampler
//!
//! - Simple local search (steepest descent over single bit flips)
//! - Multi simple local search, one independent descent per starting point in parallel

use crate::local_search_utils;
use crate::qubo::Qubo;
use ndarray::Array1;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

/// Given a QUBO and an integral initial point, run simple local search until the point converges or the step limit is hit.
pub fn simple_local_search(qubo: &Qubo, x_0: &Array1<usize>, max_steps: usize) -> Array1<usize> {
    let mut x = x_0.clone();
    let mut x_1 = local_search_utils::one_step_local_search(qubo, &x);
    let mut steps = 0;

    while x_1 != x && steps < max_steps {
        x = x_1;
        x_1 = local_search_utils::one_step_local_search(qubo, &x);
        steps += 1;
    }

    x_1
}

/// Given a QUBO and a vector of initial points, run local searches on each initial point and return all of the solutions.
pub fn multi_simple_local_search(
    qubo: &Qubo,
    xs: &[Array1<usize>],
    max_steps: usize,
) -> Vec<Array1<usize>> {
    xs.par_iter()
        .map(|x| simple_local_search(qubo, x, max_steps))
        .collect()
}
