//! This module contains utility functions for local search algorithms.
//!
//! These include:
//! - 1-flip objective deltas
//! - 1-step steepest descent

use crate::qubo::Qubo;
use ndarray::Array1;

/// Efficient calculation of the delta of the objective function for a single bit flip for each variable.
/// This allows selecting the best bit to flip without evaluating the objective for each flip independently.
///
/// Run time is O(|Q|) + O(|x|)
pub fn one_flip_objective(qubo: &Qubo, x_0: &Array1<usize>) -> (f64, Array1<f64>) {
    let mut objs = Array1::<f64>::zeros(qubo.num_x());
    let x_0f = x_0.mapv(|x| x as f64);

    // each term in the delta formula
    let x_q = 0.5 * (&qubo.q * &x_0f);
    let q_x = 0.5 * (&qubo.q.transpose_view() * &x_0f);
    let q_jj = 0.5 * qubo.q.diag().to_dense();
    let delta = 1.0 - 2.0 * &x_0f;

    for i in 0..qubo.num_x() {
        objs[i] = q_jj[i] + delta[i] * (x_q[i] + q_x[i] + qubo.c[i]);
    }

    let obj_0 = x_0f.dot(&x_q) + qubo.c.dot(&x_0f);

    (obj_0, objs)
}

/// Flips the single bit with the most negative objective delta, or returns the point unchanged if no flip
/// improves it.
pub fn one_step_local_search(qubo: &Qubo, x_0: &Array1<usize>) -> Array1<usize> {
    let (_, objs) = one_flip_objective(qubo, x_0);

    let best_neighbor = objs
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, obj)| (i, *obj));

    match best_neighbor {
        Some((i, obj)) if obj < 0.0 => {
            let mut x_1 = x_0.clone();
            x_1[i] = 1 - x_1[i];
            x_1
        }
        _ => x_0.clone(),
    }
}
