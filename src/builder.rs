//! # Penalty QUBO builder
//!
//! Encodes "every node takes exactly one order" and "every order is taken by exactly one node" over a
//! node×order grid of binary variables. Each exactly-one constraint over a set of variables `S` with
//! multiplier `λ` expands, using `x_i * x_i = x_i`, to
//!
//! $$ λ \left(\sum_{i \in S} x_i - 1\right)^2 = λ \left( 2 \sum_{i < j \in S} x_i x_j - \sum_{i \in S} x_i + 1 \right) $$
//!
//! so every pair sharing a row or a column receives a coupling of `2λ`, every variable receives `-λ` from
//! its row and `-λ` from its column, and each constraint adds `λ` to the constant offset. With the offset
//! included, the energy of a sample is a weighted sum of squared row and column violations, which is zero
//! exactly on permutation matrices.

use ndarray::Array1;
use tracing::debug;

use crate::coefficients::UpperTriangular;
use crate::error::{QuboError, Result};
use crate::grid::VariableGrid;
use crate::penalty::PenaltyWeights;
use crate::qubo::Qubo;

/// Configures and runs the penalty construction for one problem instance.
#[derive(Debug, Clone, Copy)]
pub struct PenaltyQuboBuilder {
    grid: VariableGrid,
    weights: PenaltyWeights,
}

impl PenaltyQuboBuilder {
    /// Builder with `A = 1.5 * penalty_b` on both constraint families.
    ///
    /// # Errors
    ///
    /// [`QuboError::InvalidDimension`] for an empty grid, [`QuboError::InvalidPenalty`] for a non-positive
    /// `penalty_b`.
    pub fn new(n_nodes: usize, n_orders: usize, penalty_b: f64) -> Result<Self> {
        Ok(Self {
            grid: VariableGrid::new(n_nodes, n_orders)?,
            weights: PenaltyWeights::from_base(penalty_b)?,
        })
    }

    pub const fn with_weights(grid: VariableGrid, weights: PenaltyWeights) -> Self {
        Self { grid, weights }
    }

    pub const fn grid(&self) -> VariableGrid {
        self.grid
    }

    pub const fn weights(&self) -> PenaltyWeights {
        self.weights
    }

    /// Builds `h`, `J`, the folded `Q` and the offset in one deterministic pass.
    ///
    /// Example:
    /// ``` rust
    /// use permqubo::builder::PenaltyQuboBuilder;
    ///
    /// let qubo = PenaltyQuboBuilder::new(2, 2, 1.0).unwrap().build();
    /// assert_eq!(qubo.j().get(0, 1), 3.0);
    /// assert_eq!(qubo.h()[0], -3.0);
    /// assert_eq!(qubo.offset(), 6.0);
    /// ```
    pub fn build(&self) -> PermutationQubo {
        let grid = self.grid;
        let n_nodes = grid.n_nodes();
        let n_orders = grid.n_orders();
        let num_x = grid.num_x();

        let mut h = Array1::<f64>::zeros(num_x);
        let mut j = UpperTriangular::zeros(num_x);
        let mut offset = 0.0;

        // two different nodes sharing an order
        let column_coupling = 2.0 * self.weights.order;
        for node_a in 0..n_nodes {
            for node_b in (node_a + 1)..n_nodes {
                for order in 0..n_orders {
                    j.add(
                        grid.index(node_a, order),
                        grid.index(node_b, order),
                        column_coupling,
                    );
                }
            }
        }

        // one node holding two different orders
        let row_coupling = 2.0 * self.weights.node;
        for node in 0..n_nodes {
            for order_a in 0..n_orders {
                for order_b in (order_a + 1)..n_orders {
                    j.add(
                        grid.index(node, order_a),
                        grid.index(node, order_b),
                        row_coupling,
                    );
                }
            }
        }

        let linear_bias = self.weights.linear_bias();
        for node in 0..n_nodes {
            for order in 0..n_orders {
                h[grid.index(node, order)] += linear_bias;
            }
        }

        offset += self.weights.node * n_nodes as f64;
        offset += self.weights.order * n_orders as f64;

        let mut q = j.clone();
        for (i, h_i) in h.iter().enumerate() {
            q.add(i, i, *h_i);
        }

        debug!(
            n_nodes,
            n_orders,
            node_weight = self.weights.node,
            order_weight = self.weights.order,
            offset,
            "built permutation QUBO"
        );

        PermutationQubo {
            grid,
            weights: self.weights,
            h,
            j,
            q,
            offset,
        }
    }
}

/// The coefficient tables of one permutation-constraint instance, ready to hand to a sampler.
#[derive(Debug, Clone)]
pub struct PermutationQubo {
    grid: VariableGrid,
    weights: PenaltyWeights,
    h: Array1<f64>,
    j: UpperTriangular,
    q: UpperTriangular,
    offset: f64,
}

impl PermutationQubo {
    pub const fn grid(&self) -> VariableGrid {
        self.grid
    }

    pub const fn weights(&self) -> PenaltyWeights {
        self.weights
    }

    pub fn num_x(&self) -> usize {
        self.grid.num_x()
    }

    /// Linear coefficients.
    pub fn h(&self) -> &Array1<f64> {
        &self.h
    }

    /// Quadratic couplings; the diagonal is always zero.
    pub fn j(&self) -> &UpperTriangular {
        &self.j
    }

    /// `J` with `h` folded onto the diagonal.
    pub fn q(&self) -> &UpperTriangular {
        &self.q
    }

    /// Constant that makes the energy of a feasible assignment zero: one multiplier per exactly-one
    /// constraint, `λ_node * n_nodes + λ_order * n_orders`. On a square grid with both multipliers equal to
    /// `A` this is `2A` per node.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Non-zero entries of `Q`, the form handed to an external QUBO sampler.
    pub fn q_entries(&self) -> Vec<((usize, usize), f64)> {
        self.q.nonzeros().collect()
    }

    /// Sparse form for the in-process samplers.
    pub fn to_qubo(&self) -> Qubo {
        Qubo::from_upper_triangular(&self.q)
    }

    /// Checks that a sample has one binary entry per variable.
    pub fn check_sample(&self, x: &[usize]) -> Result<()> {
        if x.len() != self.num_x() {
            return Err(QuboError::SampleLength {
                expected: self.num_x(),
                found: x.len(),
            });
        }

        match x.iter().position(|x_i| *x_i > 1) {
            Some(index) => Err(QuboError::NonBinarySample {
                index,
                value: x[index],
            }),
            None => Ok(()),
        }
    }

    /// `sum_i h_i x_i + sum_{i<j} J_ij x_i x_j`, without the offset.
    pub fn energy(&self, x: &[usize]) -> Result<f64> {
        self.check_sample(x)?;
        let linear: f64 = self
            .h
            .iter()
            .zip(x)
            .map(|(h_i, x_i)| h_i * *x_i as f64)
            .sum();

        Ok(linear + self.j.eval_binary(x))
    }

    /// Energy including the offset; zero exactly for permutation matrices.
    pub fn energy_with_offset(&self, x: &[usize]) -> Result<f64> {
        Ok(self.energy(x)? + self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_samples(num_x: usize) -> impl Iterator<Item = Vec<usize>> {
        (0..(1usize << num_x)).map(move |bits| (0..num_x).map(|k| (bits >> k) & 1).collect())
    }

    fn is_permutation(grid: VariableGrid, x: &[usize]) -> bool {
        (0..grid.n_nodes()).all(|node| grid.row(node).map(|k| x[k]).sum::<usize>() == 1)
            && (0..grid.n_orders()).all(|order| grid.column(order).map(|k| x[k]).sum::<usize>() == 1)
    }

    #[test]
    fn test_invalid_dimension() {
        assert!(matches!(
            PenaltyQuboBuilder::new(0, 2, 1.0),
            Err(QuboError::InvalidDimension { .. })
        ));
        assert!(matches!(
            PenaltyQuboBuilder::new(2, 0, 1.0),
            Err(QuboError::InvalidDimension { .. })
        ));
        assert!(matches!(
            PenaltyQuboBuilder::new(2, 2, 0.0),
            Err(QuboError::InvalidPenalty(_))
        ));
    }

    #[test]
    fn test_all_keys_present() {
        for n in 1..=4 {
            let qubo = PenaltyQuboBuilder::new(n, n, 1.0).unwrap().build();
            let num_x = n * n;
            let keys: Vec<(usize, usize)> = qubo.q().iter().map(|(key, _)| key).collect();

            let diagonal = keys.iter().filter(|(i, j)| i == j).count();
            let off_diagonal = keys.iter().filter(|(i, j)| i < j).count();
            assert_eq!(diagonal, num_x);
            assert_eq!(off_diagonal, num_x * (num_x - 1) / 2);
            assert!(keys.iter().all(|(i, j)| i <= j));
        }
    }

    #[test]
    fn test_single_variable() {
        let qubo = PenaltyQuboBuilder::new(1, 1, 1.0).unwrap().build();
        assert_eq!(qubo.num_x(), 1);
        assert_eq!(qubo.h()[0], -3.0);
        assert_eq!(qubo.j().get(0, 0), 0.0);
        assert_eq!(qubo.q().get(0, 0), -3.0);
        assert_eq!(qubo.offset(), 3.0);
    }

    #[test]
    fn test_two_by_two() {
        let qubo = PenaltyQuboBuilder::new(2, 2, 1.0).unwrap().build();

        // same node: (0,1), (2,3); same order: (0,2), (1,3)
        for (i, j) in [(0, 1), (2, 3), (0, 2), (1, 3)] {
            assert_eq!(qubo.j().get(i, j), 3.0);
        }
        // diagonal pairs on the grid share neither row nor column
        assert_eq!(qubo.j().get(0, 3), 0.0);
        assert_eq!(qubo.j().get(1, 2), 0.0);

        for i in 0..4 {
            assert_eq!(qubo.h()[i], -3.0);
            assert_eq!(qubo.j().get(i, i), 0.0);
            assert_eq!(qubo.q().get(i, i), -3.0);
        }
        assert_eq!(qubo.offset(), 6.0);
    }

    #[test]
    fn test_q_folds_h_onto_j() {
        let qubo = PenaltyQuboBuilder::new(3, 2, 0.5).unwrap().build();
        for ((i, j), value) in qubo.q().iter() {
            let expected = if i == j { qubo.h()[i] } else { qubo.j().get(i, j) };
            assert_eq!(value, expected);
        }
    }

    #[test]
    fn test_permutations_are_strict_minimum() {
        for (n, b) in [(2, 1.0), (3, 1.0), (3, 0.25)] {
            let qubo = PenaltyQuboBuilder::new(n, n, b).unwrap().build();
            let grid = qubo.grid();

            let mut worst_feasible = f64::NEG_INFINITY;
            let mut best_infeasible = f64::INFINITY;
            for x in all_samples(qubo.num_x()) {
                let e = qubo.energy(&x).unwrap();
                if is_permutation(grid, &x) {
                    worst_feasible = worst_feasible.max(e);
                    assert!(qubo.energy_with_offset(&x).unwrap().abs() < 1e-9);
                } else {
                    best_infeasible = best_infeasible.min(e);
                }
            }

            assert!(worst_feasible < best_infeasible);
        }
    }

    #[test]
    fn test_offset_energy_counts_violations() {
        let qubo = PenaltyQuboBuilder::new(2, 3, 1.0).unwrap().build();
        let a = qubo.weights().node;
        // one multiplier per row and per column constraint
        assert_eq!(qubo.offset(), a * (2.0 + 3.0));

        // node 0 takes orders 0 and 1, node 1 takes nothing, order 2 is unused
        let x = [1, 1, 0, 0, 0, 0];
        let expected = a * (1.0 + 1.0) + a * (0.0 + 0.0 + 1.0);
        assert!((qubo.energy_with_offset(&x).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_separate_multipliers() {
        let grid = VariableGrid::square(2).unwrap();
        let weights = PenaltyWeights::with_multipliers(1.0, 2.0).unwrap();
        let qubo = PenaltyQuboBuilder::with_weights(grid, weights).build();

        assert_eq!(qubo.j().get(0, 1), 2.0);
        assert_eq!(qubo.j().get(0, 2), 4.0);
        assert_eq!(qubo.h()[3], -3.0);
        assert_eq!(qubo.offset(), 6.0);
    }

    #[test]
    fn test_to_qubo_matches_energy() {
        let qubo = PenaltyQuboBuilder::new(2, 2, 1.0).unwrap().build();
        let sparse = qubo.to_qubo();
        for x in all_samples(4) {
            let dense = qubo.energy(&x).unwrap();
            let from_sparse = sparse.eval_usize(&Array1::from_vec(x));
            assert!((dense - from_sparse).abs() < 1e-12);
        }
    }

    #[test]
    fn test_bad_samples() {
        let qubo = PenaltyQuboBuilder::new(2, 2, 1.0).unwrap().build();
        assert_eq!(
            qubo.energy(&[1, 0, 0]),
            Err(QuboError::SampleLength {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            qubo.energy(&[1, 0, 2, 0]),
            Err(QuboError::NonBinarySample { index: 2, value: 2 })
        );
    }

    #[test]
    fn test_q_entries() {
        let qubo = PenaltyQuboBuilder::new(2, 2, 1.0).unwrap().build();
        let entries = qubo.q_entries();
        // four diagonal biases and four couplings
        assert_eq!(entries.len(), 8);
        assert!(entries.iter().all(|((i, j), _)| i <= j));
    }
}
