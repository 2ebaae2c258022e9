//! # Variable grid
//!
//! The binary decision "node `i` is visited at order `j`" lives on a 2D node×order grid, while QUBO
//! solvers work on a flat vector of variables. This module owns the single mapping between the two, it
//! is row-major, so the variables of one node are contiguous:
//!
//! ```text
//! index(node, order) = node * n_orders + order
//! ```
//!
//! The builder, the decoder and the samplers all go through [`VariableGrid`], so a sample produced by any
//! solver can always be decoded back onto the grid it was built from.

use crate::error::{QuboError, Result};

/// Dimensions of a node×order assignment grid together with its flat index mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableGrid {
    n_nodes: usize,
    n_orders: usize,
}

impl VariableGrid {
    /// Creates a grid, failing with [`QuboError::InvalidDimension`] if either side is empty, or if the
    /// variable count or its upper-triangular coefficient table cannot be addressed.
    ///
    /// Example:
    /// ``` rust
    /// use permqubo::grid::VariableGrid;
    ///
    /// let grid = VariableGrid::new(3, 4).unwrap();
    /// assert_eq!(grid.num_x(), 12);
    /// assert_eq!(grid.index(1, 2), 6);
    /// assert_eq!(grid.inverse_index(6), (1, 2));
    /// ```
    pub fn new(n_nodes: usize, n_orders: usize) -> Result<Self> {
        let invalid = QuboError::InvalidDimension { n_nodes, n_orders };
        if n_nodes == 0 || n_orders == 0 {
            return Err(invalid);
        }

        // the coefficient table stores n (n + 1) / 2 f64 values in one allocation
        let num_x = n_nodes.checked_mul(n_orders).ok_or(invalid.clone())?;
        let table_bytes = num_x
            .checked_add(1)
            .and_then(|n_1| num_x.checked_mul(n_1))
            .map(|twice| twice / 2)
            .and_then(|len| len.checked_mul(std::mem::size_of::<f64>()));
        match table_bytes {
            Some(bytes) if bytes <= isize::MAX as usize => Ok(Self { n_nodes, n_orders }),
            _ => Err(invalid),
        }
    }

    /// Square grid, the shape of a Hamiltonian-cycle instance.
    pub fn square(n: usize) -> Result<Self> {
        Self::new(n, n)
    }

    pub const fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    pub const fn n_orders(&self) -> usize {
        self.n_orders
    }

    /// Total number of binary variables.
    pub const fn num_x(&self) -> usize {
        self.n_nodes * self.n_orders
    }

    /// Flat variable index of `(node, order)`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `node` or `order` is out of range.
    pub fn index(&self, node: usize, order: usize) -> usize {
        debug_assert!(node < self.n_nodes && order < self.n_orders);
        node * self.n_orders + order
    }

    /// Recovers `(node, order)` from a flat index.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `k` is out of range.
    pub fn inverse_index(&self, k: usize) -> (usize, usize) {
        debug_assert!(k < self.num_x());
        (k / self.n_orders, k % self.n_orders)
    }

    /// Flat indices of one node's row, in order sequence.
    pub fn row(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.n_orders).map(move |order| self.index(node, order))
    }

    /// Flat indices of one order's column, in node sequence.
    pub fn column(&self, order: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.n_nodes).map(move |node| self.index(node, order))
    }
}
