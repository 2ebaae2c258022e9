//! Decoding a sampled assignment back onto the node×order grid.
//!
//! The penalty construction only favours feasible assignments energetically, so every decoded sample has to
//! be checked: a valid assignment has exactly one `1` per node row and exactly one `1` per order column.

use std::fmt;

use ndarray::Array2;

use crate::error::{QuboError, Result};
use crate::grid::VariableGrid;

/// A row or column of the grid whose count of selected cells is not one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Node { node: usize, count: usize },
    Order { order: usize, count: usize },
}

/// A binary sample laid out as a `n_nodes x n_orders` 0/1 grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentGrid {
    grid: VariableGrid,
    cells: Array2<usize>,
}

impl AssignmentGrid {
    /// Decodes a sample indexed by flat variable index.
    ///
    /// Example:
    /// ``` rust
    /// use permqubo::decode::AssignmentGrid;
    /// use permqubo::grid::VariableGrid;
    ///
    /// let grid = VariableGrid::square(2).unwrap();
    /// let decoded = AssignmentGrid::decode(grid, &[0, 1, 1, 0]).unwrap();
    /// assert!(decoded.is_feasible());
    /// assert_eq!(decoded.visit_order(), Some(vec![1, 0]));
    /// ```
    pub fn decode(grid: VariableGrid, sample: &[usize]) -> Result<Self> {
        if sample.len() != grid.num_x() {
            return Err(QuboError::SampleLength {
                expected: grid.num_x(),
                found: sample.len(),
            });
        }

        let mut cells = Array2::<usize>::zeros((grid.n_nodes(), grid.n_orders()));
        for (k, value) in sample.iter().enumerate() {
            if *value > 1 {
                return Err(QuboError::NonBinarySample {
                    index: k,
                    value: *value,
                });
            }
            cells[grid.inverse_index(k)] = *value;
        }

        Ok(Self { grid, cells })
    }

    pub const fn grid(&self) -> VariableGrid {
        self.grid
    }

    pub fn cells(&self) -> &Array2<usize> {
        &self.cells
    }

    /// Whether `node` is assigned `order`.
    pub fn get(&self, node: usize, order: usize) -> bool {
        self.cells[(node, order)] == 1
    }

    /// Number of orders assigned to each node.
    pub fn row_counts(&self) -> Vec<usize> {
        self.cells.rows().into_iter().map(|row| row.sum()).collect()
    }

    /// Number of nodes assigned to each order.
    pub fn column_counts(&self) -> Vec<usize> {
        self.cells
            .columns()
            .into_iter()
            .map(|column| column.sum())
            .collect()
    }

    /// Rows, then columns, that do not hold exactly one selected cell.
    pub fn violations(&self) -> Vec<Violation> {
        let nodes = self
            .row_counts()
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count != 1)
            .map(|(node, count)| Violation::Node { node, count });

        let orders = self
            .column_counts()
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count != 1)
            .map(|(order, count)| Violation::Order { order, count });

        nodes.chain(orders).collect()
    }

    pub fn is_feasible(&self) -> bool {
        self.violations().is_empty()
    }

    /// The node visited at each order slot, if the assignment is a permutation.
    pub fn visit_order(&self) -> Option<Vec<usize>> {
        if !self.is_feasible() {
            return None;
        }

        (0..self.grid.n_orders())
            .map(|order| (0..self.grid.n_nodes()).find(|node| self.get(*node, order)))
            .collect()
    }
}

impl fmt::Display for AssignmentGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row_labels: Vec<String> = (0..self.grid.n_nodes())
            .map(|node| format!("node_{node}"))
            .collect();
        let column_labels: Vec<String> = (0..self.grid.n_orders())
            .map(|order| format!("order_{order}"))
            .collect();
        let label_width = row_labels.iter().map(String::len).max().unwrap_or(0);

        write!(f, "{:label_width$}", "")?;
        for label in &column_labels {
            write!(f, "  {label}")?;
        }
        writeln!(f)?;

        for (node, label) in row_labels.iter().enumerate() {
            write!(f, "{label:<label_width$}")?;
            for (order, column) in column_labels.iter().enumerate() {
                let width = column.len();
                write!(f, "  {:>width$}", self.cells[(node, order)])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_layout() {
        let grid = VariableGrid::new(2, 3).unwrap();
        let decoded = AssignmentGrid::decode(grid, &[0, 0, 1, 1, 0, 0]).unwrap();
        assert!(decoded.get(0, 2));
        assert!(decoded.get(1, 0));
        assert!(!decoded.get(0, 0));
        assert_eq!(decoded.row_counts(), vec![1, 1]);
        assert_eq!(decoded.column_counts(), vec![1, 0, 1]);
    }

    #[test]
    fn test_violations() {
        let grid = VariableGrid::square(3).unwrap();
        let decoded = AssignmentGrid::decode(grid, &[1, 1, 0, 0, 0, 0, 0, 0, 1]).unwrap();
        assert!(!decoded.is_feasible());
        assert_eq!(
            decoded.violations(),
            vec![
                Violation::Node { node: 0, count: 2 },
                Violation::Node { node: 1, count: 0 },
            ]
        );
        assert_eq!(decoded.visit_order(), None);
    }

    #[test]
    fn test_column_violation() {
        let grid = VariableGrid::square(2).unwrap();
        let decoded = AssignmentGrid::decode(grid, &[1, 0, 1, 0]).unwrap();
        assert_eq!(
            decoded.violations(),
            vec![
                Violation::Order { order: 0, count: 2 },
                Violation::Order { order: 1, count: 0 },
            ]
        );
    }

    #[test]
    fn test_visit_order() {
        let grid = VariableGrid::square(3).unwrap();
        // node 0 -> order 2, node 1 -> order 0, node 2 -> order 1
        let decoded = AssignmentGrid::decode(grid, &[0, 0, 1, 1, 0, 0, 0, 1, 0]).unwrap();
        assert_eq!(decoded.visit_order(), Some(vec![1, 2, 0]));
    }

    #[test]
    fn test_decode_errors() {
        let grid = VariableGrid::square(2).unwrap();
        assert!(matches!(
            AssignmentGrid::decode(grid, &[1, 0]),
            Err(QuboError::SampleLength { expected: 4, found: 2 })
        ));
        assert!(matches!(
            AssignmentGrid::decode(grid, &[1, 0, 3, 0]),
            Err(QuboError::NonBinarySample { index: 2, value: 3 })
        ));
    }

    #[test]
    fn test_display() {
        let grid = VariableGrid::square(2).unwrap();
        let decoded = AssignmentGrid::decode(grid, &[0, 1, 1, 0]).unwrap();
        let table = decoded.to_string();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "        order_0  order_1");
        assert_eq!(lines[1], "node_0        0        1");
        assert_eq!(lines[2], "node_1        1        0");
    }
}
