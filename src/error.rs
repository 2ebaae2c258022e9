//! Error types for building, decoding and sampling penalty QUBOs.

use thiserror::Error;

/// Every way a QUBO construction or a solve around it can fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuboError {
    /// The node or order count is zero.
    #[error("invalid dimension: n_nodes = {n_nodes}, n_orders = {n_orders} (both must be > 0)")]
    InvalidDimension { n_nodes: usize, n_orders: usize },

    /// A penalty weight or Lagrange multiplier is not a finite positive number.
    #[error("invalid penalty weight {0} (must be finite and > 0)")]
    InvalidPenalty(f64),

    /// A sample does not have one entry per variable.
    #[error("sample has {found} entries, expected {expected}")]
    SampleLength { expected: usize, found: usize },

    /// A sample entry is neither 0 nor 1.
    #[error("sample entry {index} is {value}, expected 0 or 1")]
    NonBinarySample { index: usize, value: usize },

    /// The problem is too large for exhaustive enumeration.
    #[error("{num_x} variables exceeds the enumeration limit of {limit}")]
    TooManyVariables { num_x: usize, limit: usize },

    /// Solve options could not be read or are inconsistent.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for QUBO operations.
pub type Result<T> = std::result::Result<T, QuboError>;
