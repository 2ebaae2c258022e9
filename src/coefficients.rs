//! Dense upper-triangular coefficient storage.
//!
//! Variable indices are dense integers in a known range, so the `(i, j)` coefficient table is stored as a
//! flat vector indexed by a computed offset instead of a hash map. Every key with `i <= j` exists from
//! construction on, so lookups and accumulations inside the range can never miss.

/// Upper-triangular `n x n` table, diagonal included.
#[derive(Debug, Clone, PartialEq)]
pub struct UpperTriangular {
    n: usize,
    data: Vec<f64>,
}

impl UpperTriangular {
    /// Creates an all-zero table over `n` variables.
    ///
    /// # Panics
    ///
    /// Panics if the table size overflows; [`crate::grid::VariableGrid::new`] rejects such grids up front.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * (n + 1) / 2],
        }
    }

    /// Number of variables.
    pub const fn dim(&self) -> usize {
        self.n
    }

    /// Number of stored keys, `n (n + 1) / 2`.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // row i starts after the i previous rows of lengths n, n-1, ..., n-i+1
    fn offset(&self, i: usize, j: usize) -> usize {
        debug_assert!(i <= j && j < self.n);
        i * self.n - i * (i + 1) / 2 + j
    }

    /// Coefficient of the unordered pair `{i, j}`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let (i, j) = if i <= j { (i, j) } else { (j, i) };
        self.data[self.offset(i, j)]
    }

    /// Accumulates `value` into the key `(i, j)`; `i <= j` is required.
    pub fn add(&mut self, i: usize, j: usize, value: f64) {
        let k = self.offset(i, j);
        self.data[k] += value;
    }

    /// Iterates over every key in row-major order as `((i, j), value)`, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        let n = self.n;
        (0..n)
            .flat_map(move |i| (i..n).map(move |j| (i, j)))
            .zip(self.data.iter().copied())
    }

    /// Iterates over the keys holding a non-zero value.
    pub fn nonzeros(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.iter().filter(|(_, value)| *value != 0.0)
    }

    /// Evaluates `sum_{i <= j} T_ij x_i x_j` for a binary point.
    pub fn eval_binary(&self, x: &[usize]) -> f64 {
        debug_assert_eq!(x.len(), self.n);
        self.iter()
            .filter(|((i, j), _)| x[*i] == 1 && x[*j] == 1)
            .map(|(_, value)| value)
            .sum()
    }
}
