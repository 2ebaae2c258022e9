//! Sparse QUBO representation consumed by the in-process samplers.
//!
//! The objective is `0.5 x^T Q x + c^T x`; `Q` does not need to be symmetric.

use ndarray::Array1;
use sprs::{CsMat, TriMat};

use crate::coefficients::UpperTriangular;

#[derive(Debug, Clone)]
pub struct Qubo {
    pub q: CsMat<f64>,
    pub c: Array1<f64>,
}

impl Qubo {
    pub fn new(q: CsMat<f64>) -> Self {
        let num_vars = q.cols();
        Self {
            q,
            c: Array1::<f64>::zeros(num_vars),
        }
    }

    pub fn new_with_c(q: CsMat<f64>, c: Array1<f64>) -> Self {
        Self { q, c }
    }

    /// Converts an upper-triangular table `T` with objective `sum_{i <= j} T_ij x_i x_j` into `0.5 x^T Q x`
    /// form by doubling every stored coefficient. Zero keys are left out of the sparse matrix.
    pub fn from_upper_triangular(table: &UpperTriangular) -> Self {
        let n = table.dim();
        let mut q = TriMat::<f64>::new((n, n));
        for ((i, j), value) in table.nonzeros() {
            q.add_triplet(i, j, 2.0 * value);
        }

        Self::new(q.to_csr())
    }

    pub fn eval(&self, x: &Array1<f64>) -> f64 {
        let temp = &self.q * x;
        0.5 * x.dot(&temp) + self.c.dot(x)
    }

    pub fn eval_usize(&self, x: &Array1<usize>) -> f64 {
        self.eval(&x.mapv(|x_i| x_i as f64))
    }

    pub fn num_x(&self) -> usize {
        self.q.cols()
    }

    pub fn eval_grad(&self, x: &Array1<f64>) -> Array1<f64> {
        // does not assume that the QUBO is symmetric
        0.5 * (&self.q * x + &self.q.transpose_view() * x) + &self.c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_identity() {
        let p = Qubo::new(CsMat::eye(3));
        let x = Array1::from_vec(vec![1.0, 0.0, 1.0]);
        assert_eq!(p.eval(&x), 1.0);
    }

    #[test]
    fn test_from_upper_triangular() {
        let mut t = UpperTriangular::zeros(2);
        t.add(0, 0, -3.0);
        t.add(1, 1, -3.0);
        t.add(0, 1, 3.0);
        let p = Qubo::from_upper_triangular(&t);

        for x in [[0, 0], [1, 0], [0, 1], [1, 1]] {
            let x = Array1::from_vec(x.to_vec());
            assert!((p.eval_usize(&x) - t.eval_binary(x.as_slice().unwrap())).abs() < 1e-12);
        }
    }

    #[test]
    fn test_grad() {
        let mut t = UpperTriangular::zeros(2);
        t.add(0, 1, 2.0);
        let p = Qubo::new_with_c(Qubo::from_upper_triangular(&t).q, Array1::from_vec(vec![1.0, -1.0]));
        let g = p.eval_grad(&Array1::from_vec(vec![1.0, 0.0]));
        assert_eq!(g, Array1::from_vec(vec![1.0, 1.0]));
    }
}
