use crate::error::{QuboError, Result};

/// Ratio between the constraint penalty `A` and the base scale `B`.
pub const PENALTY_RATIO: f64 = 1.5;

/// Lagrange multipliers for the two families of exactly-one constraints.
///
/// `node` weights "each node has exactly one order" (the rows of the grid), `order` weights "each order is
/// assigned to exactly one node" (the columns). [`PenaltyWeights::from_base`] sets both to `A = 1.5 * B`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyWeights {
    pub node: f64,
    pub order: f64,
}

impl PenaltyWeights {
    /// Derives `A = 1.5 * B` and uses it for both constraint families.
    ///
    /// Example:
    /// ``` rust
    /// use permqubo::penalty::PenaltyWeights;
    ///
    /// let w = PenaltyWeights::from_base(2.0).unwrap();
    /// assert_eq!(w.node, 3.0);
    /// assert_eq!(w.order, 3.0);
    /// ```
    pub fn from_base(penalty_b: f64) -> Result<Self> {
        check_positive(penalty_b)?;
        let penalty_a = PENALTY_RATIO * penalty_b;
        Ok(Self {
            node: penalty_a,
            order: penalty_a,
        })
    }

    /// Independent multipliers for the row and column constraints.
    pub fn with_multipliers(node: f64, order: f64) -> Result<Self> {
        check_positive(node)?;
        check_positive(order)?;
        Ok(Self { node, order })
    }

    /// Linear bias every variable receives, one `-λ` from its row and one from its column.
    pub fn linear_bias(&self) -> f64 {
        -(self.node + self.order)
    }
}

fn check_positive(value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(QuboError::InvalidPenalty(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base() {
        let w = PenaltyWeights::from_base(1.0).unwrap();
        assert_eq!(w.node, 1.5);
        assert_eq!(w.order, 1.5);
        assert_eq!(w.linear_bias(), -3.0);
    }

    #[test]
    fn test_rejects_bad_weights() {
        assert_eq!(
            PenaltyWeights::from_base(0.0),
            Err(QuboError::InvalidPenalty(0.0))
        );
        assert!(PenaltyWeights::from_base(-1.0).is_err());
        assert!(PenaltyWeights::from_base(f64::NAN).is_err());
        assert!(PenaltyWeights::with_multipliers(1.0, f64::INFINITY).is_err());
    }
}
