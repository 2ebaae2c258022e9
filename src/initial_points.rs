use ndarray::Array1;
use smolprng::{Algorithm, PRNG};

/// Generate a random binary point where each bit is set with probability `density`.
pub fn generate_random_binary_point<T: Algorithm>(
    num_x: usize,
    prng: &mut PRNG<T>,
    density: f64,
) -> Array1<usize> {
    let mut x = Array1::<usize>::zeros(num_x);
    for i in 0..x.len() {
        if prng.gen_f64() < density {
            x[i] = 1;
        }
    }
    x
}

/// Generate num_points random binary starting points.
pub fn generate_random_binary_points<T: Algorithm>(
    num_x: usize,
    num_points: usize,
    prng: &mut PRNG<T>,
    density: f64,
) -> Vec<Array1<usize>> {
    (0..num_points)
        .map(|_| generate_random_binary_point(num_x, prng, density))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use smolprng::JsfLarge;

    #[test]
    fn test_binary_points() {
        let mut prng = PRNG {
            generator: JsfLarge::from(7u64),
        };
        let xs = generate_random_binary_points(9, 20, &mut prng, 0.5);
        assert_eq!(xs.len(), 20);
        assert!(xs.iter().all(|x| x.len() == 9 && x.iter().all(|x_i| *x_i <= 1)));
    }

    #[test]
    fn test_density_extremes() {
        let mut prng = PRNG {
            generator: JsfLarge::default(),
        };
        assert_eq!(generate_random_binary_point(5, &mut prng, 0.0).sum(), 0);
        assert_eq!(generate_random_binary_point(5, &mut prng, 1.1).sum(), 5);
    }
}
