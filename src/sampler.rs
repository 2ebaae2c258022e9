//! # Samplers
//!
//! A [`Sampler`] takes a built [`PermutationQubo`] and returns scored binary assignments. Remote annealers
//! and hybrid services plug in by implementing the trait; two in-process samplers are provided:
//!
//! - [`EnumerationSampler`], exhaustive search for small instances, used to validate the penalty landscape
//! - [`LocalSearchSampler`], multi-start steepest descent from random binary points

use ndarray::Array1;
use smolprng::{JsfLarge, PRNG};
use tracing::info;

use crate::builder::PermutationQubo;
use crate::error::{QuboError, Result};
use crate::{initial_points, local_search};

/// One binary assignment indexed by flat variable index, with its energy (offset not included).
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub assignment: Vec<usize>,
    pub energy: f64,
}

/// Samples ordered by ascending energy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    pub fn new(mut samples: Vec<Sample>) -> Self {
        samples.sort_by(|a, b| a.energy.total_cmp(&b.energy));
        Self { samples }
    }

    /// The lowest-energy sample.
    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn energies(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.energy).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Anything that can produce low-energy assignments for a permutation QUBO.
pub trait Sampler {
    fn sample(&self, qubo: &PermutationQubo) -> Result<SampleSet>;
}

/// Exhaustive search over all `2^n` assignments, keeping the `keep` lowest.
#[derive(Debug, Clone, Copy)]
pub struct EnumerationSampler {
    pub max_variables: usize,
    pub keep: usize,
}

impl Default for EnumerationSampler {
    fn default() -> Self {
        Self {
            max_variables: 20,
            keep: 10,
        }
    }
}

impl Sampler for EnumerationSampler {
    fn sample(&self, qubo: &PermutationQubo) -> Result<SampleSet> {
        let num_x = qubo.num_x();
        let limit = self.max_variables.min(usize::BITS as usize - 1);
        if num_x > limit {
            return Err(QuboError::TooManyVariables { num_x, limit });
        }

        let mut solution = vec![0usize; num_x];
        let mut samples = Vec::with_capacity(self.keep + 1);

        for i in 0..(1usize << num_x) {
            for (j, x_j) in solution.iter_mut().enumerate() {
                *x_j = (i >> j) & 1;
            }

            let energy = qubo.energy(&solution)?;
            if samples.len() < self.keep || energy < worst_energy(&samples) {
                samples.push(Sample {
                    assignment: solution.clone(),
                    energy,
                });
                if samples.len() > self.keep {
                    drop_worst(&mut samples);
                }
            }
        }

        let set = SampleSet::new(samples);
        info!(
            num_x,
            enumerated = 1usize << num_x,
            best_energy = set.first().map(|s| s.energy),
            "enumeration finished"
        );

        Ok(set)
    }
}

fn worst_energy(samples: &[Sample]) -> f64 {
    samples
        .iter()
        .map(|s| s.energy)
        .fold(f64::NEG_INFINITY, f64::max)
}

fn drop_worst(samples: &mut Vec<Sample>) {
    let worst = samples
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.energy.total_cmp(&b.energy))
        .map(|(i, _)| i);
    if let Some(i) = worst {
        samples.swap_remove(i);
    }
}

/// Multi-start 1-flip local search from seeded random binary points, one read per start.
#[derive(Debug, Clone, Copy)]
pub struct LocalSearchSampler {
    pub num_reads: usize,
    pub max_steps: usize,
    pub seed: u64,
    pub density: f64,
}

impl Default for LocalSearchSampler {
    fn default() -> Self {
        Self {
            num_reads: 100,
            max_steps: 1000,
            seed: 0,
            density: 0.5,
        }
    }
}

impl Sampler for LocalSearchSampler {
    fn sample(&self, qubo: &PermutationQubo) -> Result<SampleSet> {
        let p = qubo.to_qubo();
        let mut prng = PRNG {
            generator: JsfLarge::from(self.seed),
        };

        let starts = initial_points::generate_random_binary_points(
            p.num_x(),
            self.num_reads,
            &mut prng,
            self.density,
        );
        let solns = local_search::multi_simple_local_search(&p, &starts, self.max_steps);

        let samples = solns
            .into_iter()
            .map(|x| to_sample(qubo, x))
            .collect::<Result<Vec<_>>>()?;

        let set = SampleSet::new(samples);
        info!(
            num_reads = self.num_reads,
            seed = self.seed,
            best_energy = set.first().map(|s| s.energy),
            "local search finished"
        );

        Ok(set)
    }
}

fn to_sample(qubo: &PermutationQubo, x: Array1<usize>) -> Result<Sample> {
    let assignment = x.to_vec();
    let energy = qubo.energy(&assignment)?;
    Ok(Sample { assignment, energy })
}
