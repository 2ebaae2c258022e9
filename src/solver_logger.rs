use crate::builder::PermutationQubo;
use crate::decode::{AssignmentGrid, Violation};
use crate::sampler::SampleSet;

/// This is the main logic behind the solver output
///
/// It has varying levels of output, where 0 means nothing is displayed to the screen, and each
/// additional level includes everything previous
///
/// 0 - Nothing
/// 1 - Header, best sample table, and feasibility
/// 2 - Every returned sample and its energy
///
pub struct SolverOutputLogger {
    pub output_level: usize,
}

impl SolverOutputLogger {
    pub const fn new(level: usize) -> Self {
        Self {
            output_level: level,
        }
    }

    pub fn output_header(&self, qubo: &PermutationQubo) {
        if self.output_level < 1 {
            return;
        }

        let version_number = env!("CARGO_PKG_VERSION");
        let grid = qubo.grid();
        let weights = qubo.weights();

        println!("permqubo: penalty QUBO for permutation assignment");
        println!("Version number {version_number}");
        println!(
            "Grid: {} nodes x {} orders ({} variables)",
            grid.n_nodes(),
            grid.n_orders(),
            grid.num_x()
        );
        println!("Penalty: node {} | order {}", weights.node, weights.order);
        println!("Non-zero Q entries: {}", qubo.q_entries().len());
        println!("Offset: {}", qubo.offset());
        println!("------------------------------------------------------");
    }

    pub fn output_samples(&self, samples: &SampleSet) {
        if self.output_level < 2 {
            return;
        }

        let assignments: Vec<&Vec<usize>> =
            samples.samples().iter().map(|s| &s.assignment).collect();
        println!("samples={assignments:?}");
        println!("energies={:?}", samples.energies());
        println!("------------------------------------------------------");
    }

    pub fn output_solution(&self, qubo: &PermutationQubo, energy: f64, decoded: &AssignmentGrid) {
        if self.output_level < 1 {
            return;
        }

        print!("{}", solution_report(qubo, energy, decoded));
    }
}

/// The decoded table, the energies and either the visit order or the violated rows and columns.
pub fn solution_report(qubo: &PermutationQubo, energy: f64, decoded: &AssignmentGrid) -> String {
    let mut report = decoded.to_string();
    report.push_str("------------------------------------------------------\n");
    report.push_str(&format!("Energy: {energy}\n"));
    report.push_str(&format!("Energy with offset: {}\n", energy + qubo.offset()));

    match decoded.visit_order() {
        Some(tour) => report.push_str(&format!("Feasible, visit order: {tour:?}\n")),
        None => {
            report.push_str("Infeasible:\n");
            for violation in decoded.violations() {
                let line = match violation {
                    Violation::Node { node, count } => format!("  node_{node} has {count} orders\n"),
                    Violation::Order { order, count } => {
                        format!("  order_{order} has {count} nodes\n")
                    }
                };
                report.push_str(&line);
            }
        }
    }

    report
}
