//! Backtracking branch-enumeration solver.
//!
//! The solver walks every combination of constraint branches with a
//! mixed-radix counter: digit `i` ranges over the branch count of
//! constraint `i`, with carry into the next digit on overflow. Each
//! attempt mutates a snapshot-protected sketch and is reverted wholesale
//! unless every constraint ends up satisfied.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::constraint::{SketchConstraint, SATISFIED_EPSILON};
use super::types::Sketch;
use super::SketchError;

/// Outcome of a solve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Whether every constraint held when the search stopped.
    pub succeeded: bool,
    /// Branch combinations attempted; zero when the sketch was already
    /// satisfied on entry.
    pub attempts: usize,
    /// Size of the search space: the product of all branch counts.
    pub combinations: usize,
}

pub struct SketchSolver;

impl SketchSolver {
    /// Solve with the default satisfaction tolerance.
    pub fn solve(sketch: &mut Sketch) -> Result<SolveResult, SketchError> {
        Self::solve_with_epsilon(sketch, SATISFIED_EPSILON)
    }

    /// Enumerate branch combinations until every constraint is satisfied
    /// or the space is exhausted.
    ///
    /// On success the sketch keeps the mutated geometry. On exhaustion it
    /// is left exactly as it was before the call, every point position
    /// included. `Err` is reserved for malformed sketches; an unsolvable
    /// constraint set is a normal `succeeded = false` outcome.
    pub fn solve_with_epsilon(
        sketch: &mut Sketch,
        epsilon: f64,
    ) -> Result<SolveResult, SketchError> {
        let constraints: Vec<SketchConstraint> = sketch.constraints().collect();
        let branch_counts: Vec<usize> = constraints.iter().map(|c| c.branch_count()).collect();
        let combinations: usize = branch_counts.iter().product();

        if Self::all_satisfied(sketch, &constraints, epsilon)? {
            info!("constraints already satisfied");
            return Ok(SolveResult {
                succeeded: true,
                attempts: 0,
                combinations,
            });
        }

        info!(combinations, "attempting to satisfy constraints");

        let mut current = vec![0usize; constraints.len()];
        let mut attempts = 0;

        loop {
            attempts += 1;
            let snapshot = sketch.snapshot();

            for (constraint, &branch) in constraints.iter().zip(&current) {
                // Skip constraints that hold at this moment; an earlier
                // application in the same pass may already have fixed or
                // broken them.
                if constraint.is_satisfied(sketch, epsilon)? {
                    continue;
                }
                debug!(constraint = %constraint.id(), branch, "applying branch");
                constraint.apply(sketch, branch)?;
            }

            // Re-check every constraint, not just the ones applied:
            // aliased points mean one application can desatisfy another
            // that held before this pass.
            if Self::all_satisfied(sketch, &constraints, epsilon)? {
                info!(attempts, "constraints satisfied");
                return Ok(SolveResult {
                    succeeded: true,
                    attempts,
                    combinations,
                });
            }

            sketch.restore(snapshot);

            let mut digit = 0;
            current[digit] += 1;
            while current[digit] >= branch_counts[digit] {
                current[digit] = 0;
                digit += 1;
                if digit >= current.len() {
                    info!(attempts, "no solution found");
                    return Ok(SolveResult {
                        succeeded: false,
                        attempts,
                        combinations,
                    });
                }
                current[digit] += 1;
            }
        }
    }

    fn all_satisfied(
        sketch: &Sketch,
        constraints: &[SketchConstraint],
        epsilon: f64,
    ) -> Result<bool, SketchError> {
        for constraint in constraints {
            if !constraint.is_satisfied(sketch, epsilon)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
