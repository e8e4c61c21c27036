//! Weighted MaxSAT on top of a `rustsat` SAT solver.
//!
//! [`LinearSearchMaxSat`] runs a linear SAT-UNSAT search. Soft clauses are
//! relaxed with blocking literals, the weighted sum of falsified soft clauses
//! is bounded by a generalized totalizer ([`DbGte`]), and the bound is
//! tightened below the cost of each solution until the solver answers UNSAT.
//! The last solution found is optimal.

use std::fmt;

use rustsat::encodings::pb::{BoundUpper, BoundUpperIncremental, DbGte};
use rustsat::instances::{BasicVarManager, Cnf, ManageVars};
use rustsat::solvers::{Solve, SolveIncremental, SolverResult};
use rustsat::types::Clause;
use rustsat_minisat::core::Minisat;
use thiserror::Error;
use tracing::{debug, error};

use ncs_core::{Assignment, AssignmentExt, Lit, MaxSatProblem, TernaryVal, Var, Weight};

/// Why a search ended without an answer other than UNSAT.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("SAT solver error: {0}")]
    Solver(String),

    #[error("Soft clause weight {0} does not fit the pseudo-boolean encoding")]
    WeightOverflow(Weight),

    #[error("SAT solver stopped without an answer: {0}")]
    Stopped(String),
}

/// Exact weighted MaxSAT backend: MiniSat plus a pseudo-boolean cost bound.
#[derive(Default)]
pub struct LinearSearchMaxSat {
    solver: Minisat,
    var_manager: BasicVarManager,
    variables_count: u32,
    variables_created: bool,
    hard_clauses: usize,
    has_empty_clause: bool,
    soft: Vec<(Vec<Lit>, Weight)>,
    objective: Option<Vec<(Lit, usize)>>,
    sat_calls: usize,
    optimum: Option<Weight>,
    error: Option<BackendError>,
}

impl LinearSearchMaxSat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variables_count(&self) -> usize {
        self.variables_count as usize
    }

    pub fn hard_clauses_count(&self) -> usize {
        self.hard_clauses
    }

    pub fn soft_clauses(&self) -> &[(Vec<Lit>, Weight)] {
        &self.soft
    }

    /// SAT solver calls made by the last `solve`.
    pub fn sat_calls(&self) -> usize {
        self.sat_calls
    }

    /// Weight of falsified soft clauses in the optimal assignment.
    pub fn optimum_cost(&self) -> Option<Weight> {
        self.optimum
    }

    /// The error that ended the last `solve`, if any.
    pub fn last_error(&self) -> Option<&BackendError> {
        self.error.as_ref()
    }

    /// Total weight of soft clauses `assignment` satisfies.
    pub fn satisfied_weight(&self, assignment: &Assignment) -> Weight {
        self.soft
            .iter()
            .filter(|(clause, _)| assignment.satisfies_clause(clause))
            .map(|(_, weight)| weight)
            .sum()
    }

    fn falsified_weight(&self, assignment: &Assignment) -> Weight {
        self.soft
            .iter()
            .filter(|(clause, _)| !assignment.satisfies_clause(clause))
            .map(|(_, weight)| weight)
            .sum()
    }

    fn add_to_solver(&mut self, clause: Clause) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.solver.add_clause(clause) {
            self.error = Some(BackendError::Solver(err.to_string()));
        }
    }

    /// One objective literal per soft clause, true when the clause is
    /// falsified. Non-unit clauses get a fresh blocking variable.
    fn relax_soft_clauses(&mut self) -> Result<Vec<(Lit, usize)>, BackendError> {
        if let Some(objective) = &self.objective {
            return Ok(objective.clone());
        }
        let mut objective = Vec::with_capacity(self.soft.len());
        for index in 0..self.soft.len() {
            let (clause, weight) = self.soft[index].clone();
            let weight =
                usize::try_from(weight).map_err(|_| BackendError::WeightOverflow(weight))?;
            if let [lit] = clause.as_slice() {
                objective.push((!*lit, weight));
                continue;
            }
            let blocking = self.var_manager.new_var().pos_lit();
            let relaxed: Clause = clause
                .into_iter()
                .chain(std::iter::once(blocking))
                .collect();
            self.add_to_solver(relaxed);
            objective.push((blocking, weight));
        }
        self.objective = Some(objective.clone());
        Ok(objective)
    }

    /// Solves under `assumptions`; the answer is projected on the created
    /// variables with unassigned ones read as false.
    fn sat_call(&mut self, assumptions: &[Lit]) -> Result<Option<Assignment>, BackendError> {
        self.sat_calls += 1;
        let result = self
            .solver
            .solve_assumps(assumptions)
            .map_err(|err| BackendError::Solver(err.to_string()))?;
        match result {
            SolverResult::Sat => {}
            SolverResult::Unsat => return Ok(None),
            other => return Err(BackendError::Stopped(format!("{:?}", other))),
        }
        let solution = match self.var_manager.max_var() {
            Some(max_var) => self
                .solver
                .solution(max_var)
                .map_err(|err| BackendError::Solver(err.to_string()))?,
            None => Assignment::default(),
        };
        let projected: Vec<TernaryVal> = (0..self.variables_count)
            .map(|index| match solution.var_value(Var::new(index)) {
                TernaryVal::True => TernaryVal::True,
                _ => TernaryVal::False,
            })
            .collect();
        Ok(Some(Assignment::from(projected)))
    }

    fn search(&mut self) -> Result<Option<Assignment>, BackendError> {
        if let Some(err) = self.error.clone() {
            return Err(err);
        }
        if self.has_empty_clause {
            return Ok(None);
        }
        let objective = self.relax_soft_clauses()?;
        if let Some(err) = self.error.clone() {
            return Err(err);
        }
        let mut encoding: DbGte = objective.into_iter().collect();

        let Some(mut best) = self.sat_call(&[])? else {
            return Ok(None);
        };
        let mut cost = self.falsified_weight(&best);
        debug!(event = "maxsat_solution", cost);

        while cost > 0 {
            let bound =
                usize::try_from(cost - 1).map_err(|_| BackendError::WeightOverflow(cost))?;
            let mut totalizer = Cnf::new();
            encoding
                .encode_ub_change(bound..bound + 1, &mut totalizer, &mut self.var_manager)
                .map_err(|err| BackendError::Solver(err.to_string()))?;
            self.solver
                .add_cnf(totalizer)
                .map_err(|err| BackendError::Solver(err.to_string()))?;
            let assumptions = encoding
                .enforce_ub(bound)
                .map_err(|err| BackendError::Solver(err.to_string()))?;
            match self.sat_call(&assumptions)? {
                Some(solution) => {
                    cost = self.falsified_weight(&solution);
                    best = solution;
                    debug!(event = "maxsat_solution", cost);
                }
                None => break,
            }
        }

        self.optimum = Some(cost);
        debug!(event = "maxsat_optimum", cost, sat_calls = self.sat_calls);
        Ok(Some(best))
    }
}

impl fmt::Debug for LinearSearchMaxSat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearSearchMaxSat")
            .field("variables_count", &self.variables_count)
            .field("hard_clauses", &self.hard_clauses)
            .field("soft_clauses", &self.soft.len())
            .field("sat_calls", &self.sat_calls)
            .field("optimum", &self.optimum)
            .finish()
    }
}

impl MaxSatProblem for LinearSearchMaxSat {
    fn create_variable(&mut self) -> Var {
        debug_assert!(
            !self.variables_created,
            "variable created after creation was marked complete"
        );
        self.variables_count += 1;
        self.var_manager.new_var()
    }

    fn mark_all_variables_created(&mut self) {
        self.variables_created = true;
    }

    fn add_clause(&mut self, clause: &[Lit]) {
        self.hard_clauses += 1;
        if clause.is_empty() {
            self.has_empty_clause = true;
            return;
        }
        self.add_to_solver(clause.iter().copied().collect());
    }

    fn add_weighted_clause(&mut self, clause: &[Lit], weight: Weight) {
        if weight > 0 {
            self.soft.push((clause.to_vec(), weight));
        }
    }

    fn solve(&mut self) -> Option<Assignment> {
        self.sat_calls = 0;
        self.optimum = None;
        match self.search() {
            Ok(found) => found,
            Err(err) => {
                error!(event = "maxsat_failed", error = %err);
                self.error = Some(err);
                None
            }
        }
    }
}
