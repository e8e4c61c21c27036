//! A backend that records the encoding instead of solving it.

use ncs_core::{Assignment, Lit, MaxSatProblem, Var, Weight};

/// Records variables and clauses; `solve` returns a preset answer.
///
/// Panics when a clause is added before variable creation is marked
/// complete, or when a clause mentions a variable that was never created.
#[derive(Debug, Clone, Default)]
pub struct RecordingMaxSat {
    variables_count: usize,
    variables_created: bool,
    hard: Vec<Vec<Lit>>,
    soft: Vec<(Vec<Lit>, Weight)>,
    answer: Option<Assignment>,
    solve_calls: usize,
}

impl RecordingMaxSat {
    /// Creates a recorder whose `solve` reports failure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recorder whose `solve` returns `answer`.
    pub fn with_answer(answer: Assignment) -> Self {
        Self {
            answer: Some(answer),
            ..Self::default()
        }
    }

    pub fn variables_count(&self) -> usize {
        self.variables_count
    }

    pub fn variables_created(&self) -> bool {
        self.variables_created
    }

    pub fn hard_clauses(&self) -> &[Vec<Lit>] {
        &self.hard
    }

    pub fn soft_clauses(&self) -> &[(Vec<Lit>, Weight)] {
        &self.soft
    }

    pub fn solve_calls(&self) -> usize {
        self.solve_calls
    }

    /// Whether a hard clause with the same literals, in any order, was added.
    pub fn contains_clause(&self, clause: &[Lit]) -> bool {
        let wanted = sorted(clause);
        self.hard.iter().any(|recorded| sorted(recorded) == wanted)
    }

    fn check(&self, clause: &[Lit]) {
        assert!(
            self.variables_created,
            "clause added before all variables were created"
        );
        for lit in clause {
            assert!(
                lit.var().idx() < self.variables_count,
                "clause mentions unknown variable {:?}",
                lit.var()
            );
        }
    }
}

fn sorted(clause: &[Lit]) -> Vec<Lit> {
    let mut clause = clause.to_vec();
    clause.sort();
    clause
}

impl MaxSatProblem for RecordingMaxSat {
    fn create_variable(&mut self) -> Var {
        assert!(
            !self.variables_created,
            "variable created after creation was marked complete"
        );
        let var = Var::new(self.variables_count as u32);
        self.variables_count += 1;
        var
    }

    fn mark_all_variables_created(&mut self) {
        self.variables_created = true;
    }

    fn add_clause(&mut self, clause: &[Lit]) {
        self.check(clause);
        self.hard.push(clause.to_vec());
    }

    fn add_weighted_clause(&mut self, clause: &[Lit], weight: Weight) {
        self.check(clause);
        self.soft.push((clause.to_vec(), weight));
    }

    fn solve(&mut self) -> Option<Assignment> {
        self.solve_calls += 1;
        self.answer.clone()
    }
}
