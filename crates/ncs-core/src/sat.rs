//! MaxSAT backend capability.
//!
//! Learners talk to a solver only through [`MaxSatProblem`]; any backend
//! that honors the contract is interchangeable. Variables, literals and
//! assignments are the `rustsat` types, so backends built on `rustsat`
//! solvers need no translation layer.

pub use rustsat::types::{Assignment, Lit, TernaryVal, Var};

/// Weight of a soft clause.
pub type Weight = u64;

/// The two-literal clause `¬a ∨ b`, i.e. `a ⇒ b`.
#[inline]
pub fn implies(a: Var, b: Var) -> [Lit; 2] {
    [a.neg_lit(), b.pos_lit()]
}

/// Assignment of `len` variables, all false.
pub fn false_assignment(len: usize) -> Assignment {
    Assignment::from(vec![TernaryVal::False; len])
}

/// Boolean reading of a solver assignment.
///
/// Unassigned (don't care) variables read as false.
pub trait AssignmentExt {
    /// Whether `var` is assigned true.
    fn var_is_true(&self, var: Var) -> bool;

    /// Whether `lit` is assigned true.
    fn lit_is_true(&self, lit: Lit) -> bool;

    /// Whether at least one literal of the clause is true.
    fn satisfies_clause(&self, clause: &[Lit]) -> bool {
        clause.iter().any(|&lit| self.lit_is_true(lit))
    }

    /// Sets `var` to `value`.
    fn set_var(&mut self, var: Var, value: bool);
}

impl AssignmentExt for Assignment {
    fn var_is_true(&self, var: Var) -> bool {
        self.var_value(var) == TernaryVal::True
    }

    fn lit_is_true(&self, lit: Lit) -> bool {
        self.lit_value(lit) == TernaryVal::True
    }

    fn set_var(&mut self, var: Var, value: bool) {
        self.assign_lit(if value { var.pos_lit() } else { var.neg_lit() });
    }
}

/// Capabilities a weighted MaxSAT backend offers to a learner.
///
/// Protocol: create every variable, call [`mark_all_variables_created`]
/// exactly once, add hard and weighted clauses, then [`solve`]. Backends may
/// panic when a clause arrives before variable creation is marked complete.
///
/// [`mark_all_variables_created`]: MaxSatProblem::mark_all_variables_created
/// [`solve`]: MaxSatProblem::solve
pub trait MaxSatProblem {
    /// Allocates a fresh variable, distinct from every previous one.
    fn create_variable(&mut self) -> Var;

    /// Declares that no more variables will be created.
    fn mark_all_variables_created(&mut self);

    /// Adds a clause that every solution must satisfy.
    fn add_clause(&mut self, clause: &[Lit]);

    /// Adds a clause whose satisfaction earns `weight`.
    fn add_weighted_clause(&mut self, clause: &[Lit], weight: Weight);

    /// Searches for an assignment satisfying all hard clauses that maximizes
    /// the total weight of satisfied soft clauses.
    ///
    /// Returns `None` when the hard clauses are unsatisfiable. The returned
    /// assignment holds one value per created variable.
    fn solve(&mut self) -> Option<Assignment>;
}

impl<P: MaxSatProblem + ?Sized> MaxSatProblem for &mut P {
    fn create_variable(&mut self) -> Var {
        (**self).create_variable()
    }

    fn mark_all_variables_created(&mut self) {
        (**self).mark_all_variables_created()
    }

    fn add_clause(&mut self, clause: &[Lit]) {
        (**self).add_clause(clause)
    }

    fn add_weighted_clause(&mut self, clause: &[Lit], weight: Weight) {
        (**self).add_weighted_clause(clause, weight)
    }

    fn solve(&mut self) -> Option<Assignment> {
        (**self).solve()
    }
}
