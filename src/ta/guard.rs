use crate::ta::bool_var::BoolVar;
use crate::ta::clock::Clock;
use crate::ta::clock_constraint::clause::Clause;
use crate::ta::renaming::VariableRenaming;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Constraint `var == value` on a boolean variable.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct BoolClause {
    var: BoolVar,
    value: bool,
}

impl BoolClause {
    pub fn new(var: &BoolVar, value: bool) -> Self {
        Self {
            var: var.clone(),
            value,
        }
    }

    pub fn var(&self) -> &BoolVar {
        &self.var
    }

    pub fn value(&self) -> bool {
        self.value
    }
}

impl Display for BoolClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.value {
            write!(f, "{}", self.var)
        } else {
            write!(f, "!{}", self.var)
        }
    }
}

/// Immutable predicate over clocks and boolean variables, used as invariant of locations.
///
/// Equality is structural. Two guards describing the same set of valuations in different ways
/// are not equal; convert both through [`crate::cdd::Cdd`] to compare them semantically.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Guard {
    True,
    False,
    Clock(Clause),
    Bool(BoolClause),
    And(Vec<Guard>),
    Or(Vec<Guard>),
}

impl Guard {
    /// Conjunction of `guards` without wrapping empty or singleton lists.
    pub fn all(mut guards: Vec<Guard>) -> Guard {
        match guards.len() {
            0 => Guard::True,
            1 => guards.remove(0),
            _ => Guard::And(guards),
        }
    }

    /// Disjunction of `guards` without wrapping empty or singleton lists.
    pub fn any(mut guards: Vec<Guard>) -> Guard {
        match guards.len() {
            0 => Guard::False,
            1 => guards.remove(0),
            _ => Guard::Or(guards),
        }
    }

    /// Returns a copy of the guard in which every clock and boolean variable contained in
    /// `renaming` is replaced by its target.
    pub fn renamed(&self, renaming: &VariableRenaming) -> Guard {
        match self {
            Guard::True => Guard::True,
            Guard::False => Guard::False,
            Guard::Clock(clause) => Guard::Clock(clause.renamed(renaming)),
            Guard::Bool(clause) => {
                Guard::Bool(BoolClause::new(renaming.bool_var(clause.var()), clause.value()))
            }
            Guard::And(guards) => Guard::And(guards.iter().map(|g| g.renamed(renaming)).collect()),
            Guard::Or(guards) => Guard::Or(guards.iter().map(|g| g.renamed(renaming)).collect()),
        }
    }

    /// Returns the largest absolute bound of any clause mentioning `clock`, or `0` if the clock
    /// does not occur in the guard. `i32::MIN` counts as `i32::MAX`.
    pub fn max_constant(&self, clock: &Clock) -> i32 {
        match self {
            Guard::True | Guard::False | Guard::Bool(_) => 0,
            Guard::Clock(clause) if clause.mentions(clock) => clause.bound().saturating_abs(),
            Guard::Clock(_) => 0,
            Guard::And(guards) | Guard::Or(guards) => guards
                .iter()
                .map(|g| g.max_constant(clock))
                .max()
                .unwrap_or(0),
        }
    }
}

impl Display for Guard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Guard::True => write!(f, "true"),
            Guard::False => write!(f, "false"),
            Guard::Clock(clause) => write!(f, "{clause}"),
            Guard::Bool(clause) => write!(f, "{clause}"),
            Guard::And(guards) => write_joined(f, guards, " && "),
            Guard::Or(guards) => write_joined(f, guards, " || "),
        }
    }
}

fn write_joined(f: &mut Formatter<'_>, guards: &[Guard], separator: &str) -> fmt::Result {
    for (i, guard) in guards.iter().enumerate() {
        if i > 0 {
            write!(f, "{separator}")?;
        }
        match guard {
            Guard::And(_) | Guard::Or(_) => write!(f, "({guard})")?,
            _ => write!(f, "{guard}")?,
        }
    }
    Ok(())
}
