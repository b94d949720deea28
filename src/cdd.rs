use crate::cdd::difference_bound_matrix::DifferenceBoundMatrix;
use crate::cdd::valuation::Valuation;
use crate::ta::bool_var::BoolVar;
use crate::ta::clock::Clock;
use crate::ta::clock_constraint::clause::Clause;
use crate::ta::guard::{BoolClause, Guard};
use log::trace;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};

pub mod difference_bound_matrix;
pub mod valuation;

/// Boolean cube times clock zone.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct CddTerm {
    bools: BTreeMap<BoolVar, bool>,
    zone: DifferenceBoundMatrix,
}

impl CddTerm {
    fn unconstrained(number_of_clocks: usize) -> CddTerm {
        CddTerm {
            bools: BTreeMap::new(),
            zone: DifferenceBoundMatrix::unconstrained(number_of_clocks),
        }
    }

    fn conjunction(&self, other: &CddTerm) -> Option<CddTerm> {
        let mut bools = self.bools.clone();
        for (var, value) in &other.bools {
            if *bools.entry(var.clone()).or_insert(*value) != *value {
                return None;
            }
        }
        let mut zone = self.zone.clone();
        zone.intersect(&other.zone)?;
        Some(CddTerm { bools, zone })
    }

    fn includes(&self, other: &CddTerm) -> bool {
        self.bools
            .iter()
            .all(|(var, value)| other.bools.get(var) == Some(value))
            && self.zone.includes(&other.zone)
    }
}

/// Symbolic set of clock and boolean valuations ("clock decision diagram").
///
/// A CDD is stored as a disjunction of terms, each a conjunction of boolean literals and a
/// canonical DBM over the sorted clocks of the CDD. Every operation returns a normalized CDD:
/// empty and subsumed terms are removed, clocks unconstrained in every term are dropped and the
/// terms are sorted. Equality and hashing work on this normal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cdd {
    clocks: Vec<Clock>,
    terms: Vec<CddTerm>,
}

impl Cdd {
    /// The CDD containing every valuation.
    pub fn cdd_true() -> Cdd {
        Cdd {
            clocks: Vec::new(),
            terms: vec![CddTerm::unconstrained(0)],
        }
    }

    /// The CDD containing no valuation.
    pub fn cdd_false() -> Cdd {
        Cdd {
            clocks: Vec::new(),
            terms: Vec::new(),
        }
    }

    /// Returns whether the CDD is the truth constant. Tautologies built from complementary
    /// literals (e.g. `b || !b`) are not detected.
    pub fn is_true(&self) -> bool {
        *self == Cdd::cdd_true()
    }

    pub fn is_unsatisfiable(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn conjunction(&self, other: &Cdd) -> Cdd {
        let clocks = merge_clocks(&self.clocks, &other.clocks);
        let lhs = self.terms_over(&clocks);
        let rhs = other.terms_over(&clocks);

        let mut terms = Vec::with_capacity(lhs.len() * rhs.len());
        for l in &lhs {
            for r in &rhs {
                if let Some(term) = l.conjunction(r) {
                    terms.push(term);
                }
            }
        }
        Cdd::normalized(clocks, terms)
    }

    pub fn disjunction(&self, other: &Cdd) -> Cdd {
        let clocks = merge_clocks(&self.clocks, &other.clocks);
        let mut terms = self.terms_over(&clocks);
        terms.extend(other.terms_over(&clocks));
        Cdd::normalized(clocks, terms)
    }

    /// Existentially removes every clock not contained in `clocks`.
    pub fn restricted_to(&self, clocks: &[Clock]) -> Cdd {
        let (kept_positions, kept_clocks): (Vec<usize>, Vec<Clock>) = self
            .clocks
            .iter()
            .enumerate()
            .filter(|(_, clock)| clocks.contains(clock))
            .map(|(i, clock)| (i + 1, clock.clone()))
            .unzip();
        trace!(
            "restricting CDD over {} clocks to {} clocks",
            self.clocks.len(),
            kept_clocks.len()
        );

        let terms = self
            .terms
            .iter()
            .map(|term| CddTerm {
                bools: term.bools.clone(),
                zone: term.zone.projected(&kept_positions),
            })
            .collect();
        Cdd::normalized(kept_clocks, terms)
    }

    pub fn contains(&self, valuation: &Valuation) -> bool {
        let mut values = Vec::with_capacity(self.clocks.len() + 1);
        values.push(0.0);
        values.extend(self.clocks.iter().map(|clock| valuation.clock_value(clock)));

        self.terms.iter().any(|term| {
            term.bools
                .iter()
                .all(|(var, value)| valuation.bool_value(var) == *value)
                && term.zone.contains(&values)
        })
    }

    /// Translates the CDD into a guard: a disjunction with one conjunction per term. Converting
    /// the result back into a CDD yields `self` again.
    pub fn to_guard(&self) -> Guard {
        Guard::any(
            self.terms
                .iter()
                .map(|term| {
                    let bools = term
                        .bools
                        .iter()
                        .map(|(var, value)| Guard::Bool(BoolClause::new(var, *value)));
                    let clauses = term.zone.clauses(&self.clocks).into_iter().map(Guard::Clock);
                    Guard::all(bools.chain(clauses).collect())
                })
                .collect(),
        )
    }

    fn from_clause(clause: &Clause) -> Cdd {
        let mut clocks = vec![clause.lhs().clone()];
        if let Some(rhs) = clause.rhs() {
            clocks.push(rhs.clone());
        }
        clocks.sort();
        clocks.dedup();

        let mut term = CddTerm::unconstrained(clocks.len());
        match term.zone.and_clause(clause, &clocks) {
            Some(()) => Cdd::normalized(clocks, vec![term]),
            None => Cdd::cdd_false(),
        }
    }

    /// Terms of `self` embedded into the superset `clocks` of its own clocks.
    fn terms_over(&self, clocks: &[Clock]) -> Vec<CddTerm> {
        if self.clocks.as_slice() == clocks {
            return self.terms.clone();
        }

        let positions: Vec<usize> = self
            .clocks
            .iter()
            .map(|clock| match clocks.binary_search(clock) {
                Ok(i) => i + 1,
                Err(_) => panic!("Clock {clock} not contained in {clocks:?}"),
            })
            .collect();

        self.terms
            .iter()
            .map(|term| CddTerm {
                bools: term.bools.clone(),
                zone: term.zone.extended(&positions, clocks.len()),
            })
            .collect()
    }

    fn normalized(clocks: Vec<Clock>, mut terms: Vec<CddTerm>) -> Cdd {
        if terms.is_empty() {
            return Cdd::cdd_false();
        }

        terms.sort();
        terms.dedup();
        let terms: Vec<CddTerm> = terms
            .iter()
            .enumerate()
            .filter(|(i, term)| {
                !terms
                    .iter()
                    .enumerate()
                    .any(|(j, other)| *i != j && other.includes(term))
            })
            .map(|(_, term)| term.clone())
            .collect();

        let kept_positions: Vec<usize> = (1..=clocks.len())
            .filter(|&pos| !terms.iter().all(|term| term.zone.is_free(pos)))
            .collect();
        if kept_positions.len() == clocks.len() {
            return Cdd { clocks, terms };
        }

        let kept_clocks = kept_positions
            .iter()
            .map(|&pos| clocks[pos - 1].clone())
            .collect();
        let mut terms: Vec<CddTerm> = terms
            .into_iter()
            .map(|term| CddTerm {
                bools: term.bools,
                zone: term.zone.projected(&kept_positions),
            })
            .collect();
        terms.sort();
        Cdd {
            clocks: kept_clocks,
            terms,
        }
    }
}

impl From<&Guard> for Cdd {
    fn from(guard: &Guard) -> Self {
        match guard {
            Guard::True => Cdd::cdd_true(),
            Guard::False => Cdd::cdd_false(),
            Guard::Clock(clause) => Cdd::from_clause(clause),
            Guard::Bool(clause) => {
                let mut term = CddTerm::unconstrained(0);
                term.bools.insert(clause.var().clone(), clause.value());
                Cdd {
                    clocks: Vec::new(),
                    terms: vec![term],
                }
            }
            Guard::And(guards) => guards
                .iter()
                .fold(Cdd::cdd_true(), |acc, g| acc.conjunction(&Cdd::from(g))),
            Guard::Or(guards) => guards
                .iter()
                .fold(Cdd::cdd_false(), |acc, g| acc.disjunction(&Cdd::from(g))),
        }
    }
}

impl Display for Cdd {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_guard())
    }
}

fn merge_clocks(first: &[Clock], second: &[Clock]) -> Vec<Clock> {
    let mut clocks: Vec<Clock> = first.iter().chain(second).cloned().collect();
    clocks.sort();
    clocks.dedup();
    clocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ta::clock_constraint::clause::ClockComparator;

    #[test]
    fn cdd_true_contains_every_valuation() {
        // given
        let cdd = Cdd::cdd_true();
        let valuation = Valuation::new()
            .with_clock(&Clock::new("x"), 1234.5)
            .with_bool_var(&BoolVar::new("b"), true);

        // when / then
        assert!(cdd.is_true());
        assert!(cdd.contains(&valuation));
        assert_eq!(cdd.to_guard(), Guard::True);
    }

    #[test]
    fn cdd_false_contains_no_valuation() {
        // given
        let cdd = Cdd::cdd_false();

        // when / then
        assert!(cdd.is_unsatisfiable());
        assert!(!cdd.contains(&Valuation::new()));
        assert_eq!(cdd.to_guard(), Guard::False);
    }

    #[test]
    fn from_returns_true_when_clause_only_states_non_negativity() {
        // given
        let guard = Guard::Clock(Clause::new(&Clock::new("x"), ClockComparator::GEQ, 0));

        // when
        let result = Cdd::from(&guard);

        // then
        assert!(result.is_true());
    }

    #[test]
    fn conjunction_contains_exactly_valuations_of_both_operands() {
        // given
        let x = Clock::new("x");
        let y = Clock::new("y");
        let a = Cdd::from(&Guard::Clock(Clause::new(&x, ClockComparator::LEQ, 5)));
        let b = Cdd::from(&Guard::Clock(Clause::new(&y, ClockComparator::GREATER, 2)));

        // when
        let result = a.conjunction(&b);

        // then
        let in_both = Valuation::new().with_clock(&x, 4.0).with_clock(&y, 3.0);
        let only_in_a = Valuation::new().with_clock(&x, 4.0).with_clock(&y, 2.0);
        let only_in_b = Valuation::new().with_clock(&x, 6.0).with_clock(&y, 3.0);
        assert!(result.contains(&in_both));
        assert!(!result.contains(&only_in_a));
        assert!(!result.contains(&only_in_b));
        assert_eq!(result.clocks, vec![x, y]);
    }

    #[test]
    fn conjunction_is_unsatisfiable_when_bool_literals_conflict() {
        // given
        let b = BoolVar::new("b");
        let pos = Cdd::from(&Guard::Bool(BoolClause::new(&b, true)));
        let neg = Cdd::from(&Guard::Bool(BoolClause::new(&b, false)));

        // when
        let result = pos.conjunction(&neg);

        // then
        assert!(result.is_unsatisfiable());
    }

    #[test]
    fn conjunction_with_true_is_identity() {
        // given
        let guard = Guard::And(vec![
            Guard::Clock(Clause::new(&Clock::new("x"), ClockComparator::GEQ, 1)),
            Guard::Bool(BoolClause::new(&BoolVar::new("b"), true)),
        ]);
        let cdd = Cdd::from(&guard);

        // when
        let result = cdd.conjunction(&Cdd::cdd_true());

        // then
        assert_eq!(result, cdd);
    }

    #[test]
    fn disjunction_drops_subsumed_terms() {
        // given
        let x = Clock::new("x");
        let small = Cdd::from(&Guard::Clock(Clause::new(&x, ClockComparator::LEQ, 3)));
        let large = Cdd::from(&Guard::Clock(Clause::new(&x, ClockComparator::LEQ, 5)));

        // when
        let result = small.disjunction(&large);

        // then
        assert_eq!(result, large);
    }

    #[test]
    fn disjunction_with_true_is_true() {
        // given
        let x = Clock::new("x");
        let cdd = Cdd::from(&Guard::Clock(Clause::new(&x, ClockComparator::LEQ, 3)));

        // when
        let result = cdd.disjunction(&Cdd::cdd_true());

        // then
        assert!(result.is_true());
    }

    #[test]
    fn disjunction_keeps_both_terms_when_disjoint() {
        // given
        let x = Clock::new("x");
        let low = Cdd::from(&Guard::Clock(Clause::new(&x, ClockComparator::LESSER, 2)));
        let high = Cdd::from(&Guard::Clock(Clause::new(&x, ClockComparator::GREATER, 7)));

        // when
        let result = low.disjunction(&high);

        // then
        assert!(result.contains(&Valuation::new().with_clock(&x, 1.0)));
        assert!(result.contains(&Valuation::new().with_clock(&x, 8.0)));
        assert!(!result.contains(&Valuation::new().with_clock(&x, 5.0)));
    }

    #[test]
    fn to_guard_round_trips_through_from() {
        // given
        let x = Clock::new("x");
        let y = Clock::new("y");
        let guard = Guard::Or(vec![
            Guard::And(vec![
                Guard::Clock(Clause::new(&x, ClockComparator::LEQ, 5)),
                Guard::Clock(Clause::difference(&x, &y, ClockComparator::LESSER, 1)),
            ]),
            Guard::Bool(BoolClause::new(&BoolVar::new("b"), true)),
        ]);
        let cdd = Cdd::from(&guard);

        // when
        let result = Cdd::from(&cdd.to_guard());

        // then
        assert_eq!(result, cdd);
    }

    #[test]
    fn to_guard_returns_original_clauses_when_guard_is_canonical() {
        // given
        let x = Clock::new("x");
        let guard = Guard::And(vec![
            Guard::Clock(Clause::new(&x, ClockComparator::GEQ, 2)),
            Guard::Clock(Clause::new(&x, ClockComparator::LEQ, 5)),
        ]);

        // when
        let result = Cdd::from(&guard).to_guard();

        // then
        assert_eq!(result, guard);
    }

    #[test]
    fn restricted_to_removes_clocks_not_listed() {
        // given
        let x = Clock::new("x");
        let y = Clock::new("y");
        let guard = Guard::And(vec![
            Guard::Clock(Clause::new(&x, ClockComparator::LEQ, 5)),
            Guard::Clock(Clause::new(&y, ClockComparator::LEQ, 3)),
        ]);
        let cdd = Cdd::from(&guard);

        // when
        let result = cdd.restricted_to(&[x.clone()]);

        // then
        assert_eq!(
            result,
            Cdd::from(&Guard::Clock(Clause::new(&x, ClockComparator::LEQ, 5)))
        );
    }

    #[test]
    fn restricted_to_keeps_everything_when_all_clocks_are_listed() {
        // given
        let x = Clock::new("x");
        let y = Clock::new("y");
        let cdd = Cdd::from(&Guard::Clock(Clause::difference(
            &x,
            &y,
            ClockComparator::LEQ,
            2,
        )));

        // when
        let result = cdd.restricted_to(&[y, x]);

        // then
        assert_eq!(result, cdd);
    }

    #[test]
    fn fmt_renders_guard_of_cdd() {
        // given
        let x = Clock::new("x");
        let cdd = Cdd::from(&Guard::Clock(Clause::new(&x, ClockComparator::LESSER, 4)));

        // when
        let result = cdd.to_string();

        // then
        assert_eq!(result, "x<4");
    }
}
