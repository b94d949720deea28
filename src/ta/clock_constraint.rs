use crate::ta::clock_constraint::clause::Clause;
use crate::ta::guard::Guard;
use wasm_bindgen::prelude::wasm_bindgen;

pub mod clause;

/// Conjunction of clock clauses. This is the form in which invariants are handed over from
/// JavaScript; inside the crate it is converted into a [`Guard`].
#[wasm_bindgen]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockConstraint {
    clauses: Vec<Clause>,
}

#[wasm_bindgen]
impl ClockConstraint {
    #[wasm_bindgen(constructor)]
    pub fn new(clauses: Box<[Clause]>) -> Self {
        Self {
            clauses: Vec::from(clauses),
        }
    }
}

impl ClockConstraint {
    pub fn clauses(&self) -> &Vec<Clause> {
        &self.clauses
    }
}

impl From<&ClockConstraint> for Guard {
    fn from(cc: &ClockConstraint) -> Self {
        Guard::all(cc.clauses.iter().cloned().map(Guard::Clock).collect())
    }
}
