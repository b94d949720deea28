use crate::ta::clock::Clock;
use crate::ta::renaming::VariableRenaming;
use std::fmt;
use std::fmt::{Display, Formatter};
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum ClockComparator {
    LESSER,
    LEQ,
    GEQ,
    GREATER,
}

impl ClockComparator {
    pub fn symbol(&self) -> &'static str {
        match self {
            ClockComparator::LESSER => "<",
            ClockComparator::LEQ => "<=",
            ClockComparator::GEQ => ">=",
            ClockComparator::GREATER => ">",
        }
    }
}

/// An atomic clock constraint, either `lhs ~ bound` or `lhs - rhs ~ bound`.
#[wasm_bindgen]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct Clause {
    lhs: Clock,
    rhs: Option<Clock>,
    op: ClockComparator,
    bound: i32,
}

#[wasm_bindgen]
impl Clause {
    #[wasm_bindgen(constructor)]
    pub fn new(lhs: &Clock, op: ClockComparator, bound: i32) -> Self {
        Self {
            lhs: lhs.clone(),
            rhs: None,
            op,
            bound,
        }
    }

    pub fn difference(lhs: &Clock, rhs: &Clock, op: ClockComparator, bound: i32) -> Self {
        Self {
            lhs: lhs.clone(),
            rhs: Some(rhs.clone()),
            op,
            bound,
        }
    }
}

impl Clause {
    pub fn lhs(&self) -> &Clock {
        &self.lhs
    }

    pub fn rhs(&self) -> Option<&Clock> {
        self.rhs.as_ref()
    }

    pub fn op(&self) -> ClockComparator {
        self.op
    }

    pub fn bound(&self) -> i32 {
        self.bound
    }

    pub fn mentions(&self, clock: &Clock) -> bool {
        &self.lhs == clock || self.rhs.as_ref() == Some(clock)
    }

    pub fn renamed(&self, renaming: &VariableRenaming) -> Clause {
        Clause {
            lhs: renaming.clock(&self.lhs).clone(),
            rhs: self.rhs.as_ref().map(|rhs| renaming.clock(rhs).clone()),
            op: self.op,
            bound: self.bound,
        }
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.rhs {
            Some(rhs) => write!(f, "{}-{}{}{}", self.lhs, rhs, self.op.symbol(), self.bound),
            None => write!(f, "{}{}{}", self.lhs, self.op.symbol(), self.bound),
        }
    }
}
