use crate::ta::bool_var::BoolVar;
use crate::ta::clock::Clock;
use std::collections::HashMap;

/// Assignment of values to clocks and boolean variables. Clocks without a value are `0`, boolean
/// variables without a value are `false`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Valuation {
    clocks: HashMap<Clock, f64>,
    bool_vars: HashMap<BoolVar, bool>,
}

impl Valuation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(mut self, clock: &Clock, value: f64) -> Self {
        self.clocks.insert(clock.clone(), value);
        self
    }

    pub fn with_bool_var(mut self, var: &BoolVar, value: bool) -> Self {
        self.bool_vars.insert(var.clone(), value);
        self
    }

    pub fn clock_value(&self, clock: &Clock) -> f64 {
        self.clocks.get(clock).copied().unwrap_or(0.0)
    }

    pub fn bool_value(&self, var: &BoolVar) -> bool {
        self.bool_vars.get(var).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_default_to_zero_and_false_when_not_set() {
        // given
        let valuation = Valuation::new().with_clock(&Clock::new("x"), 1.5);

        // when / then
        assert_eq!(valuation.clock_value(&Clock::new("x")), 1.5);
        assert_eq!(valuation.clock_value(&Clock::new("y")), 0.0);
        assert!(!valuation.bool_value(&BoolVar::new("b")));
    }
}
