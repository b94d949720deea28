use crate::symbolic_state::State;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Two states, one of each automaton under comparison, explored together by the refinement check.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct StatePair {
    left: State,
    right: State,
}

impl StatePair {
    pub fn new(left: State, right: State) -> StatePair {
        StatePair { left, right }
    }

    pub fn left(&self) -> &State {
        &self.left
    }

    pub fn right(&self) -> &State {
        &self.right
    }

    /// Short form that only shows the zone of the left state.
    pub fn pretty_print(&self) -> String {
        format!(
            "L=({}, {})  Z={}",
            self.left.location(),
            self.right.location(),
            self.left.inv_zone()
        )
    }
}

impl Display for StatePair {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L=({}, {})  Z={}  {}",
            self.left.location(),
            self.right.location(),
            self.left.inv_zone(),
            self.right.inv_zone()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdd::Cdd;
    use crate::ta::clock::Clock;
    use crate::ta::clock_constraint::clause::{Clause, ClockComparator};
    use crate::ta::guard::Guard;
    use crate::ta::location::{Location, LocationFlags};

    #[test]
    fn new_returns_correct_pair_when_called() {
        // given
        let (left, right) = gen_states();

        // when
        let result = StatePair::new(left.clone(), right.clone());

        // then
        assert_eq!(result.left(), &left);
        assert_eq!(result.right(), &right);
    }

    #[test]
    fn pretty_print_shows_locations_and_left_zone() {
        // given
        let (left, right) = gen_states();
        let pair = StatePair::new(left, right);

        // when
        let result = pair.pretty_print();

        // then
        assert_eq!(result, "L=(impl, spec)  Z=x<=3");
    }

    #[test]
    fn fmt_shows_locations_and_both_zones() {
        // given
        let (left, right) = gen_states();
        let pair = StatePair::new(left, right);

        // when
        let result = pair.to_string();

        // then
        assert_eq!(result, "L=(impl, spec)  Z=x<=3  y>1");
    }

    fn gen_states() -> (State, State) {
        let x = Clock::new("x");
        let y = Clock::new("y");
        let left = State::new(
            Location::at_origin("impl", Guard::True, LocationFlags::default()),
            Cdd::from(&Guard::Clock(Clause::new(&x, ClockComparator::LEQ, 3))),
        );
        let right = State::new(
            Location::at_origin("spec", Guard::True, LocationFlags::default()),
            Cdd::from(&Guard::Clock(Clause::new(&y, ClockComparator::GREATER, 1))),
        );
        (left, right)
    }
}
