use crate::cdd::Cdd;
use crate::ta::clock::Clock;
use crate::ta::guard::Guard;
use crate::ta::location::Location;

pub mod state_pair;

/// Node of the exploration: a location together with the zone of valuations reachable in it.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct State {
    location: Location,
    zone: Cdd,
}

impl State {
    pub fn new(location: Location, zone: Cdd) -> State {
        State { location, zone }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn inv_zone(&self) -> &Cdd {
        &self.zone
    }

    /// Invariant of the location narrowed to the zone of the state and restricted to `clocks`.
    pub fn invariants(&self, clocks: &[Clock]) -> Guard {
        self.zone
            .conjunction(&self.location.invariant_cdd())
            .restricted_to(clocks)
            .to_guard()
    }
}
