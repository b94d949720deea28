use crate::cdd::Cdd;
use crate::error::ModelError;
use crate::symbolic_state::State;
use crate::ta::bool_var::BoolVar;
use crate::ta::clock::Clock;
use crate::ta::clock_constraint::ClockConstraint;
use crate::ta::guard::Guard;
use crate::ta::location::product::ProductFold;
use crate::ta::renaming::VariableRenaming;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use wasm_bindgen::prelude::wasm_bindgen;

pub mod product;

/// Name that marks a location as the inconsistency sink when models are loaded by name only.
pub const INCONSISTENCY_SINK_NAME: &str = "inc";

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub enum LocationKind {
    /// Location of a loaded or composed model.
    #[default]
    Ordinary,
    /// Sink entered when a specification becomes inconsistent. Always inconsistent.
    InconsistencySink,
}

/// Behavioral flags given to a location on construction.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct LocationFlags {
    pub initial: bool,
    pub urgent: bool,
    pub universal: bool,
    pub inconsistent: bool,
}

/// Discrete control state of a timed automaton.
///
/// `name`, `kind` and the initial flag are fixed on construction. The invariant, the remaining
/// flags and the inconsistent part are refined by later analysis passes through `&mut self`, so a
/// location shared between independent passes has to be cloned first.
///
/// Equality and hashing only consider the name, the flags and the invariant.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct Location {
    name: String,
    kind: LocationKind,
    invariant: Guard,
    inconsistent_part: Option<Cdd>,
    is_initial: bool,
    is_urgent: bool,
    is_universal: bool,
    is_inconsistent: bool,
    x: i32,
    y: i32,
    enter_test_code: Option<String>,
    exit_test_code: Option<String>,
}

#[wasm_bindgen]
impl Location {
    #[wasm_bindgen(constructor)]
    pub fn with_clock_constraint(
        name: &str,
        invariant: Option<ClockConstraint>,
        is_initial: bool,
        is_urgent: bool,
        is_universal: bool,
        is_inconsistent: bool,
        x: i32,
        y: i32,
    ) -> Self {
        let flags = LocationFlags {
            initial: is_initial,
            urgent: is_urgent,
            universal: is_universal,
            inconsistent: is_inconsistent,
        };
        let invariant = invariant.as_ref().map(Guard::from).unwrap_or(Guard::True);
        Location::new(name, invariant, flags, x, y)
    }
}

impl Location {
    pub fn new(name: &str, invariant: Guard, flags: LocationFlags, x: i32, y: i32) -> Self {
        let kind = if name == INCONSISTENCY_SINK_NAME {
            LocationKind::InconsistencySink
        } else {
            LocationKind::Ordinary
        };
        Self {
            name: String::from(name),
            kind,
            invariant,
            inconsistent_part: None,
            is_initial: flags.initial,
            is_urgent: flags.urgent,
            is_universal: flags.universal,
            is_inconsistent: flags.inconsistent || kind == LocationKind::InconsistencySink,
            x,
            y,
            enter_test_code: None,
            exit_test_code: None,
        }
    }

    pub fn at_origin(name: &str, invariant: Guard, flags: LocationFlags) -> Self {
        Location::new(name, invariant, flags, 0, 0)
    }

    /// Marks the location as inconsistency sink regardless of its name.
    pub fn into_inconsistency_sink(mut self) -> Self {
        self.kind = LocationKind::InconsistencySink;
        self.is_inconsistent = true;
        self
    }

    pub fn with_test_code(mut self, enter_test_code: &str, exit_test_code: &str) -> Self {
        self.enter_test_code = Some(String::from(enter_test_code));
        self.exit_test_code = Some(String::from(exit_test_code));
        self
    }

    /// Copy of the location whose invariant refers to the renamed clocks and boolean variables.
    /// The inconsistent part is not carried over as it refers to the old variables.
    pub fn renamed(&self, renaming: &VariableRenaming) -> Location {
        Location {
            invariant: self.invariant.renamed(renaming),
            inconsistent_part: None,
            ..self.clone()
        }
    }

    /// Like [`Location::renamed`], with `old_clocks[i]` replaced by `new_clocks[i]` and
    /// `old_bvs[i]` replaced by `new_bvs[i]`.
    pub fn renamed_with_lists(
        &self,
        new_clocks: &[Clock],
        old_clocks: &[Clock],
        new_bvs: &[BoolVar],
        old_bvs: &[BoolVar],
    ) -> Result<Location, ModelError> {
        let renaming = VariableRenaming::from_parallel(new_clocks, old_clocks, new_bvs, old_bvs)?;
        Ok(self.renamed(&renaming))
    }

    /// Builds the product location of locations occupied at the same time by independent
    /// automata. See [`ProductFold`] for how the parts are combined.
    ///
    /// A single location yields a location equal to it. Products of several locations carry
    /// their invariant in the normal form of [`Cdd::to_guard`].
    pub fn compose<'a, I>(locations: I) -> Result<Location, ModelError>
    where
        I: IntoIterator<Item = &'a Location>,
    {
        locations
            .into_iter()
            .fold(ProductFold::new(), ProductFold::absorb)
            .finish()
    }

    /// Snapshot of the location of `state` whose invariant is narrowed to the zone of the state.
    pub fn from_state(state: &State, clocks: &[Clock]) -> Location {
        let source = state.location();
        Location {
            invariant: state.invariants(clocks),
            inconsistent_part: None,
            ..source.clone()
        }
    }

    pub(crate) fn from_product(
        name: String,
        kind: LocationKind,
        invariant: Guard,
        flags: LocationFlags,
        x: i32,
        y: i32,
    ) -> Location {
        Location {
            name,
            kind,
            invariant,
            inconsistent_part: None,
            is_initial: flags.initial,
            is_urgent: flags.urgent,
            is_universal: flags.universal,
            is_inconsistent: flags.inconsistent || kind == LocationKind::InconsistencySink,
            x,
            y,
            enter_test_code: None,
            exit_test_code: None,
        }
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn kind(&self) -> LocationKind {
        self.kind
    }

    pub fn invariant(&self) -> &Guard {
        &self.invariant
    }

    pub fn invariant_cdd(&self) -> Cdd {
        Cdd::from(&self.invariant)
    }

    pub fn set_invariant(&mut self, invariant: Guard) {
        self.invariant = invariant;
    }

    pub fn inconsistent_part(&self) -> Option<&Cdd> {
        self.inconsistent_part.as_ref()
    }

    pub fn set_inconsistent_part(&mut self, inconsistent_part: Option<Cdd>) {
        self.inconsistent_part = inconsistent_part;
    }

    pub fn is_initial(&self) -> bool {
        self.is_initial
    }

    pub fn is_urgent(&self) -> bool {
        self.is_urgent
    }

    pub fn set_urgent(&mut self, urgent: bool) {
        self.is_urgent = urgent;
    }

    pub fn is_universal(&self) -> bool {
        self.is_universal
    }

    pub fn set_universal(&mut self, universal: bool) {
        self.is_universal = universal;
    }

    pub fn is_inconsistent(&self) -> bool {
        self.is_inconsistent || self.kind == LocationKind::InconsistencySink
    }

    /// Has no visible effect on an inconsistency sink, which stays inconsistent.
    pub fn set_inconsistent(&mut self, inconsistent: bool) {
        self.is_inconsistent = inconsistent;
    }

    pub fn flags(&self) -> LocationFlags {
        LocationFlags {
            initial: self.is_initial,
            urgent: self.is_urgent,
            universal: self.is_universal,
            inconsistent: self.is_inconsistent(),
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn set_x(&mut self, x: i32) {
        self.x = x;
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn set_y(&mut self, y: i32) {
        self.y = y;
    }

    pub fn enter_test_code(&self) -> Option<&str> {
        self.enter_test_code.as_deref()
    }

    pub fn exit_test_code(&self) -> Option<&str> {
        self.exit_test_code.as_deref()
    }

    pub fn max_constant(&self, clock: &Clock) -> i32 {
        self.invariant.max_constant(clock)
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.flags() == other.flags()
            && self.invariant == other.invariant
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.is_initial.hash(state);
        self.is_urgent.hash(state);
        self.is_universal.hash(state);
        self.is_inconsistent().hash(state);
        self.invariant.hash(state);
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
