use crate::cdd::Cdd;
use crate::error::ModelError;
use crate::ta::guard::Guard;
use crate::ta::location::{Location, LocationFlags, LocationKind};
use log::debug;

/// Accumulator that folds locations of independently running automata into one product location.
///
/// - the name is the concatenation of all names
/// - initial and universal are combined with AND, urgent and inconsistent with OR
/// - the invariant is the conjunction of all invariants in normal form, a single part keeps its
///   invariant as written
/// - `x` is the average of all `x` coordinates, `y` is the `y` coordinate of the last location
/// - the product is an inconsistency sink if all parts are sinks
#[derive(Debug, Clone)]
pub struct ProductFold {
    name: String,
    flags: LocationFlags,
    all_sinks: bool,
    invariant: Cdd,
    first_invariant: Option<Guard>,
    x_sum: i64,
    y: i32,
    count: usize,
}

impl ProductFold {
    /// Identity of the fold: absorbing a location into it yields that location's attributes.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            flags: LocationFlags {
                initial: true,
                urgent: false,
                universal: true,
                inconsistent: false,
            },
            all_sinks: true,
            invariant: Cdd::cdd_true(),
            first_invariant: None,
            x_sum: 0,
            y: 0,
            count: 0,
        }
    }

    pub fn absorb(mut self, location: &Location) -> Self {
        self.name.push_str(location.name());
        self.flags.initial &= location.is_initial();
        self.flags.urgent |= location.is_urgent();
        self.flags.universal &= location.is_universal();
        self.flags.inconsistent |= location.is_inconsistent();
        self.all_sinks &= location.kind() == LocationKind::InconsistencySink;
        self.invariant = location.invariant_cdd().conjunction(&self.invariant);
        if self.count == 0 {
            self.first_invariant = Some(location.invariant().clone());
        }
        self.x_sum += i64::from(location.x());
        // only x is averaged
        self.y = location.y();
        self.count += 1;
        self
    }

    /// Builds the product location.
    ///
    /// # Errors
    /// Returns [`ModelError::EmptyProduct`] if no location was absorbed.
    pub fn finish(self) -> Result<Location, ModelError> {
        if self.count == 0 {
            return Err(ModelError::EmptyProduct);
        }

        debug!("composed {} locations into {}", self.count, self.name);
        let kind = if self.all_sinks {
            LocationKind::InconsistencySink
        } else {
            LocationKind::Ordinary
        };
        let x = (self.x_sum / self.count as i64) as i32;
        let invariant = match self.first_invariant {
            Some(invariant) if self.count == 1 => invariant,
            _ => self.invariant.to_guard(),
        };
        Ok(Location::from_product(
            self.name,
            kind,
            invariant,
            self.flags,
            x,
            self.y,
        ))
    }
}

impl Default for ProductFold {
    fn default() -> Self {
        Self::new()
    }
}
