use crate::error::ModelError;
use crate::ta::bool_var::BoolVar;
use crate::ta::clock::Clock;
use log::trace;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Mapping from old to new variable identities, used to move a location into a fresh clock and
/// boolean namespace. Both maps are injective.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariableRenaming {
    clocks: HashMap<Clock, Clock>,
    bool_vars: HashMap<BoolVar, BoolVar>,
}

impl VariableRenaming {
    pub fn new(
        clocks: HashMap<Clock, Clock>,
        bool_vars: HashMap<BoolVar, BoolVar>,
    ) -> Result<Self, ModelError> {
        ensure_injective(&clocks, "clock", Clock::name)?;
        ensure_injective(&bool_vars, "boolean variable", BoolVar::name)?;
        Ok(Self { clocks, bool_vars })
    }

    /// Builds the renaming from parallel lists where `old_clocks[i]` is replaced by
    /// `new_clocks[i]` (and likewise for boolean variables).
    pub fn from_parallel(
        new_clocks: &[Clock],
        old_clocks: &[Clock],
        new_bvs: &[BoolVar],
        old_bvs: &[BoolVar],
    ) -> Result<Self, ModelError> {
        let clocks = zip_to_map(new_clocks, old_clocks, "clock", Clock::name)?;
        let bool_vars = zip_to_map(new_bvs, old_bvs, "boolean variable", BoolVar::name)?;
        Self::new(clocks, bool_vars)
    }

    /// Returns the target of `clock`, or `clock` itself if it is not renamed.
    pub fn clock<'a>(&'a self, clock: &'a Clock) -> &'a Clock {
        self.clocks.get(clock).unwrap_or(clock)
    }

    /// Returns the target of `var`, or `var` itself if it is not renamed.
    pub fn bool_var<'a>(&'a self, var: &'a BoolVar) -> &'a BoolVar {
        self.bool_vars.get(var).unwrap_or(var)
    }
}

fn zip_to_map<T: Eq + Hash + Clone>(
    new: &[T],
    old: &[T],
    kind: &'static str,
    name: fn(&T) -> &String,
) -> Result<HashMap<T, T>, ModelError> {
    if new.len() != old.len() {
        return Err(ModelError::MismatchedRenaming {
            kind,
            new: new.len(),
            old: old.len(),
        });
    }

    let mut map: HashMap<T, T> = HashMap::with_capacity(old.len());
    for (old_var, new_var) in old.iter().zip(new) {
        trace!("renaming {} {} -> {}", kind, name(old_var), name(new_var));
        if let Some(previous) = map.insert(old_var.clone(), new_var.clone()) {
            if &previous != new_var {
                return Err(ModelError::AmbiguousRenaming {
                    kind,
                    name: name(old_var).clone(),
                });
            }
        }
    }
    Ok(map)
}

fn ensure_injective<T: Eq + Hash>(
    map: &HashMap<T, T>,
    kind: &'static str,
    name: fn(&T) -> &String,
) -> Result<(), ModelError> {
    let mut targets: HashSet<&T> = HashSet::with_capacity(map.len());
    for target in map.values() {
        if !targets.insert(target) {
            return Err(ModelError::NonInjectiveRenaming {
                kind,
                name: name(target).clone(),
            });
        }
    }
    Ok(())
}
