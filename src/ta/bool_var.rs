use std::fmt;
use std::fmt::{Display, Formatter};
use wasm_bindgen::prelude::wasm_bindgen;

/// A discrete boolean variable of a timed automaton, identified by its name.
#[wasm_bindgen]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct BoolVar {
    name: String,
}

#[wasm_bindgen]
impl BoolVar {
    #[wasm_bindgen(constructor)]
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
        }
    }
}

impl BoolVar {
    pub fn name(&self) -> &String {
        &self.name
    }
}

impl Display for BoolVar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_returns_bool_var_with_name_when_called() {
        // given
        let name = "done";

        // when
        let var = BoolVar::new(name);

        // then
        assert_eq!(var.name, name);
        assert_eq!(var.to_string(), name);
    }
}
