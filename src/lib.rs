use crate::ta::location::Location;
use wasm_bindgen::prelude::*;

pub mod cdd;
pub mod connection;
pub mod error;
pub mod symbolic_state;
pub mod ta;

/// Builds the product location of locations occupied simultaneously by independent automata.
#[wasm_bindgen(js_name = composeLocations)]
pub fn compose_locations(locations: Box<[Location]>) -> Location {
    match Location::compose(locations.iter()) {
        Ok(location) => location,
        Err(err) => wasm_bindgen::throw_str(&format!("Cannot compose locations: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ta::guard::Guard;
    use crate::ta::location::LocationFlags;

    #[test]
    fn compose_locations_returns_product_when_locations_are_given() {
        // given
        let loc0 = Location::at_origin("a", Guard::True, LocationFlags::default());
        let loc1 = Location::at_origin("b", Guard::True, LocationFlags::default());

        // when
        let result = compose_locations(Box::from([loc0, loc1]));

        // then
        assert_eq!(result.name(), "ab");
    }
}
