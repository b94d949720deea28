pub mod bool_var;
pub mod clock;
pub mod clock_constraint;
pub mod guard;
pub mod location;
pub mod renaming;
