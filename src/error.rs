use thiserror::Error;

/// Errors raised while building locations and variable renamings.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ModelError {
    #[error("At least a single location is required")]
    EmptyProduct,

    #[error("Cannot rename {kind}s: {new} new {kind}s given for {old} old {kind}s")]
    MismatchedRenaming {
        kind: &'static str,
        new: usize,
        old: usize,
    },

    #[error("The {kind} {name} is renamed to more than one target")]
    AmbiguousRenaming { kind: &'static str, name: String },

    #[error("More than one {kind} is renamed to {name}")]
    NonInjectiveRenaming { kind: &'static str, name: String },
}

/// Errors raised by the line-based transport client.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Invalid address '{0}', expected host:port")]
    InvalidAddress(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
