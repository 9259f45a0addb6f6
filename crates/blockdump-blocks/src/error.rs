//! Error taxonomy. Every [`ExtractError`] is fatal to the run.

use std::path::PathBuf;

use crate::types::RawValue;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// An int or bool property reports its domain in the wrong order.
    #[error("block {block}: property `{property}` has an invalid domain order: {reason}")]
    DomainOrder {
        block: String,
        property: String,
        reason: String,
    },

    /// The block's material is not in the hand-maintained catalog.
    #[error("block {block}: unknown material `{material}`")]
    UnknownMaterial { block: String, material: String },

    /// A state reports a value outside its property's declared domain.
    #[error("block {block}: value {value} is not in the domain of property `{property}`")]
    ValueNotInDomain {
        block: String,
        property: String,
        value: RawValue,
    },

    #[error("block {block}: no value for property `{property}`")]
    MissingValue { block: String, property: String },

    #[error("block {block}: state index {index} is reported more than once")]
    DuplicateState { block: String, index: usize },

    #[error("block {block}: expected {expected} states, registry reports {found}")]
    StateCountMismatch {
        block: String,
        expected: usize,
        found: usize,
    },

    #[error("block {block}: state space does not fit in usize")]
    StateSpaceOverflow { block: String },

    #[error("block {block}: light values out of range (luminance {luminance}, opacity {opacity})")]
    LightOutOfRange {
        block: String,
        luminance: u8,
        opacity: u8,
    },
}

/// Errors raised while reading registry snapshots and name tables.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("block {block}: {reason}")]
    InvalidBlock { block: String, reason: String },

    #[error(transparent)]
    Extract(#[from] ExtractError),
}
