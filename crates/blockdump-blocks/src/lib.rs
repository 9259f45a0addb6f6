//! Registry snapshot model, property classification, state indexing and the material catalog.
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod material;
pub mod property;
pub mod registry;
pub mod state;
pub mod types;

pub use error::{ExtractError, LoadError};
pub use material::{MaterialCatalog, MaterialEntry, MaterialNames};
pub use property::{Property, PropertyKind};
pub use registry::{RawBlock, RawState, RegistrySnapshot};
pub use state::StateLayout;
pub use types::{Identifier, MaterialDescriptor, RawDomain, RawProperty, RawValue, StateFlags};
