//! Canonicalization and compaction of a registry snapshot into block records.
#![forbid(unsafe_code)]

pub mod dedup;
pub mod extractor;
pub mod merge;
pub mod record;
pub mod shapes;
pub mod snapshot;

pub use dedup::{Channel, dedup};
pub use extractor::{ExtractOptions, Extractor};
pub use merge::{AliasResolver, MergeOutcome};
pub use record::{BlockRecord, PreparedBlock, StateChannels, build_record, prepare_block};
pub use shapes::{Shape, ShapeTable};
pub use snapshot::Snapshot;
