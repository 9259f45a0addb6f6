use blockdump_blocks::MaterialEntry;
use serde::Serialize;

use crate::record::BlockRecord;

/// The extracted document, ready for serialization.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: String,
    pub world_version: i32,
    /// Sum of `num_states` over every registry entry, merged aliases included.
    pub num_block_states: usize,
    pub blocks: Vec<BlockRecord>,
    pub materials: Vec<MaterialEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shapes: Option<Vec<Vec<i32>>>,
}
