//! Block record assembly.
//!
//! Building is split in two: [`prepare_block`] is pure and may run on any
//! thread, [`PreparedBlock::into_record`] touches the run's shape table and
//! must be called in registry order.

use blockdump_blocks::registry::{RawBlock, RawState};
use blockdump_blocks::{ExtractError, MaterialCatalog, Property, StateFlags, StateLayout};
use serde::Serialize;

use crate::dedup::{Channel, dedup};
use crate::shapes::{Shape, ShapeTable};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    /// Aliases in discovery order; never empty.
    pub names: Vec<String>,
    pub num_states: usize,
    pub default_state_id: usize,
    /// Catalog name of the block's material.
    pub material: String,
    pub properties: Vec<Property>,
    pub states: StateChannels,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateChannels {
    pub flags: Channel<u8>,
    /// `luminance << 4 | opacity`
    pub light: Channel<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occlusion_shapes: Option<Channel<u32>>,
}

impl BlockRecord {
    /// Equal in everything but the alias list.
    pub fn same_structure(&self, other: &BlockRecord) -> bool {
        self.default_state_id == other.default_state_id
            && self.num_states == other.num_states
            && self.material == other.material
            && self.properties == other.properties
            && self.states == other.states
    }
}

/// Per-state data in state index order, before shape interning.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedBlock {
    pub alias: String,
    pub num_states: usize,
    pub default_state_id: usize,
    pub material: String,
    pub properties: Vec<Property>,
    pub flags: Vec<u8>,
    pub light: Vec<u8>,
    pub shapes: Vec<Shape>,
}

fn state_flags(s: &RawState) -> StateFlags {
    let mut f = StateFlags::default();
    f.set(StateFlags::OPAQUE, s.opaque);
    f.set(StateFlags::TRANSLUCENT, s.translucent);
    f.set(StateFlags::FULL_CUBE, s.full_cube);
    f.set(StateFlags::SIDED_TRANSPARENCY, s.sided_transparency);
    f.set(StateFlags::RANDOM_TICKS, s.random_ticks);
    f.set(StateFlags::EMITS_POWER, s.emits_power);
    f.set(StateFlags::HAS_FLUID, s.has_fluid);
    f.set(StateFlags::DYNAMIC_BOUNDS, s.dynamic_bounds);
    f
}

fn packed_light(block: &str, s: &RawState) -> Result<u8, ExtractError> {
    if s.luminance > 15 || s.opacity > 15 {
        return Err(ExtractError::LightOutOfRange {
            block: block.to_string(),
            luminance: s.luminance,
            opacity: s.opacity,
        });
    }
    Ok(s.luminance << 4 | s.opacity)
}

pub fn prepare_block(
    block: &RawBlock,
    catalog: &MaterialCatalog,
) -> Result<PreparedBlock, ExtractError> {
    let name = block.id.to_string();
    let properties = block
        .properties
        .iter()
        .map(|p| Property::classify(&name, p))
        .collect::<Result<Vec<_>, _>>()?;
    let layout = StateLayout::new(&name, &properties)?;
    let num_states = layout.num_states();

    if block.states.len() != num_states {
        return Err(ExtractError::StateCountMismatch {
            block: name,
            expected: num_states,
            found: block.states.len(),
        });
    }
    let mut ordered: Vec<Option<&RawState>> = vec![None; num_states];
    for s in &block.states {
        let index = layout.index_of(&name, |p| s.values.get(p))?;
        if ordered[index].replace(s).is_some() {
            return Err(ExtractError::DuplicateState { block: name, index });
        }
    }

    let mut flags = Vec::with_capacity(num_states);
    let mut light = Vec::with_capacity(num_states);
    let mut shapes = Vec::with_capacity(num_states);
    // Equal counts and no duplicates means every slot is filled
    for s in ordered.into_iter().flatten() {
        flags.push(state_flags(s).bits());
        light.push(packed_light(&name, s)?);
        shapes.push(Shape::from_boxes(&s.culling_shape));
    }

    let default_state_id = layout.index_of(&name, |p| block.default.get(p))?;
    let material = catalog.resolve(&name, &block.material)?.name.clone();

    Ok(PreparedBlock {
        alias: block.id.alias(),
        num_states,
        default_state_id,
        material,
        properties,
        flags,
        light,
        shapes,
    })
}

impl PreparedBlock {
    /// Interns this block's shapes (state index order) when `shapes` is given
    /// and deduplicates every channel.
    pub fn into_record(self, shapes: Option<&mut ShapeTable>) -> BlockRecord {
        let occlusion_shapes = shapes.map(|table| {
            let ids = self.shapes.into_iter().map(|s| table.intern(s)).collect();
            dedup(ids)
        });
        BlockRecord {
            names: vec![self.alias],
            num_states: self.num_states,
            default_state_id: self.default_state_id,
            material: self.material,
            properties: self.properties,
            states: StateChannels {
                flags: dedup(self.flags),
                light: dedup(self.light),
                occlusion_shapes,
            },
        }
    }
}

pub fn build_record(
    block: &RawBlock,
    catalog: &MaterialCatalog,
    shapes: Option<&mut ShapeTable>,
) -> Result<BlockRecord, ExtractError> {
    Ok(prepare_block(block, catalog)?.into_record(shapes))
}
