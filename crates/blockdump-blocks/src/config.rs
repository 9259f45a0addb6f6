use serde::Deserialize;
use std::collections::HashMap;

use crate::types::{MaterialDescriptor, RawProperty, RawValue};

/// Top-level registry snapshot file, written by the game-side dumper.
#[derive(Deserialize, Debug)]
pub struct RegistryConfig {
    pub version: String,
    pub world_version: i32,
    #[serde(default)]
    pub materials: HashMap<String, MaterialDescriptor>,
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    /// Namespaced identifier; a bare path means `minecraft:`
    pub id: String,
    /// Engine material key, resolved through the material catalog
    pub material: String,
    #[serde(default)]
    pub properties: Vec<RawProperty>,
    /// Property assignment of the block's default state
    #[serde(default)]
    pub default: HashMap<String, RawValue>,

    /// Attributes shared by every state unless a state overrides them
    #[serde(default)]
    pub base: StateAttrsDef,

    /// Concrete states in any order. When empty, the full cartesian product of
    /// the declared domains is synthesized from `base`.
    #[serde(default)]
    pub states: Vec<StateDef>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct StateAttrsDef {
    #[serde(default)]
    pub opaque: Option<bool>,
    #[serde(default)]
    pub translucent: Option<bool>,
    #[serde(default)]
    pub full_cube: Option<bool>,
    #[serde(default)]
    pub sided_transparency: Option<bool>,
    #[serde(default)]
    pub random_ticks: Option<bool>,
    #[serde(default)]
    pub emits_power: Option<bool>,
    #[serde(default)]
    pub has_fluid: Option<bool>,
    #[serde(default)]
    pub dynamic_bounds: Option<bool>,
    #[serde(default)]
    pub luminance: Option<u8>,
    #[serde(default)]
    pub opacity: Option<u8>,
    /// Boxes in block units: [min_x, min_y, min_z, max_x, max_y, max_z]
    #[serde(default)]
    pub culling_shape: Option<Vec<[f64; 6]>>,
}

impl StateAttrsDef {
    /// Fields set on `self` win over `base`.
    pub fn or(&self, base: &StateAttrsDef) -> StateAttrsDef {
        StateAttrsDef {
            opaque: self.opaque.or(base.opaque),
            translucent: self.translucent.or(base.translucent),
            full_cube: self.full_cube.or(base.full_cube),
            sided_transparency: self.sided_transparency.or(base.sided_transparency),
            random_ticks: self.random_ticks.or(base.random_ticks),
            emits_power: self.emits_power.or(base.emits_power),
            has_fluid: self.has_fluid.or(base.has_fluid),
            dynamic_bounds: self.dynamic_bounds.or(base.dynamic_bounds),
            luminance: self.luminance.or(base.luminance),
            opacity: self.opacity.or(base.opacity),
            culling_shape: self
                .culling_shape
                .clone()
                .or_else(|| base.culling_shape.clone()),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct StateDef {
    #[serde(default)]
    pub values: HashMap<String, RawValue>,
    #[serde(flatten)]
    pub attrs: StateAttrsDef,
}
