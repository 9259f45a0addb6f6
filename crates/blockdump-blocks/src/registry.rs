//! Read-only registry snapshot handed to the extractor.
//!
//! In production the snapshot is loaded from the TOML file the game-side
//! dumper writes; tests build [`RegistrySnapshot`] values directly.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use blockdump_geom::Aabb;

use crate::config::{BlockDef, RegistryConfig, StateAttrsDef};
use crate::error::{ExtractError, LoadError};
use crate::types::{Identifier, MaterialDescriptor, RawProperty, RawValue};

#[derive(Clone, Debug, Default)]
pub struct RegistrySnapshot {
    pub version: String,
    pub world_version: i32,
    pub materials: HashMap<String, MaterialDescriptor>,
    /// Registry enumeration order.
    pub blocks: Vec<RawBlock>,
}

#[derive(Clone, Debug)]
pub struct RawBlock {
    pub id: Identifier,
    pub material: String,
    pub properties: Vec<RawProperty>,
    pub default: HashMap<String, RawValue>,
    /// Concrete states, in whatever order the registry yields them.
    pub states: Vec<RawState>,
}

/// One concrete state and the engine's answers to the per-state queries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawState {
    pub values: HashMap<String, RawValue>,
    pub opaque: bool,
    pub translucent: bool,
    pub full_cube: bool,
    pub sided_transparency: bool,
    pub random_ticks: bool,
    pub emits_power: bool,
    pub has_fluid: bool,
    pub dynamic_bounds: bool,
    pub luminance: u8,
    pub opacity: u8,
    pub culling_shape: Vec<Aabb>,
}

impl RawState {
    fn from_attrs(values: HashMap<String, RawValue>, a: &StateAttrsDef) -> RawState {
        RawState {
            values,
            opaque: a.opaque.unwrap_or(false),
            translucent: a.translucent.unwrap_or(false),
            full_cube: a.full_cube.unwrap_or(false),
            sided_transparency: a.sided_transparency.unwrap_or(false),
            random_ticks: a.random_ticks.unwrap_or(false),
            emits_power: a.emits_power.unwrap_or(false),
            has_fluid: a.has_fluid.unwrap_or(false),
            dynamic_bounds: a.dynamic_bounds.unwrap_or(false),
            luminance: a.luminance.unwrap_or(0),
            opacity: a.opacity.unwrap_or(0),
            culling_shape: a
                .culling_shape
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|c| Aabb::from_array(*c))
                .collect(),
        }
    }
}

impl RawBlock {
    /// Block whose every state is a copy of `template` with its own values.
    pub fn uniform(
        id: &str,
        material: &str,
        properties: Vec<RawProperty>,
        default: HashMap<String, RawValue>,
        template: &RawState,
    ) -> RawBlock {
        let states = cartesian_values(&properties)
            .into_iter()
            .map(|values| RawState {
                values,
                ..template.clone()
            })
            .collect();
        RawBlock {
            id: Identifier::parse(id),
            material: material.to_string(),
            properties,
            default,
            states,
        }
    }
}

/// Every assignment of the raw domains, first property varying fastest.
fn cartesian_values(properties: &[RawProperty]) -> Vec<HashMap<String, RawValue>> {
    let mut out = vec![HashMap::new()];
    for p in properties {
        let n = p.domain.len();
        let mut next = Vec::with_capacity(out.len() * n);
        for i in 0..n {
            for partial in &out {
                let mut m = partial.clone();
                if let Some(v) = p.domain.value_at(i) {
                    m.insert(p.name.clone(), v);
                }
                next.push(m);
            }
        }
        out = next;
    }
    out
}

impl RegistrySnapshot {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, LoadError> {
        let cfg: RegistryConfig = toml::from_str(toml_str).map_err(|source| LoadError::Parse {
            what: "registry snapshot".into(),
            source,
        })?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: RegistryConfig) -> Result<Self, LoadError> {
        let mut blocks = Vec::with_capacity(cfg.blocks.len());
        for def in cfg.blocks {
            blocks.push(compile_block(def)?);
        }
        log::debug!(
            "registry {} (world {}): {} blocks, {} materials",
            cfg.version,
            cfg.world_version,
            blocks.len(),
            cfg.materials.len()
        );
        Ok(RegistrySnapshot {
            version: cfg.version,
            world_version: cfg.world_version,
            materials: cfg.materials,
            blocks,
        })
    }
}

fn compile_block(def: BlockDef) -> Result<RawBlock, LoadError> {
    let id = Identifier::parse(&def.id);
    if id.path.is_empty() || id.namespace.is_empty() {
        return Err(LoadError::InvalidBlock {
            block: def.id,
            reason: "identifier must be `namespace:path` or a bare path".into(),
        });
    }
    for (i, p) in def.properties.iter().enumerate() {
        if def.properties[..i].iter().any(|q| q.name == p.name) {
            return Err(LoadError::InvalidBlock {
                block: def.id,
                reason: format!("property `{}` declared twice", p.name),
            });
        }
    }
    if def
        .properties
        .iter()
        .try_fold(1usize, |n, p| n.checked_mul(p.domain.len()))
        .is_none()
    {
        return Err(ExtractError::StateSpaceOverflow { block: def.id }.into());
    }
    let states = if def.states.is_empty() {
        cartesian_values(&def.properties)
            .into_iter()
            .map(|values| RawState::from_attrs(values, &def.base))
            .collect()
    } else {
        def.states
            .iter()
            .map(|s| RawState::from_attrs(s.values.clone(), &s.attrs.or(&def.base)))
            .collect()
    };
    Ok(RawBlock {
        id,
        material: def.material,
        properties: def.properties,
        default: def.default,
        states,
    })
}
