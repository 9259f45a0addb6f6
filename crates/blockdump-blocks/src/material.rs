use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, LoadError};
use crate::types::MaterialDescriptor;

/// Hand-maintained engine material key -> exported name table.
/// Order here is the order of the exported material list.
const BUILTIN_NAMES: &[(&str, &str)] = &[
    ("AIR", "air"),
    ("STRUCTURE_VOID", "structural_air"),
    ("PORTAL", "portal"),
    ("CARPET", "carpet"),
    ("PLANT", "plant"),
    ("UNDERWATER_PLANT", "water_plant"),
    ("REPLACEABLE_PLANT", "replaceable_plant"),
    ("NETHER_SHOOTS", "replaceable_fireproof_plant"),
    ("REPLACEABLE_UNDERWATER_PLANT", "replaceable_water_plant"),
    ("WATER", "water"),
    ("BUBBLE_COLUMN", "bubble_column"),
    ("LAVA", "lava"),
    ("SNOW_LAYER", "snow_layer"),
    ("FIRE", "fire"),
    ("DECORATION", "decoration"),
    ("COBWEB", "cobweb"),
    ("REDSTONE_LAMP", "redstone_lamp"),
    ("ORGANIC_PRODUCT", "clay"),
    ("SOIL", "dirt"),
    ("SOLID_ORGANIC", "grass"),
    ("DENSE_ICE", "dense_ice"),
    ("AGGREGATE", "sand"),
    ("SPONGE", "sponge"),
    ("SHULKER_BOX", "shulker_box"),
    ("WOOD", "wood"),
    ("NETHER_WOOD", "nether_wood"),
    ("BAMBOO_SAPLING", "bamboo_sapling"),
    ("BAMBOO", "bamboo"),
    ("WOOL", "wool"),
    ("TNT", "tnt"),
    ("LEAVES", "leaves"),
    ("GLASS", "glass"),
    ("ICE", "ice"),
    ("CACTUS", "cactus"),
    ("STONE", "stone"),
    ("METAL", "metal"),
    ("SNOW_BLOCK", "snow_block"),
    ("REPAIR_STATION", "repair_station"),
    ("BARRIER", "barrier"),
    ("PISTON", "piston"),
    ("MOSS_BLOCK", "coral"),
    ("GOURD", "vegetable"),
    ("EGG", "egg"),
    ("CAKE", "cake"),
    ("AMETHYST", "amethyst"),
    ("POWDER_SNOW", "powder_snow"),
    ("SCULK", "sculk"),
];

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MaterialName {
    pub key: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaterialNames {
    pub entries: Vec<MaterialName>,
}

#[derive(Deserialize)]
struct MaterialNamesConfig {
    materials: Vec<MaterialName>,
}

impl MaterialNames {
    pub fn builtin() -> Self {
        MaterialNames {
            entries: BUILTIN_NAMES
                .iter()
                .map(|&(key, name)| MaterialName {
                    key: key.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, LoadError> {
        let cfg: MaterialNamesConfig = toml::from_str(toml_str).map_err(|source| LoadError::Parse {
            what: "material names".into(),
            source,
        })?;
        Ok(MaterialNames {
            entries: cfg.materials,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MaterialEntry {
    #[serde(skip)]
    pub key: String,
    pub name: String,
    pub attribs: u8,
    #[serde(rename = "mapColor")]
    pub map_color: u8,
}

/// Immutable material catalog, built once before extraction.
#[derive(Default, Clone, Debug)]
pub struct MaterialCatalog {
    entries: Vec<MaterialEntry>,
    by_key: HashMap<String, usize>,
}

impl MaterialCatalog {
    /// Joins the name table with the registry's material descriptors. Names
    /// the registry does not define are left out; duplicate keys keep the
    /// first name.
    pub fn build(names: &MaterialNames, descriptors: &HashMap<String, MaterialDescriptor>) -> Self {
        let mut catalog = MaterialCatalog::default();
        for n in &names.entries {
            if catalog.by_key.contains_key(&n.key) {
                log::warn!("material {} named twice; keeping the first name", n.key);
                continue;
            }
            let Some(desc) = descriptors.get(&n.key) else {
                log::debug!("material {} not defined by the registry; skipped", n.key);
                continue;
            };
            catalog.by_key.insert(n.key.clone(), catalog.entries.len());
            catalog.entries.push(MaterialEntry {
                key: n.key.clone(),
                name: n.name.clone(),
                attribs: desc.attribs(),
                map_color: desc.map_color,
            });
        }
        catalog
    }

    pub fn get(&self, key: &str) -> Option<&MaterialEntry> {
        self.by_key.get(key).map(|&i| &self.entries[i])
    }

    /// Lookup that fails the run on a material nobody named.
    pub fn resolve(&self, block: &str, key: &str) -> Result<&MaterialEntry, ExtractError> {
        self.get(key).ok_or_else(|| ExtractError::UnknownMaterial {
            block: block.to_string(),
            material: key.to_string(),
        })
    }

    pub fn entries(&self) -> &[MaterialEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptors() -> HashMap<String, MaterialDescriptor> {
        HashMap::from([
            (
                "STONE".to_string(),
                MaterialDescriptor {
                    blocks_movement: true,
                    blocks_light: true,
                    solid: true,
                    map_color: 11,
                    ..Default::default()
                },
            ),
            ("AIR".to_string(), MaterialDescriptor::default()),
        ])
    }

    #[test]
    fn builtin_catalog_follows_name_table_order() {
        let cat = MaterialCatalog::build(&MaterialNames::builtin(), &descriptors());
        let names: Vec<&str> = cat.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["air", "stone"]);
        let stone = cat.get("STONE").unwrap();
        assert_eq!(stone.attribs, 0b10_1001);
        assert_eq!(stone.map_color, 11);
    }

    #[test]
    fn unknown_material_fails() {
        let cat = MaterialCatalog::build(&MaterialNames::builtin(), &descriptors());
        let err = cat.resolve("minecraft:glass", "GLASS").unwrap_err();
        assert!(matches!(err, ExtractError::UnknownMaterial { ref material, .. } if material == "GLASS"));
    }

    #[test]
    fn names_from_toml() {
        let names = MaterialNames::from_toml_str(
            r#"
            [[materials]]
            key = "STONE"
            name = "rock"

            [[materials]]
            key = "STONE"
            name = "ignored"
            "#,
        )
        .unwrap();
        let cat = MaterialCatalog::build(&names, &descriptors());
        assert_eq!(cat.len(), 1);
        assert_eq!(cat.get("STONE").unwrap().name, "rock");
        assert!(cat.get("AIR").is_none());
    }
}
