use std::fmt;

use serde::Deserialize;

pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Namespaced registry identifier (`namespace:path`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub namespace: String,
    pub path: String,
}

impl Identifier {
    /// A bare path lands in [`DEFAULT_NAMESPACE`].
    pub fn parse(s: &str) -> Identifier {
        match s.split_once(':') {
            Some((ns, path)) => Identifier {
                namespace: ns.to_string(),
                path: path.to_string(),
            },
            None => Identifier {
                namespace: DEFAULT_NAMESPACE.to_string(),
                path: s.to_string(),
            },
        }
    }

    /// Name written to the snapshot: the bare path for the default namespace,
    /// the full identifier otherwise.
    pub fn alias(&self) -> String {
        if self.namespace == DEFAULT_NAMESPACE {
            self.path.clone()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

/// A property value as reported by the registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Int(i32),
    Str(String),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Bool(b) => write!(f, "{b}"),
            RawValue::Int(i) => write!(f, "{i}"),
            RawValue::Str(s) => write!(f, "\"{s}\""),
        }
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Bool(v)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Int(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Str(v.to_string())
    }
}

/// Declared value domain, in registry order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawDomain {
    Bool { values: Vec<bool> },
    Int { values: Vec<i32> },
    Enum { enum_type: String, values: Vec<String> },
}

impl RawDomain {
    pub fn len(&self) -> usize {
        match self {
            RawDomain::Bool { values } => values.len(),
            RawDomain::Int { values } => values.len(),
            RawDomain::Enum { values, .. } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn value_at(&self, i: usize) -> Option<RawValue> {
        match self {
            RawDomain::Bool { values } => values.get(i).copied().map(RawValue::Bool),
            RawDomain::Int { values } => values.get(i).copied().map(RawValue::Int),
            RawDomain::Enum { values, .. } => values.get(i).map(|s| RawValue::Str(s.clone())),
        }
    }
}

/// Property descriptor straight from the registry, before validation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RawProperty {
    pub name: String,
    #[serde(flatten)]
    pub domain: RawDomain,
}

impl RawProperty {
    pub fn bool(name: &str) -> Self {
        RawProperty {
            name: name.to_string(),
            domain: RawDomain::Bool {
                values: vec![true, false],
            },
        }
    }

    pub fn int(name: &str, min: i32, max: i32) -> Self {
        RawProperty {
            name: name.to_string(),
            domain: RawDomain::Int {
                values: (min..=max).collect(),
            },
        }
    }

    pub fn enumeration(name: &str, enum_type: &str, values: &[&str]) -> Self {
        RawProperty {
            name: name.to_string(),
            domain: RawDomain::Enum {
                enum_type: enum_type.to_string(),
                values: values.iter().map(|s| s.to_string()).collect(),
            },
        }
    }
}

/// Engine-side material description. The catalog derives the exported
/// attribute bitmask from it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MaterialDescriptor {
    pub blocks_movement: bool,
    pub burnable: bool,
    pub liquid: bool,
    pub blocks_light: bool,
    pub replaceable: bool,
    pub solid: bool,
    pub map_color: u8,
}

impl MaterialDescriptor {
    pub const BLOCKS_MOVEMENT: u8 = 1 << 0;
    pub const BURNABLE: u8 = 1 << 1;
    pub const LIQUID: u8 = 1 << 2;
    pub const BLOCKS_LIGHT: u8 = 1 << 3;
    pub const REPLACEABLE: u8 = 1 << 4;
    pub const SOLID: u8 = 1 << 5;

    pub fn attribs(&self) -> u8 {
        let mut a = 0;
        if self.blocks_movement {
            a |= Self::BLOCKS_MOVEMENT;
        }
        if self.burnable {
            a |= Self::BURNABLE;
        }
        if self.liquid {
            a |= Self::LIQUID;
        }
        if self.blocks_light {
            a |= Self::BLOCKS_LIGHT;
        }
        if self.replaceable {
            a |= Self::REPLACEABLE;
        }
        if self.solid {
            a |= Self::SOLID;
        }
        a
    }
}

/// Per-state predicate bits. The layout is append-only: new predicates take
/// the next free bit so existing bits keep their meaning across versions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StateFlags(pub u8);

impl StateFlags {
    pub const OPAQUE: u8 = 1 << 0;
    pub const TRANSLUCENT: u8 = 1 << 1;
    pub const FULL_CUBE: u8 = 1 << 2;
    pub const SIDED_TRANSPARENCY: u8 = 1 << 3;
    pub const RANDOM_TICKS: u8 = 1 << 4;
    pub const EMITS_POWER: u8 = 1 << 5;
    pub const HAS_FLUID: u8 = 1 << 6;
    pub const DYNAMIC_BOUNDS: u8 = 1 << 7;

    #[inline]
    pub fn set(&mut self, bit: u8, on: bool) {
        if on {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }
}
