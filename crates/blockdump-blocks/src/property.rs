//! Property model: validated, closed set of property kinds.

use serde::Serialize;

use crate::error::ExtractError;
use crate::types::{RawDomain, RawProperty, RawValue};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Property {
    pub name: String,
    #[serde(flatten)]
    pub kind: PropertyKind,
}

/// Domain of a property. Order of `Enum::values` is the registry's and is
/// part of the property's identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PropertyKind {
    /// Domain `[true, false]`.
    Bool,
    /// Domain `min, min + 1, ..., max`.
    Int { min: i32, max: i32 },
    Enum {
        #[serde(rename = "enumType")]
        enum_type: String,
        values: Vec<String>,
    },
}

impl Property {
    /// Validates a raw descriptor. Int domains must be contiguous and
    /// ascending, bool domains exactly `[true, false]`; the index arithmetic
    /// in [`crate::state`] depends on it.
    pub fn classify(block: &str, raw: &RawProperty) -> Result<Property, ExtractError> {
        let fail = |reason: String| ExtractError::DomainOrder {
            block: block.to_string(),
            property: raw.name.clone(),
            reason,
        };
        if raw.domain.is_empty() {
            return Err(fail("empty domain".into()));
        }
        let kind = match &raw.domain {
            RawDomain::Bool { values } => {
                if values[..] != [true, false] {
                    return Err(fail(format!("expected [true, false], got {values:?}")));
                }
                PropertyKind::Bool
            }
            RawDomain::Int { values } => {
                let min = values[0];
                for (i, &v) in values.iter().enumerate() {
                    if i64::from(v) != i64::from(min) + i as i64 {
                        return Err(fail(format!("expected ascending run from {min}, got {values:?}")));
                    }
                }
                PropertyKind::Int {
                    min,
                    max: values[values.len() - 1],
                }
            }
            RawDomain::Enum { enum_type, values } => {
                for (i, v) in values.iter().enumerate() {
                    if values[..i].contains(v) {
                        return Err(fail(format!("duplicate value \"{v}\"")));
                    }
                }
                PropertyKind::Enum {
                    enum_type: enum_type.clone(),
                    values: values.clone(),
                }
            }
        };
        Ok(Property {
            name: raw.name.clone(),
            kind,
        })
    }

    pub fn domain_len(&self) -> usize {
        match &self.kind {
            PropertyKind::Bool => 2,
            PropertyKind::Int { min, max } => (i64::from(*max) - i64::from(*min) + 1) as usize,
            PropertyKind::Enum { values, .. } => values.len(),
        }
    }

    /// Position of `value` in the ordered domain.
    pub fn value_index(&self, value: &RawValue) -> Option<usize> {
        match (&self.kind, value) {
            (PropertyKind::Bool, RawValue::Bool(b)) => Some(if *b { 0 } else { 1 }),
            (PropertyKind::Int { min, max }, RawValue::Int(v)) if (*min..=*max).contains(v) => {
                Some((i64::from(*v) - i64::from(*min)) as usize)
            }
            (PropertyKind::Enum { values, .. }, RawValue::Str(s)) => {
                values.iter().position(|x| x == s)
            }
            _ => None,
        }
    }

    pub fn value_at(&self, index: usize) -> Option<RawValue> {
        if index >= self.domain_len() {
            return None;
        }
        match &self.kind {
            PropertyKind::Bool => Some(RawValue::Bool(index == 0)),
            PropertyKind::Int { min, .. } => Some(RawValue::Int(min + index as i32)),
            PropertyKind::Enum { values, .. } => Some(RawValue::Str(values[index].clone())),
        }
    }
}
