//! Canonical state indexing.
//!
//! A state's index is the mixed-radix number whose digits are the value
//! positions of each property, with the first declared property as the least
//! significant digit:
//!
//! ```text
//! index = sum(value_index(p_i) * radix_i),  radix_i = product(size_j for j < i)
//! ```
//!
//! Clients decode indices with the same formula, so this mapping must not change.

use crate::error::ExtractError;
use crate::property::Property;
use crate::types::RawValue;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateField {
    pub property: Property,
    pub size: usize,
    pub radix: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateLayout {
    fields: Vec<StateField>,
    num_states: usize,
}

impl StateLayout {
    pub fn new(block: &str, properties: &[Property]) -> Result<Self, ExtractError> {
        let mut radix: usize = 1;
        let mut fields = Vec::with_capacity(properties.len());
        for p in properties {
            let size = p.domain_len();
            fields.push(StateField {
                property: p.clone(),
                size,
                radix,
            });
            radix = radix
                .checked_mul(size)
                .ok_or_else(|| ExtractError::StateSpaceOverflow {
                    block: block.to_string(),
                })?;
        }
        Ok(StateLayout {
            fields,
            num_states: radix,
        })
    }

    /// Product of all domain sizes; 1 for a block without properties.
    #[inline]
    pub fn num_states(&self) -> usize {
        self.num_states
    }

    #[inline]
    pub fn fields(&self) -> &[StateField] {
        &self.fields
    }

    /// `value_indices[i]` must be a valid position in the domain of property `i`.
    pub fn encode(&self, value_indices: &[usize]) -> usize {
        debug_assert_eq!(value_indices.len(), self.fields.len());
        self.fields
            .iter()
            .zip(value_indices)
            .map(|(f, &v)| {
                debug_assert!(v < f.size);
                v * f.radix
            })
            .sum()
    }

    pub fn decode(&self, index: usize) -> Vec<usize> {
        debug_assert!(index < self.num_states);
        self.fields
            .iter()
            .map(|f| (index / f.radix) % f.size)
            .collect()
    }

    /// Property values of the state at `index`, in declaration order.
    pub fn values_at(&self, index: usize) -> Vec<RawValue> {
        self.fields
            .iter()
            .zip(self.decode(index))
            .filter_map(|(f, v)| f.property.value_at(v))
            .collect()
    }

    /// Index of a raw assignment. `lookup` returns the value a state reports
    /// for a property name.
    pub fn index_of<'v>(
        &self,
        block: &str,
        lookup: impl Fn(&str) -> Option<&'v RawValue>,
    ) -> Result<usize, ExtractError> {
        let mut index = 0;
        for f in &self.fields {
            let name = f.property.name.as_str();
            let value = lookup(name).ok_or_else(|| ExtractError::MissingValue {
                block: block.to_string(),
                property: name.to_string(),
            })?;
            let v = f
                .property
                .value_index(value)
                .ok_or_else(|| ExtractError::ValueNotInDomain {
                    block: block.to_string(),
                    property: name.to_string(),
                    value: value.clone(),
                })?;
            index += v * f.radix;
        }
        Ok(index)
    }

    /// All value-index assignments in ascending state index order.
    pub fn iter(&self) -> impl Iterator<Item = Vec<usize>> + '_ {
        (0..self.num_states).map(|i| self.decode(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawProperty;
    use std::collections::HashMap;

    fn props(raw: &[RawProperty]) -> Vec<Property> {
        raw.iter()
            .map(|r| Property::classify("test", r).unwrap())
            .collect()
    }

    #[test]
    fn powered_facing_example() {
        let p = props(&[
            RawProperty::bool("powered"),
            RawProperty::enumeration("facing", "Direction", &["north", "east", "south"]),
        ]);
        let layout = StateLayout::new("lever", &p).unwrap();
        assert_eq!(layout.num_states(), 6);
        assert_eq!(layout.fields()[0].radix, 1);
        assert_eq!(layout.fields()[1].radix, 2);

        let values: HashMap<&str, RawValue> =
            HashMap::from([("powered", false.into()), ("facing", "south".into())]);
        let idx = layout.index_of("lever", |n| values.get(n)).unwrap();
        assert_eq!(idx, 5);
        assert_eq!(layout.decode(5), vec![1, 2]);
        assert_eq!(
            layout.values_at(5),
            vec![RawValue::Bool(false), RawValue::from("south")]
        );
    }

    #[test]
    fn no_properties_has_one_state() {
        let layout = StateLayout::new("stone", &[]).unwrap();
        assert_eq!(layout.num_states(), 1);
        assert_eq!(layout.index_of("stone", |_| None).unwrap(), 0);
        assert_eq!(layout.iter().collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn out_of_domain_value_is_reported() {
        let p = props(&[RawProperty::int("age", 0, 3)]);
        let layout = StateLayout::new("wheat", &p).unwrap();
        let bad = RawValue::Int(4);
        let err = layout.index_of("wheat", |_| Some(&bad)).unwrap_err();
        assert!(matches!(err, ExtractError::ValueNotInDomain { .. }));
    }

    #[test]
    fn missing_value_is_reported() {
        let p = props(&[RawProperty::bool("lit")]);
        let layout = StateLayout::new("lamp", &p).unwrap();
        let err = layout.index_of("lamp", |_| None).unwrap_err();
        assert!(matches!(err, ExtractError::MissingValue { ref property, .. } if property == "lit"));
    }

    #[test]
    fn oversized_state_space_is_rejected() {
        let raw: Vec<RawProperty> = (0..17)
            .map(|i| RawProperty::int(&format!("level{i}"), 0, 15))
            .collect();
        let err = StateLayout::new("huge", &props(&raw)).unwrap_err();
        assert!(matches!(err, ExtractError::StateSpaceOverflow { ref block } if block == "huge"));
    }
}
