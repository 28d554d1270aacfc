//! Layer merge logic.
//!
//! Layers merge left-to-right with last-write-wins semantics. A colliding
//! key is replaced wholesale; values are never combined.

use std::collections::BTreeMap;

use super::Layer;

/// A merged variable along with the layer it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedVar {
    pub value: String,
    pub origin: String,
}

/// Merge layers in order (first is base, last has highest precedence).
pub fn merge_layers(layers: &[Layer]) -> BTreeMap<String, MergedVar> {
    let mut merged: BTreeMap<String, MergedVar> = BTreeMap::new();
    for layer in layers {
        for (key, value) in &layer.vars {
            merged.insert(
                key.clone(),
                MergedVar {
                    value: value.clone(),
                    origin: layer.name.clone(),
                },
            );
        }
    }
    merged
}
