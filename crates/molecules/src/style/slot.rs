//! Style slots: a base style plus its variant table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::value::{PropertyMap, PropertyValue};

/// Variant overrides keyed by axis name, then by value name.
///
/// `variants["state"]["disabled"]` holds the properties merged on top of the
/// base when the `state` axis is set to `disabled`.
pub type VariantTable = BTreeMap<String, BTreeMap<String, PropertyMap>>;

/// The style of one named slot of a widget (`root`, `label`, `icon`, ...).
///
/// In stylesheet documents a slot is written as a flat mapping whose keys are
/// base properties, with an optional `variants` key holding the variant table:
///
/// ```yaml
/// root:
///   color: red
///   variants:
///     state:
///       disabled: { opacity: 0.5 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSlot {
    /// Properties applied regardless of the active variants.
    #[serde(flatten)]
    pub base: PropertyMap,
    /// Per-axis overrides; empty for static slots.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variants: VariantTable,
}

impl StyleSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a static slot from base properties.
    pub fn from_base(base: PropertyMap) -> Self {
        Self {
            base,
            variants: VariantTable::new(),
        }
    }

    /// Sets a base property, returning the slot for chaining.
    pub fn with(mut self, property: &str, value: impl Into<PropertyValue>) -> Self {
        self.base.insert(property.to_string(), value.into());
        self
    }

    /// Adds (or extends) the overrides for `axis` = `value`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use molecules::style::{properties, StyleSlot};
    ///
    /// let slot = StyleSlot::new()
    ///     .with("color", "red")
    ///     .variant("state", "disabled", properties([("opacity", 0.5)]));
    /// assert!(slot.has_variants());
    /// ```
    pub fn variant(mut self, axis: &str, value: &str, overrides: PropertyMap) -> Self {
        self.variants
            .entry(axis.to_string())
            .or_default()
            .entry(value.to_string())
            .or_default()
            .extend(overrides);
        self
    }

    /// Returns true if any variant overrides are declared.
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Looks up the overrides for one axis value.
    pub fn overrides(&self, axis: &str, value: &str) -> Option<&PropertyMap> {
        self.variants.get(axis)?.get(value)
    }

    /// Applies `f` to every property value, base and variants alike.
    pub(crate) fn map_values<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&PropertyValue) -> PropertyValue,
    {
        let mut map = |props: &PropertyMap| -> PropertyMap {
            props.iter().map(|(k, v)| (k.clone(), f(v))).collect()
        };
        let base = map(&self.base);
        let variants = self
            .variants
            .iter()
            .map(|(axis, values)| {
                let values = values
                    .iter()
                    .map(|(value, props)| (value.clone(), map(props)))
                    .collect();
                (axis.clone(), values)
            })
            .collect();
        Self { base, variants }
    }

    /// Iterates over every property value, base and variants alike.
    pub(crate) fn values(&self) -> impl Iterator<Item = &PropertyValue> {
        self.base.values().chain(
            self.variants
                .values()
                .flat_map(|values| values.values())
                .flat_map(|props| props.values()),
        )
    }
}
