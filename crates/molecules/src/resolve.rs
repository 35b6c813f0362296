//! Style variant resolution.
//!
//! Flattens a [`StyleDefinition`] and a [`VariantSelection`] into concrete
//! properties per slot. For every slot:
//!
//! 1. Start from the slot's base properties.
//! 2. For each `(axis, value)` in the selection, in selection order, merge the
//!    slot's overrides for that axis value on top, property by property.
//! 3. Axes or values the slot does not declare contribute nothing.
//!
//! When two active axes set the same property, the axis later in the
//! selection wins. Slots without a variant table are copied as-is without
//! consulting the selection.
//!
//! [`resolve`] is a pure function of its inputs. [`StyleResolver`] adds a
//! bounded memo cache on top for widgets that re-render often with the same
//! inputs.

use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ResolverConfig;
use crate::style::{PropertyMap, StyleDefinition, StyleSlot};
use crate::theme::Theme;
use crate::variant::VariantSelection;

/// Concrete properties for each slot of a widget, for one render.
///
/// # Example
///
/// ```rust
/// use molecules::style::{properties, StyleDefinition, StyleSlot};
/// use molecules::{resolve, Theme, VariantSelection};
///
/// let def = StyleDefinition::new().slot(
///     "root",
///     StyleSlot::new()
///         .with("color", "red")
///         .variant("state", "disabled", properties([("opacity", 0.5)])),
/// );
///
/// let idle = resolve(&def, &VariantSelection::new(), &Theme::default());
/// assert_eq!(idle.slot("root").unwrap().len(), 1);
///
/// let disabled = resolve(&def, &VariantSelection::new().with("state", "disabled"), &Theme::default());
/// assert_eq!(disabled.slot("root").unwrap()["opacity"].as_number(), Some(0.5));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedStyle {
    slots: BTreeMap<String, PropertyMap>,
}

impl ResolvedStyle {
    /// Returns the properties of one slot.
    pub fn slot(&self, name: &str) -> Option<&PropertyMap> {
        self.slots.get(name)
    }

    /// Iterates over `(slot, properties)` in slot name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyMap)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Consumes the result, returning the slot map.
    pub fn into_slots(self) -> BTreeMap<String, PropertyMap> {
        self.slots
    }
}

/// Resolves one slot against a selection.
pub fn resolve_slot(slot: &StyleSlot, selection: &VariantSelection) -> PropertyMap {
    if !slot.has_variants() {
        return slot.base.clone();
    }
    let mut resolved = slot.base.clone();
    for (axis, value) in selection.iter() {
        if let Some(overrides) = slot.overrides(axis, value) {
            resolved.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }
    resolved
}

/// Resolves every slot of a definition.
///
/// Themed definitions are evaluated against `theme` first.
pub fn resolve(
    definition: &StyleDefinition,
    selection: &VariantSelection,
    theme: &Theme,
) -> ResolvedStyle {
    let slots = definition
        .evaluate(theme)
        .iter()
        .map(|(name, slot)| (name.clone(), resolve_slot(slot, selection)))
        .collect();
    ResolvedStyle { slots }
}

/// Resolves only the named slots; unknown slot names are skipped.
pub fn resolve_slots<'a, I>(
    definition: &StyleDefinition,
    slots: I,
    selection: &VariantSelection,
    theme: &Theme,
) -> ResolvedStyle
where
    I: IntoIterator<Item = &'a str>,
{
    let evaluated = definition.evaluate(theme);
    let slots = slots
        .into_iter()
        .filter_map(|name| {
            evaluated
                .get(name)
                .map(|slot| (name.to_string(), resolve_slot(slot, selection)))
        })
        .collect();
    ResolvedStyle { slots }
}

/// Memo key: definition and theme by identity, selection by value.
///
/// The key owns the `Arc`s it compares by address, so an address cannot be
/// reused by another value while the entry is cached.
struct CacheKey {
    definition: Arc<StyleDefinition>,
    theme: Arc<Theme>,
    selection: VariantSelection,
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.definition, &other.definition)
            && Arc::ptr_eq(&self.theme, &other.theme)
            && self.selection == other.selection
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.definition).hash(state);
        Arc::as_ptr(&self.theme).hash(state);
        self.selection.hash(state);
    }
}

/// Memoizing front end to [`resolve`].
///
/// Keeps recently resolved styles keyed on (definition, theme snapshot,
/// selection). Definitions and themes are compared by `Arc` identity, which
/// is exactly what the registry and [`ThemeContext`](crate::ThemeContext)
/// hand out: a new override or a new theme snapshot is a new `Arc` and misses
/// the cache.
///
/// When the cache reaches its capacity it is cleared. A capacity of zero
/// disables memoization entirely.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use molecules::style::{StyleDefinition, StyleSlot};
/// use molecules::{StyleResolver, Theme, VariantSelection};
///
/// let def = Arc::new(StyleDefinition::new().slot("root", StyleSlot::new().with("margin", 8)));
/// let theme = Arc::new(Theme::light());
/// let mut resolver = StyleResolver::new();
///
/// let first = resolver.resolve(&def, &VariantSelection::new(), &theme);
/// let second = resolver.resolve(&def, &VariantSelection::new(), &theme);
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
pub struct StyleResolver {
    cache: HashMap<CacheKey, Arc<ResolvedStyle>>,
    capacity: usize,
}

impl StyleResolver {
    /// Creates a resolver with the default cache capacity.
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::default())
    }

    pub fn with_config(config: ResolverConfig) -> Self {
        Self {
            cache: HashMap::new(),
            capacity: config.cache_capacity,
        }
    }

    /// Resolves `definition`, reusing a cached result for identical inputs.
    pub fn resolve(
        &mut self,
        definition: &Arc<StyleDefinition>,
        selection: &VariantSelection,
        theme: &Arc<Theme>,
    ) -> Arc<ResolvedStyle> {
        if self.capacity == 0 {
            return Arc::new(resolve(definition, selection, theme));
        }

        let key = CacheKey {
            definition: Arc::clone(definition),
            theme: Arc::clone(theme),
            selection: selection.clone(),
        };
        if let Some(hit) = self.cache.get(&key) {
            return Arc::clone(hit);
        }

        if self.cache.len() >= self.capacity {
            tracing::debug!(entries = self.cache.len(), "style resolver cache full; clearing");
            self.cache.clear();
        }
        let resolved = Arc::new(resolve(definition, selection, theme));
        self.cache.insert(key, Arc::clone(&resolved));
        resolved
    }

    /// Number of cached resolutions.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Drops every cached resolution, e.g. after hot-reloading overrides.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StyleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleResolver")
            .field("cached", &self.cache.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
