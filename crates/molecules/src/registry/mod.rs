//! Component and style override registry.
//!
//! This module provides [`Registry`], the two override tables every widget
//! consults, and the name-scoped accessors widgets call:
//!
//! | Accessor | Table | Returns |
//! |----------|-------|---------|
//! | [`Registry::component_with_fallback`] | components | the implementation to render |
//! | [`Registry::styles_with_fallback`] | styles | the style definition to resolve |
//! | [`Registry::register_components`] | components | - |
//! | [`Registry::register_styles`] | styles | - |
//!
//! # Design
//!
//! The registry is an ordinary value. Hosts construct one, install their
//! overrides during start-up, and hand it (by reference) to the widget tree.
//! Tests build isolated registries. For code that cannot thread a registry
//! through, [`global`] wraps a process-wide instance behind the same API.
//!
//! Lookups are pure reads and never fail: an unregistered name resolves to
//! the default the widget passes in. Overrides are read per access, so a
//! registration made after a widget looked up its implementation does not
//! affect that widget.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use molecules::{implementation, Registry};
//!
//! type CardFn = fn(&str) -> String;
//!
//! fn default_card(title: &str) -> String { format!("[{}]", title) }
//! fn custom_card(title: &str) -> String { format!("<{}>", title) }
//!
//! let mut registry = Registry::new();
//! let card = registry.component_with_fallback("Card", Arc::new(default_card as CardFn));
//! assert_eq!(card("x"), "[x]");
//!
//! registry
//!     .register_components([("Card", implementation(custom_card as CardFn))])
//!     .unwrap();
//! let card = registry.component_with_fallback("Card", Arc::new(default_card as CardFn));
//! assert_eq!(card("x"), "<x>");
//! ```

mod error;
pub mod global;
mod table;

use std::any::Any;
use std::sync::Arc;

pub use error::{RegistryError, TableKind};
pub use table::RegistryTable;

use crate::config::RegistryConfig;
use crate::style::StyleDefinition;

/// Type-erased component implementation stored in the components table.
pub type ComponentImpl = dyn Any + Send + Sync;

/// Wraps a component implementation for registration.
pub fn implementation<T: Any + Send + Sync>(value: T) -> Arc<ComponentImpl> {
    Arc::new(value)
}

/// The two override tables: component implementations and style definitions.
#[derive(Debug)]
pub struct Registry {
    components: RegistryTable<ComponentImpl>,
    styles: RegistryTable<StyleDefinition>,
    config: RegistryConfig,
}

impl Registry {
    /// Creates an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry with an explicit configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            components: RegistryTable::new(TableKind::Components, config.policy),
            styles: RegistryTable::new(TableKind::Styles, config.policy),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The component implementation table.
    pub fn components(&self) -> &RegistryTable<ComponentImpl> {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut RegistryTable<ComponentImpl> {
        &mut self.components
    }

    /// The style definition table.
    pub fn styles(&self) -> &RegistryTable<StyleDefinition> {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut RegistryTable<StyleDefinition> {
        &mut self.styles
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Returns the implementation registered for `name`, or `default`.
    ///
    /// An override registered with a different concrete type than `T` cannot
    /// be rendered in place of the default; it is ignored with a warning and
    /// `default` is returned.
    pub fn component_with_fallback<T>(&self, name: &str, default: Arc<T>) -> Arc<T>
    where
        T: Any + Send + Sync,
    {
        let Some(registered) = self.components.get(name) else {
            return default;
        };
        match Arc::clone(registered).downcast::<T>() {
            Ok(component) => component,
            Err(_) => {
                tracing::warn!(
                    name,
                    expected = std::any::type_name::<T>(),
                    "component override has the wrong type; using the default"
                );
                default
            }
        }
    }

    /// Registers one component implementation override.
    pub fn register_component<T>(&mut self, name: &str, component: T) -> Result<(), RegistryError>
    where
        T: Any + Send + Sync,
    {
        self.components.register(name, implementation(component))
    }

    /// Registers several component overrides at once, in iteration order.
    ///
    /// Build values with [`implementation`]. Re-registering an `Arc` that is
    /// already registered is a no-op even under
    /// [`RegistrationPolicy::RejectDuplicates`](crate::RegistrationPolicy::RejectDuplicates).
    pub fn register_components<I, N>(&mut self, components: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = (N, Arc<ComponentImpl>)>,
        N: AsRef<str>,
    {
        self.components.register_batch(components)
    }

    // =========================================================================
    // Styles
    // =========================================================================

    /// Returns the style definition registered for `name`, or `default`.
    ///
    /// The result has the same type whether or not an override is active,
    /// so callers resolve it the same way in both cases.
    pub fn styles_with_fallback(
        &self,
        name: &str,
        default: Arc<StyleDefinition>,
    ) -> Arc<StyleDefinition> {
        self.styles.lookup_with_fallback(name, default)
    }

    /// Registers a style override for `name`.
    ///
    /// Composite widgets use this to make each of their parts
    /// independently overridable, e.g. `Card_Header` and `Card_Media`.
    pub fn register_styles(
        &mut self,
        name: &str,
        styles: impl Into<Arc<StyleDefinition>>,
    ) -> Result<(), RegistryError> {
        self.styles.register(name, styles.into())
    }

    /// Registers several style overrides at once, in iteration order.
    pub fn register_styles_batch<I, N>(&mut self, styles: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = (N, Arc<StyleDefinition>)>,
        N: AsRef<str>,
    {
        self.styles.register_batch(styles)
    }

    /// Removes every override from both tables.
    pub fn clear(&mut self) {
        self.components.clear();
        self.styles.clear();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistrationPolicy;
    use crate::style::StyleSlot;

    #[derive(Debug, PartialEq)]
    struct Widget(&'static str);

    #[test]
    fn test_component_fallback_when_unregistered() {
        let registry = Registry::new();
        let default = Arc::new(Widget("default"));
        let got = registry.component_with_fallback("Card", Arc::clone(&default));
        assert!(Arc::ptr_eq(&got, &default));
    }

    #[test]
    fn test_component_override() {
        let mut registry = Registry::new();
        registry.register_component("Card", Widget("custom")).unwrap();

        let got = registry.component_with_fallback("Card", Arc::new(Widget("default")));
        assert_eq!(*got, Widget("custom"));
    }

    #[test]
    fn test_component_override_wrong_type_falls_back() {
        let mut registry = Registry::new();
        registry.register_component("Card", 42_u32).unwrap();

        let got = registry.component_with_fallback("Card", Arc::new(Widget("default")));
        assert_eq!(*got, Widget("default"));
    }

    #[test]
    fn test_register_components_batch() {
        let mut registry = Registry::new();
        registry
            .register_components([
                ("Card", implementation(Widget("v1"))),
                ("Card", implementation(Widget("v2"))),
                ("Avatar", implementation(Widget("avatar"))),
            ])
            .unwrap();

        let card = registry.component_with_fallback("Card", Arc::new(Widget("default")));
        assert_eq!(*card, Widget("v2"));
        assert_eq!(registry.components().len(), 2);
    }

    #[test]
    fn test_styles_fallback_and_override() {
        let mut registry = Registry::new();
        let default = Arc::new(StyleDefinition::new().slot("root", StyleSlot::new().with("a", 1)));

        let got = registry.styles_with_fallback("Card_Header", Arc::clone(&default));
        assert!(Arc::ptr_eq(&got, &default));

        registry
            .register_styles(
                "Card_Header",
                StyleDefinition::new().slot("root", StyleSlot::new().with("a", 2)),
            )
            .unwrap();
        let got = registry.styles_with_fallback("Card_Header", default);
        assert_eq!(
            got.static_slots().unwrap()["root"].base["a"].as_number(),
            Some(2.0)
        );
    }

    #[test]
    fn test_resolution_is_per_access() {
        let mut registry = Registry::new();
        let before = registry.component_with_fallback("Card", Arc::new(Widget("default")));
        registry.register_component("Card", Widget("late")).unwrap();

        assert_eq!(*before, Widget("default"));
        let after = registry.component_with_fallback("Card", Arc::new(Widget("default")));
        assert_eq!(*after, Widget("late"));
    }

    #[test]
    fn test_policy_applies_to_both_tables() {
        let mut registry = Registry::with_config(
            RegistryConfig::default().with_policy(RegistrationPolicy::RejectDuplicates),
        );
        registry.register_component("Card", Widget("a")).unwrap();
        assert!(registry.register_component("Card", Widget("b")).is_err());

        registry.register_styles("Card", StyleDefinition::new()).unwrap();
        let err = registry
            .register_styles("Card", StyleDefinition::new())
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::Duplicate {
                table: TableKind::Styles,
                name: "Card".into()
            }
        );
    }

    #[test]
    fn test_tables_are_independent() {
        let mut registry = Registry::new();
        registry.register_component("Card", Widget("custom")).unwrap();
        assert!(registry.styles().is_empty());

        registry.clear();
        assert!(registry.components().is_empty());
    }
}
