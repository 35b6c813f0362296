//! Process-wide default registry.
//!
//! Widget modules that cannot be handed a [`Registry`] call these free
//! functions instead. They forward to a single lazily created registry
//! guarded by a read-mostly lock: registration takes the write lock,
//! lookups share the read lock.
//!
//! Hosts install overrides once during start-up, before the first render:
//!
//! ```rust
//! use std::sync::Arc;
//! use molecules::registry::global;
//! use molecules::style::{StyleDefinition, StyleSlot};
//!
//! global::register_styles(
//!     "DocsBanner",
//!     StyleDefinition::new().slot("root", StyleSlot::new().with("padding", 24)),
//! )
//! .unwrap();
//!
//! let styles = global::get_styles_with_fallback("DocsBanner", Arc::new(StyleDefinition::new()));
//! assert!(styles.static_slots().unwrap().contains_key("root"));
//! ```

use std::any::Any;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::Lazy;

use super::{ComponentImpl, Registry, RegistryError};
use crate::style::StyleDefinition;

static GLOBAL_REGISTRY: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::new()));

fn read() -> RwLockReadGuard<'static, Registry> {
    GLOBAL_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, Registry> {
    GLOBAL_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Returns the implementation registered for `name`, or `default`.
///
/// See [`Registry::component_with_fallback`].
pub fn get_component_with_fallback<T>(name: &str, default: Arc<T>) -> Arc<T>
where
    T: Any + Send + Sync,
{
    read().component_with_fallback(name, default)
}

/// Returns the style definition registered for `name`, or `default`.
///
/// See [`Registry::styles_with_fallback`].
pub fn get_styles_with_fallback(
    name: &str,
    default: Arc<StyleDefinition>,
) -> Arc<StyleDefinition> {
    read().styles_with_fallback(name, default)
}

/// Registers a style override in the process-wide registry.
pub fn register_styles(
    name: &str,
    styles: impl Into<Arc<StyleDefinition>>,
) -> Result<(), RegistryError> {
    write().register_styles(name, styles)
}

/// Registers component overrides in the process-wide registry.
pub fn register_components<I, N>(components: I) -> Result<(), RegistryError>
where
    I: IntoIterator<Item = (N, Arc<ComponentImpl>)>,
    N: AsRef<str>,
{
    write().register_components(components)
}

/// Replaces the process-wide registry, returning the previous one.
///
/// Lets a host install a registry it configured (e.g. with
/// [`RegistrationPolicy::RejectDuplicates`](crate::RegistrationPolicy::RejectDuplicates))
/// and lets tests start from a clean slate.
pub fn install(registry: Registry) -> Registry {
    std::mem::replace(&mut *write(), registry)
}

/// Runs `f` with shared access to the process-wide registry.
pub fn with_registry<R>(f: impl FnOnce(&Registry) -> R) -> R {
    f(&read())
}

/// Runs `f` with exclusive access to the process-wide registry.
pub fn with_registry_mut<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    f(&mut write())
}
