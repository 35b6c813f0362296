//! A single name-keyed override table.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::error::{RegistryError, TableKind};
use crate::config::RegistrationPolicy;
use crate::name::ComponentName;

/// Mapping from [`ComponentName`] to an override value.
///
/// Values are held as `Arc<V>`: the registry shares them with whoever
/// registered them and with every caller that looks them up.
///
/// # Resolution
///
/// [`lookup_with_fallback`](Self::lookup_with_fallback) returns the value
/// registered under a name, or the caller's fallback when there is none. It
/// never fails and never mutates the table. A later registration has no
/// effect on values already looked up.
///
/// # Duplicates
///
/// Under [`RegistrationPolicy::LastWriterWins`] a later registration replaces
/// the earlier one. Under [`RegistrationPolicy::RejectDuplicates`] replacing
/// a *different* value (by `Arc` identity) is refused.
pub struct RegistryTable<V: ?Sized> {
    kind: TableKind,
    policy: RegistrationPolicy,
    entries: HashMap<ComponentName, Arc<V>>,
}

impl<V: ?Sized> RegistryTable<V> {
    /// Creates an empty table.
    pub fn new(kind: TableKind, policy: RegistrationPolicy) -> Self {
        Self {
            kind,
            policy,
            entries: HashMap::new(),
        }
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn policy(&self) -> RegistrationPolicy {
        self.policy
    }

    /// Inserts or replaces `value` under `name`.
    ///
    /// Repeating an identical call is a no-op.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidName`] if `name` is not a valid component name
    /// - [`RegistryError::Duplicate`] if the table rejects duplicates and a
    ///   different value is already registered under `name`
    pub fn register(&mut self, name: &str, value: Arc<V>) -> Result<(), RegistryError> {
        let name = ComponentName::new(name)?;
        self.check_duplicate(&name, &value)?;
        self.insert(name, value);
        Ok(())
    }

    /// Registers every entry in iteration order.
    ///
    /// Equivalent to calling [`register`](Self::register) for each pair, so
    /// a name appearing twice ends up with its later value. The batch is
    /// validated before anything is inserted: on error the table is left
    /// untouched.
    pub fn register_batch<I, N>(&mut self, entries: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = (N, Arc<V>)>,
        N: AsRef<str>,
    {
        let mut validated: Vec<(ComponentName, Arc<V>)> = Vec::new();
        for (name, value) in entries {
            let name = ComponentName::new(name.as_ref())?;
            self.check_duplicate(&name, &value)?;
            if self.policy == RegistrationPolicy::RejectDuplicates {
                let clash = validated
                    .iter()
                    .any(|(n, v)| *n == name && !Arc::ptr_eq(v, &value));
                if clash {
                    return Err(self.duplicate(&name));
                }
            }
            validated.push((name, value));
        }

        for (name, value) in validated {
            self.insert(name, value);
        }
        Ok(())
    }

    /// Returns the value registered under `name`, or `fallback`.
    pub fn lookup_with_fallback(&self, name: &str, fallback: Arc<V>) -> Arc<V> {
        match self.entries.get(name) {
            Some(value) => {
                tracing::trace!(table = %self.kind, name, "override hit");
                Arc::clone(value)
            }
            None => fallback,
        }
    }

    /// Returns the value registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Arc<V>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Removes an override so `name` falls back to its default again.
    pub fn remove(&mut self, name: &str) -> Option<Arc<V>> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the registered names in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(ComponentName::as_str)
    }

    /// Clears all overrides from the table.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn check_duplicate(&self, name: &ComponentName, value: &Arc<V>) -> Result<(), RegistryError> {
        if self.policy != RegistrationPolicy::RejectDuplicates {
            return Ok(());
        }
        match self.entries.get(name) {
            Some(existing) if !Arc::ptr_eq(existing, value) => Err(self.duplicate(name)),
            _ => Ok(()),
        }
    }

    fn duplicate(&self, name: &ComponentName) -> RegistryError {
        RegistryError::Duplicate {
            table: self.kind,
            name: name.to_string(),
        }
    }

    fn insert(&mut self, name: ComponentName, value: Arc<V>) {
        match self.entries.insert(name.clone(), value) {
            Some(previous) if !Arc::ptr_eq(&previous, &self.entries[&name]) => {
                tracing::warn!(
                    table = %self.kind,
                    name = %name,
                    "override replaced a different value registered under the same name"
                );
            }
            Some(_) => {}
            None => tracing::debug!(table = %self.kind, name = %name, "registered override"),
        }
    }
}

impl<V: ?Sized> fmt::Debug for RegistryTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("RegistryTable")
            .field("kind", &self.kind)
            .field("policy", &self.policy)
            .field("names", &names)
            .finish()
    }
}
