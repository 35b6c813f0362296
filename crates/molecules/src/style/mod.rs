//! Style definitions for overridable widgets.
//!
//! This module provides the data a widget hands to the registry as its
//! default style, and that hosts hand over as overrides:
//!
//! - [`PropertyValue`] / [`PropertyMap`]: flat style properties
//! - [`StyleSlot`]: base properties plus a per-axis variant table
//! - [`StyleDefinition`]: the slots of one widget, static or theme-derived
//!
//! Turning a definition into concrete properties for one render is the job
//! of [`crate::resolve`].

mod definition;
mod slot;
mod value;

pub use definition::{Slots, StyleDefinition, ThemedSlots};
pub use slot::{StyleSlot, VariantTable};
pub use value::{properties, PropertyMap, PropertyValue};
