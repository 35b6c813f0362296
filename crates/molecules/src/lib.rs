//! # Molecules - component and style overrides for Material 3 widgets
//!
//! Every widget in the library looks up two things by name before it renders:
//! the implementation to render and the style definition to resolve. Both
//! come from a [`Registry`], falling back to the widget's built-in default
//! when the host has not overridden that name.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use molecules::style::{properties, StyleDefinition, StyleSlot};
//! use molecules::{resolve, Registry, Theme, VariantSelection};
//!
//! let default = Arc::new(StyleDefinition::new().slot(
//!     "root",
//!     StyleSlot::new()
//!         .with("padding", 16)
//!         .variant("variant", "outlined", properties([("borderWidth", 1)])),
//! ));
//!
//! let mut registry = Registry::new();
//! registry
//!     .register_styles(
//!         "Card",
//!         StyleDefinition::new().slot("root", StyleSlot::new().with("padding", 24)),
//!     )
//!     .unwrap();
//!
//! let styles = registry.styles_with_fallback("Card", default);
//! let resolved = resolve(&styles, &VariantSelection::new(), &Theme::light());
//! assert_eq!(resolved.slot("root").unwrap()["padding"].as_number(), Some(24.0));
//! ```
//!
//! ## Core Concepts
//!
//! - [`Registry`]: component and style override tables keyed by
//!   [`ComponentName`]. Lookups never fail; registration follows the
//!   configured [`RegistrationPolicy`].
//! - [`style::StyleDefinition`]: named slots, each with base properties and
//!   per-axis variant overrides. Definitions may be derived from a [`Theme`].
//! - [`VariantSelection`]: the ordered axis/value choices a widget resolves
//!   with. When two axes set the same property, the later axis wins.
//! - [`resolve()`]: merges base properties with the selected overrides.
//!   [`StyleResolver`] memoizes the result per definition, selection and theme.
//! - [`ThemeContext`]: the current theme and the subscribers that re-resolve
//!   when it changes.
//! - [`stylesheet`]: loads overrides from YAML or JSON files.
//! - [`catalog`]: the built-in definitions of the library's own widgets.

pub mod catalog;
pub mod config;
pub mod name;
pub mod registry;
pub mod resolve;
pub mod style;
pub mod stylesheet;
pub mod theme;
pub mod variant;

pub use config::{ConfigError, RegistrationPolicy, RegistryConfig, ResolverConfig};
pub use name::ComponentName;
pub use registry::global::{
    get_component_with_fallback, get_styles_with_fallback, register_components, register_styles,
};
pub use registry::{implementation, ComponentImpl, Registry, RegistryError, RegistryTable, TableKind};
pub use resolve::{resolve, resolve_slot, resolve_slots, ResolvedStyle, StyleResolver};
pub use stylesheet::{parse_stylesheet, walk_stylesheet_dir, StylesheetError, StylesheetSet};
pub use theme::{
    detect_color_mode, set_theme_detector, AdaptiveTheme, ColorMode, SubscriptionId, Theme,
    ThemeContext, ThemeSource,
};
pub use variant::{
    InteractionState, ParseSelectionError, VariantSelection, COLOR_SCHEME_AXIS, STATE_AXIS,
};
