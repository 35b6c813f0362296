//! Built-in default styles for the library's widgets.
//!
//! Each widget resolves its style through the registry with its catalog
//! entry as the fallback, so a host override for the same name replaces it
//! and every other widget keeps its default:
//!
//! ```rust
//! use molecules::{catalog, Registry};
//!
//! let registry = Registry::new();
//! let styles = catalog::styles_for(&registry, catalog::CARD_HEADER);
//! assert!(styles.is_themed());
//! ```
//!
//! Composite widgets register one entry per part (`Card_Header`,
//! `Card_Media`, ...) so each part is independently overridable.

use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::registry::Registry;
use crate::style::{properties, PropertyValue, Slots, StyleDefinition, StyleSlot};
use crate::theme::Theme;
use crate::variant::STATE_AXIS;

pub const AVATAR: &str = "Avatar";
pub const CARD: &str = "Card";
pub const CARD_HEADER: &str = "Card_Header";
pub const CARD_MEDIA: &str = "Card_Media";
pub const CARD_CONTENT: &str = "Card_Content";
pub const CARD_ACTIONS: &str = "Card_Actions";
pub const SWITCH: &str = "Switch";

static CATALOG: Lazy<BTreeMap<&'static str, Arc<StyleDefinition>>> = Lazy::new(|| {
    BTreeMap::from([
        (AVATAR, Arc::new(avatar())),
        (CARD, Arc::new(card())),
        (CARD_HEADER, Arc::new(card_header())),
        (CARD_MEDIA, Arc::new(card_media())),
        (CARD_CONTENT, Arc::new(card_content())),
        (CARD_ACTIONS, Arc::new(card_actions())),
        (SWITCH, Arc::new(switch())),
    ])
});

/// Returns the built-in definition for a widget name.
pub fn default_styles(name: &str) -> Option<Arc<StyleDefinition>> {
    CATALOG.get(name).cloned()
}

/// Names of every widget with a built-in definition, sorted.
pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.keys().copied()
}

/// Returns the style a widget should resolve: the registered override, else
/// the built-in default, else an empty definition.
pub fn styles_for(registry: &Registry, name: &str) -> Arc<StyleDefinition> {
    let fallback = default_styles(name).unwrap_or_default();
    registry.styles_with_fallback(name, fallback)
}

fn color(theme: &Theme, token: &str) -> PropertyValue {
    theme.color(token).into()
}

fn space(theme: &Theme, token: &str) -> PropertyValue {
    theme.space(token).into()
}

fn slots<const N: usize>(entries: [(&str, StyleSlot); N]) -> Slots {
    entries
        .into_iter()
        .map(|(name, slot)| (name.to_string(), slot))
        .collect()
}

fn avatar() -> StyleDefinition {
    StyleDefinition::themed(|theme| {
        slots([
            (
                "root",
                StyleSlot::new()
                    .with("width", 40)
                    .with("height", 40)
                    .with("borderRadius", 20)
                    .with("backgroundColor", color(theme, "primaryContainer"))
                    .variant(
                        "size",
                        "sm",
                        properties([("width", 24), ("height", 24), ("borderRadius", 12)]),
                    )
                    .variant(
                        "size",
                        "lg",
                        properties([("width", 56), ("height", 56), ("borderRadius", 28)]),
                    ),
            ),
            (
                "label",
                StyleSlot::new()
                    .with("color", color(theme, "onPrimaryContainer"))
                    .with("fontSize", 16)
                    .with("fontWeight", 500)
                    .variant("size", "sm", properties([("fontSize", 11)]))
                    .variant("size", "lg", properties([("fontSize", 22)])),
            ),
        ])
    })
}

fn card() -> StyleDefinition {
    StyleDefinition::themed(|theme| {
        slots([(
            "root",
            StyleSlot::new()
                .with("borderRadius", 12)
                .with("overflow", "hidden")
                .with("backgroundColor", color(theme, "surfaceContainerLow"))
                .with("elevation", 1)
                .variant(
                    "variant",
                    "filled",
                    properties([
                        ("backgroundColor", color(theme, "surfaceContainerHighest")),
                        ("elevation", 0.into()),
                    ]),
                )
                .variant(
                    "variant",
                    "outlined",
                    properties([
                        ("backgroundColor", color(theme, "surface")),
                        ("borderColor", color(theme, "outlineVariant")),
                        ("borderWidth", 1.into()),
                        ("elevation", 0.into()),
                    ]),
                )
                .variant(STATE_AXIS, "pressed", properties([("elevation", 2)]))
                .variant(STATE_AXIS, "disabled", properties([("opacity", 0.38)])),
        )])
    })
}

fn card_header() -> StyleDefinition {
    StyleDefinition::themed(|theme| {
        slots([
            (
                "root",
                StyleSlot::new()
                    .with("flexDirection", "row")
                    .with("alignItems", "center")
                    .with("padding", space(theme, "lg"))
                    .with("gap", space(theme, "lg")),
            ),
            (
                "title",
                StyleSlot::new()
                    .with("color", color(theme, "onSurface"))
                    .with("fontSize", 16)
                    .with("fontWeight", 500),
            ),
            (
                "subtitle",
                StyleSlot::new()
                    .with("color", color(theme, "onSurfaceVariant"))
                    .with("fontSize", 14),
            ),
        ])
    })
}

fn card_media() -> StyleDefinition {
    StyleDefinition::new().slot(
        "image",
        StyleSlot::new()
            .with("width", "100%")
            .with("height", 188)
            .variant("size", "compact", properties([("height", 120)])),
    )
}

fn card_content() -> StyleDefinition {
    StyleDefinition::themed(|theme| {
        slots([(
            "root",
            StyleSlot::new()
                .with("paddingHorizontal", space(theme, "lg"))
                .with("paddingVertical", space(theme, "sm"))
                .with("color", color(theme, "onSurfaceVariant")),
        )])
    })
}

fn card_actions() -> StyleDefinition {
    StyleDefinition::themed(|theme| {
        slots([(
            "root",
            StyleSlot::new()
                .with("flexDirection", "row")
                .with("justifyContent", "flex-end")
                .with("padding", space(theme, "sm"))
                .with("gap", space(theme, "sm")),
        )])
    })
}

fn switch() -> StyleDefinition {
    StyleDefinition::themed(|theme| {
        slots([
            (
                "track",
                StyleSlot::new()
                    .with("width", 52)
                    .with("height", 32)
                    .with("borderRadius", 16)
                    .with("borderWidth", 2)
                    .with("backgroundColor", color(theme, "surfaceContainerHighest"))
                    .with("borderColor", color(theme, "outline"))
                    .variant(
                        "checked",
                        "true",
                        properties([
                            ("backgroundColor", color(theme, "primary")),
                            ("borderColor", color(theme, "primary")),
                        ]),
                    )
                    .variant(STATE_AXIS, "disabled", properties([("opacity", 0.38)])),
            ),
            (
                "thumb",
                StyleSlot::new()
                    .with("width", 16)
                    .with("height", 16)
                    .with("borderRadius", 8)
                    .with("backgroundColor", color(theme, "outline"))
                    .variant(
                        "checked",
                        "true",
                        properties([
                            ("width", 24.into()),
                            ("height", 24.into()),
                            ("borderRadius", 12.into()),
                            ("backgroundColor", color(theme, "onPrimary")),
                        ]),
                    )
                    .variant(STATE_AXIS, "pressed", properties([("width", 28), ("height", 28)])),
            ),
        ])
    })
}
