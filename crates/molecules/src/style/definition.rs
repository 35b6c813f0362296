//! Style definitions: the per-widget unit stored in the style table.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::slot::StyleSlot;
use crate::theme::Theme;

/// Slot name to slot style.
pub type Slots = BTreeMap<String, StyleSlot>;

/// Function producing slots from the active theme.
pub type ThemedSlots = dyn Fn(&Theme) -> Slots + Send + Sync;

/// A widget's complete style: one [`StyleSlot`] per named slot.
///
/// Definitions are either static, or derived from the theme. Themed
/// definitions are evaluated against the current theme snapshot each time
/// they are resolved, so a theme change is picked up on the next render.
///
/// # Example
///
/// ```rust
/// use molecules::style::{properties, StyleDefinition, StyleSlot};
/// use molecules::Theme;
///
/// let fixed = StyleDefinition::new()
///     .slot("root", StyleSlot::new().with("padding", 16));
///
/// let themed = StyleDefinition::themed(|theme: &Theme| {
///     let mut slots = molecules::style::Slots::new();
///     slots.insert(
///         "root".into(),
///         StyleSlot::new().with("backgroundColor", theme.color("surface").unwrap_or("white")),
///     );
///     slots
/// });
///
/// assert!(!fixed.is_themed());
/// assert!(themed.is_themed());
/// ```
#[derive(Clone)]
pub enum StyleDefinition {
    /// Slots that do not depend on the theme.
    Static(Slots),
    /// Slots computed from the theme at resolution time.
    Themed(Arc<ThemedSlots>),
}

impl StyleDefinition {
    /// Creates an empty static definition.
    pub fn new() -> Self {
        StyleDefinition::Static(Slots::new())
    }

    /// Creates a static definition from slots.
    pub fn from_slots(slots: Slots) -> Self {
        StyleDefinition::Static(slots)
    }

    /// Creates a theme-derived definition.
    pub fn themed<F>(f: F) -> Self
    where
        F: Fn(&Theme) -> Slots + Send + Sync + 'static,
    {
        StyleDefinition::Themed(Arc::new(f))
    }

    /// Adds a slot to a static definition, returning it for chaining.
    ///
    /// On a themed definition the slot is layered on top of whatever the
    /// theme function produces, replacing a slot of the same name.
    pub fn slot(self, name: &str, slot: StyleSlot) -> Self {
        match self {
            StyleDefinition::Static(mut slots) => {
                slots.insert(name.to_string(), slot);
                StyleDefinition::Static(slots)
            }
            StyleDefinition::Themed(f) => {
                let name = name.to_string();
                StyleDefinition::themed(move |theme| {
                    let mut slots = f(theme);
                    slots.insert(name.clone(), slot.clone());
                    slots
                })
            }
        }
    }

    /// Returns true if this definition depends on the theme.
    pub fn is_themed(&self) -> bool {
        matches!(self, StyleDefinition::Themed(_))
    }

    /// Returns the slots of a static definition without evaluating anything.
    pub fn static_slots(&self) -> Option<&Slots> {
        match self {
            StyleDefinition::Static(slots) => Some(slots),
            StyleDefinition::Themed(_) => None,
        }
    }

    /// Produces the slots for the given theme snapshot.
    ///
    /// Static definitions are borrowed; themed ones are computed.
    pub fn evaluate(&self, theme: &Theme) -> Cow<'_, Slots> {
        match self {
            StyleDefinition::Static(slots) => Cow::Borrowed(slots),
            StyleDefinition::Themed(f) => Cow::Owned(f(theme)),
        }
    }
}

impl Default for StyleDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StyleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleDefinition::Static(slots) => f.debug_tuple("Static").field(slots).finish(),
            StyleDefinition::Themed(_) => f.write_str("Themed(..)"),
        }
    }
}

impl From<Slots> for StyleDefinition {
    fn from(slots: Slots) -> Self {
        StyleDefinition::Static(slots)
    }
}

impl Serialize for StyleDefinition {
    /// Themed definitions are serialized as evaluated against the default theme.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.evaluate(&Theme::default()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StyleDefinition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Slots::deserialize(deserializer).map(StyleDefinition::Static)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ColorMode;

    #[test]
    fn test_static_evaluate_borrows() {
        let def = StyleDefinition::new().slot("root", StyleSlot::new().with("margin", 4));
        let theme = Theme::default();
        assert!(matches!(def.evaluate(&theme), Cow::Borrowed(_)));
        assert!(def.static_slots().unwrap().contains_key("root"));
    }

    #[test]
    fn test_themed_evaluate_uses_theme() {
        let def = StyleDefinition::themed(|theme| {
            let mut slots = Slots::new();
            slots.insert(
                "root".into(),
                StyleSlot::new().with("mode", theme.mode.as_str()),
            );
            slots
        });

        let light = def.evaluate(&Theme::light());
        let dark = def.evaluate(&Theme::dark());
        assert_eq!(light["root"].base["mode"].as_text(), Some(ColorMode::Light.as_str()));
        assert_eq!(dark["root"].base["mode"].as_text(), Some(ColorMode::Dark.as_str()));
    }

    #[test]
    fn test_slot_on_themed_layers_on_top() {
        let def = StyleDefinition::themed(|_| {
            let mut slots = Slots::new();
            slots.insert("root".into(), StyleSlot::new().with("a", 1));
            slots.insert("label".into(), StyleSlot::new().with("b", 2));
            slots
        })
        .slot("root", StyleSlot::new().with("c", 3));

        let slots = def.evaluate(&Theme::default());
        assert!(slots["root"].base.contains_key("c"));
        assert!(!slots["root"].base.contains_key("a"));
        assert!(slots["label"].base.contains_key("b"));
    }

    #[test]
    fn test_deserialize_static() {
        let def: StyleDefinition =
            serde_yaml::from_str("root:\n  color: red\nlabel:\n  fontSize: 14\n").unwrap();
        let slots = def.static_slots().unwrap();
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn test_debug_themed() {
        let def = StyleDefinition::themed(|_| Slots::new());
        assert_eq!(format!("{:?}", def), "Themed(..)");
    }
}
