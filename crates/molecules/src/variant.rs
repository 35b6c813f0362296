//! Variant selections: the active axis values for one render.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::theme::{ColorMode, Theme};

/// Axis keyed on the interaction state (`enabled`, `hovered`, `disabled`, ...).
pub const STATE_AXIS: &str = "state";

/// Axis keyed on the theme's color mode (`light` or `dark`).
pub const COLOR_SCHEME_AXIS: &str = "colorScheme";

bitflags! {
    /// Interaction flags a widget tracks between renders.
    ///
    /// Several flags may be set at once; [`InteractionState::state_value`]
    /// picks the one that wins on the `state` axis.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InteractionState: u8 {
        const HOVERED  = 1 << 0;
        const PRESSED  = 1 << 1;
        const FOCUSED  = 1 << 2;
        const DISABLED = 1 << 3;
        const SELECTED = 1 << 4;
    }
}

impl InteractionState {
    /// The `state` axis value for these flags.
    ///
    /// Precedence: disabled, pressed, hovered, focused, selected, enabled.
    pub fn state_value(&self) -> &'static str {
        const ORDER: [(InteractionState, &str); 5] = [
            (InteractionState::DISABLED, "disabled"),
            (InteractionState::PRESSED, "pressed"),
            (InteractionState::HOVERED, "hovered"),
            (InteractionState::FOCUSED, "focused"),
            (InteractionState::SELECTED, "selected"),
        ];
        ORDER
            .iter()
            .find(|(flag, _)| self.contains(*flag))
            .map_or("enabled", |(_, value)| *value)
    }
}

/// The ordered set of active `(axis, value)` pairs for one render.
///
/// Order matters: when two axes override the same property, the axis that
/// comes later in the selection wins. Setting an axis that is already
/// present replaces its value in place, keeping its position.
///
/// Selections are render-time data and are never stored in the registry.
///
/// # Example
///
/// ```rust
/// use molecules::VariantSelection;
///
/// let selection = VariantSelection::new()
///     .with("size", "sm")
///     .with("state", "hovered")
///     .with("size", "lg");
///
/// let pairs: Vec<_> = selection.iter().collect();
/// assert_eq!(pairs, vec![("size", "lg"), ("state", "hovered")]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VariantSelection {
    pairs: Vec<(String, String)>,
}

impl VariantSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `axis` to `value`, returning the selection for chaining.
    pub fn with(mut self, axis: &str, value: &str) -> Self {
        self.set(axis, value);
        self
    }

    /// Sets `axis` to `value`, replacing an existing value in place.
    pub fn set(&mut self, axis: &str, value: &str) {
        match self.pairs.iter_mut().find(|(a, _)| a == axis) {
            Some((_, v)) => *v = value.to_string(),
            None => self.pairs.push((axis.to_string(), value.to_string())),
        }
    }

    /// Removes an axis, returning its value.
    pub fn remove(&mut self, axis: &str) -> Option<String> {
        let index = self.pairs.iter().position(|(a, _)| a == axis)?;
        Some(self.pairs.remove(index).1)
    }

    /// Returns the value selected for `axis`.
    pub fn get(&self, axis: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(a, _)| a == axis)
            .map(|(_, v)| v.as_str())
    }

    /// Sets the `state` axis from interaction flags.
    pub fn with_state(self, state: InteractionState) -> Self {
        self.with(STATE_AXIS, state.state_value())
    }

    /// Sets the `colorScheme` axis.
    pub fn with_color_scheme(self, mode: ColorMode) -> Self {
        self.with(COLOR_SCHEME_AXIS, mode.as_str())
    }

    /// Sets the axes the theme itself drives (currently the color scheme).
    pub fn with_theme(self, theme: &Theme) -> Self {
        self.with_color_scheme(theme.mode)
    }

    /// Iterates over `(axis, value)` pairs in selection order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(a, v)| (a.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<A: AsRef<str>, V: AsRef<str>> FromIterator<(A, V)> for VariantSelection {
    fn from_iter<I: IntoIterator<Item = (A, V)>>(iter: I) -> Self {
        let mut selection = Self::new();
        for (axis, value) in iter {
            selection.set(axis.as_ref(), value.as_ref());
        }
        selection
    }
}

impl fmt::Display for VariantSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (axis, value) in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{}={}", axis, value)?;
            first = false;
        }
        Ok(())
    }
}

/// Error parsing a selection from `axis=value,axis=value` text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid variant pair '{pair}': expected axis=value")]
pub struct ParseSelectionError {
    pub pair: String,
}

impl FromStr for VariantSelection {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut selection = Self::new();
        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (axis, value) = pair
                .split_once('=')
                .map(|(a, v)| (a.trim(), v.trim()))
                .filter(|(a, v)| !a.is_empty() && !v.is_empty())
                .ok_or_else(|| ParseSelectionError {
                    pair: pair.to_string(),
                })?;
            selection.set(axis, value);
        }
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut selection = VariantSelection::new().with("a", "1").with("b", "2");
        selection.set("a", "3");

        let pairs: Vec<_> = selection.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_remove() {
        let mut selection = VariantSelection::new().with("a", "1").with("b", "2");
        assert_eq!(selection.remove("a"), Some("1".to_string()));
        assert_eq!(selection.remove("a"), None);
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.get("b"), Some("2"));
    }

    #[test]
    fn test_state_precedence() {
        assert_eq!(InteractionState::empty().state_value(), "enabled");
        assert_eq!(InteractionState::HOVERED.state_value(), "hovered");
        assert_eq!(
            (InteractionState::HOVERED | InteractionState::PRESSED).state_value(),
            "pressed"
        );
        assert_eq!(
            (InteractionState::DISABLED | InteractionState::PRESSED).state_value(),
            "disabled"
        );
        assert_eq!(
            (InteractionState::SELECTED | InteractionState::FOCUSED).state_value(),
            "focused"
        );
    }

    #[test]
    fn test_theme_and_state_axes() {
        let selection = VariantSelection::new()
            .with_theme(&Theme::dark())
            .with_state(InteractionState::DISABLED);

        assert_eq!(selection.get(COLOR_SCHEME_AXIS), Some("dark"));
        assert_eq!(selection.get(STATE_AXIS), Some("disabled"));
    }

    #[test]
    fn test_parse_and_display() {
        let selection: VariantSelection = "size=sm, state=disabled".parse().unwrap();
        assert_eq!(selection.get("size"), Some("sm"));
        assert_eq!(selection.to_string(), "size=sm,state=disabled");

        assert!("".parse::<VariantSelection>().unwrap().is_empty());
        assert!("size".parse::<VariantSelection>().is_err());
        assert!("=sm".parse::<VariantSelection>().is_err());
    }

    #[test]
    fn test_from_iter_keeps_last_value_first_position() {
        let selection: VariantSelection = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        assert_eq!(selection.to_string(), "a=3,b=2");
    }
}
