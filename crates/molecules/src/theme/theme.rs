//! Theme tokens consumed by style definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::adaptive::ColorMode;

/// A snapshot of design tokens: colors, spacing and breakpoints.
///
/// Themed style definitions read these tokens when they are evaluated, and
/// stylesheet templates see them as `colors`, `spacing`, `breakpoints` and
/// `mode`.
///
/// # Example
///
/// ```rust
/// use molecules::{ColorMode, Theme};
///
/// let theme = Theme::new(ColorMode::Light)
///     .with_color("primary", "#6750A4")
///     .with_spacing("md", 12.0)
///     .with_breakpoint("medium", 600);
///
/// assert_eq!(theme.color("primary"), Some("#6750A4"));
/// assert_eq!(theme.space("md"), Some(12.0));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub mode: ColorMode,
    pub colors: BTreeMap<String, String>,
    pub spacing: BTreeMap<String, f64>,
    pub breakpoints: BTreeMap<String, u32>,
}

impl Theme {
    /// Creates an empty theme for the given mode.
    pub fn new(mode: ColorMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Adds a color token, returning the theme for chaining.
    pub fn with_color(mut self, name: &str, value: &str) -> Self {
        self.colors.insert(name.to_string(), value.to_string());
        self
    }

    /// Adds a spacing token, returning the theme for chaining.
    pub fn with_spacing(mut self, name: &str, value: f64) -> Self {
        self.spacing.insert(name.to_string(), value);
        self
    }

    /// Adds a breakpoint token, returning the theme for chaining.
    pub fn with_breakpoint(mut self, name: &str, min_width: u32) -> Self {
        self.breakpoints.insert(name.to_string(), min_width);
        self
    }

    pub fn color(&self, name: &str) -> Option<&str> {
        self.colors.get(name).map(String::as_str)
    }

    pub fn space(&self, name: &str) -> Option<f64> {
        self.spacing.get(name).copied()
    }

    pub fn breakpoint(&self, name: &str) -> Option<u32> {
        self.breakpoints.get(name).copied()
    }

    /// Returns the widest breakpoint whose minimum width fits `width`.
    pub fn breakpoint_for(&self, width: u32) -> Option<&str> {
        self.breakpoints
            .iter()
            .filter(|(_, min)| **min <= width)
            .max_by_key(|(_, min)| **min)
            .map(|(name, _)| name.as_str())
    }

    /// Material 3 baseline light scheme.
    pub fn light() -> Self {
        Self::with_scheme(ColorMode::Light, LIGHT_SCHEME)
    }

    /// Material 3 baseline dark scheme.
    pub fn dark() -> Self {
        Self::with_scheme(ColorMode::Dark, DARK_SCHEME)
    }

    fn with_scheme(mode: ColorMode, scheme: &[(&str, &str)]) -> Self {
        let theme = scheme
            .iter()
            .fold(Self::new(mode), |theme, (name, value)| {
                theme.with_color(name, value)
            });
        let theme = SPACING
            .iter()
            .fold(theme, |theme, (name, value)| theme.with_spacing(name, *value));
        BREAKPOINTS
            .iter()
            .fold(theme, |theme, (name, value)| theme.with_breakpoint(name, *value))
    }
}

const LIGHT_SCHEME: &[(&str, &str)] = &[
    ("primary", "#6750A4"),
    ("onPrimary", "#FFFFFF"),
    ("primaryContainer", "#EADDFF"),
    ("onPrimaryContainer", "#21005D"),
    ("secondary", "#625B71"),
    ("onSecondary", "#FFFFFF"),
    ("secondaryContainer", "#E8DEF8"),
    ("onSecondaryContainer", "#1D192B"),
    ("surface", "#FEF7FF"),
    ("onSurface", "#1D1B20"),
    ("surfaceVariant", "#E7E0EC"),
    ("onSurfaceVariant", "#49454F"),
    ("surfaceContainerLow", "#F7F2FA"),
    ("surfaceContainerHighest", "#E6E0E9"),
    ("outline", "#79747E"),
    ("outlineVariant", "#CAC4D0"),
    ("error", "#B3261E"),
    ("onError", "#FFFFFF"),
];

const DARK_SCHEME: &[(&str, &str)] = &[
    ("primary", "#D0BCFF"),
    ("onPrimary", "#381E72"),
    ("primaryContainer", "#4F378B"),
    ("onPrimaryContainer", "#EADDFF"),
    ("secondary", "#CCC2DC"),
    ("onSecondary", "#332D41"),
    ("secondaryContainer", "#4A4458"),
    ("onSecondaryContainer", "#E8DEF8"),
    ("surface", "#141218"),
    ("onSurface", "#E6E0E9"),
    ("surfaceVariant", "#49454F"),
    ("onSurfaceVariant", "#CAC4D0"),
    ("surfaceContainerLow", "#1D1B20"),
    ("surfaceContainerHighest", "#36343B"),
    ("outline", "#938F99"),
    ("outlineVariant", "#49454F"),
    ("error", "#F2B8B5"),
    ("onError", "#601410"),
];

const SPACING: &[(&str, f64)] = &[
    ("xs", 4.0),
    ("sm", 8.0),
    ("md", 12.0),
    ("lg", 16.0),
    ("xl", 24.0),
];

const BREAKPOINTS: &[(&str, u32)] = &[
    ("compact", 0),
    ("medium", 600),
    ("expanded", 840),
    ("large", 1200),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_builder() {
        let theme = Theme::new(ColorMode::Dark)
            .with_color("primary", "#000")
            .with_spacing("sm", 8.0)
            .with_breakpoint("medium", 600);

        assert_eq!(theme.mode, ColorMode::Dark);
        assert_eq!(theme.color("primary"), Some("#000"));
        assert_eq!(theme.space("sm"), Some(8.0));
        assert_eq!(theme.breakpoint("medium"), Some(600));
        assert_eq!(theme.color("missing"), None);
    }

    #[test]
    fn test_presets_share_token_names() {
        let light = Theme::light();
        let dark = Theme::dark();

        assert_eq!(light.mode, ColorMode::Light);
        assert_eq!(dark.mode, ColorMode::Dark);
        assert_eq!(
            light.colors.keys().collect::<Vec<_>>(),
            dark.colors.keys().collect::<Vec<_>>()
        );
        assert_ne!(light.color("surface"), dark.color("surface"));
    }

    #[test]
    fn test_breakpoint_for_width() {
        let theme = Theme::light();
        assert_eq!(theme.breakpoint_for(320), Some("compact"));
        assert_eq!(theme.breakpoint_for(600), Some("medium"));
        assert_eq!(theme.breakpoint_for(1000), Some("expanded"));
        assert_eq!(Theme::default().breakpoint_for(1000), None);
    }

    #[test]
    fn test_theme_deserialize_partial() {
        let theme: Theme = serde_yaml::from_str("mode: dark\ncolors:\n  primary: '#123456'\n").unwrap();
        assert_eq!(theme.mode, ColorMode::Dark);
        assert_eq!(theme.color("primary"), Some("#123456"));
        assert!(theme.spacing.is_empty());
    }
}
