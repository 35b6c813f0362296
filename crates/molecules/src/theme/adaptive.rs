//! Adaptive themes that respond to system color mode.

use std::sync::{Mutex, PoisonError};

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::theme::Theme;

/// The user's preferred color mode.
///
/// Also the value of the `colorScheme` variant axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    /// Returns the variant value for this mode (`"light"` or `"dark"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

/// A theme that adapts based on the user's display mode.
///
/// Contains separate themes for light and dark modes, selecting the
/// appropriate one from the OS setting each time it is resolved.
///
/// # Example
///
/// ```rust
/// use molecules::{AdaptiveTheme, ColorMode, Theme};
///
/// let adaptive = AdaptiveTheme::new(Theme::light(), Theme::dark());
/// assert_eq!(adaptive.for_mode(ColorMode::Dark).mode, ColorMode::Dark);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveTheme {
    light: Theme,
    dark: Theme,
}

impl AdaptiveTheme {
    /// Creates an adaptive theme with separate light and dark variants.
    pub fn new(light: Theme, dark: Theme) -> Self {
        Self { light, dark }
    }

    /// Returns the variant for an explicit mode.
    pub fn for_mode(&self, mode: ColorMode) -> &Theme {
        match mode {
            ColorMode::Light => &self.light,
            ColorMode::Dark => &self.dark,
        }
    }

    /// Resolves to the appropriate theme based on the current color mode.
    pub fn resolve(&self) -> Theme {
        self.for_mode(detect_color_mode()).clone()
    }
}

impl Default for AdaptiveTheme {
    fn default() -> Self {
        Self::new(Theme::light(), Theme::dark())
    }
}

type ThemeDetector = fn() -> ColorMode;

static THEME_DETECTOR: Lazy<Mutex<ThemeDetector>> = Lazy::new(|| Mutex::new(os_theme_detector));

/// Overrides the detector used to determine whether the user prefers a light or dark theme.
///
/// This is useful for testing or when the host platform reports the mode
/// through its own channel.
pub fn set_theme_detector(detector: ThemeDetector) {
    let mut guard = THEME_DETECTOR
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = detector;
}

/// Restores OS-based color mode detection.
pub fn reset_theme_detector() {
    set_theme_detector(os_theme_detector);
}

/// Returns the color mode reported by the current detector.
pub fn detect_color_mode() -> ColorMode {
    let detector = THEME_DETECTOR
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    (*detector)()
}

fn os_theme_detector() -> ColorMode {
    match detect_os_theme() {
        OsThemeMode::Dark => ColorMode::Dark,
        _ => ColorMode::Light,
    }
}
