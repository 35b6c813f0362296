//! Where the theme context takes its snapshots from.

use super::adaptive::AdaptiveTheme;
use super::theme::Theme;

/// Either a fixed theme or an adaptive theme.
///
/// Lets a [`ThemeContext`](super::ThemeContext) hold a theme that never
/// changes on its own, or one that follows the system color mode.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeSource {
    /// A fixed theme that doesn't change based on color mode.
    Fixed(Theme),
    /// An adaptive theme that selects light/dark based on OS settings.
    Adaptive(AdaptiveTheme),
}

impl ThemeSource {
    /// Resolves to a concrete theme.
    ///
    /// For fixed themes, returns a clone. For adaptive themes,
    /// detects the current color mode and returns the appropriate variant.
    pub fn resolve(&self) -> Theme {
        match self {
            ThemeSource::Fixed(theme) => theme.clone(),
            ThemeSource::Adaptive(adaptive) => adaptive.resolve(),
        }
    }
}

impl Default for ThemeSource {
    fn default() -> Self {
        ThemeSource::Fixed(Theme::light())
    }
}

impl From<Theme> for ThemeSource {
    fn from(theme: Theme) -> Self {
        ThemeSource::Fixed(theme)
    }
}

impl From<AdaptiveTheme> for ThemeSource {
    fn from(adaptive: AdaptiveTheme) -> Self {
        ThemeSource::Adaptive(adaptive)
    }
}
