//! Theme context for style resolution.
//!
//! This module provides:
//!
//! - [`Theme`]: color, spacing and breakpoint tokens with a fluent builder
//! - [`AdaptiveTheme`]: light/dark theme pairs with OS detection
//! - [`ThemeSource`]: a fixed or adaptive theme
//! - [`ThemeContext`]: the current snapshot plus change subscriptions
//! - [`ColorMode`]: light or dark color mode enum
//!
//! Resolution never reads a theme implicitly: callers pass the latest
//! snapshot from [`ThemeContext::snapshot`] to the resolver, and subscribe to
//! the context to learn when a new snapshot is available.

mod adaptive;
mod context;
mod source;
#[allow(clippy::module_inception)]
mod theme;

pub use adaptive::{
    detect_color_mode, reset_theme_detector, set_theme_detector, AdaptiveTheme, ColorMode,
};
pub use context::{SubscriptionId, ThemeContext};
pub use source::ThemeSource;
pub use theme::Theme;
