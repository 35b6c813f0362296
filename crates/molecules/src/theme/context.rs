//! Theme snapshots with change notification.

use std::fmt;
use std::sync::Arc;

use super::source::ThemeSource;
use super::theme::Theme;

/// Handle returned by [`ThemeContext::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Arc<Theme>) + Send>;

/// Holds the active theme and tells subscribers when it changes.
///
/// Snapshots are shared `Arc<Theme>` values: a snapshot handed out before a
/// change keeps describing the old theme, so resolution done with it stays
/// consistent. Subscribers are called synchronously, in subscription order,
/// whenever the snapshot actually changes.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use molecules::{ColorMode, Theme, ThemeContext};
///
/// let mut ctx = ThemeContext::new(Theme::light());
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = Arc::clone(&seen);
/// ctx.subscribe(move |theme| sink.lock().unwrap().push(theme.mode));
///
/// ctx.set_theme(Theme::dark());
/// assert_eq!(*seen.lock().unwrap(), vec![ColorMode::Dark]);
/// ```
pub struct ThemeContext {
    source: ThemeSource,
    current: Arc<Theme>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl ThemeContext {
    /// Creates a context and resolves its first snapshot.
    pub fn new(source: impl Into<ThemeSource>) -> Self {
        let source = source.into();
        let current = Arc::new(source.resolve());
        Self {
            source,
            current,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Returns the current theme snapshot.
    pub fn snapshot(&self) -> Arc<Theme> {
        Arc::clone(&self.current)
    }

    /// Returns the source snapshots are resolved from.
    pub fn source(&self) -> &ThemeSource {
        &self.source
    }

    /// Replaces the source with a fixed theme.
    ///
    /// Returns true if the snapshot changed (and subscribers were notified).
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        self.set_source(ThemeSource::Fixed(theme))
    }

    /// Replaces the source and re-resolves.
    ///
    /// Returns true if the snapshot changed (and subscribers were notified).
    pub fn set_source(&mut self, source: impl Into<ThemeSource>) -> bool {
        self.source = source.into();
        self.refresh()
    }

    /// Re-resolves the current source, e.g. after the OS color mode changed.
    ///
    /// Returns true if the snapshot changed (and subscribers were notified).
    pub fn refresh(&mut self) -> bool {
        let next = self.source.resolve();
        if *self.current == next {
            return false;
        }
        tracing::debug!(mode = next.mode.as_str(), "theme snapshot changed");
        self.current = Arc::new(next);
        let snapshot = Arc::clone(&self.current);
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&snapshot);
        }
        true
    }

    /// Registers a callback invoked with each new snapshot.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&Arc<Theme>) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new(ThemeSource::default())
    }
}

impl fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeContext")
            .field("source", &self.source)
            .field("current", &self.current)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{reset_theme_detector, set_theme_detector, AdaptiveTheme, ColorMode};
    use serial_test::serial;
    use std::sync::Mutex;

    fn recorder(ctx: &mut ThemeContext) -> (SubscriptionId, Arc<Mutex<Vec<ColorMode>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let id = ctx.subscribe(move |theme| sink.lock().unwrap().push(theme.mode));
        (id, seen)
    }

    #[test]
    fn test_set_theme_notifies() {
        let mut ctx = ThemeContext::new(Theme::light());
        let (_, seen) = recorder(&mut ctx);

        assert!(ctx.set_theme(Theme::dark()));
        assert_eq!(ctx.snapshot().mode, ColorMode::Dark);
        assert_eq!(*seen.lock().unwrap(), vec![ColorMode::Dark]);
    }

    #[test]
    fn test_equal_theme_does_not_notify() {
        let mut ctx = ThemeContext::new(Theme::light());
        let (_, seen) = recorder(&mut ctx);

        assert!(!ctx.set_theme(Theme::light()));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_old_snapshot_is_stable() {
        let mut ctx = ThemeContext::new(Theme::light());
        let before = ctx.snapshot();
        ctx.set_theme(Theme::dark());

        assert_eq!(before.mode, ColorMode::Light);
        assert!(!Arc::ptr_eq(&before, &ctx.snapshot()));
    }

    #[test]
    fn test_unsubscribe() {
        let mut ctx = ThemeContext::new(Theme::light());
        let (id, seen) = recorder(&mut ctx);

        assert!(ctx.unsubscribe(id));
        assert!(!ctx.unsubscribe(id));
        assert_eq!(ctx.subscriber_count(), 0);

        ctx.set_theme(Theme::dark());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_subscribers_called_in_order() {
        let mut ctx = ThemeContext::new(Theme::light());
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..3 {
            let sink = Arc::clone(&order);
            ctx.subscribe(move |_| sink.lock().unwrap().push(i));
        }

        ctx.set_theme(Theme::dark());
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    #[serial(theme_detector)]
    fn test_refresh_follows_detector() {
        set_theme_detector(|| ColorMode::Light);
        let mut ctx = ThemeContext::new(AdaptiveTheme::default());
        let (_, seen) = recorder(&mut ctx);
        assert_eq!(ctx.snapshot().mode, ColorMode::Light);

        set_theme_detector(|| ColorMode::Dark);
        assert!(ctx.refresh());
        assert!(!ctx.refresh());
        assert_eq!(*seen.lock().unwrap(), vec![ColorMode::Dark]);

        reset_theme_detector();
    }
}
