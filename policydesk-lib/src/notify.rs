//! Toast notifications.
//!
//! Failures and confirmations are surfaced to the user as short toasts.
//! The visual widget lives outside this crate; it plugs in as a [`Notifier`].

use std::sync::Mutex;
use std::time::Duration;

use log::error;
use log::info;
use log::warn;

/// Default duration for toast notifications.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast notification.
///
/// # Example
///
/// ```
/// use policydesk_lib::notify::{Toast, ToastLevel};
///
/// let toast = Toast::error("Failed to load policies. Please try again.");
/// assert_eq!(toast.level, ToastLevel::Error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    /// How long to show the toast.
    pub duration: Duration,
}

impl Toast {
    fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    /// Create an info toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Info, message)
    }

    /// Create a success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Success, message)
    }

    /// Create a warning toast.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Warning, message)
    }

    /// Create an error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, message)
    }

    /// Set a custom duration for this toast.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

impl From<String> for Toast {
    fn from(message: String) -> Self {
        Toast::info(message)
    }
}

impl From<&str> for Toast {
    fn from(message: &str) -> Self {
        Toast::info(message)
    }
}

/// Fire-and-forget notification sink.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Forwards toasts to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Info | ToastLevel::Success => info!("{}", toast.message),
            ToastLevel::Warning => warn!("{}", toast.message),
            ToastLevel::Error => error!("{}", toast.message),
        }
    }
}

/// Keeps every toast it receives, oldest first.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of the toasts received so far.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().map(|t| t.clone()).unwrap_or_default()
    }

    /// Removes and returns the toasts received so far.
    pub fn drain(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|mut t| std::mem::take(&mut *t))
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, toast: Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, toast: Toast) {
        (**self).notify(toast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Toast::success("saved").level, ToastLevel::Success);
        assert_eq!(Toast::from("hi").level, ToastLevel::Info);
        let toast = Toast::warning("slow").with_duration(Duration::from_secs(1));
        assert_eq!(toast.duration, Duration::from_secs(1));
    }

    #[test]
    fn test_memory_notifier_collects_and_drains() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Toast::info("one"));
        notifier.notify(Toast::error("two"));

        assert_eq!(notifier.toasts().len(), 2);
        let drained = notifier.drain();
        assert_eq!(drained[1], Toast::error("two"));
        assert!(notifier.toasts().is_empty());
    }
}
