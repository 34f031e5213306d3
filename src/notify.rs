use std::sync::Arc;

use notify_rust::Notification;

use crate::timer::{SessionSink, TimerEvent};

pub const COMPLETION_TITLE: &str = "Goal Complete! Take a break!";

/// Best-effort desktop notification. Implementations never fail the caller.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        let result = Notification::new()
            .summary(title)
            .body(body)
            .appname("cosmodoro")
            .icon("alarm-clock")
            .show();
        if let Err(e) = result {
            log::warn!("desktop notification failed: {e}");
        }
    }
}

/// Used when notifications are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, title: &str, _body: &str) {
        log::debug!("notification suppressed: {title}");
    }
}

/// Forwards events to `inner` and announces a reached goal as soon as the
/// ticker sees it, whatever the foreground is doing.
pub struct CompletionAlert<S> {
    inner: S,
    notifier: Arc<dyn Notifier>,
    body: &'static str,
}

impl<S: SessionSink> CompletionAlert<S> {
    pub fn new(inner: S, notifier: Arc<dyn Notifier>, body: &'static str) -> Self {
        Self {
            inner,
            notifier,
            body,
        }
    }
}

impl<S: SessionSink> SessionSink for CompletionAlert<S> {
    fn on_event(&self, event: &TimerEvent) {
        // persist before announcing
        self.inner.on_event(event);
        if event.is_completed() {
            self.notifier.notify(COMPLETION_TITLE, self.body);
        }
    }
}
