//! Capture of `stride` warning events for assertions in tests.
//!
//! [`capture_warnings`] installs a thread-local subscriber whose only layer
//! records the `warning` field of every WARN event on the `stride` target.

use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Shared storage for captured warning messages.
#[derive(Debug, Clone, Default)]
pub struct WarningStore(Arc<Mutex<Vec<String>>>);

impl WarningStore {
    /// Returns the captured messages in emission order.
    pub fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Returns true if nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }
}

/// A `Layer` that pushes each `stride` warning into a [`WarningStore`].
pub struct WarningCaptureLayer {
    store: WarningStore,
}

impl WarningCaptureLayer {
    pub fn new(store: WarningStore) -> Self {
        Self { store }
    }
}

/// Pulls the `warning` field out of an event.
#[derive(Default)]
struct WarningVisitor(Option<String>);

impl Visit for WarningVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "warning" {
            self.0 = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "warning" {
            self.0 = Some(value.to_string());
        }
    }
}

impl<S: Subscriber> Layer<S> for WarningCaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if meta.target() != "stride" || *meta.level() != Level::WARN {
            return;
        }
        let mut visitor = WarningVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.0 {
            self.store.0.lock().unwrap().push(message);
        }
    }
}

/// Start capturing `stride` warnings on the current thread.
///
/// Capture stops when the returned guard is dropped, so hold it for as long
/// as the warnings of interest may fire.
pub fn capture_warnings() -> (WarningStore, DefaultGuard) {
    let store = WarningStore::default();
    let subscriber =
        tracing_subscriber::registry().with(WarningCaptureLayer::new(store.clone()));
    let guard = tracing::subscriber::set_default(subscriber);
    (store, guard)
}
