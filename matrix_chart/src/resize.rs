// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container-width tracking.
//!
//! The host's viewport size is the only ambient signal a matrix chart reacts to.
//! It enters through [`ViewportSignal`], so the chart subscribes on mount, drops
//! the subscription on unmount, and otherwise only sees explicit widths.

use hashbrown::HashSet;

/// Handle returned by [`ViewportSignal::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// A source of container width-change notifications (e.g. window resize).
pub trait ViewportSignal {
    /// Registers interest in width changes.
    fn subscribe(&mut self) -> SubscriptionId;

    /// Drops a subscription. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// A simple in-memory [`ViewportSignal`] that counts live subscriptions.
///
/// Hosts without a native signal can use it directly and forward widths with
/// [`ResizeController::notify`].
#[derive(Clone, Debug, Default)]
pub struct ViewportListeners {
    next: u64,
    live: HashSet<SubscriptionId>,
}

impl ViewportListeners {
    /// Creates a registry with no subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns `true` if nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Whether `id` is still subscribed.
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.live.contains(&id)
    }
}

impl ViewportSignal for ViewportListeners {
    fn subscribe(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.live.insert(id);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.live.remove(&id);
    }
}

/// Tracks the container width between mount and unmount.
#[derive(Clone, Debug, Default)]
pub struct ResizeController {
    subscription: Option<SubscriptionId>,
    container_width: f64,
}

impl ResizeController {
    /// Creates an unmounted controller with a zero width.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to `signal` and records the initial container width.
    ///
    /// Mounting twice keeps the first subscription.
    pub fn mount(&mut self, signal: &mut dyn ViewportSignal, width: f64) {
        if self.subscription.is_none() {
            self.subscription = Some(signal.subscribe());
        }
        self.container_width = sanitize(width);
    }

    /// Records a new container width.
    ///
    /// Non-finite and negative widths are stored as 0. Clamping to the chart's
    /// minimum width happens when the geometry is arranged.
    pub fn notify(&mut self, width: f64) {
        self.container_width = sanitize(width);
        tracing::trace!(width, stored = self.container_width, "container resized");
    }

    /// Drops the subscription, if any.
    pub fn unmount(&mut self, signal: &mut dyn ViewportSignal) {
        if let Some(id) = self.subscription.take() {
            signal.unsubscribe(id);
        }
    }

    /// Whether the controller currently holds a subscription.
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Last reported container width.
    pub fn container_width(&self) -> f64 {
        self.container_width
    }
}

fn sanitize(width: f64) -> f64 {
    if width.is_finite() { width.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn mount_and_unmount_balance_subscriptions() {
        let mut signal = ViewportListeners::new();
        let mut controller = ResizeController::new();

        controller.mount(&mut signal, 640.0);
        controller.mount(&mut signal, 700.0);
        assert_eq!(signal.len(), 1);
        assert!(controller.is_mounted());
        assert_eq!(controller.container_width(), 700.0);

        controller.unmount(&mut signal);
        assert!(signal.is_empty());
        assert!(!controller.is_mounted());

        controller.unmount(&mut signal);
        assert!(signal.is_empty());
    }

    #[test]
    fn notifications_store_sanitized_widths() {
        let mut controller = ResizeController::new();
        controller.notify(300.0);
        assert_eq!(controller.container_width(), 300.0);
        controller.notify(80.0);
        assert_eq!(controller.container_width(), 80.0);
        controller.notify(f64::NAN);
        assert_eq!(controller.container_width(), 0.0);
        controller.notify(-40.0);
        assert_eq!(controller.container_width(), 0.0);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut signal = ViewportListeners::new();
        let a = signal.subscribe();
        signal.unsubscribe(a);
        let b = signal.subscribe();
        assert_ne!(a, b);
        assert!(!signal.contains(a));
        assert!(signal.contains(b));
    }
}
