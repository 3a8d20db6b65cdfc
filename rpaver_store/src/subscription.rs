// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped handles for live subscriptions.

use std::fmt;

/// Handle keeping a live listener registered with a store.
///
/// The listener stays attached for as long as the handle is alive. Dropping the
/// handle or calling [`unsubscribe`](Self::unsubscribe) detaches it; no new
/// callback starts once release has returned. Release is idempotent.
///
/// Views hold the handle in their own state so that tearing the view down (on
/// any path, including early returns and panics) releases the remote listener.
#[must_use = "dropping a Subscription immediately detaches its listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Creates a handle that runs `release` exactly once when released.
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Creates a handle with nothing to release.
    ///
    /// Useful for backends that deliver a single snapshot and keep no listener.
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Returns `true` until the handle has been released.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Detaches the listener now. Later calls do nothing.
    pub fn unsubscribe(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
