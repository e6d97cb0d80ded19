// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification hook fired after a lifecycle-changing action.

use async_trait::async_trait;

use crate::types::Parking;

/// A lifecycle change that made server state diverge from any displayed list.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    /// A vehicle was timed in; carries the new open parking.
    TimedIn(Parking),
    /// A vehicle was timed out; carries the closed parking with its fee.
    TimedOut(Parking),
}

impl LifecycleEvent {
    pub fn parking(&self) -> &Parking {
        match self {
            LifecycleEvent::TimedIn(p) | LifecycleEvent::TimedOut(p) => p,
        }
    }
}

/// Receives lifecycle events. Listeners must not fail the action that fired them.
#[async_trait]
pub trait LifecycleListener: Send + Sync + 'static {
    async fn on_lifecycle_event(&self, event: &LifecycleEvent);
}
