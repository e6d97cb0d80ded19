// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle listener that records every event it receives.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use parkdesk_core::{LifecycleEvent, LifecycleListener};

/// Captures lifecycle events for later assertions.
#[derive(Debug, Default, Clone)]
pub struct RecordingListener {
    events: Arc<Mutex<Vec<LifecycleEvent>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events received so far, oldest first.
    pub async fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.events.lock().await.len()
    }
}

#[async_trait]
impl LifecycleListener for RecordingListener {
    async fn on_lifecycle_event(&self, event: &LifecycleEvent) {
        self.events.lock().await.push(event.clone());
    }
}
