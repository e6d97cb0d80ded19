// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the workflows and their collaborators.
//!
//! Both traits use `#[async_trait]` so they can be held as
//! `Arc<dyn ...>` and injected by the parent coordinator.

pub mod api;
pub mod listener;

pub use api::ParkingApi;
pub use listener::{LifecycleEvent, LifecycleListener};
