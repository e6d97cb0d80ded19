// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Parkdesk integration tests.
//!
//! Provides an in-memory backend and a harness for fast, deterministic,
//! CI-runnable tests without a running parking server.
//!
//! # Components
//!
//! - [`MockParkingApi`] - In-memory backend with failure injection and call counters
//! - [`RecordingListener`] - Lifecycle listener that captures events
//! - [`TestHarness`] - A [`parkdesk_workflow::Desk`] wired to the mock backend

pub mod fixtures;
pub mod harness;
pub mod mock_api;
pub mod recording_listener;

pub use harness::TestHarness;
pub use mock_api::MockParkingApi;
pub use recording_listener::RecordingListener;
