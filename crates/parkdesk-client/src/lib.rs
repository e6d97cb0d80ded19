// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP adapter for the parking backend.
//!
//! [`HttpParkingApi`] implements [`parkdesk_core::ParkingApi`] over `reqwest`.
//! Build one per process and hand it to the workflows as
//! `Arc<dyn ParkingApi>`.

pub mod client;

pub use client::HttpParkingApi;
