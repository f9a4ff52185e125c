//! Host-side utilities for the `dynlist` crate.
//!
//! The `dynlist` crate is UI-agnostic and focuses on layout state. This crate provides small,
//! framework-neutral helpers commonly needed by hosts:
//!
//! - A controller that turns UI events into scroll requests and drives the scroll-to-end
//!   retry timer
//! - Scroll anchoring across count changes (e.g. prepend in chat/timelines without visual
//!   jumps)
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate std;

mod anchor;
mod controller;

#[cfg(test)]
mod tests;

pub use anchor::{ScrollAnchor, apply_anchor, capture_first_visible_anchor};
pub use controller::{Controller, DEFAULT_RETRY_INTERVAL_MS};
