//! A headless layout engine for virtualized lists whose item sizes are only known after the
//! items have been rendered and measured.
//!
//! For host-side glue (retry timers, anchoring across data resets), see the `dynlist-adapter`
//! crate.
//!
//! The engine keeps a sparse offset map that is filled lazily from a running size estimate.
//! Measurements replace estimates one item at a time; after each event the rendered window is
//! repaired so neighbours touch again, while the item the user is reading stays where it is on
//! screen.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport size (height/width)
//! - scroll offset changes
//! - item sizes once the items are mounted
//!
//! and in return to apply:
//! - the render range and per-item offsets
//! - the estimated total extent (scroll area size)
//! - programmatic scroll requests
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod estimator;
mod layout;
mod list;
mod options;
mod range;
mod reconcile;
mod state;
mod store;
mod types;


pub use estimator::EstimatorState;
pub use list::DynamicList;
pub use options::{DEFAULT_ESTIMATED_ITEM_SIZE, ListOptions, OnChangeCallback};
pub use state::{FrameState, ScrollState, ViewportState};
pub use types::{
    Align, ItemLayout, ItemMetadata, Orientation, Placement, Rect, RenderRange, ScrollDirection,
};
