// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=skyport_state --heading-base-level=0

//! Skyport State: the visualization root and its pure reducer.
//!
//! [`VisRoot`] is the single value describing every open viewport, the active
//! one, and the group alignment policy. It is mutated exclusively through
//! [`reduce`]: a pure function from the current root plus an [`Intent`] to the
//! next root. There is no store, no subscription machinery, and no interior
//! mutability — the caller (an event loop, out of scope here) holds the
//! current value and re-renders from whatever `reduce` returns.
//!
//! ```text
//! (VisRoot, Intent) ──reduce──▶ VisRoot
//! ```
//!
//! Three properties the reducer maintains:
//!
//! - **Best-effort stability.** An intent naming an unknown viewport is a
//!   no-op, not an error: intents race with asynchronous viewport removal,
//!   and liveness beats strict validation at this boundary.
//! - **Referential identity.** Viewports are held as `Arc`s and only the
//!   changed ones are re-allocated; untouched members of the returned root
//!   are pointer-equal to the input's, which is what downstream change
//!   detection keys on. [`reduce_with_changes`] reports the replaced ids.
//! - **Three fan-out scopes.** An intent touches its single target, *or* the
//!   position-locked members of the target's group (scroll, rotate, flip,
//!   recenter), *or* the group-lock-flagged members (zoom). The scopes are
//!   distinct and never conflated.
//!
//! When a WCS match is active ([`Intent::ChangeAlignmentMode`] named a master
//! viewport), transform-changing intents on any *other* viewport re-derive
//! that viewport's scroll from the master through the alignment policy,
//! rather than trusting the raw intent parameters.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use skyport_coords::CoordSys;
//! use skyport_plot::PlotDescriptor;
//! use skyport_state::{Intent, VisRoot, reduce};
//! use skyport_view::{GroupId, ViewContext, ViewportId};
//!
//! let root = VisRoot::new();
//! let root = reduce(&root, &Intent::AddViewport {
//!     id: ViewportId::new("v1"),
//!     group: GroupId::new("g1"),
//!     descriptor: PlotDescriptor::Hips {
//!         frame: CoordSys::EquatorialJ2000,
//!         initial_lon: 0.0,
//!         initial_lat: 0.0,
//!         cube_depth: 1,
//!     },
//!     context: ViewContext::default(),
//!     view_dim: Size::new(800.0, 600.0),
//! });
//! assert_eq!(root.viewports().len(), 1);
//!
//! // Unknown ids are absorbed silently.
//! let same = reduce(&root, &Intent::Zoom {
//!     id: ViewportId::new("does-not-exist"),
//!     factor: 2.0,
//! });
//! assert_eq!(same.viewports().len(), 1);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod intent;
mod reducer;
mod root;

pub use intent::Intent;
pub use reducer::{reduce, reduce_with_changes};
pub use root::{VisRoot, ViewportGroup};
