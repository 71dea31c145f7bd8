// SPDX-License-Identifier: MPL-2.0
//! Gallery domain: category groups and the overlay phase controller.
//!
//! The [`controller`] module owns the choreography between the grid, the
//! category chooser, the marquee strip, and the search panel. It is pure
//! state; the `ui` modules render from it and feed events back into it.

pub mod controller;
pub mod group;

pub use controller::{ClosingStage, Controller, Event, OverlayTarget, Pending, Phase, SearchExit, ViewMode};
pub use group::Group;
