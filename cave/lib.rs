/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! This crate implements the CAVE core: off-axis projections for a fixed
//! enclosure of display surfaces, and the temporal buffering of tracking data.

#[cfg(feature = "headless")]
pub mod headless;

mod cave;
mod delay;
mod display;
mod enclosure;
mod history;
mod projection;
mod session;
mod tracking;

pub use crate::cave::Cave;
pub use crate::cave::FrameResult;

pub use crate::delay::RenderDelay;

pub use crate::display::EyeSelection;

pub use crate::enclosure::display_normal;
pub use crate::enclosure::DisplaySurface;
pub use crate::enclosure::Enclosure;
pub use crate::enclosure::ScreenBasis;

pub use crate::history::PoseHistory;
pub use crate::history::Ring;
pub use crate::history::RingCursor;

pub use crate::projection::off_axis_frustum;
pub use crate::projection::off_axis_projection;
pub use crate::projection::Frustum;

pub use crate::session::CaveSession;

pub use crate::tracking::Interocular;
pub use crate::tracking::PoseTracker;
