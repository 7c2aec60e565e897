/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::Side;
use crate::SurfaceId;

use thiserror::Error;

#[cfg(feature = "ipc")]
use serde::{Deserialize, Serialize};

/// Errors that can be produced by the CAVE core.
#[derive(Clone, Debug, Error, PartialEq)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum Error {
    /// The surface's corners do not span a plane.
    #[error("display surface {surface} has degenerate corners")]
    DegenerateSurface { surface: SurfaceId },
    /// The eye is on or behind the surface plane.
    #[error("{eye:?} eye is not in front of display surface {surface} (distance {distance})")]
    EyeBehindSurface {
        surface: SurfaceId,
        eye: Side,
        distance: f32,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to communicate with the tracking device")]
    CommunicationError,
}
