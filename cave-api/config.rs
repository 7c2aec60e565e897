/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::DisplayMode;
use crate::Error;
use crate::TrackingMode;
use crate::Viewport;

use euclid::Angle;
use euclid::Point2D;
use euclid::Rect;
use euclid::Size2D;

#[cfg(feature = "ipc")]
use serde::{Deserialize, Serialize};

/// Upper bound for the configurable rendering delay, in frames.
pub const MAX_RENDER_DELAY: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub struct ClipPlanes {
    pub near: f32,
    pub far: f32,
}

impl Default for ClipPlanes {
    fn default() -> Self {
        ClipPlanes {
            near: 0.01,
            far: 10000.,
        }
    }
}

impl ClipPlanes {
    pub fn new(near: f32, far: f32) -> Result<ClipPlanes, Error> {
        let planes = ClipPlanes { near, far };
        planes.validate()?;
        Ok(planes)
    }

    pub fn update(&mut self, near: f32, far: f32) -> Result<(), Error> {
        *self = ClipPlanes::new(near, far)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.near > 0.) || !(self.far > self.near) || !self.far.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "clip planes must satisfy 0 < near < far (near {}, far {})",
                self.near, self.far
            )));
        }
        Ok(())
    }
}

/// Startup configuration of the enclosure and the temporal buffering.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub struct CaveConfig {
    /// Half the edge length of the cubic enclosure, in metres.
    pub half_size: f32,
    /// Rotation of the whole enclosure about the vertical axis.
    pub rotation: Angle<f32>,
    pub clip_planes: ClipPlanes,
    /// Number of frames kept in the pose history.
    pub history_capacity: usize,
    pub initial_lag: usize,
    pub initial_delay: u32,
    pub max_delay: u32,
    pub tracking_mode: TrackingMode,
    pub display_mode: DisplayMode,
    pub interocular_offset: f32,
    pub viewports: [Rect<i32, Viewport>; 2],
}

impl Default for CaveConfig {
    fn default() -> Self {
        let size = Size2D::new(1024, 1024);
        CaveConfig {
            half_size: 1.2,
            rotation: Angle::degrees(-45.),
            clip_planes: ClipPlanes::default(),
            history_capacity: 30,
            initial_lag: 0,
            initial_delay: 0,
            max_delay: 10,
            tracking_mode: TrackingMode::Full,
            display_mode: DisplayMode::Stereo,
            interocular_offset: 0.,
            viewports: [
                Rect::new(Point2D::new(0, 0), size),
                Rect::new(Point2D::new(size.width, 0), size),
            ],
        }
    }
}

impl CaveConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.half_size > 0.) {
            return Err(Error::InvalidConfig(format!(
                "enclosure half-size must be positive (got {})",
                self.half_size
            )));
        }
        self.clip_planes.validate()?;
        if self.history_capacity == 0 {
            return Err(Error::InvalidConfig("history capacity must be non-zero".into()));
        }
        if self.initial_lag >= self.history_capacity {
            return Err(Error::InvalidConfig(format!(
                "initial lag {} does not fit a history of {} frames",
                self.initial_lag, self.history_capacity
            )));
        }
        if self.max_delay > MAX_RENDER_DELAY {
            return Err(Error::InvalidConfig(format!(
                "maximum delay {} exceeds {} frames",
                self.max_delay, MAX_RENDER_DELAY
            )));
        }
        if self.initial_delay > self.max_delay {
            return Err(Error::InvalidConfig(format!(
                "initial delay {} exceeds the maximum of {}",
                self.initial_delay, self.max_delay
            )));
        }
        Ok(())
    }
}
