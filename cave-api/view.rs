/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! This crate uses `euclid`'s typed units, and exposes different coordinate spaces.

use euclid::Point3D;
use euclid::Rect;
use euclid::RigidTransform3D;
use euclid::Transform3D;
use euclid::Vector3D;

use std::fmt;

#[cfg(feature = "ipc")]
use serde::{Deserialize, Serialize};

/// The tracking space of the room, shared by the enclosure and all tracked devices.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum World {}

/// The local coordinate space of one eye.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum Eye {}

/// The local coordinate space of a hand controller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum Hand {}

/// An eye-centred space aligned with one display surface: x runs along the
/// surface's right edge, y along its up edge and z along its normal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum Screen {}

/// The normalized device coordinate space, where the display
/// is from (-1,-1) to (1,1).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum Display {}

/// The unnormalized device coordinate space, where the display
/// is from (0,0) to (w,h), measured in pixels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum Viewport {}

/// Number of display surfaces in the enclosure.
pub const SURFACE_COUNT: usize = 3;

/// Left or right, for eyes and hands alike.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub struct SurfaceId(pub usize);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the renderer needs to draw one display surface for one eye.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub struct SurfaceView {
    pub id: SurfaceId,
    /// The off-axis projection times view for this surface and eye.
    pub projection: Transform3D<f32, World, Display>,
    /// The outward normal of the surface, pointing into the enclosure.
    pub normal: Vector3D<f32, World>,
}

/// The resolved view for one physical output eye.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub struct EyeView {
    /// The physical output this view is drawn into.
    pub eye: Side,
    /// The logical eye whose tracking data produced this view.
    pub source: Side,
    /// The lag-selected view transform.
    pub transform: RigidTransform3D<f32, World, Eye>,
    /// The eye position the surface projections were generated from.
    pub position: Point3D<f32, World>,
    pub viewport: Rect<i32, Viewport>,
    pub surfaces: [SurfaceView; SURFACE_COUNT],
}

impl EyeView {
    pub fn view_matrix(&self) -> Transform3D<f32, World, Eye> {
        self.transform.to_transform()
    }
}

/// Everything the renderer consumes for one submitted frame.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub struct FrameOutput {
    /// One entry per physical output eye; `None` means the output stays dark.
    pub eyes: [Option<EyeView>; 2],
    /// The lag-selected hand poses.
    pub hands: [RigidTransform3D<f32, Hand, World>; 2],
    pub time_ns: u64,
    /// Seconds elapsed since the previous frame.
    pub delta: f64,
}

impl FrameOutput {
    pub fn eye(&self, side: Side) -> Option<&EyeView> {
        self.eyes[side.index()].as_ref()
    }

    pub fn hand(&self, side: Side) -> RigidTransform3D<f32, Hand, World> {
        self.hands[side.index()]
    }
}
