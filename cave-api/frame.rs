/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::Command;
use crate::InputState;
use crate::Side;
use crate::World;

use euclid::RigidTransform3D;
use euclid::Rotation3D;
use euclid::Vector3D;

#[cfg(feature = "ipc")]
use serde::{Deserialize, Serialize};

/// One tracked orientation and position, as reported by the tracking device.
/// `Space` is the local space of whatever is being tracked.
#[derive(Debug)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub struct PoseSample<Space> {
    pub orientation: Rotation3D<f32, Space, World>,
    pub position: Vector3D<f32, World>,
}

impl<Space> Clone for PoseSample<Space> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Space> Copy for PoseSample<Space> {}

impl<Space> PartialEq for PoseSample<Space> {
    fn eq(&self, other: &Self) -> bool {
        self.orientation == other.orientation && self.position == other.position
    }
}

impl<Space> Default for PoseSample<Space> {
    fn default() -> Self {
        PoseSample::identity()
    }
}

impl<Space> PoseSample<Space> {
    pub fn new(orientation: Rotation3D<f32, Space, World>, position: Vector3D<f32, World>) -> Self {
        PoseSample {
            orientation,
            position,
        }
    }

    pub fn identity() -> Self {
        PoseSample::new(Rotation3D::identity(), Vector3D::zero())
    }

    pub fn from_position(position: Vector3D<f32, World>) -> Self {
        PoseSample::new(Rotation3D::identity(), position)
    }

    /// The transform from the tracked object's local space into the world.
    pub fn to_rigid(&self) -> RigidTransform3D<f32, Space, World> {
        RigidTransform3D::new(self.orientation, self.position)
    }

    /// The inverse of the pose: the transform from the world into local space.
    pub fn to_view(&self) -> RigidTransform3D<f32, World, Space> {
        self.to_rigid().inverse()
    }
}

/// The per-frame data that is provided by the tracking device.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub struct Frame {
    pub eyes: [PoseSample<crate::Eye>; 2],
    pub hands: [PoseSample<crate::Hand>; 2],
    /// Discrete commands, one per button press.
    pub commands: Vec<Command>,
    /// The held input state this frame's commands were derived from.
    pub input: InputState,
    pub time_ns: u64,
}

impl Frame {
    pub fn eye(&self, side: Side) -> PoseSample<crate::Eye> {
        self.eyes[side.index()]
    }

    pub fn hand(&self, side: Side) -> PoseSample<crate::Hand> {
        self.hands[side.index()]
    }
}

impl Default for Frame {
    fn default() -> Self {
        Frame {
            eyes: [PoseSample::identity(); 2],
            hands: [PoseSample::identity(); 2],
            commands: vec![],
            input: InputState::default(),
            time_ns: 0,
        }
    }
}
