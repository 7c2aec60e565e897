/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::Buttons;
use crate::Eye;
use crate::Hand;
use crate::PoseSample;
use crate::Sender;
use crate::Side;

use euclid::default::Vector2D;

#[cfg(feature = "ipc")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub struct MockDeviceInit {
    pub eyes: [PoseSample<Eye>; 2],
    pub hands: [PoseSample<Hand>; 2],
}

#[derive(Debug)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum MockDeviceMsg {
    SetEyePose(Side, PoseSample<Eye>),
    SetHandPose(Side, PoseSample<Hand>),
    MessageInput(MockInputMsg),
    Disconnect(Sender<()>),
}

/// Changes to the held state of the mock controllers.
#[derive(Debug)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum MockInputMsg {
    SetButtons(Buttons),
    SetIndexTrigger(Side, f32),
    SetHandTrigger(Side, f32),
    SetThumbstick(Side, Vector2D<f32>),
}
