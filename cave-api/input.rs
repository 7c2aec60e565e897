/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::Side;

use euclid::default::Vector2D;

#[cfg(feature = "ipc")]
use serde::{Deserialize, Serialize};

/// Analog triggers count as pressed above this value.
const TRIGGER_THRESHOLD: f32 = 0.5;

/// A discrete request to change core state. Exactly one is produced per press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum Command {
    CycleTrackingMode,
    CycleDisplayMode,
    IncreaseLag,
    DecreaseLag,
    IncreaseDelay,
    DecreaseDelay,
    ResetInterocular,
}

/// Digital buttons of a pair of hand controllers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub struct Buttons {
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub left_stick: bool,
    pub right_stick: bool,
}

/// The held state of every control, sampled once per frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub struct InputState {
    pub index_trigger: [f32; 2],
    pub hand_trigger: [f32; 2],
    pub buttons: Buttons,
    pub thumbstick: [Vector2D<f32>; 2],
}

impl InputState {
    pub fn index_trigger_pressed(&self, side: Side) -> bool {
        self.index_trigger[side.index()] > TRIGGER_THRESHOLD
    }

    pub fn hand_trigger_pressed(&self, side: Side) -> bool {
        self.hand_trigger[side.index()] > TRIGGER_THRESHOLD
    }

    pub fn thumbstick(&self, side: Side) -> Vector2D<f32> {
        self.thumbstick[side.index()]
    }

    fn pressed(&self) -> [(bool, Command); 7] {
        [
            (self.index_trigger_pressed(Side::Right), Command::IncreaseLag),
            (self.index_trigger_pressed(Side::Left), Command::DecreaseLag),
            (self.hand_trigger_pressed(Side::Right), Command::IncreaseDelay),
            (self.hand_trigger_pressed(Side::Left), Command::DecreaseDelay),
            (self.buttons.b, Command::CycleTrackingMode),
            (self.buttons.a, Command::CycleDisplayMode),
            (self.buttons.right_stick, Command::ResetInterocular),
        ]
    }
}

/// Turns held control states into one command per press.
/// A control has to be released before it can fire again.
#[derive(Clone, Debug, Default)]
pub struct ButtonEdges {
    held: [bool; 7],
}

impl ButtonEdges {
    pub fn new() -> ButtonEdges {
        ButtonEdges::default()
    }

    pub fn update(&mut self, input: &InputState) -> Vec<Command> {
        let mut commands = vec![];
        for (held, &(pressed, command)) in self.held.iter_mut().zip(input.pressed().iter()) {
            if pressed && !*held {
                commands.push(command);
            }
            *held = pressed;
        }
        commands
    }
}
