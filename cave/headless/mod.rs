/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! A tracking device driven entirely by messages, for tests and for
//! running the core without hardware.

use cave_api::ButtonEdges;
use cave_api::Device;
use cave_api::Error;
use cave_api::Eye;
use cave_api::Frame;
use cave_api::Hand;
use cave_api::InputState;
use cave_api::MockDeviceInit;
use cave_api::MockDeviceMsg;
use cave_api::MockInputMsg;
use cave_api::PoseSample;
use cave_api::Receiver;
use cave_api::Sender;

use log::{debug, info};

pub struct HeadlessDevice {
    receiver: Receiver<MockDeviceMsg>,
    data: HeadlessDeviceData,
    edges: ButtonEdges,
}

struct HeadlessDeviceData {
    eyes: [PoseSample<Eye>; 2],
    hands: [PoseSample<Hand>; 2],
    input: InputState,
    disconnected: bool,
}

/// Creates a headless device together with the sender that drives it.
pub fn simulate_device_connection(
    init: MockDeviceInit,
) -> Result<(Sender<MockDeviceMsg>, HeadlessDevice), Error> {
    let (sender, receiver) = cave_api::channel()?;
    Ok((sender, HeadlessDevice::new(init, receiver)))
}

impl HeadlessDevice {
    pub fn new(init: MockDeviceInit, receiver: Receiver<MockDeviceMsg>) -> HeadlessDevice {
        info!("Creating HeadlessDevice");
        let data = HeadlessDeviceData {
            eyes: init.eyes,
            hands: init.hands,
            input: InputState::default(),
            disconnected: false,
        };
        HeadlessDevice {
            receiver,
            data,
            edges: ButtonEdges::new(),
        }
    }
}

impl Device for HeadlessDevice {
    fn wait_for_animation_frame(&mut self) -> Option<Frame> {
        while !self.data.disconnected {
            match self.receiver.try_recv() {
                Ok(msg) => self.data.handle_msg(msg),
                Err(_) => break,
            }
        }
        if self.data.disconnected {
            return None;
        }

        let commands = self.edges.update(&self.data.input);
        Some(Frame {
            eyes: self.data.eyes,
            hands: self.data.hands,
            commands,
            input: self.data.input,
            time_ns: time::precise_time_ns(),
        })
    }

    fn quit(&mut self) {
        debug!("HeadlessDevice quitting");
        self.data.disconnected = true;
    }
}

impl HeadlessDeviceData {
    fn handle_msg(&mut self, msg: MockDeviceMsg) {
        match msg {
            MockDeviceMsg::SetEyePose(side, pose) => self.eyes[side.index()] = pose,
            MockDeviceMsg::SetHandPose(side, pose) => self.hands[side.index()] = pose,
            MockDeviceMsg::MessageInput(msg) => match msg {
                MockInputMsg::SetButtons(buttons) => self.input.buttons = buttons,
                MockInputMsg::SetIndexTrigger(side, value) => {
                    self.input.index_trigger[side.index()] = value
                },
                MockInputMsg::SetHandTrigger(side, value) => {
                    self.input.hand_trigger[side.index()] = value
                },
                MockInputMsg::SetThumbstick(side, value) => {
                    self.input.thumbstick[side.index()] = value
                },
            },
            MockDeviceMsg::Disconnect(s) => {
                self.disconnected = true;
                // notify the client that we're done disconnecting
                let _ = s.send(());
            },
        }
    }
}
