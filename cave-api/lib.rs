/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! This crate defines the data model shared between the CAVE core and its
//! collaborators. It is implemented by the `cave` crate.

mod config;
mod device;
mod error;
mod events;
mod frame;
mod input;
mod mock;
mod modes;
mod view;

pub use config::CaveConfig;
pub use config::ClipPlanes;
pub use config::MAX_RENDER_DELAY;

pub use device::Device;
pub use device::Renderer;

pub use error::Error;

pub use events::Event;
pub use events::EventBuffer;
pub use events::EventCallback;

pub use frame::Frame;
pub use frame::PoseSample;

pub use input::ButtonEdges;
pub use input::Buttons;
pub use input::Command;
pub use input::InputState;

pub use mock::MockDeviceInit;
pub use mock::MockDeviceMsg;
pub use mock::MockInputMsg;

pub use modes::DisplayMode;
pub use modes::TrackingMode;

pub use view::Display;
pub use view::Eye;
pub use view::EyeView;
pub use view::FrameOutput;
pub use view::Hand;
pub use view::Screen;
pub use view::Side;
pub use view::SurfaceId;
pub use view::SurfaceView;
pub use view::Viewport;
pub use view::World;
pub use view::SURFACE_COUNT;

#[cfg(feature = "ipc")]
pub use ipc_channel::ipc::IpcSender as Sender;

#[cfg(feature = "ipc")]
pub use ipc_channel::ipc::IpcReceiver as Receiver;

#[cfg(feature = "ipc")]
pub fn channel<T>() -> Result<(Sender<T>, Receiver<T>), Error>
where
    T: serde::Serialize + for<'a> serde::Deserialize<'a>,
{
    ipc_channel::ipc::channel().or(Err(Error::CommunicationError))
}

#[cfg(not(feature = "ipc"))]
pub use std::sync::mpsc::{Receiver, Sender};

#[cfg(not(feature = "ipc"))]
pub fn channel<T>() -> Result<(Sender<T>, Receiver<T>), Error> {
    Ok(std::sync::mpsc::channel())
}
