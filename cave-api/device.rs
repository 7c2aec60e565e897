/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

/// Traits to be implemented by the collaborators of the core
use crate::Frame;
use crate::FrameOutput;

/// A trait for the tracking and input device.
pub trait Device {
    /// This method should block waiting for the next frame,
    /// and return the tracking samples and input for it.
    /// Returning `None` ends the session.
    fn wait_for_animation_frame(&mut self) -> Option<Frame>;

    /// Called once when the session is shutting down.
    fn quit(&mut self) {}
}

/// A trait for whatever draws and presents the frame.
pub trait Renderer {
    /// Draw every visible eye and hand it to the compositor.
    /// This is only called for frames that are not skipped; on skipped frames
    /// the previously submitted image must stay visible.
    fn render_animation_frame(&mut self, output: &FrameOutput);
}
