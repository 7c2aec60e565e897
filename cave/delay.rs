/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use cave_api::MAX_RENDER_DELAY;

/// Emulates render latency by submitting only one of every `delay + 1` frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderDelay {
    delay: u32,
    max: u32,
    counter: u32,
}

impl RenderDelay {
    /// `max` is capped at `MAX_RENDER_DELAY`.
    pub fn new(delay: u32, max: u32) -> RenderDelay {
        let max = max.min(MAX_RENDER_DELAY);
        RenderDelay {
            delay: delay.min(max),
            max,
            counter: 0,
        }
    }

    pub fn delay(&self) -> u32 {
        self.delay
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn increase(&mut self) -> u32 {
        self.delay = (self.delay + 1).min(self.max);
        self.delay
    }

    pub fn decrease(&mut self) -> u32 {
        self.delay = self.delay.saturating_sub(1);
        self.delay
    }

    /// Advances the frame counter. Returns false for frames that must not
    /// be handed to the renderer.
    pub fn should_submit(&mut self) -> bool {
        if self.counter < self.delay {
            self.counter += 1;
            false
        } else {
            self.counter = 0;
            true
        }
    }
}
