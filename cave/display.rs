/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use cave_api::DisplayMode;
use cave_api::Side;

/// How one physical output eye is fed in a given display mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EyeSelection {
    /// The physical output.
    pub eye: Side,
    /// The logical eye whose tracking data is shown.
    pub source: Side,
    pub draw: bool,
    /// Added to the shared history read index.
    pub history_offset: isize,
}

impl EyeSelection {
    pub fn resolve(mode: DisplayMode, eye: Side) -> EyeSelection {
        let (source, draw, history_offset) = match mode {
            DisplayMode::Stereo => (eye, true, 0),
            DisplayMode::Mono => (Side::Left, true, 0),
            DisplayMode::LeftOnly => (eye, eye == Side::Left, 0),
            DisplayMode::RightOnly => (eye, eye == Side::Right, 0),
            DisplayMode::Inverted => match eye {
                Side::Left => (eye.opposite(), true, -1),
                Side::Right => (eye.opposite(), true, 1),
            },
        };
        EyeSelection {
            eye,
            source,
            draw,
            history_offset,
        }
    }
}
