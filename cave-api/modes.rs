/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

#[cfg(feature = "ipc")]
use serde::{Deserialize, Serialize};

/// Which components of a fresh pose sample are used, and which are held
/// from the previous frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum TrackingMode {
    Full,
    OrientationOnly,
    PositionOnly,
    /// The previous frame's view is reused verbatim.
    None,
}

impl TrackingMode {
    pub fn next(self) -> TrackingMode {
        match self {
            TrackingMode::Full => TrackingMode::OrientationOnly,
            TrackingMode::OrientationOnly => TrackingMode::PositionOnly,
            TrackingMode::PositionOnly => TrackingMode::None,
            TrackingMode::None => TrackingMode::Full,
        }
    }
}

impl Default for TrackingMode {
    fn default() -> Self {
        TrackingMode::Full
    }
}

/// How physical output eyes are mapped onto logical source eyes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum DisplayMode {
    Stereo,
    /// Both outputs show the left eye.
    Mono,
    LeftOnly,
    RightOnly,
    /// Each output shows the opposite eye.
    Inverted,
}

impl DisplayMode {
    pub fn next(self) -> DisplayMode {
        match self {
            DisplayMode::Stereo => DisplayMode::Mono,
            DisplayMode::Mono => DisplayMode::LeftOnly,
            DisplayMode::LeftOnly => DisplayMode::RightOnly,
            DisplayMode::RightOnly => DisplayMode::Inverted,
            DisplayMode::Inverted => DisplayMode::Stereo,
        }
    }
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::Stereo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracking_mode_cycles() {
        let mut mode = TrackingMode::default();
        let mut seen = vec![mode];
        for _ in 0..4 {
            mode = mode.next();
            seen.push(mode);
        }
        assert_eq!(
            seen,
            vec![
                TrackingMode::Full,
                TrackingMode::OrientationOnly,
                TrackingMode::PositionOnly,
                TrackingMode::None,
                TrackingMode::Full,
            ]
        );
    }

    #[test]
    fn display_mode_cycles() {
        let mut mode = DisplayMode::default();
        for _ in 0..5 {
            mode = mode.next();
        }
        assert_eq!(mode, DisplayMode::Stereo);
        assert_eq!(DisplayMode::RightOnly.next(), DisplayMode::Inverted);
    }
}
