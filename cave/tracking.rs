/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use cave_api::Eye;
use cave_api::PoseSample;
use cave_api::Side;
use cave_api::TrackingMode;
use cave_api::World;

use euclid::RigidTransform3D;
use euclid::Rotation3D;
use euclid::Vector3D;

use log::debug;

#[derive(Clone, Copy, Debug)]
struct Held {
    view: RigidTransform3D<f32, World, Eye>,
    orientation: Rotation3D<f32, Eye, World>,
    position: Vector3D<f32, World>,
}

impl Default for Held {
    fn default() -> Self {
        Held {
            view: RigidTransform3D::identity(),
            orientation: Rotation3D::identity(),
            position: Vector3D::zero(),
        }
    }
}

/// Combines fresh eye samples with the values held from the previous
/// frame, according to the tracking mode.
#[derive(Clone, Debug, Default)]
pub struct PoseTracker {
    held: [Held; 2],
}

impl PoseTracker {
    pub fn new() -> PoseTracker {
        PoseTracker::default()
    }

    /// The view to use this frame for the logical eye `source`.
    pub fn resolve(
        &mut self,
        mode: TrackingMode,
        source: Side,
        fresh: PoseSample<Eye>,
    ) -> RigidTransform3D<f32, World, Eye> {
        let held = &mut self.held[source.index()];
        let sample = match mode {
            TrackingMode::Full => fresh,
            TrackingMode::OrientationOnly => PoseSample::new(fresh.orientation, held.position),
            TrackingMode::PositionOnly => PoseSample::new(held.orientation, fresh.position),
            TrackingMode::None => {
                held.orientation = fresh.orientation;
                held.position = fresh.position;
                return held.view;
            },
        };
        held.orientation = sample.orientation;
        held.position = sample.position;
        held.view = sample.to_view();
        held.view
    }
}

const MIN_OFFSET: f32 = -0.1;
const MAX_OFFSET: f32 = 0.3;
/// Offset change per frame at full stick deflection, in metres.
const STICK_GAIN: f32 = 0.007;

/// Extra eye separation, applied along each eye's local x axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Interocular {
    offset: f32,
}

impl Interocular {
    pub fn new(offset: f32) -> Interocular {
        let mut interocular = Interocular::default();
        interocular.set(offset);
        interocular
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    fn set(&mut self, offset: f32) {
        if offset.is_finite() {
            self.offset = offset.max(MIN_OFFSET).min(MAX_OFFSET);
        }
    }

    /// Returns true if the offset changed.
    pub fn adjust(&mut self, stick_x: f32) -> bool {
        let before = self.offset;
        self.set(before + stick_x * STICK_GAIN);
        if self.offset != before {
            debug!("interocular offset {}", self.offset);
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.offset = 0.;
    }

    /// Moves the left eye by `-offset` and the right eye by `+offset`.
    pub fn apply(&self, eye: Side, sample: PoseSample<Eye>) -> PoseSample<Eye> {
        let shift = match eye {
            Side::Left => -self.offset,
            Side::Right => self.offset,
        };
        let local = Vector3D::new(shift, 0., 0.);
        let position = sample.position + sample.orientation.transform_vector3d(local);
        PoseSample::new(sample.orientation, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use euclid::Angle;

    fn sample(yaw: f32, x: f32) -> PoseSample<Eye> {
        PoseSample::new(
            Rotation3D::around_y(Angle::degrees(yaw)),
            Vector3D::new(x, 1.6, 0.),
        )
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn full_tracking_follows_the_sample() {
        let mut tracker = PoseTracker::new();
        let fresh = sample(30., 0.2);
        assert_eq!(
            tracker.resolve(TrackingMode::Full, Side::Left, fresh),
            fresh.to_view()
        );
    }

    #[test]
    fn none_reuses_the_previous_view() {
        let mut tracker = PoseTracker::new();
        let first = tracker.resolve(TrackingMode::Full, Side::Right, sample(10., 0.1));
        let a = tracker.resolve(TrackingMode::None, Side::Right, sample(20., 0.4));
        let b = tracker.resolve(TrackingMode::None, Side::Right, sample(-50., -0.3));
        assert_eq!(a, first);
        assert_eq!(b, first);
    }

    #[test]
    fn none_from_start_is_identity() {
        let mut tracker = PoseTracker::new();
        let view = tracker.resolve(TrackingMode::None, Side::Left, sample(45., 1.));
        assert_eq!(view, RigidTransform3D::identity());
    }

    #[test]
    fn partial_modes_hold_one_component() {
        let mut tracker = PoseTracker::new();
        tracker.resolve(TrackingMode::Full, Side::Left, sample(0., 0.5));

        let view = tracker.resolve(TrackingMode::OrientationOnly, Side::Left, sample(90., 2.));
        let expected = PoseSample::new(Rotation3D::around_y(Angle::degrees(90.)), Vector3D::new(0.5, 1.6, 0.));
        assert_eq!(view, expected.to_view());

        let view = tracker.resolve(TrackingMode::PositionOnly, Side::Left, sample(-90., -1.));
        let expected = PoseSample::new(Rotation3D::around_y(Angle::degrees(90.)), Vector3D::new(-1., 1.6, 0.));
        assert_eq!(view, expected.to_view());
    }

    #[test]
    fn eyes_are_held_separately() {
        let mut tracker = PoseTracker::new();
        tracker.resolve(TrackingMode::Full, Side::Left, sample(0., -0.03));
        let right = tracker.resolve(TrackingMode::None, Side::Right, sample(0., 0.03));
        assert_eq!(right, RigidTransform3D::identity());
    }

    #[test]
    fn interocular_is_clamped() {
        let mut interocular = Interocular::new(1.);
        assert_eq!(interocular.offset(), 0.3);
        assert!(!interocular.adjust(1.));

        interocular.reset();
        assert!(interocular.adjust(1.));
        assert!(approx(interocular.offset(), 0.007));
        for _ in 0..100 {
            interocular.adjust(-1.);
        }
        assert_eq!(interocular.offset(), -0.1);
        assert!(!interocular.adjust(0.));
    }

    #[test]
    fn interocular_moves_eyes_apart_along_local_x() {
        let interocular = Interocular::new(0.1);
        let straight = sample(0., 0.);
        assert!(approx(interocular.apply(Side::Left, straight).position.x, -0.1));
        assert!(approx(interocular.apply(Side::Right, straight).position.x, 0.1));

        // Turned to face +x, the eye's right points to +z.
        let turned = sample(-90., 0.);
        let right = interocular.apply(Side::Right, turned).position;
        assert!(approx(right.x, 0.));
        assert!(approx(right.z, 0.1));
    }
}
