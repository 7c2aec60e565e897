/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::delay::RenderDelay;
use crate::display::EyeSelection;
use crate::enclosure::Enclosure;
use crate::history::PoseHistory;
use crate::projection::off_axis_projection;
use crate::tracking::Interocular;
use crate::tracking::PoseTracker;

use cave_api::CaveConfig;
use cave_api::ClipPlanes;
use cave_api::Command;
use cave_api::Display;
use cave_api::DisplayMode;
use cave_api::Error;
use cave_api::Event;
use cave_api::EventBuffer;
use cave_api::EventCallback;
use cave_api::EyeView;
use cave_api::Frame;
use cave_api::FrameOutput;
use cave_api::Side;
use cave_api::SurfaceView;
use cave_api::TrackingMode;
use cave_api::Viewport;
use cave_api::World;
use cave_api::SURFACE_COUNT;

use euclid::Rect;
use euclid::Transform3D;

use log::{debug, info, warn};

/// The outcome of processing one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameResult {
    /// False while the render delay is holding the previous image.
    pub submit: bool,
    pub output: FrameOutput,
}

/// The frame core: owns the enclosure, the pose history and all of the
/// user-adjustable state, and turns tracking frames into views.
pub struct Cave {
    enclosure: Enclosure,
    history: PoseHistory,
    tracker: PoseTracker,
    interocular: Interocular,
    tracking_mode: TrackingMode,
    display_mode: DisplayMode,
    delay: RenderDelay,
    clip_planes: ClipPlanes,
    viewports: [Rect<i32, Viewport>; 2],
    last_good: [[Transform3D<f32, World, Display>; SURFACE_COUNT]; 2],
    last_time_ns: Option<u64>,
    events: EventBuffer,
}

impl Cave {
    pub fn new(config: &CaveConfig) -> Result<Cave, Error> {
        config.validate()?;
        let enclosure = Enclosure::from_config(config)?;
        debug!(
            "Creating CAVE core ({} m, {} frames of history)",
            config.half_size, config.history_capacity
        );
        Ok(Cave {
            enclosure,
            history: PoseHistory::new(config.history_capacity, config.initial_lag),
            tracker: PoseTracker::new(),
            interocular: Interocular::new(config.interocular_offset),
            tracking_mode: config.tracking_mode,
            display_mode: config.display_mode,
            delay: RenderDelay::new(config.initial_delay, config.max_delay),
            clip_planes: config.clip_planes,
            viewports: config.viewports,
            last_good: [[Transform3D::identity(); SURFACE_COUNT]; 2],
            last_time_ns: None,
            events: EventBuffer::default(),
        })
    }

    pub fn enclosure(&self) -> &Enclosure {
        &self.enclosure
    }

    pub fn history(&self) -> &PoseHistory {
        &self.history
    }

    pub fn tracking_mode(&self) -> TrackingMode {
        self.tracking_mode
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn lag(&self) -> usize {
        self.history.lag()
    }

    pub fn delay(&self) -> u32 {
        self.delay.delay()
    }

    pub fn interocular_offset(&self) -> f32 {
        self.interocular.offset()
    }

    pub fn clip_planes(&self) -> ClipPlanes {
        self.clip_planes
    }

    pub fn set_event_dest(&mut self, dest: Box<dyn EventCallback>) {
        self.events.upgrade(dest);
    }

    pub fn update_clip_planes(&mut self, near: f32, far: f32) -> Result<(), Error> {
        self.clip_planes.update(near, far)
    }

    /// Reports the end of the session to the event sink.
    pub fn end(&mut self) {
        self.events.callback(Event::SessionEnd);
    }

    pub fn apply_command(&mut self, command: Command) {
        let event = match command {
            Command::CycleTrackingMode => {
                self.tracking_mode = self.tracking_mode.next();
                Event::TrackingModeChanged(self.tracking_mode)
            },
            Command::CycleDisplayMode => {
                self.display_mode = self.display_mode.next();
                Event::DisplayModeChanged(self.display_mode)
            },
            Command::IncreaseLag => Event::LagChanged(self.history.increase_lag()),
            Command::DecreaseLag => Event::LagChanged(self.history.decrease_lag()),
            Command::IncreaseDelay => Event::DelayChanged(self.delay.increase()),
            Command::DecreaseDelay => Event::DelayChanged(self.delay.decrease()),
            Command::ResetInterocular => {
                self.interocular.reset();
                Event::InterocularChanged(0.)
            },
        };
        info!("Applied {:?}: {:?}", command, event);
        self.events.callback(event);
    }

    pub fn process(&mut self, frame: &Frame) -> FrameResult {
        for &command in &frame.commands {
            self.apply_command(command);
        }
        let stick = frame.input.thumbstick(Side::Right);
        if self.interocular.adjust(stick.x) {
            self.events
                .callback(Event::InterocularChanged(self.interocular.offset()));
        }

        let delta = match self.last_time_ns {
            Some(last) => frame.time_ns.saturating_sub(last) as f64 / 1_000_000_000.,
            None => 0.,
        };
        self.last_time_ns = Some(frame.time_ns);

        for &source in &Side::BOTH {
            let sample = self.interocular.apply(source, frame.eye(source));
            let view = self.tracker.resolve(self.tracking_mode, source, sample);
            self.history.record_view(source, view);
        }
        for &hand in &Side::BOTH {
            self.history.record_hand(hand, frame.hand(hand).to_rigid());
        }

        let eyes = [self.eye_view(Side::Left), self.eye_view(Side::Right)];
        let hands = [self.history.hand(Side::Left), self.history.hand(Side::Right)];
        self.history.advance();

        let submit = self.delay.should_submit();
        if !submit {
            debug!("Skipping frame at {} ns (delay {})", frame.time_ns, self.delay.delay());
        }

        FrameResult {
            submit,
            output: FrameOutput {
                eyes,
                hands,
                time_ns: frame.time_ns,
                delta,
            },
        }
    }

    fn eye_view(&mut self, eye: Side) -> Option<EyeView> {
        let selection = EyeSelection::resolve(self.display_mode, eye);
        let transform = self
            .history
            .view(selection.source, selection.history_offset);
        let position = transform.inverse().translation.to_point();

        let clip_planes = self.clip_planes;
        let last_good = &mut self.last_good[eye.index()];
        let surfaces = self.enclosure.surfaces();
        let mut views = [SurfaceView {
            id: surfaces[0].id(),
            projection: last_good[0],
            normal: surfaces[0].normal(),
        }; SURFACE_COUNT];
        for (index, surface) in surfaces.iter().enumerate() {
            match off_axis_projection(surface, eye, position, clip_planes) {
                Ok(projection) => last_good[index] = projection,
                Err(err) => warn!("{}, reusing the last projection", err),
            }
            views[index] = SurfaceView {
                id: surface.id(),
                projection: last_good[index],
                normal: surface.normal(),
            };
        }

        if !selection.draw {
            return None;
        }
        Some(EyeView {
            eye,
            source: selection.source,
            transform,
            position,
            viewport: self.viewports[eye.index()],
            surfaces: views,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use cave_api::PoseSample;
    use euclid::Vector3D;

    fn frame_with(left: Vector3D<f32, World>, right: Vector3D<f32, World>) -> Frame {
        let mut frame = Frame::default();
        frame.eyes = [PoseSample::from_position(left), PoseSample::from_position(right)];
        frame
    }

    fn offset(k: usize) -> Vector3D<f32, World> {
        Vector3D::new(k as f32 * 0.01, 0., 0.)
    }

    fn position(result: &FrameResult, eye: Side) -> Vector3D<f32, World> {
        result.output.eye(eye).unwrap().position.to_vector()
    }

    fn approx(a: Vector3D<f32, World>, b: Vector3D<f32, World>) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn tracking_none_freezes_the_view() {
        let mut config = CaveConfig::default();
        config.tracking_mode = TrackingMode::None;
        let mut cave = Cave::new(&config).unwrap();
        let a = cave.process(&frame_with(offset(1), offset(2)));
        let b = cave.process(&frame_with(offset(7), offset(9)));
        let left_a = a.output.eye(Side::Left).unwrap();
        let left_b = b.output.eye(Side::Left).unwrap();
        assert_eq!(left_a.transform, left_b.transform);
        assert_eq!(left_a.surfaces[1].projection, left_b.surfaces[1].projection);
    }

    #[test]
    fn stereo_reads_the_same_slot_for_both_eyes() {
        let mut cave = Cave::new(&CaveConfig::default()).unwrap();
        for k in 0..40 {
            let result = cave.process(&frame_with(offset(k), -offset(k)));
            assert!(approx(position(&result, Side::Left), offset(k)));
            assert!(approx(position(&result, Side::Right), -offset(k)));
        }
    }

    #[test]
    fn lag_delays_the_view() {
        let mut config = CaveConfig::default();
        config.initial_lag = 3;
        let mut cave = Cave::new(&config).unwrap();
        for k in 0..20 {
            let result = cave.process(&frame_with(offset(k), offset(k)));
            if k >= 3 {
                assert!(approx(position(&result, Side::Left), offset(k - 3)));
            }
        }
    }

    #[test]
    fn inverted_reads_two_slots_apart() {
        let mut config = CaveConfig::default();
        config.display_mode = DisplayMode::Inverted;
        let mut cave = Cave::new(&config).unwrap();
        let mut last = None;
        for k in 0..40 {
            last = Some(cave.process(&frame_with(-offset(k), offset(k))));
        }
        let result = last.unwrap();
        // The left output shows the right eye one frame back.
        assert!(approx(position(&result, Side::Left), offset(38)));
        // The right output shows the left eye one slot ahead, which is the
        // oldest frame still in the history.
        assert!(approx(position(&result, Side::Right), -offset(39 + 1 - 30)));
        assert_eq!(result.output.eye(Side::Left).unwrap().source, Side::Right);
    }

    #[test]
    fn single_eye_modes_leave_the_other_output_dark() {
        let mut config = CaveConfig::default();
        config.display_mode = DisplayMode::RightOnly;
        let mut cave = Cave::new(&config).unwrap();
        let result = cave.process(&Frame::default());
        assert!(result.output.eye(Side::Left).is_none());
        assert!(result.output.eye(Side::Right).is_some());
    }

    #[test]
    fn bad_eye_position_falls_back() {
        let mut cave = Cave::new(&CaveConfig::default()).unwrap();
        let below = Vector3D::new(0., -5., 0.);

        let first = cave.process(&frame_with(below, below));
        let floor = first.output.eye(Side::Left).unwrap().surfaces[2];
        assert_eq!(floor.projection, Transform3D::identity());

        let good = cave.process(&frame_with(offset(0), offset(0)));
        let good_floor = good.output.eye(Side::Left).unwrap().surfaces[2].projection;
        assert_ne!(good_floor, Transform3D::identity());

        let bad = cave.process(&frame_with(below, below));
        let eye = bad.output.eye(Side::Left).unwrap();
        assert_eq!(eye.surfaces[2].projection, good_floor);
        assert!(eye.surfaces[2].projection.to_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn commands_update_state_and_report_events() {
        let (sender, receiver) = cave_api::channel::<Event>().unwrap();
        let mut cave = Cave::new(&CaveConfig::default()).unwrap();
        cave.apply_command(Command::DecreaseLag);
        cave.set_event_dest(Box::new(sender));

        let mut frame = Frame::default();
        frame.commands = vec![
            Command::CycleTrackingMode,
            Command::IncreaseDelay,
            Command::CycleDisplayMode,
        ];
        cave.process(&frame);

        assert_eq!(cave.lag(), 29);
        assert_eq!(cave.tracking_mode(), TrackingMode::OrientationOnly);
        assert_eq!(cave.display_mode(), DisplayMode::Mono);
        assert_eq!(cave.delay(), 1);

        let mut events = vec![];
        while let Ok(event) = receiver.try_recv() {
            events.push(event);
        }
        assert_eq!(
            events,
            vec![
                Event::LagChanged(29),
                Event::TrackingModeChanged(TrackingMode::OrientationOnly),
                Event::DelayChanged(1),
                Event::DisplayModeChanged(DisplayMode::Mono),
            ]
        );
    }

    #[test]
    fn hands_trail_by_the_lag() {
        let mut config = CaveConfig::default();
        config.initial_lag = 2;
        let mut cave = Cave::new(&config).unwrap();
        for k in 0..5 {
            let mut frame = Frame::default();
            frame.hands = [
                PoseSample::from_position(Vector3D::new(k as f32, 0., 0.)),
                PoseSample::from_position(Vector3D::new(0., k as f32, 0.)),
            ];
            let result = cave.process(&frame);
            let left = result.output.hand(Side::Left).translation;
            let right = result.output.hand(Side::Right).translation;
            if k >= 2 {
                assert_eq!(left, Vector3D::new((k - 2) as f32, 0., 0.));
                assert_eq!(right, Vector3D::new(0., (k - 2) as f32, 0.));
            } else {
                assert_eq!(left, Vector3D::zero());
            }
        }
    }

    #[test]
    fn infinite_far_plane_is_rejected() {
        let mut config = CaveConfig::default();
        config.clip_planes.far = std::f32::INFINITY;
        assert!(Cave::new(&config).is_err());

        let mut cave = Cave::new(&CaveConfig::default()).unwrap();
        assert!(cave.update_clip_planes(0.01, std::f32::INFINITY).is_err());
        assert_eq!(cave.clip_planes(), ClipPlanes::default());
        let result = cave.process(&Frame::default());
        let eye = result.output.eye(Side::Left).unwrap();
        assert!(eye
            .surfaces
            .iter()
            .all(|s| s.projection.to_array().iter().all(|v| v.is_finite())));
    }

    #[test]
    fn delta_is_measured_between_frames() {
        let mut cave = Cave::new(&CaveConfig::default()).unwrap();
        let mut frame = Frame::default();
        frame.time_ns = 1_000_000_000;
        assert_eq!(cave.process(&frame).output.delta, 0.);
        frame.time_ns = 1_500_000_000;
        assert_eq!(cave.process(&frame).output.delta, 0.5);
    }
}
