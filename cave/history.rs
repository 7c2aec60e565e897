/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use cave_api::Eye;
use cave_api::Hand;
use cave_api::Side;
use cave_api::World;

use euclid::RigidTransform3D;

/// The write position and lag shared by every history channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingCursor {
    write: usize,
    lag: usize,
    capacity: usize,
}

impl RingCursor {
    /// `capacity` must be non-zero; `lag` is reduced modulo it.
    pub fn new(capacity: usize, lag: usize) -> RingCursor {
        let capacity = capacity.max(1);
        RingCursor {
            write: 0,
            lag: lag % capacity,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn write_index(&self) -> usize {
        self.write
    }

    pub fn lag(&self) -> usize {
        self.lag
    }

    /// The slot written `lag` frames before the current write slot.
    pub fn read_index(&self) -> usize {
        self.offset_read_index(0)
    }

    pub fn offset_read_index(&self, offset: isize) -> usize {
        let index = self.write as isize - self.lag as isize + offset;
        index.rem_euclid(self.capacity as isize) as usize
    }

    pub fn advance(&mut self) {
        self.write = (self.write + 1) % self.capacity;
    }

    pub fn increase_lag(&mut self) -> usize {
        self.lag = (self.lag + 1) % self.capacity;
        self.lag
    }

    pub fn decrease_lag(&mut self) -> usize {
        self.lag = (self.lag + self.capacity - 1) % self.capacity;
        self.lag
    }
}

/// Fixed-size storage for one history channel.
#[derive(Clone, Debug)]
pub struct Ring<T> {
    slots: Box<[T]>,
}

impl<T: Clone> Ring<T> {
    pub fn new(capacity: usize, initial: T) -> Ring<T> {
        Ring {
            slots: vec![initial; capacity.max(1)].into_boxed_slice(),
        }
    }

    pub fn write(&mut self, cursor: &RingCursor, value: T) {
        let index = cursor.write_index() % self.slots.len();
        self.slots[index] = value;
    }

    pub fn read(&self, cursor: &RingCursor, offset: isize) -> &T {
        let index = cursor.offset_read_index(offset) % self.slots.len();
        &self.slots[index]
    }
}

/// The recorded eye views and hand poses of the last `capacity` frames.
#[derive(Clone, Debug)]
pub struct PoseHistory {
    cursor: RingCursor,
    views: [Ring<RigidTransform3D<f32, World, Eye>>; 2],
    hands: [Ring<RigidTransform3D<f32, Hand, World>>; 2],
}

impl PoseHistory {
    pub fn new(capacity: usize, lag: usize) -> PoseHistory {
        let cursor = RingCursor::new(capacity, lag);
        let capacity = cursor.capacity();
        PoseHistory {
            cursor,
            views: [
                Ring::new(capacity, RigidTransform3D::identity()),
                Ring::new(capacity, RigidTransform3D::identity()),
            ],
            hands: [
                Ring::new(capacity, RigidTransform3D::identity()),
                Ring::new(capacity, RigidTransform3D::identity()),
            ],
        }
    }

    pub fn cursor(&self) -> &RingCursor {
        &self.cursor
    }

    pub fn lag(&self) -> usize {
        self.cursor.lag()
    }

    pub fn increase_lag(&mut self) -> usize {
        self.cursor.increase_lag()
    }

    pub fn decrease_lag(&mut self) -> usize {
        self.cursor.decrease_lag()
    }

    pub fn record_view(&mut self, eye: Side, view: RigidTransform3D<f32, World, Eye>) {
        self.views[eye.index()].write(&self.cursor, view);
    }

    pub fn view(&self, eye: Side, offset: isize) -> RigidTransform3D<f32, World, Eye> {
        *self.views[eye.index()].read(&self.cursor, offset)
    }

    pub fn record_hand(&mut self, hand: Side, pose: RigidTransform3D<f32, Hand, World>) {
        self.hands[hand.index()].write(&self.cursor, pose);
    }

    pub fn hand(&self, hand: Side) -> RigidTransform3D<f32, Hand, World> {
        *self.hands[hand.index()].read(&self.cursor, 0)
    }

    /// Moves every channel on to the next frame's slot.
    pub fn advance(&mut self) {
        self.cursor.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use euclid::Rotation3D;
    use euclid::Vector3D;

    fn view_at(x: f32) -> RigidTransform3D<f32, World, Eye> {
        RigidTransform3D::new(Rotation3D::identity(), Vector3D::new(x, 0., 0.))
    }

    #[test]
    fn reads_trail_writes_by_the_lag() {
        for &lag in &[0, 1, 5, 29] {
            let mut cursor = RingCursor::new(30, lag);
            let mut ring = Ring::new(30, -1);
            for k in 0..100 {
                ring.write(&cursor, k);
                let read = *ring.read(&cursor, 0);
                if k >= lag as i32 {
                    assert_eq!(read, k - lag as i32, "lag {} frame {}", lag, k);
                } else {
                    assert_eq!(read, -1);
                }
                cursor.advance();
            }
        }
    }

    #[test]
    fn lag_wraps_both_ways() {
        let mut cursor = RingCursor::new(30, 29);
        assert_eq!(cursor.increase_lag(), 0);
        assert_eq!(cursor.decrease_lag(), 29);
        assert_eq!(cursor.decrease_lag(), 28);
    }

    #[test]
    fn offsets_wrap_around_the_start() {
        let cursor = RingCursor::new(30, 0);
        assert_eq!(cursor.read_index(), 0);
        assert_eq!(cursor.offset_read_index(-1), 29);
        assert_eq!(cursor.offset_read_index(1), 1);

        let distance = |a: usize, b: usize| (b + 30 - a) % 30;
        let mut cursor = RingCursor::new(30, 7);
        for _ in 0..45 {
            let left = cursor.offset_read_index(-1);
            let right = cursor.offset_read_index(1);
            assert_eq!(distance(left, right), 2);
            cursor.advance();
        }
    }

    #[test]
    fn history_starts_with_identity() {
        let history = PoseHistory::new(30, 4);
        assert_eq!(history.view(Side::Left, 0), RigidTransform3D::identity());
        assert_eq!(history.hand(Side::Right), RigidTransform3D::identity());
    }

    #[test]
    fn channels_share_the_cursor() {
        let mut history = PoseHistory::new(4, 1);
        for frame in 0..6 {
            history.record_view(Side::Left, view_at(frame as f32));
            history.record_view(Side::Right, view_at(-(frame as f32)));
            if frame >= 1 {
                let expected = (frame - 1) as f32;
                assert_eq!(history.view(Side::Left, 0), view_at(expected));
                assert_eq!(history.view(Side::Right, 0), view_at(-expected));
            }
            history.advance();
        }
        assert_eq!(history.lag(), 1);
    }
}
