/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::DisplayMode;
use crate::Sender;
use crate::TrackingMode;

#[cfg(feature = "ipc")]
use serde::{Deserialize, Serialize};

/// State changes reported by the core to whoever is listening.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum Event {
    TrackingModeChanged(TrackingMode),
    DisplayModeChanged(DisplayMode),
    /// Tracking lag, in frames
    LagChanged(usize),
    /// Rendering delay, in frames
    DelayChanged(u32),
    InterocularChanged(f32),
    /// Session ended by device
    SessionEnd,
}

pub trait EventCallback: 'static {
    fn callback(&mut self, event: Event);
}

impl EventCallback for Sender<Event> {
    fn callback(&mut self, event: Event) {
        let _ = self.send(event);
    }
}

/// Convenience structure for buffering up events
/// when no event callback has been set
pub enum EventBuffer {
    Buffered(Vec<Event>),
    Sink(Box<dyn EventCallback>),
}

impl Default for EventBuffer {
    fn default() -> Self {
        EventBuffer::Buffered(vec![])
    }
}

impl EventBuffer {
    pub fn callback(&mut self, event: Event) {
        match *self {
            EventBuffer::Buffered(ref mut events) => events.push(event),
            EventBuffer::Sink(ref mut sink) => sink.callback(event),
        }
    }

    pub fn upgrade(&mut self, mut sink: Box<dyn EventCallback>) {
        if let EventBuffer::Buffered(ref mut events) = *self {
            for event in events.drain(..) {
                sink.callback(event)
            }
        }
        *self = EventBuffer::Sink(sink)
    }
}
