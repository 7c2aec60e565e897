/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::cave::Cave;

use cave_api::CaveConfig;
use cave_api::Device;
use cave_api::Error;
use cave_api::EventCallback;
use cave_api::Renderer;

use log::info;

/// Runs the frame loop: pulls frames from the device, feeds them through
/// the core and hands submitted output to the renderer.
pub struct CaveSession<D, R> {
    cave: Cave,
    device: D,
    renderer: R,
    running: bool,
    frame_count: u64,
    submitted_count: u64,
}

impl<D: Device, R: Renderer> CaveSession<D, R> {
    pub fn new(config: &CaveConfig, device: D, renderer: R) -> Result<CaveSession<D, R>, Error> {
        let cave = Cave::new(config)?;
        info!("Starting CAVE session");
        Ok(CaveSession {
            cave,
            device,
            renderer,
            running: true,
            frame_count: 0,
            submitted_count: 0,
        })
    }

    pub fn run_one_frame(&mut self) {
        if !self.running {
            return;
        }
        let frame = match self.device.wait_for_animation_frame() {
            Some(frame) => frame,
            None => {
                self.end_session();
                return;
            },
        };
        let result = self.cave.process(&frame);
        self.frame_count += 1;
        if result.submit {
            self.renderer.render_animation_frame(&result.output);
            self.submitted_count += 1;
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) {
        while self.running {
            self.run_one_frame();
        }
    }

    pub fn end_session(&mut self) {
        if !self.running {
            return;
        }
        info!(
            "Ending CAVE session after {} frames ({} submitted)",
            self.frame_count, self.submitted_count
        );
        self.running = false;
        self.device.quit();
        self.cave.end();
    }

    pub fn set_event_dest(&mut self, dest: Box<dyn EventCallback>) {
        self.cave.set_event_dest(dest);
    }

    pub fn update_clip_planes(&mut self, near: f32, far: f32) -> Result<(), Error> {
        self.cave.update_clip_planes(near, far)
    }

    pub fn cave(&self) -> &Cave {
        &self.cave
    }

    pub fn cave_mut(&mut self) -> &mut Cave {
        &mut self.cave
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn submitted_count(&self) -> u64 {
        self.submitted_count
    }
}
