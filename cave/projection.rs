/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Generalized perspective projection (Kooima) for an eye that is not
//! centred in front of a flat screen.

use crate::enclosure::DisplaySurface;

use cave_api::ClipPlanes;
use cave_api::Display;
use cave_api::Error;
use cave_api::Screen;
use cave_api::Side;
use cave_api::World;

use euclid::Point3D;
use euclid::Transform3D;

/// Eyes closer to the surface plane than this are treated as being on it.
const MIN_DISTANCE: f32 = 1e-6;

/// The extents of an asymmetric view volume on its near plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub clip_planes: ClipPlanes,
}

impl Frustum {
    /// The OpenGL off-axis perspective matrix for these bounds.
    pub fn to_transform(&self) -> Transform3D<f32, Screen, Display> {
        let near = self.clip_planes.near;
        let far = self.clip_planes.far;
        let (left, right, bottom, top) = (self.left, self.right, self.bottom, self.top);

        let w = right - left;
        let h = top - bottom;
        let d = far - near;

        Transform3D::new(
            2. * near / w,
            0.,
            0.,
            0.,
            0.,
            2. * near / h,
            0.,
            0.,
            (right + left) / w,
            (top + bottom) / h,
            -(far + near) / d,
            -1.,
            0.,
            0.,
            -2. * far * near / d,
            0.,
        )
    }
}

/// Computes the near-plane bounds of the view volume from `position`
/// through the corners of `surface`.
pub fn off_axis_frustum(
    surface: &DisplaySurface,
    eye: Side,
    position: Point3D<f32, World>,
    clip_planes: ClipPlanes,
) -> Result<Frustum, Error> {
    let basis = surface.basis();
    let va = surface.pa() - position;
    let vb = surface.pb() - position;
    let vc = surface.pc() - position;

    let distance = -basis.normal.dot(va);
    if !(distance > MIN_DISTANCE) {
        return Err(Error::EyeBehindSurface {
            surface: surface.id(),
            eye,
            distance,
        });
    }

    let scale = clip_planes.near / distance;
    Ok(Frustum {
        left: basis.right.dot(va) * scale,
        right: basis.right.dot(vb) * scale,
        bottom: basis.up.dot(va) * scale,
        top: basis.up.dot(vc) * scale,
        clip_planes,
    })
}

/// The projection times view for drawing `surface` as seen from `position`.
/// The eye must be strictly in front of the surface.
pub fn off_axis_projection(
    surface: &DisplaySurface,
    eye: Side,
    position: Point3D<f32, World>,
    clip_planes: ClipPlanes,
) -> Result<Transform3D<f32, World, Display>, Error> {
    let frustum = off_axis_frustum(surface, eye, position, clip_planes)?;
    let translation: Transform3D<f32, World, World> =
        Transform3D::translation(-position.x, -position.y, -position.z);
    let rotation: Transform3D<f32, World, Screen> = surface.basis().to_transform();
    Ok(translation.then(&rotation).then(&frustum.to_transform()))
}
