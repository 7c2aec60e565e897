/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use cave_api::CaveConfig;
use cave_api::Error;
use cave_api::SurfaceId;
use cave_api::World;
use cave_api::SURFACE_COUNT;

use euclid::Angle;
use euclid::Point3D;
use euclid::Rotation3D;
use euclid::Transform3D;
use euclid::Vector3D;

const EPSILON: f32 = 1e-6;

/// The unit right, up and normal vectors of a display surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScreenBasis {
    pub right: Vector3D<f32, World>,
    pub up: Vector3D<f32, World>,
    pub normal: Vector3D<f32, World>,
}

impl ScreenBasis {
    pub fn new(
        pa: Point3D<f32, World>,
        pb: Point3D<f32, World>,
        pc: Point3D<f32, World>,
    ) -> Option<ScreenBasis> {
        let right = unit(pb - pa)?;
        let up = unit(pc - pa)?;
        let normal = unit(right.cross(up))?;
        Some(ScreenBasis { right, up, normal })
    }

    /// The rotation taking world axes onto the surface axes.
    /// Its rows are `right`, `up` and `normal`.
    pub fn to_transform<Dst>(&self) -> Transform3D<f32, World, Dst> {
        let (r, u, n) = (self.right, self.up, self.normal);
        Transform3D::new(
            r.x, u.x, n.x, 0., //
            r.y, u.y, n.y, 0., //
            r.z, u.z, n.z, 0., //
            0., 0., 0., 1.,
        )
    }
}

fn unit(v: Vector3D<f32, World>) -> Option<Vector3D<f32, World>> {
    let length = v.length();
    if length > EPSILON && length.is_finite() {
        Some(v / length)
    } else {
        None
    }
}

/// The outward normal of the surface spanned by `pa`, `pb` and `pc`,
/// or `None` if the corners are collinear.
pub fn display_normal(
    pa: Point3D<f32, World>,
    pb: Point3D<f32, World>,
    pc: Point3D<f32, World>,
) -> Option<Vector3D<f32, World>> {
    ScreenBasis::new(pa, pb, pc).map(|basis| basis.normal)
}

/// One flat screen of the enclosure.
///
/// `pa` is the lower left corner, `pb` the lower right and `pc` the upper left,
/// as seen from inside the enclosure. Swapping `pb` and `pc` mirrors the image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DisplaySurface {
    id: SurfaceId,
    pa: Point3D<f32, World>,
    pb: Point3D<f32, World>,
    pc: Point3D<f32, World>,
    basis: ScreenBasis,
}

impl DisplaySurface {
    pub fn new(
        id: SurfaceId,
        pa: Point3D<f32, World>,
        pb: Point3D<f32, World>,
        pc: Point3D<f32, World>,
    ) -> Result<DisplaySurface, Error> {
        let basis = ScreenBasis::new(pa, pb, pc).ok_or(Error::DegenerateSurface { surface: id })?;
        Ok(DisplaySurface {
            id,
            pa,
            pb,
            pc,
            basis,
        })
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn pa(&self) -> Point3D<f32, World> {
        self.pa
    }

    pub fn pb(&self) -> Point3D<f32, World> {
        self.pb
    }

    pub fn pc(&self) -> Point3D<f32, World> {
        self.pc
    }

    /// The fourth corner, opposite `pa`.
    pub fn pd(&self) -> Point3D<f32, World> {
        self.pb + (self.pc - self.pa)
    }

    pub fn basis(&self) -> &ScreenBasis {
        &self.basis
    }

    pub fn normal(&self) -> Vector3D<f32, World> {
        self.basis.normal
    }

    pub fn centroid(&self) -> Point3D<f32, World> {
        self.pa.lerp(self.pd(), 0.5)
    }
}

/// The fixed set of display surfaces around the viewer.
#[derive(Clone, Debug)]
pub struct Enclosure {
    half_size: f32,
    rotation: Angle<f32>,
    surfaces: [DisplaySurface; SURFACE_COUNT],
}

impl Enclosure {
    /// Places the left wall, the front wall and the floor of a cube with the
    /// given half edge length around the origin, then rotates the whole
    /// enclosure about the vertical axis.
    pub fn new(half_size: f32, rotation: Angle<f32>) -> Result<Enclosure, Error> {
        if !(half_size > 0.) || !half_size.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "enclosure half-size must be positive (got {})",
                half_size
            )));
        }
        let h = half_size;
        // (pa, pb, pc) for each surface, relative to the shared centre.
        let corners = [
            // Left wall, facing +x.
            [
                Point3D::new(-h, -h, h),
                Point3D::new(-h, -h, -h),
                Point3D::new(-h, h, h),
            ],
            // Front wall, facing +z.
            [
                Point3D::new(-h, -h, -h),
                Point3D::new(h, -h, -h),
                Point3D::new(-h, h, -h),
            ],
            // Floor, facing +y.
            [
                Point3D::new(-h, -h, h),
                Point3D::new(h, -h, h),
                Point3D::new(-h, -h, -h),
            ],
        ];

        let turn: Rotation3D<f32, World, World> = Rotation3D::around_y(rotation);
        let surface = |index: usize| {
            let [pa, pb, pc] = corners[index];
            DisplaySurface::new(
                SurfaceId(index),
                turn.transform_point3d(pa),
                turn.transform_point3d(pb),
                turn.transform_point3d(pc),
            )
        };
        let surfaces = [surface(0)?, surface(1)?, surface(2)?];

        Ok(Enclosure {
            half_size,
            rotation,
            surfaces,
        })
    }

    pub fn from_config(config: &CaveConfig) -> Result<Enclosure, Error> {
        Enclosure::new(config.half_size, config.rotation)
    }

    pub fn half_size(&self) -> f32 {
        self.half_size
    }

    pub fn rotation(&self) -> Angle<f32> {
        self.rotation
    }

    pub fn surfaces(&self) -> &[DisplaySurface; SURFACE_COUNT] {
        &self.surfaces
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&DisplaySurface> {
        self.surfaces.get(id.0)
    }

    /// Vertices for an outline overlay: the eye position, followed by the
    /// four corners of every surface in `pa, pb, pd, pc` order.
    pub fn debug_vertices(&self, eye: Point3D<f32, World>) -> Vec<Point3D<f32, World>> {
        let mut vertices = Vec::with_capacity(1 + 4 * SURFACE_COUNT);
        vertices.push(eye);
        for surface in &self.surfaces {
            vertices.extend_from_slice(&[surface.pa(), surface.pb(), surface.pd(), surface.pc()]);
        }
        vertices
    }
}
