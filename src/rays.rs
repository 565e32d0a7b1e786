//! Fan-beam ray-set generation and retargeting.
//!
//! Rays are generated once on the unit circle and later retargeted, in place,
//! onto whatever bounding circle the consumer's coordinate frame calls for.
//! Only the origins and detector distances move; the angular geometry is never
//! regenerated.

use std::f32::consts::{PI, TAU};

use itertools::iproduct;
use serde::Deserialize;

use crate::arena::Arena;
use crate::error::{ReconError, Result};
use crate::{Lengthf32, Point, Rect, Vector};

#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Point,
    /// Unit direction; never rescaled by retargeting
    pub dir: Vector,
    /// Distance from origin to the detector
    pub length: Lengthf32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FanGeometry {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub num_sources: usize,
    pub rays_per_source: usize,
    /// Angular spread of each source's fan, in radians
    pub spread: f32,
}

impl FanGeometry {
    // Exact comparison, no tolerance: retargeting only happens when the
    // consumer's bounding box genuinely changes.
    fn same_target(&self, cx: f32, cy: f32, radius: f32) -> bool {
        self.cx == cx && self.cy == cy && self.radius == radius
    }
}

/// Per-variant payload of the ray set's geometry. Parallel-beam is declared
/// but not implemented; every dispatch on it must report
/// [`ReconError::UnsupportedGeometry`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    Fan(FanGeometry),
    Parallel,
}

/// Configuration-level selector for the geometry to generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GeometryMode {
    #[default]
    Fan,
    Parallel,
}

/// A fixed-capacity, arena-backed set of rays with one precomputed forward
/// projection slot per ray. Rays are grouped contiguously by source: ray `i`
/// belongs to source `i / rays_per_source`.
pub struct RaySet<'a> {
    pub rays: &'a mut [Ray],
    pub projections: &'a mut [f32],
    pub geometry: Geometry,
}

impl<'a> RaySet<'a> {

    /// Dispatch on the configured mode; fails fast for parallel-beam.
    pub fn generate(arena: &'a Arena,
                    mode: GeometryMode,
                    num_sources: usize,
                    rays_per_source: usize,
                    spread_deg: f32,
    ) -> Result<Self> {
        match mode {
            GeometryMode::Fan => Self::generate_fan(arena, num_sources, rays_per_source, spread_deg),
            GeometryMode::Parallel => Err(ReconError::UnsupportedGeometry),
        }
    }

    /// Place `num_sources` point sources uniformly on the unit circle, each
    /// fanning `rays_per_source` rays (forced odd, so a central ray points
    /// straight across the circle) over `spread_deg` degrees.
    pub fn generate_fan(arena: &'a Arena,
                        num_sources: usize,
                        rays_per_source: usize,
                        spread_deg: f32,
    ) -> Result<Self> {
        if num_sources == 0 { return Err(ReconError::NoSources); }

        let half = rays_per_source / 2;
        let rays_per_source = 2 * half + 1;
        let n = num_sources * rays_per_source;

        let radius = 1.0;
        let spread = spread_deg.to_radians();
        let source_step = TAU / num_sources as f32;
        let spread_step = if rays_per_source > 1 { spread / (rays_per_source - 1) as f32 }
                          else                   { 0.0 };

        let unset = Ray { origin: Point::new(0.0, 0.0), dir: Vector::new(0.0, 0.0), length: 0.0 };
        let rays = arena.alloc_slice(n, unset);
        let projections = arena.alloc_slice(n, 0.0);

        for (k, (i, j)) in iproduct!(0..num_sources, 0..rays_per_source).enumerate() {
            let angle = i as f32 * source_step;
            let offset = (j as f32 - half as f32) * spread_step;
            // From the source, through the reconstruction region, towards the
            // opposite side of the circle
            let ray_angle = angle + PI + offset;
            rays[k] = Ray {
                origin: Point::new(angle.cos(), angle.sin()),
                dir: Vector::new(ray_angle.cos(), ray_angle.sin()),
                length: radius,
            };
        }

        Ok(RaySet {
            rays,
            projections,
            geometry: Geometry::Fan(FanGeometry {
                cx: 0.0,
                cy: 0.0,
                radius,
                num_sources,
                rays_per_source,
                spread,
            }),
        })
    }

    /// Move the whole set onto a new bounding circle: each origin is recovered
    /// normalised to the old circle and reprojected onto the new one. A no-op
    /// when the target is unchanged.
    pub fn retarget(&mut self, cx: f32, cy: f32, radius: f32) -> Result<()> {
        let fan = match &mut self.geometry {
            Geometry::Fan(fan) => fan,
            Geometry::Parallel => return Err(ReconError::UnsupportedGeometry),
        };
        if fan.same_target(cx, cy, radius) { return Ok(()); }

        for ray in self.rays.iter_mut() {
            let nx = (ray.origin.x - fan.cx) / fan.radius;
            let ny = (ray.origin.y - fan.cy) / fan.radius;
            ray.origin = Point::new(cx + nx * radius, cy + ny * radius);
            // The diameter over-estimates the detector distance, which is
            // sufficient for clipping and drawing
            ray.length = 2.0 * radius;
        }
        fan.cx = cx;
        fan.cy = cy;
        fan.radius = radius;
        Ok(())
    }

    /// Retarget onto the bounding circle of a rectangle in the consumer's
    /// coordinate space.
    pub fn retarget_to_rect(&mut self, rect: &Rect) -> Result<()> {
        let centre = rect.centre();
        self.retarget(centre.x, centre.y, 0.5 * rect.width().max(rect.height()))
    }

    /// Fan metadata, or the error every unsupported-variant dispatch reports
    pub fn fan(&self) -> Result<&FanGeometry> {
        match &self.geometry {
            Geometry::Fan(fan) => Ok(fan),
            Geometry::Parallel => Err(ReconError::UnsupportedGeometry),
        }
    }

    pub fn len(&self) -> usize { self.rays.len() }
    pub fn is_empty(&self) -> bool { self.rays.is_empty() }
}
