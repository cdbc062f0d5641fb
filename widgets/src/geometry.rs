//! Pure wheel math, kept free of SDL so it can be tested headless.

use std::f32::consts::TAU;
use tonewheel_theory::circle::{NUM_SECTORS, Ring};

pub const MIN_SIZE_PX: u32 = 320;

/// Angular width of one wedge.
pub const SECTOR_RADS: f32 = TAU / NUM_SECTORS as f32;

/// The wheel's concentric radii for a drawable size. Everything hangs off the
/// outer radius: the rings meet at 0.42 of it and the centre hole ends at 0.18
/// of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub center_x_px: f32,
    pub center_y_px: f32,
    pub outer_radius_px: f32,
    pub inner_radius_px: f32,
    pub hole_radius_px: f32,
}

impl WheelGeometry {
    pub fn new(width_px: u32, height_px: u32) -> Self {
        let size_px = width_px.min(height_px).max(MIN_SIZE_PX) as f32;
        let outer_radius_px = size_px / 2.0 - 8.0;
        Self {
            center_x_px: width_px as f32 / 2.0,
            center_y_px: height_px as f32 / 2.0,
            outer_radius_px,
            inner_radius_px: outer_radius_px * 0.42,
            hole_radius_px: outer_radius_px * 0.18,
        }
    }

    /// Radii bounding a ring's wedges, inner then outer.
    pub fn ring_bounds_px(&self, ring: Ring) -> (f32, f32) {
        match ring {
            Ring::Major => (self.inner_radius_px, self.outer_radius_px),
            Ring::Minor => (self.hole_radius_px, self.inner_radius_px),
        }
    }

    /// Distance from the centre to the middle of a ring's labels.
    pub fn label_radius_px(&self, ring: Ring) -> f32 {
        let (inner_px, outer_px) = self.ring_bounds_px(ring);
        (inner_px + outer_px) / 2.0
    }

    /// The ring containing a distance from the centre. The outer ring excludes
    /// both of its bounding circles; the inner ring owns the circle the two
    /// rings share.
    pub fn ring_of_radius(&self, radius_px: f32) -> Option<Ring> {
        if radius_px > self.inner_radius_px
            && radius_px < self.outer_radius_px
        {
            Some(Ring::Major)
        } else if radius_px > self.hole_radius_px
            && radius_px <= self.inner_radius_px
        {
            Some(Ring::Minor)
        } else {
            None
        }
    }

    /// Maps a point to the key sector under it, or `None` off the rings. The
    /// rotation offset applies to both rings: spinning the wheel also shifts
    /// which minor key sits under a point.
    pub fn hit_test(
        &self,
        x_px: f32,
        y_px: f32,
        rotation_rads: f32,
    ) -> Option<(Ring, usize)> {
        let dx = x_px - self.center_x_px;
        let dy = y_px - self.center_y_px;
        let ring = self.ring_of_radius(dx.hypot(dy))?;
        Some((ring, sector_of_angle(dy.atan2(dx), rotation_rads)))
    }
}

/// The sector whose wedge covers an angle once the wheel's rotation is backed
/// out. Sector 0 starts on the positive x axis; sectors advance clockwise in
/// screen space (y grows downwards).
pub fn sector_of_angle(angle_rads: f32, rotation_rads: f32) -> usize {
    let normalized = (angle_rads - rotation_rads).rem_euclid(TAU);
    // rem_euclid can round up to TAU itself for tiny negative inputs
    ((normalized / SECTOR_RADS) as usize).min(NUM_SECTORS - 1)
}
