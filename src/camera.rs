//! Thin-lens camera for primary ray generation.

use anyhow::{ensure, Result};
use glam::Vec3A;
use log::debug;
use rand::Rng;
use serde::Deserialize;

use crate::random;
use crate::ray::Ray;
use crate::vec::Point3;

/// Camera placement and lens settings.
///
/// Plain value consumed once by [`Camera::new`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CameraConfig {
    /// Point camera is looking from (lens center)
    pub lookfrom: Point3,
    /// Point camera is looking at
    pub lookat: Point3,
    /// Camera-relative "up" direction vector
    #[serde(default = "default_vup")]
    pub vup: Vec3A,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Image width divided by image height
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: f32,
    /// Lens diameter; 0.0 disables defocus blur
    #[serde(default)]
    pub aperture: f32,
    /// Distance from lookfrom to the plane of perfect focus
    pub focus_dist: f32,
}

fn default_vup() -> Vec3A {
    Vec3A::Y
}

fn default_aspect_ratio() -> f32 {
    16.0 / 9.0
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            lookfrom: Point3::ZERO,
            lookat: Point3::NEG_Z,
            vup: default_vup(),
            vfov: 90.0,
            aspect_ratio: default_aspect_ratio(),
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }
}

impl CameraConfig {
    /// Reject placements that would give the camera a degenerate frame.
    pub fn validate(&self) -> Result<()> {
        let back = self.lookfrom - self.lookat;
        ensure!(
            back.is_finite() && back.length_squared() > 1e-12,
            "camera lookfrom and lookat must be distinct points"
        );
        ensure!(
            self.vup.is_finite() && self.vup.cross(back.normalize()).length_squared() > 1e-12,
            "camera vup must not be parallel to the view direction"
        );
        ensure!(
            self.vfov > 0.0 && self.vfov < 180.0,
            "camera vfov must lie strictly between 0 and 180 degrees, got {}",
            self.vfov
        );
        ensure!(
            self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0,
            "camera aspect_ratio must be positive, got {}",
            self.aspect_ratio
        );
        ensure!(
            self.aperture.is_finite() && self.aperture >= 0.0,
            "camera aperture must be non-negative, got {}",
            self.aperture
        );
        ensure!(
            self.focus_dist.is_finite() && self.focus_dist > 0.0,
            "camera focus_dist must be positive, got {}",
            self.focus_dist
        );
        Ok(())
    }
}

/// Camera with its viewport and lens basis precomputed.
///
/// Image coordinates `(s, t)` run over [0, 1]² with the origin at the
/// bottom-left corner of the viewport.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Lens center in world space
    origin: Point3,
    /// World position of the viewport's bottom-left corner on the focus plane
    lower_left_corner: Point3,
    /// Full viewport extent along u
    horizontal: Vec3A,
    /// Full viewport extent along v
    vertical: Vec3A,
    /// Camera frame basis vector pointing right
    u: Vec3A,
    /// Camera frame basis vector pointing up
    v: Vec3A,
    /// Camera frame basis vector pointing opposite view direction
    w: Vec3A,
    /// Half the aperture
    lens_radius: f32,
}

impl Camera {
    /// Derive the camera frame and focus-plane viewport from `config`.
    pub fn new(config: &CameraConfig) -> Self {
        debug_assert!(config.focus_dist > 0.0, "focus distance must be positive");

        let theta = config.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = config.aspect_ratio * viewport_height;

        let w = (config.lookfrom - config.lookat).normalize();
        let u = config.vup.cross(w).normalize();
        let v = w.cross(u);
        debug_assert!(
            u.is_finite() && v.is_finite() && w.is_finite(),
            "degenerate camera basis, see CameraConfig::validate"
        );

        let origin = config.lookfrom;
        let horizontal = config.focus_dist * viewport_width * u;
        let vertical = config.focus_dist * viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - config.focus_dist * w;

        debug!(
            "camera at {} looking at {}, vfov {}°, aperture {}, focus {}",
            config.lookfrom, config.lookat, config.vfov, config.aperture, config.focus_dist
        );

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: config.aperture / 2.0,
        }
    }

    /// Generate a ray through image coordinates `(s, t)`.
    ///
    /// The origin is jittered across the lens disk, so only points on the
    /// focus plane stay sharp.
    pub fn get_ray<R: Rng + ?Sized>(&self, s: f32, t: f32, rng: &mut R) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random::random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3A::ZERO
        };

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin - offset,
        )
    }

    /// Orthonormal camera basis `(u, v, w)`.
    #[cfg(test)]
    fn basis(&self) -> (Vec3A, Vec3A, Vec3A) {
        (self.u, self.v, self.w)
    }
}
