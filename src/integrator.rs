//! Path-tracing integrator.
//!
//! Follows a ray through successive scattering events, multiplying the
//! material attenuations together until the path escapes to the sky, is
//! absorbed, or runs out of bounces.

use rand::Rng;

use crate::hittable::Hittable;
use crate::interval::Interval;
use crate::ray::Ray;
use crate::vec::Color;

/// Smallest ray parameter accepted for a hit, to avoid self-intersection acne.
pub const HIT_EPSILON: f32 = 0.001;

/// Single-sample radiance estimate along `r`.
///
/// At most `depth` surface interactions are followed; a path still bouncing
/// after that gathers no light and contributes black. The caller averages
/// many samples per pixel.
pub fn ray_color<R: Rng + ?Sized>(r: &Ray, world: &dyn Hittable, depth: u32, rng: &mut R) -> Color {
    let mut ray = *r;
    let mut throughput = Color::ONE;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, Interval::from_min(HIT_EPSILON)) else {
            return throughput * sky_color(&ray);
        };

        match rec.material.scatter(&ray, &rec, rng) {
            Some(scatter) => {
                throughput *= scatter.attenuation;
                ray = scatter.scattered;
            }
            None => return Color::ZERO,
        }
    }

    // If we've exceeded the ray bounce limit, no more light is gathered
    Color::ZERO
}

/// Sky gradient seen by rays that escape the scene.
///
/// White looking straight down, light blue looking straight up.
pub fn sky_color(r: &Ray) -> Color {
    let unit_direction = r.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0)
}
