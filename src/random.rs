//! Random sampling for ray tracing.
//!
//! Every function draws from a caller-supplied [`Rng`], so scattering and lens
//! sampling can be driven by a seeded ChaCha20 generator in the renderer or by
//! a fixed sequence in tests.

use glam::Vec3A;
use rand::Rng;

use crate::vec::Color;

/// Generate a random f32 in [0.0, 1.0)
pub fn random_f32<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random()
}

/// Generate a random f32 in [min, max)
pub fn random_f32_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32(rng)
}

/// Generate a Vec3A with components in [0.0, 1.0)
pub fn random_vec3a<R: Rng + ?Sized>(rng: &mut R) -> Vec3A {
    Vec3A::new(random_f32(rng), random_f32(rng), random_f32(rng))
}

/// Generate a Vec3A with components in [min, max)
pub fn random_vec3a_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> Vec3A {
    Vec3A::splat(min) + Vec3A::splat(max - min) * random_vec3a(rng)
}

/// Random point strictly inside the unit sphere, by rejection sampling.
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3A {
    loop {
        let p = random_vec3a_range(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Unit vector obtained by normalizing a point inside the unit sphere.
///
/// The diffuse model depends on this exact construction; it is not replaced
/// by an analytic sphere parameterization.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3A {
    loop {
        let p = random_in_unit_sphere(rng);
        // A point at the origin has no direction.
        if p.length_squared() > 1e-12 {
            return p.normalize();
        }
    }
}

/// Random vector inside the unit sphere, flipped into the hemisphere of `normal`.
pub fn random_in_hemisphere<R: Rng + ?Sized>(rng: &mut R, normal: Vec3A) -> Vec3A {
    let in_unit_sphere = random_in_unit_sphere(rng);
    if in_unit_sphere.dot(normal) > 0.0 {
        in_unit_sphere
    } else {
        -in_unit_sphere
    }
}

/// Random point inside the unit disk on the z = 0 plane.
pub fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Vec3A {
    loop {
        let p = Vec3A::new(
            random_f32_range(rng, -1.0, 1.0),
            random_f32_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random RGB color with components in [0.0, 1.0).
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    random_vec3a(rng)
}

/// Random RGB color with components in [min, max).
pub fn random_color_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> Color {
    random_vec3a_range(rng, min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn ranges_are_respected() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = random_f32_range(&mut rng, -2.0, 3.0);
            assert!((-2.0..3.0).contains(&x));
            let c = random_color_range(&mut rng, 0.5, 1.0);
            assert!(c.cmpge(Vec3A::splat(0.5)).all() && c.cmplt(Vec3A::ONE).all());
        }
    }

    #[test]
    fn sphere_and_disk_samples_stay_inside() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for _ in 0..1000 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() < 1.0);
            let d = random_in_unit_disk(&mut rng);
            assert!(d.length_squared() < 1.0);
            assert_eq!(d.z, 0.0);
            assert!((random_unit_vector(&mut rng).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn hemisphere_samples_face_the_normal() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let normal = Vec3A::new(0.0, 0.0, -1.0);
        for _ in 0..1000 {
            assert!(random_in_hemisphere(&mut rng, normal).dot(normal) >= 0.0);
        }
    }
}
