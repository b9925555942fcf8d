//! Material system for ray tracing.
//!
//! Implements three material families: Lambertian (diffuse), Metal (specular)
//! and Dielectric (transparent), each with a modified variant that changes its
//! sampling behaviour.

use glam::Vec3A;
use rand::Rng;

use crate::hittable::HitRecord;
use crate::random;
use crate::ray::Ray;
use crate::vec::{Color, Vec3Ext};

/// Reflectance above which [`Material::DielectricModified`] always reflects.
pub const MODIFIED_REFLECTANCE_THRESHOLD: f32 = 0.5;

/// Surface materials.
///
/// Spheres hold materials behind an `Arc`, so one instance can be shared by
/// any number of objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lambertian diffuse material for matte surfaces.
    Lambertian {
        /// Surface color/reflectance.
        albedo: Color,
    },

    /// Metallic material with specular reflection.
    Metal {
        /// Metal color.
        albedo: Color,
        /// Surface roughness (0.0 = mirror, 1.0 = rough).
        fuzz: f32,
    },

    /// Dielectric (transparent) material with refraction.
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass, etc.).
        refraction_index: f32,
    },

    /// Diffuse material sampling the hemisphere around the normal instead of
    /// offsetting the normal by a unit vector.
    LambertianModified {
        /// Surface color/reflectance.
        albedo: Color,
    },

    /// Metal whose fuzz offset lies on the unit sphere rather than inside it.
    MetalModified {
        /// Metal color.
        albedo: Color,
        /// Radius of the glossy ring around the mirror direction.
        fuzz: f32,
    },

    /// Dielectric that reflects whenever the Schlick reflectance exceeds
    /// [`MODIFIED_REFLECTANCE_THRESHOLD`], instead of comparing with a random draw.
    DielectricModified {
        /// Index of refraction.
        refraction_index: f32,
    },
}

/// Outcome of a scattering event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    /// Per-channel multiplier applied to the light carried by `scattered`.
    pub attenuation: Color,
    /// Outgoing ray leaving the hit point.
    pub scattered: Ray,
}

impl Material {
    /// Diffuse material with the given albedo.
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Metal with the given albedo; `fuzz` is clamped to [0, 1].
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Glass-like material with the given index of refraction.
    pub fn dielectric(refraction_index: f32) -> Self {
        Material::Dielectric { refraction_index }
    }

    /// Hemisphere-sampling diffuse material.
    pub fn lambertian_modified(albedo: Color) -> Self {
        Material::LambertianModified { albedo }
    }

    /// Ring-fuzz metal; `fuzz` is clamped to [0, 1].
    pub fn metal_modified(albedo: Color, fuzz: f32) -> Self {
        Material::MetalModified {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Threshold-reflecting dielectric.
    pub fn dielectric_modified(refraction_index: f32) -> Self {
        Material::DielectricModified { refraction_index }
    }

    /// Compute ray scattering for this material.
    ///
    /// Returns `None` when the ray is absorbed.
    pub fn scatter<R: Rng + ?Sized>(
        &self,
        r_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut R,
    ) -> Option<Scatter> {
        match *self {
            Material::Lambertian { albedo } => {
                let direction = rec.normal + random::random_unit_vector(rng);
                Some(diffuse(albedo, rec, direction))
            }
            Material::LambertianModified { albedo } => {
                let direction = random::random_in_hemisphere(rng, rec.normal);
                Some(diffuse(albedo, rec, direction))
            }
            Material::Metal { albedo, fuzz } => {
                let offset = fuzz * random::random_in_unit_sphere(rng);
                specular(albedo, offset, r_in, rec)
            }
            Material::MetalModified { albedo, fuzz } => {
                let offset = fuzz * random::random_unit_vector(rng);
                specular(albedo, offset, r_in, rec)
            }
            Material::Dielectric { refraction_index } => {
                let threshold = random::random_f32(rng);
                Some(dielectric(refraction_index, threshold, r_in, rec))
            }
            Material::DielectricModified { refraction_index } => Some(dielectric(
                refraction_index,
                MODIFIED_REFLECTANCE_THRESHOLD,
                r_in,
                rec,
            )),
        }
    }
}

/// Diffuse bounce, falling back to the normal for degenerate directions.
fn diffuse(albedo: Color, rec: &HitRecord<'_>, direction: Vec3A) -> Scatter {
    let direction = if direction.near_zero() {
        rec.normal
    } else {
        direction
    };
    Scatter {
        attenuation: albedo,
        scattered: Ray::new(rec.p, direction),
    }
}

/// Mirror reflection perturbed by `offset`; absorbed if it leaves below the surface.
fn specular(albedo: Color, offset: Vec3A, r_in: &Ray, rec: &HitRecord<'_>) -> Option<Scatter> {
    let reflected = r_in.direction.normalize().reflect(rec.normal);
    let scattered = Ray::new(rec.p, reflected + offset);
    (scattered.direction.dot(rec.normal) > 0.0).then_some(Scatter {
        attenuation: albedo,
        scattered,
    })
}

/// Reflect or refract through a dielectric interface.
///
/// Reflects on total internal reflection or when the Schlick reflectance
/// exceeds `threshold`.
fn dielectric(refraction_index: f32, threshold: f32, r_in: &Ray, rec: &HitRecord<'_>) -> Scatter {
    let refraction_ratio = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let unit_direction = r_in.direction.normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    let cannot_refract = refraction_ratio * sin_theta > 1.0;
    let direction = if cannot_refract || reflectance(cos_theta, refraction_ratio) > threshold {
        unit_direction.reflect(rec.normal)
    } else {
        unit_direction.refract(rec.normal, refraction_ratio)
    };

    Scatter {
        attenuation: Color::ONE,
        scattered: Ray::new(rec.p, direction),
    }
}

/// Compute Fresnel reflectance using Schlick's approximation.
pub fn reflectance(cosine: f32, refraction_ratio: f32) -> f32 {
    let r0 = (1.0 - refraction_ratio) / (1.0 + refraction_ratio);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    /// Yields the largest possible uniform draw, just below 1.0.
    struct AlmostOne;

    impl RngCore for AlmostOne {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0xff);
        }
    }

    /// Yields a uniform draw of exactly 0.0.
    struct Zero;

    impl RngCore for Zero {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    fn record(material: &Material, normal: Vec3A, front_face: bool) -> HitRecord<'_> {
        HitRecord {
            p: Vec3A::ZERO,
            normal,
            t: 1.0,
            front_face,
            material,
        }
    }

    #[test]
    fn mirror_metal_obeys_reflection_law() {
        let metal = Material::metal(Color::new(0.8, 0.6, 0.2), 0.0);
        let rec = record(&metal, Vec3A::Y, true);
        let d = Vec3A::new(1.0, -1.0, 0.0).normalize();
        let r_in = Ray::new(Vec3A::new(-1.0, 1.0, 0.0), d);

        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let s = metal.scatter(&r_in, &rec, &mut rng).unwrap();
        let expected = d - 2.0 * d.dot(Vec3A::Y) * Vec3A::Y;
        assert!(s.scattered.direction.abs_diff_eq(expected, 1e-6));
        assert_eq!(s.scattered.origin, rec.p);
        assert_eq!(s.attenuation, Color::new(0.8, 0.6, 0.2));
    }

    #[test]
    fn metal_fuzz_is_clamped() {
        assert_eq!(
            Material::metal(Color::ONE, 3.0),
            Material::Metal {
                albedo: Color::ONE,
                fuzz: 1.0
            }
        );
        assert_eq!(
            Material::metal_modified(Color::ONE, -1.0),
            Material::MetalModified {
                albedo: Color::ONE,
                fuzz: 0.0
            }
        );
    }

    #[test]
    fn metal_absorbs_rays_reflected_into_the_surface() {
        let metal = Material::metal(Color::ONE, 0.0);
        // A normal facing away from the reflected direction pushes it below the surface.
        let rec = record(&metal, Vec3A::NEG_Y, true);
        let r_in = Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::NEG_Y);
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        assert!(metal.scatter(&r_in, &rec, &mut rng).is_none());
    }

    #[test]
    fn modified_metal_perturbs_by_exactly_fuzz() {
        let metal = Material::metal_modified(Color::ONE, 0.3);
        let rec = record(&metal, Vec3A::Y, true);
        let r_in = Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::NEG_Y);
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        for _ in 0..100 {
            let s = metal.scatter(&r_in, &rec, &mut rng).unwrap();
            let offset = s.scattered.direction - Vec3A::Y;
            assert!((offset.length() - 0.3).abs() < 1e-5);
        }
    }

    #[test]
    fn unit_index_dielectric_does_not_bend() {
        let glass = Material::dielectric(1.0);
        for &front_face in &[true, false] {
            let rec = record(&glass, Vec3A::Y, front_face);
            for &x in &[0.0_f32, 0.3, 1.0, 3.0] {
                let d = Vec3A::new(x, -1.0, 0.2).normalize();
                let r_in = Ray::new(Vec3A::new(0.0, 1.0, 0.0), d);
                let s = glass.scatter(&r_in, &rec, &mut AlmostOne).unwrap();
                assert!(s.scattered.direction.abs_diff_eq(d, 1e-5));
                assert_eq!(s.attenuation, Color::ONE);
            }
        }
    }

    #[test]
    fn schlick_head_on_equals_r0() {
        for &ratio in &[1.0_f32, 1.0 / 1.5, 1.5, 2.4] {
            let r0 = (1.0 - ratio) / (1.0 + ratio);
            let r0 = r0 * r0;
            assert_eq!(reflectance(1.0, ratio), r0);
        }
        assert!((reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn total_internal_reflection_always_reflects() {
        let glass = Material::dielectric(1.5);
        // Leaving the glass at a shallow angle: 1.5 * sin(60°) > 1.
        let rec = record(&glass, Vec3A::Y, false);
        let d = Vec3A::new(3f32.sqrt(), -1.0, 0.0).normalize();
        let r_in = Ray::new(Vec3A::ZERO, d);
        let s = glass.scatter(&r_in, &rec, &mut AlmostOne).unwrap();
        assert!(s.scattered.direction.abs_diff_eq(d.reflect(Vec3A::Y), 1e-6));
    }

    #[test]
    fn dielectric_reflects_when_draw_below_reflectance() {
        let glass = Material::dielectric(1.5);
        let rec = record(&glass, Vec3A::Y, true);
        let r_in = Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::NEG_Y);
        // A zero draw is below R0 = 0.04, so even head-on rays reflect.
        let s = glass.scatter(&r_in, &rec, &mut Zero).unwrap();
        assert!(s.scattered.direction.abs_diff_eq(Vec3A::Y, 1e-6));
        // A draw near one refracts straight through.
        let s = glass.scatter(&r_in, &rec, &mut AlmostOne).unwrap();
        assert!(s.scattered.direction.abs_diff_eq(Vec3A::NEG_Y, 1e-6));
    }

    #[test]
    fn modified_dielectric_uses_fixed_threshold() {
        let glass = Material::dielectric_modified(1.5);
        let rec = record(&glass, Vec3A::Y, true);

        // Head-on: reflectance 0.04 stays below the threshold, so it refracts.
        let head_on = Ray::new(Vec3A::new(0.0, 1.0, 0.0), Vec3A::NEG_Y);
        let s = glass.scatter(&head_on, &rec, &mut Zero).unwrap();
        assert!(s.scattered.direction.abs_diff_eq(Vec3A::NEG_Y, 1e-6));

        // Grazing: reflectance exceeds the threshold, so it reflects.
        let d = Vec3A::new(1.0, -0.02, 0.0).normalize();
        assert!(reflectance(0.02, 1.0 / 1.5) > MODIFIED_REFLECTANCE_THRESHOLD);
        let grazing = Ray::new(Vec3A::ZERO, d);
        let s = glass.scatter(&grazing, &rec, &mut AlmostOne).unwrap();
        assert!(s.scattered.direction.abs_diff_eq(d.reflect(Vec3A::Y), 1e-5));
    }

    #[test]
    fn lambertian_always_scatters_off_the_surface() {
        let albedo = Color::new(0.1, 0.2, 0.5);
        let diffuse = Material::lambertian(albedo);
        let rec = record(&diffuse, Vec3A::Z, true);
        let r_in = Ray::new(Vec3A::new(0.0, 0.0, 1.0), Vec3A::NEG_Z);
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        for _ in 0..1000 {
            let s = diffuse.scatter(&r_in, &rec, &mut rng).unwrap();
            assert_eq!(s.attenuation, albedo);
            assert!(!s.scattered.direction.near_zero());
            assert!(s.scattered.direction.dot(rec.normal) >= 0.0);
        }
    }

    #[test]
    fn modified_lambertian_stays_in_normal_hemisphere() {
        let diffuse = Material::lambertian_modified(Color::splat(0.5));
        let rec = record(&diffuse, Vec3A::X, true);
        let r_in = Ray::new(Vec3A::X, Vec3A::NEG_X);
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        for _ in 0..1000 {
            let s = diffuse.scatter(&r_in, &rec, &mut rng).unwrap();
            assert!(s.scattered.direction.dot(rec.normal) >= 0.0);
            assert!(!s.scattered.direction.near_zero());
        }
    }
}
