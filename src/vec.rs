//! Vector and color aliases over `glam::Vec3A`.
//!
//! The same SIMD vector type serves as a point, a direction and a linear RGB
//! color. Color channels are left unclamped until output encoding.

use glam::Vec3A;

/// Linear RGB color.
pub type Color = Vec3A;

/// Point in world space.
pub type Point3 = Vec3A;

/// Geometric helpers missing from `glam`.
pub trait Vec3Ext {
    /// True when every component is within `1e-8` of zero.
    fn near_zero(&self) -> bool;

    /// Mirror `self` about the surface normal `n`: `v - 2(v·n)n`.
    fn reflect(self, n: Self) -> Self;

    /// Refract the unit vector `self` through a surface with normal `n` using
    /// Snell's law, where `etai_over_etat` is the ratio of refractive indices.
    fn refract(self, n: Self, etai_over_etat: f32) -> Self;
}

impl Vec3Ext for Vec3A {
    fn near_zero(&self) -> bool {
        const S: f32 = 1e-8;
        self.abs().cmplt(Vec3A::splat(S)).all()
    }

    fn reflect(self, n: Self) -> Self {
        self - 2.0 * self.dot(n) * n
    }

    fn refract(self, n: Self, etai_over_etat: f32) -> Self {
        let cos_theta = (-self).dot(n).min(1.0);
        let r_out_perp = etai_over_etat * (self + cos_theta * n);
        let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
        r_out_perp + r_out_parallel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_zero_checks_every_component() {
        assert!(Vec3A::new(1e-9, -1e-9, 0.0).near_zero());
        assert!(!Vec3A::new(1e-9, 0.0, 1e-3).near_zero());
    }

    #[test]
    fn reflect_flips_normal_component() {
        let d = Vec3A::new(1.0, -1.0, 0.0);
        let r = d.reflect(Vec3A::Y);
        assert!(r.abs_diff_eq(Vec3A::new(1.0, 1.0, 0.0), 1e-6));
    }

    #[test]
    fn refract_with_unit_ratio_is_straight() {
        let d = Vec3A::new(0.6, -0.8, 0.0);
        let r = d.refract(Vec3A::Y, 1.0);
        assert!(r.abs_diff_eq(d, 1e-6));
    }
}
