//! Ray-object intersection system.
//!
//! Defines the [`Hittable`] trait, the [`HitRecord`] produced by a successful
//! intersection test, the closed set of scene [`Object`]s and the
//! [`HittableList`] that holds them.

use glam::Vec3A;

use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;
use crate::sphere::Sphere;

/// Ray-object intersection information.
///
/// Contains intersection point, surface normal, distance and a borrow of the
/// material needed for shading.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point where the ray intersects the object
    pub p: Vec3A,
    /// Surface normal at the intersection point (unit vector, facing the ray)
    pub normal: Vec3A,
    /// Ray parameter of the intersection point
    pub t: f32,
    /// True if ray hits the front face, false if hits the back face
    pub front_face: bool,
    /// Material of the object at the hit point
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record whose normal points against the incident ray.
    ///
    /// `outward_normal` is assumed to have unit length.
    pub fn with_face_normal(
        r: &Ray,
        p: Vec3A,
        t: f32,
        outward_normal: Vec3A,
        material: &'a Material,
    ) -> Self {
        let front_face = r.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p,
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// Trait for objects that can be intersected by rays.
///
/// Implementors are immutable after scene construction, so they must be
/// `Sync + Send` to be shared across concurrent ray evaluations.
pub trait Hittable: Sync + Send {
    /// Nearest intersection with a ray parameter strictly inside `ray_t`.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// Every kind of geometry a scene can contain.
#[derive(Debug, Clone)]
pub enum Object {
    /// A sphere.
    Sphere(Sphere),
}

impl Hittable for Object {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Object::Sphere(sphere) => sphere.hit(r, ray_t),
        }
    }
}

impl From<Sphere> for Object {
    fn from(sphere: Sphere) -> Self {
        Object::Sphere(sphere)
    }
}

/// Collection of objects forming a scene.
///
/// Uses linear search for intersection testing.
#[derive(Debug, Clone, Default)]
pub struct HittableList {
    /// Objects in insertion order
    pub objects: Vec<Object>,
}

impl HittableList {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: impl Into<Object>) {
        self.objects.push(object.into());
    }

    /// Number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            let closest_so_far = closest.map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit(r, ray_t.with_max(closest_so_far)) {
                closest = Some(rec);
            }
        }

        closest
    }
}
