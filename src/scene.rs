//! Hard-coded scenes and camera placements.

use std::sync::Arc;

use glam::Vec3A;
use log::debug;
use rand::Rng;
use serde::Deserialize;

use crate::camera::CameraConfig;
use crate::hittable::HittableList;
use crate::material::Material;
use crate::random;
use crate::sphere::Sphere;
use crate::vec::{Color, Point3};

/// Scenes the renderer knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Five feature spheres showing each material family and its modified variant.
    #[default]
    Showcase,
    /// Grid of small random spheres around three large ones.
    BookCover,
    /// Only the ground sphere.
    Ground,
}

impl SceneKind {
    /// Assemble the scene; only [`SceneKind::BookCover`] draws from `rng`.
    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> HittableList {
        let world = match self {
            SceneKind::Showcase => showcase(),
            SceneKind::BookCover => book_cover(rng),
            SceneKind::Ground => ground_only(),
        };
        debug!("built {:?} scene with {} objects", self, world.len());
        world
    }
}

fn ground(world: &mut HittableList, albedo: Color) {
    world.add(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Material::lambertian(albedo)),
    ));
}

/// A single diffuse ground sphere of radius 1000 touching the origin.
pub fn ground_only() -> HittableList {
    let mut world = HittableList::new();
    ground(&mut world, Color::splat(0.5));
    world
}

/// Dark ground with five spheres lined up along the x axis.
pub fn showcase() -> HittableList {
    let mut world = HittableList::new();
    ground(&mut world, Color::splat(0.3));

    let spheres = [
        (
            Point3::new(3.0, 1.0, -1.0),
            0.3,
            Material::metal_modified(Color::new(0.7, 0.6, 0.5), 0.3),
        ),
        (
            Point3::new(2.0, 1.0, -0.5),
            0.5,
            Material::dielectric_modified(1.5),
        ),
        (
            Point3::new(0.5, 1.0, 0.0),
            0.7,
            Material::lambertian_modified(Color::new(0.8, 0.5, 0.3)),
        ),
        (
            Point3::new(-1.5, 1.0, 1.0),
            0.9,
            Material::metal(Color::new(0.7, 0.6, 0.5), 0.3),
        ),
        (Point3::new(-4.0, 1.0, 2.0), 1.1, Material::dielectric(1.7)),
    ];
    for (center, radius, material) in spheres {
        world.add(Sphere::new(center, radius, Arc::new(material)));
    }

    world
}

/// The book cover scene with random spheres.
pub fn book_cover<R: Rng + ?Sized>(rng: &mut R) -> HittableList {
    let mut world = HittableList::new();
    ground(&mut world, Color::splat(0.5));

    let glass = Arc::new(Material::dielectric(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random::random_f32(rng);
            let center = Point3::new(
                a as f32 + 0.9 * random::random_f32(rng),
                0.2,
                b as f32 + 0.9 * random::random_f32(rng),
            );

            // Don't place spheres too close to the large feature spheres
            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = random::random_color(rng) * random::random_color(rng);
                Arc::new(Material::lambertian(albedo))
            } else if choose_mat < 0.95 {
                let albedo = random::random_color_range(rng, 0.5, 1.0);
                let fuzz = random::random_f32_range(rng, 0.0, 0.5);
                Arc::new(Material::metal(albedo, fuzz))
            } else {
                glass.clone()
            };
            world.add(Sphere::new(center, 0.2, material));
        }
    }

    world.add(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, glass));
    world.add(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::lambertian(Color::new(0.4, 0.2, 0.1))),
    ));
    world.add(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0)),
    ));

    world
}

/// Named camera placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CameraPreset {
    /// Low, far view across the scene.
    Wide,
    /// Close three-quarter view.
    Close,
    /// View along the row of spheres from the front.
    Side,
    /// Looking past the spheres towards the horizon.
    Horizon,
    /// High view looking down on the scene.
    #[default]
    Overhead,
}

impl CameraPreset {
    /// Camera settings for this preset at the given aspect ratio.
    pub fn config(self, aspect_ratio: f32) -> CameraConfig {
        let (lookfrom, lookat, vfov, focus_dist) = match self {
            CameraPreset::Wide => (
                Point3::new(13.0, 2.0, 2.0),
                Point3::ZERO,
                20.0,
                10.0,
            ),
            CameraPreset::Close => (
                Point3::new(3.0, 2.0, 6.0),
                Point3::new(0.0, 0.0, -1.0),
                90.0,
                5.0,
            ),
            CameraPreset::Side => (
                Point3::new(4.0, 1.0, -11.0),
                Point3::new(1.0, 1.0, 1.0),
                40.0,
                15.0,
            ),
            CameraPreset::Horizon => (
                Point3::new(7.0, 2.0, -2.0),
                Point3::new(-25.0, 0.0, 6.0),
                55.0,
                15.0,
            ),
            CameraPreset::Overhead => (
                Point3::new(15.0, 14.0, 6.0),
                Point3::new(0.0, 1.0, 0.0),
                20.0,
                10.0,
            ),
        };

        CameraConfig {
            lookfrom,
            lookat,
            vup: Vec3A::Y,
            vfov,
            aspect_ratio,
            aperture: 0.1,
            focus_dist,
        }
    }
}
