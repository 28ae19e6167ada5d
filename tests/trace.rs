//! Integration tests for hierarchy traversal and scene queries.

use glam::{Mat4, Vec2, Vec3, Vec4};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use raybake::bvh::{ray_triangle, Bvh, Ray};
use raybake::envmap::EnvironmentMap;
use raybake::mesh::{unit_cube_colored, TriangleSoup, Vertex};
use raybake::scene::{RayMaterial, RayObject, RayScene};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn random_soup(rng: &mut SmallRng, clusters: usize) -> Vec<Vertex> {
    let mut verts = Vec::new();
    for _ in 0..clusters {
        let center = Vec3::new(
            rng.random_range(-5.0..5.0f32),
            rng.random_range(-5.0..5.0f32),
            rng.random_range(-5.0..5.0f32),
        );
        for _ in 0..3 {
            let offset = Vec3::new(
                rng.random_range(-0.8..0.8f32),
                rng.random_range(-0.8..0.8f32),
                rng.random_range(-0.8..0.8f32),
            );
            let color = Vec4::new(
                rng.random::<f32>(),
                rng.random::<f32>(),
                rng.random::<f32>(),
                1.0,
            );
            verts.push(Vertex::new(center + offset, Vec3::Y, Vec2::ZERO, color));
        }
    }
    verts
}

#[test]
fn traversal_matches_bruteforce_on_random_soups() {
    init_tracing();
    for seed in [3u64, 17, 99] {
        let mut rng = SmallRng::seed_from_u64(seed);
        let verts = random_soup(&mut rng, 150);
        let soup = TriangleSoup::new(&verts, None).unwrap();
        let bvh = Bvh::build(&soup, 12);

        for _ in 0..200 {
            let ray = Ray::new(
                Vec3::new(
                    rng.random_range(-8.0..8.0f32),
                    rng.random_range(-8.0..8.0f32),
                    rng.random_range(-8.0..8.0f32),
                ),
                raybake::util::unit_vector(&mut rng),
            );

            let brute = bvh
                .triangles()
                .iter()
                .filter_map(|t| ray_triangle(&ray, t))
                .min_by(|a, b| a.distance.total_cmp(&b.distance));
            let fast = bvh.intersect(&ray);

            match (brute, fast) {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    assert!(
                        (a.distance - b.distance).abs() < 1e-4,
                        "closest distance must match brute force"
                    );
                    assert!(
                        (a.color - b.color).length() < 1e-4,
                        "interpolated color must match brute force"
                    );
                }
                (a, b) => panic!(
                    "hit disagreement: brute={:?} bvh={:?}",
                    a.map(|h| h.distance),
                    b.map(|h| h.distance)
                ),
            }
        }
    }
}

#[test]
fn single_ray_scene_query() {
    init_tracing();
    let mut scene = RayScene::new();
    let (verts, inds) = unit_cube_colored(Vec3::ONE, Vec4::ONE);
    let soup = TriangleSoup::new(&verts, Some(&inds)).unwrap();
    let id = scene.add_bvh(Bvh::build(&soup, 8));

    let material = RayMaterial {
        specular_probability: 0.25,
        ..Default::default()
    };
    scene.add_object(RayObject::new(
        id,
        Mat4::from_translation(Vec3::new(0.0, 0.0, -4.0)),
        material,
    ));

    let hit = scene
        .intersect(&Ray::new(Vec3::ZERO, Vec3::NEG_Z))
        .expect("cube in front of the ray");
    assert!((hit.distance - 3.5).abs() < 1e-5);
    assert!((hit.material.specular_probability - 0.25).abs() < 1e-6);

    assert!(scene.intersect(&Ray::new(Vec3::ZERO, Vec3::Z)).is_none());
}

#[test]
fn integrator_uses_panorama_on_miss() {
    init_tracing();
    let mut scene = RayScene::new();
    let red = Vec4::new(3.0, 0.0, 0.0, 1.0);
    scene.set_environment(EnvironmentMap::from_pixels(vec![red; 8], 4, 2).unwrap());

    let mut rng = SmallRng::seed_from_u64(1);
    let c = raybake::integrate::trace_path(
        &Ray::new(Vec3::ZERO, Vec3::Y),
        &scene,
        4,
        &mut rng,
    );
    assert!((c.x - 3.0).abs() < 1e-5);
    assert_eq!(c.y, 0.0);
}
