//! Stochastic path integrator shared by the screen renderer and the
//! lightmap baker.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::bvh::Ray;
use crate::scene::RayScene;
use crate::util::{sampling, Vec4};

/// Throughput below this maximum channel value terminates the path.
const THROUGHPUT_EPSILON: f32 = 1e-5;

/// Estimate the radiance arriving along `ray`.
///
/// Iterative bounce loop: each hit adds the surface's emission weighted by
/// the current throughput, then picks the next direction as a blend between
/// a uniform hemisphere sample and the mirror reflection, weighted by
/// `smoothness` when the bounce comes out specular. Throughput is rescaled
/// so its largest color channel stays at one, and paths are cut once it
/// collapses (a bounded-growth scheme, not a true unbiased roulette). A
/// miss adds the environment term and ends the path.
pub fn trace_path(ray: &Ray, scene: &RayScene, max_bounces: u32, rng: &mut SmallRng) -> Vec4 {
    let mut throughput = Vec4::ONE;
    let mut radiance = Vec4::new(0.0, 0.0, 0.0, 1.0);
    let mut ray = *ray;

    for _ in 0..max_bounces {
        let Some(hit) = scene.intersect(&ray) else {
            radiance += scene.environment_light(&ray) * throughput;
            break;
        };

        let specular = if hit.material.specular_probability >= rng.random::<f32>() {
            1.0
        } else {
            0.0
        };

        ray.origin = hit.position;
        let diffuse_dir = sampling::hemisphere(hit.normal, rng);
        let specular_dir = ray.dir.reflect(hit.normal);
        ray.dir = diffuse_dir
            .lerp(specular_dir, hit.material.smoothness * specular)
            .normalize_or_zero();

        let emitted = hit.material.emission_color.truncate() * hit.material.emission_strength;
        radiance += emitted.extend(1.0) * throughput;
        throughput *= hit.color.lerp(hit.material.specular_color, specular);

        let peak = throughput.x.max(throughput.y).max(throughput.z);
        if peak <= THROUGHPUT_EPSILON {
            break;
        }
        throughput *= 1.0 / peak;
    }

    radiance
}
