//! UV-space irradiance baking.
//!
//! Rasterizes each triangle of a scene object into its UV chart and runs
//! the path integrator once per covered texel sample, blending results into
//! the object's lightmap with the same running-average recurrence the
//! screen accumulator uses. Texels no triangle covers stay zero until the
//! post-filters in [`crate::framebuffer`] repair them.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::bvh::Ray;
use crate::framebuffer::RayImage;
use crate::integrate::trace_path;
use crate::scene::RayScene;
use crate::util::{sampling, Vec4};

/// Rays start this far off the surface to avoid re-hitting it.
const SURFACE_BIAS: f32 = 1e-4;

/// A lightmap paired with the index of the scene object it bakes.
pub struct LitObject {
    pub lightmap: RayImage,
    pub object: usize,
}

impl LitObject {
    pub fn new(width: u32, height: u32, object: usize) -> Self {
        Self {
            lightmap: RayImage::new(width, height),
            object,
        }
    }
}

/// Bake one accumulation pass of irradiance into `lit`'s lightmap.
///
/// For every triangle of the referenced object, UV-edge scan steps are
/// sized so neighboring samples land at most one texel apart; each sample
/// point inside the triangle (barycentric `s + t <= 1`) reconstructs its
/// world position and normal from the matching world-space edge
/// interpolation, then averages `samples` integrator runs over uniform
/// hemisphere directions, seeded with the object's own emission. A `lit`
/// whose object index is not in the scene is a no-op.
#[tracing::instrument(skip_all, fields(object = lit.object, samples))]
pub fn bake(
    lit: &mut LitObject,
    scene: &RayScene,
    max_bounces: u32,
    samples: u32,
    rng: &mut SmallRng,
) {
    let Some(obj) = scene.objects().get(lit.object) else {
        return;
    };
    let Some(bvh) = scene.bvh(obj.bvh) else {
        return;
    };
    if samples == 0 {
        return;
    }

    let (w, h) = (lit.lightmap.width(), lit.lightmap.height());
    let weight = lit.lightmap.blend_weight();
    let sample_scale = 1.0 / samples as f32;
    let own_emission =
        (obj.material.emission_color.truncate() * obj.material.emission_strength).extend(0.0);

    for tri in bvh.triangles() {
        let uv_e1 = tri.v1.uv - tri.v0.uv;
        let uv_e2 = tri.v2.uv - tri.v0.uv;

        let steps1 = ((uv_e1.x.abs() * w as f32).max(uv_e1.y.abs() * h as f32)).ceil() as u32;
        let steps2 = ((uv_e2.x.abs() * w as f32).max(uv_e2.y.abs() * h as f32)).ceil() as u32;
        let steps1 = steps1.max(1);
        let steps2 = steps2.max(1);

        let p0 = obj.transform.transform_point3(tri.v0.position);
        let p1 = obj.transform.transform_point3(tri.v1.position);
        let p2 = obj.transform.transform_point3(tri.v2.position);
        let n0 = obj.transform.transform_vector3(tri.v0.normal);
        let n1 = obj.transform.transform_vector3(tri.v1.normal);
        let n2 = obj.transform.transform_vector3(tri.v2.normal);

        for a in 0..=steps1 {
            let s = a as f32 / steps1 as f32;
            for b in 0..=steps2 {
                let t = b as f32 / steps2 as f32;
                if s + t > 1.0 {
                    break;
                }

                let uv = tri.v0.uv + uv_e1 * s + uv_e2 * t;
                let position = p0 + (p1 - p0) * s + (p2 - p0) * t;
                let normal = (n0 + (n1 - n0) * s + (n2 - n0) * t).normalize_or_zero();

                let mut acc = Vec4::ZERO;
                for _ in 0..samples {
                    let dir = sampling::hemisphere(normal, rng);
                    let ray = Ray::new(position + normal * SURFACE_BIAS, dir);
                    acc += trace_path(&ray, scene, max_bounces, rng);
                }

                let texel = own_emission + acc * sample_scale;
                lit.lightmap.add_color(texel, uv.x, uv.y, weight);
            }
        }
    }

    lit.lightmap.advance_frame();
}

/// Bake every `LitObject` in parallel, one task per object.
///
/// Each task reads the shared scene and writes only its own lightmap, so no
/// locking is needed; each gets an independent random stream derived from
/// `base_seed` and its position in the slice.
pub fn bake_all(
    lits: &mut [LitObject],
    scene: &RayScene,
    max_bounces: u32,
    samples: u32,
    base_seed: u64,
) {
    lits.par_iter_mut().enumerate().for_each(|(i, lit)| {
        let mut rng =
            SmallRng::seed_from_u64(base_seed ^ (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        bake(lit, scene, max_bounces, samples, &mut rng);
    });
}
