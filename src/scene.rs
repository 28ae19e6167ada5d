//! Scene assembly: materials, transformed BVH instances, environment.
//!
//! The scene owns its hierarchies; objects reference them through stable
//! [`BvhId`] indices, so reordering or growing the tables never leaves a
//! dangling reference. Several objects may share one id (instancing).

use crate::bvh::{Bvh, Ray};
use crate::envmap::{sky_gradient, EnvironmentMap};
use crate::util::{Mat4, Vec2, Vec3, Vec4};

/// Surface response parameters for the path integrator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RayMaterial {
    pub emission_color: Vec4,
    pub specular_color: Vec4,
    pub emission_strength: f32,
    /// 0 = fully diffuse bounce, 1 = mirror bounce (when specular).
    pub smoothness: f32,
    /// Chance per hit that the bounce is specular.
    pub specular_probability: f32,
}

/// Stable index into the scene's BVH table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BvhId(pub usize);

/// A placed instance: hierarchy reference, world transform, material.
#[derive(Debug, Clone, Copy)]
pub struct RayObject {
    pub bvh: BvhId,
    pub transform: Mat4,
    pub inv_transform: Mat4,
    pub material: RayMaterial,
}

impl RayObject {
    pub fn new(bvh: BvhId, transform: Mat4, material: RayMaterial) -> Self {
        Self {
            bvh,
            transform,
            inv_transform: transform.inverse(),
            material,
        }
    }
}

/// A scene-level hit: surface attributes in world space plus the material
/// that produced them.
#[derive(Debug, Clone, Copy)]
pub struct SceneHit<'a> {
    pub material: &'a RayMaterial,
    pub position: Vec3,
    pub normal: Vec3,
    pub color: Vec4,
    pub uv: Vec2,
    pub distance: f32,
}

/// Object list, hierarchy table and optional environment panorama.
#[derive(Default)]
pub struct RayScene {
    bvhs: Vec<Bvh>,
    objects: Vec<RayObject>,
    environment: Option<EnvironmentMap>,
}

impl RayScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move a hierarchy into the scene, returning its stable id.
    pub fn add_bvh(&mut self, bvh: Bvh) -> BvhId {
        self.bvhs.push(bvh);
        BvhId(self.bvhs.len() - 1)
    }

    pub fn add_object(&mut self, object: RayObject) {
        self.objects.push(object);
    }

    pub fn objects(&self) -> &[RayObject] {
        &self.objects
    }

    pub fn bvh(&self, id: BvhId) -> Option<&Bvh> {
        self.bvhs.get(id.0)
    }

    pub fn set_environment(&mut self, env: EnvironmentMap) {
        self.environment = Some(env);
    }

    pub fn environment(&self) -> Option<&EnvironmentMap> {
        self.environment.as_ref()
    }

    /// Globally closest hit of a world-space ray across all objects.
    ///
    /// The ray is taken into each object's local space by the inverse model
    /// matrix with the direction left unnormalized, which keeps the ray
    /// parameter world-scaled and therefore comparable between objects. The
    /// winning hit is rebuilt on the world ray and its normal is mapped
    /// back through the object's model matrix. Objects with a dangling
    /// hierarchy id are skipped.
    pub fn intersect(&self, ray: &Ray) -> Option<SceneHit<'_>> {
        let mut best: Option<SceneHit> = None;
        let mut best_dist = f32::INFINITY;

        for obj in &self.objects {
            let Some(bvh) = self.bvh(obj.bvh) else {
                continue;
            };
            let local = Ray::new(
                obj.inv_transform.transform_point3(ray.origin),
                obj.inv_transform.transform_vector3(ray.dir),
            );
            if let Some(hit) = bvh.intersect(&local) {
                if hit.distance < best_dist {
                    best_dist = hit.distance;
                    best = Some(SceneHit {
                        material: &obj.material,
                        position: ray.at(hit.distance),
                        normal: obj
                            .transform
                            .transform_vector3(hit.normal)
                            .normalize_or_zero(),
                        color: hit.color,
                        uv: hit.uv,
                        distance: hit.distance,
                    });
                }
            }
        }
        best
    }

    /// Radiance arriving from the environment along `ray`: the HDR
    /// panorama when one is set, the procedural sky otherwise.
    pub fn environment_light(&self, ray: &Ray) -> Vec4 {
        match &self.environment {
            Some(env) => env.sample(ray.dir),
            None => sky_gradient(ray.dir.normalize_or_zero()),
        }
    }
}
