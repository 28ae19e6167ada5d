//! # raybake
//!
//! CPU ray-tracing core: a BVH spatial index, a stochastic path-tracing
//! integrator, a progressive screen accumulator and a UV-space irradiance
//! (lightmap) baker with seam-repair post-filters.
//!
//! Window handling, GPU upload, UI and asset loading are external
//! collaborators: this crate consumes plain vertex/index arrays and an
//! optional HDR panorama, and produces plain RGBA pixel buffers.
//!
//! ## Modules
//!
//! - [`util`] - Errors, math re-exports, sampling helpers
//! - [`mesh`] - Vertex/index triangle soup input
//! - [`bvh`] - Hierarchy build, primitive tests, traversal
//! - [`scene`] - Materials, object instances, collision resolution
//! - [`camera`] - Pinhole camera model
//! - [`envmap`] - Equirectangular HDR environment and procedural sky
//! - [`framebuffer`] - Progressive accumulation buffer and post-filters
//! - [`integrate`] - Path integrator
//! - [`render`] - Progressive screen rendering and debug previews
//! - [`bake`] - UV-space lightmap baking
//!
//! ## Example
//!
//! ```ignore
//! use raybake::prelude::*;
//!
//! let soup = TriangleSoup::new(&vertices, Some(&indices))?;
//! let mut scene = RayScene::new();
//! let id = scene.add_bvh(Bvh::build(&soup, 8));
//! scene.add_object(RayObject::new(id, Mat4::IDENTITY, material));
//!
//! let mut image = RayImage::new(320, 240);
//! let mut rng = SmallRng::seed_from_u64(1);
//! render::accumulate(&mut image, &camera, &scene, 4, 16, &mut rng);
//! ```

pub mod bake;
pub mod bvh;
pub mod camera;
pub mod envmap;
pub mod framebuffer;
pub mod integrate;
pub mod mesh;
pub mod render;
pub mod scene;
pub mod util;

// Re-export commonly used types
pub use util::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bake::{bake, bake_all, LitObject};
    pub use crate::bvh::{Bvh, Ray, RayHit};
    pub use crate::camera::RayCamera;
    pub use crate::envmap::EnvironmentMap;
    pub use crate::framebuffer::RayImage;
    pub use crate::integrate::trace_path;
    pub use crate::mesh::{TriangleSoup, Vertex};
    pub use crate::render::accumulate;
    pub use crate::scene::{BvhId, RayMaterial, RayObject, RayScene, SceneHit};
    pub use crate::util::{Error, Result};
}
