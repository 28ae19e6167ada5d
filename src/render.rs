//! Progressive screen rendering through the pinhole camera, plus one-shot
//! preview renders for debugging geometry and hierarchies.

use rand::rngs::SmallRng;

use crate::bvh::{ray_aabb_distance, ray_triangle, Bvh, Ray, Triangle};
use crate::camera::RayCamera;
use crate::framebuffer::RayImage;
use crate::integrate::trace_path;
use crate::mesh::TriangleSoup;
use crate::scene::RayScene;
use crate::util::{sampling, Mat4, Vec2, Vec4};

/// Accumulate one pass into a persistent image.
///
/// Every pixel casts `samples` jittered rays (disk-distributed offsets
/// within the pixel footprint), averages them and blends the result into
/// the existing value with weight `1/(frames+1)`, the exact incremental
/// mean, so repeated calls on a static scene converge to the expected
/// radiance. The frame counter advances by one. Calling this while the
/// scene changes mixes statistics from different states.
pub fn accumulate(
    image: &mut RayImage,
    camera: &RayCamera,
    scene: &RayScene,
    max_bounces: u32,
    samples: u32,
    rng: &mut SmallRng,
) {
    let (w, h) = (image.width(), image.height());
    if w < 2 || h < 2 || samples == 0 {
        return;
    }

    let sx = 1.0 / (w - 1) as f32;
    let sy = 1.0 / (h - 1) as f32;
    let pixel_scale = Vec2::new(sx, sy);
    let color_scale = 1.0 / samples as f32;
    let weight = image.blend_weight();

    for j in 0..h {
        let py = sy * (h - 1 - j) as f32;
        for i in 0..w {
            let px = sx * (w - 1 - i) as f32;
            let point = camera.plane_point(px, py);

            let mut acc = Vec4::ZERO;
            for _ in 0..samples {
                let jitter = sampling::point_in_disk(rng) * pixel_scale;
                let offset = point + camera.right * jitter.x + camera.up * jitter.y;
                let ray = Ray::new(
                    camera.position,
                    (offset - camera.position).normalize_or_zero(),
                );
                acc += trace_path(&ray, scene, max_bounces, rng);
            }
            acc *= color_scale;

            let pixel = image.pixel_mut(i, j);
            *pixel = *pixel * (1.0 - weight) + acc * weight;
        }
    }
    image.advance_frame();
}

/// Render a fresh image in one call (square-jittered samples, no history).
///
/// The returned image reports `samples` frames so a follow-up
/// [`accumulate`] keeps the statistics consistent.
pub fn render_once(
    camera: &RayCamera,
    scene: &RayScene,
    max_bounces: u32,
    samples: u32,
    width: u32,
    height: u32,
    rng: &mut SmallRng,
) -> RayImage {
    let mut image = RayImage::new(width, height);
    if width < 2 || height < 2 || samples == 0 {
        return image;
    }

    let sx = 1.0 / (width - 1) as f32;
    let sy = 1.0 / (height - 1) as f32;
    let pixel_scale = Vec2::new(sx, sy);
    let color_scale = 1.0 / samples as f32;

    for j in 0..height {
        let py = sy * (height - 1 - j) as f32;
        for i in 0..width {
            let px = sx * (width - 1 - i) as f32;
            let point = camera.plane_point(px, py);

            let mut acc = Vec4::ZERO;
            for _ in 0..samples {
                let jitter = sampling::point_in_square(rng) * pixel_scale;
                let offset = point + camera.right * jitter.x + camera.up * jitter.y;
                let ray = Ray::new(
                    camera.position,
                    (offset - camera.position).normalize_or_zero(),
                );
                acc += trace_path(&ray, scene, max_bounces, rng);
            }
            *image.pixel_mut(i, j) = acc * color_scale;
        }
    }
    image.set_frames(samples);
    image
}

/// Debug render of a raw triangle soup by brute-force linear scan, hit
/// colors only. The camera ray is taken into mesh-local space through
/// `inv_model`.
pub fn render_soup_preview(
    camera: &RayCamera,
    soup: &TriangleSoup,
    inv_model: &Mat4,
    width: u32,
    height: u32,
) -> RayImage {
    render_preview(camera, inv_model, width, height, |ray| {
        if ray_aabb_distance(ray, &soup.bounds()) == f32::INFINITY {
            return None;
        }
        let mut best: Option<(f32, Vec4)> = None;
        for i in 0..soup.triangle_count() {
            let (v0, v1, v2) = soup.triangle(i);
            if let Some(hit) = ray_triangle(ray, &Triangle::new(v0, v1, v2)) {
                if best.map_or(true, |(d, _)| hit.distance < d) {
                    best = Some((hit.distance, hit.color));
                }
            }
        }
        best.map(|(_, c)| c)
    })
}

/// Debug render of a hierarchy, hit colors only.
pub fn render_bvh_preview(
    camera: &RayCamera,
    bvh: &Bvh,
    inv_model: &Mat4,
    width: u32,
    height: u32,
) -> RayImage {
    render_preview(camera, inv_model, width, height, |ray| {
        bvh.intersect(ray).map(|hit| hit.color)
    })
}

fn render_preview(
    camera: &RayCamera,
    inv_model: &Mat4,
    width: u32,
    height: u32,
    mut cast: impl FnMut(&Ray) -> Option<Vec4>,
) -> RayImage {
    let mut image = RayImage::new(width, height);
    image.clear();
    if width < 2 || height < 2 {
        return image;
    }

    let sx = 1.0 / (width - 1) as f32;
    let sy = 1.0 / (height - 1) as f32;

    for j in 0..height {
        let py = sy * (height - 1 - j) as f32;
        for i in 0..width {
            let px = sx * (width - 1 - i) as f32;
            let point = camera.plane_point(px, py);
            let ray = Ray::new(
                inv_model.transform_point3(camera.position),
                inv_model.transform_vector3((point - camera.position).normalize_or_zero()),
            );
            if let Some(color) = cast(&ray) {
                *image.pixel_mut(i, j) = color;
            }
        }
    }
    image.set_frames(1);
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{unit_cube, unit_cube_colored};
    use crate::scene::{RayMaterial, RayObject};
    use crate::util::Vec3;
    use rand::SeedableRng;

    fn looking_down_z() -> RayCamera {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        RayCamera::from_view_matrix(&view, std::f32::consts::FRAC_PI_2, 1.0, 1.0)
    }

    #[test]
    fn test_accumulate_advances_frames() {
        let scene = RayScene::new();
        let mut image = RayImage::new(4, 4);
        let mut rng = SmallRng::seed_from_u64(5);
        accumulate(&mut image, &looking_down_z(), &scene, 2, 1, &mut rng);
        assert_eq!(image.frames(), 1);
        accumulate(&mut image, &looking_down_z(), &scene, 2, 1, &mut rng);
        assert_eq!(image.frames(), 2);
    }

    #[test]
    fn test_accumulate_empty_scene_sees_sky() {
        let scene = RayScene::new();
        let mut image = RayImage::new(8, 8);
        let mut rng = SmallRng::seed_from_u64(5);
        accumulate(&mut image, &looking_down_z(), &scene, 2, 4, &mut rng);
        // every pixel received some sky radiance
        assert!(image.data().iter().all(|p| p.x > 0.0));
    }

    #[test]
    fn test_bvh_preview_sees_cube() {
        let (verts, inds) = unit_cube(
            Vec3::ONE,
            &[Vec4::X, Vec4::X, Vec4::X, Vec4::X, Vec4::X, Vec4::X],
        );
        let soup = crate::mesh::TriangleSoup::new(&verts, Some(&inds)).unwrap();
        let bvh = Bvh::build(&soup, 8);

        let image = render_bvh_preview(&looking_down_z(), &bvh, &Mat4::IDENTITY, 16, 16);
        // center pixel faces the +z red face
        let center = image.pixel(8, 8);
        assert!((center - Vec4::X).length() < 1e-5);
        // corner pixels miss and keep the opaque-black clear color
        assert_eq!(image.pixel(0, 0), Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(image.frames(), 1);
    }

    #[test]
    fn test_soup_and_bvh_previews_agree() {
        let (verts, inds) = unit_cube_colored(Vec3::ONE, Vec4::ONE);
        let soup = crate::mesh::TriangleSoup::new(&verts, Some(&inds)).unwrap();
        let bvh = Bvh::build(&soup, 8);

        let cam = looking_down_z();
        let a = render_soup_preview(&cam, &soup, &Mat4::IDENTITY, 12, 12);
        let b = render_bvh_preview(&cam, &bvh, &Mat4::IDENTITY, 12, 12);
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn test_render_once_matches_static_average() {
        let mut scene = RayScene::new();
        let (verts, inds) = unit_cube_colored(Vec3::ONE, Vec4::ONE);
        let soup = crate::mesh::TriangleSoup::new(&verts, Some(&inds)).unwrap();
        let id = scene.add_bvh(Bvh::build(&soup, 8));
        scene.add_object(RayObject::new(
            id,
            Mat4::IDENTITY,
            RayMaterial {
                emission_color: Vec4::ONE,
                emission_strength: 2.0,
                ..Default::default()
            },
        ));

        let mut rng = SmallRng::seed_from_u64(11);
        let image = render_once(&looking_down_z(), &scene, 1, 4, 8, 8, &mut rng);
        assert_eq!(image.frames(), 4);
        // the cube fills the view center with its emission
        assert!(image.pixel(4, 4).x > 1.0);
    }
}
