//! Pinhole camera model for the progressive renderer.

use crate::util::{Mat4, Vec3};

/// Camera basis plus a near plane the pixel grid is mapped onto.
#[derive(Debug, Clone, Copy)]
pub struct RayCamera {
    pub position: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
    /// Bottom-left corner of the near plane in camera-local units.
    pub bottom_left_local: Vec3,
    pub plane_width: f32,
    pub plane_height: f32,
}

impl RayCamera {
    /// Derive the camera from a view matrix, vertical fov (radians), near
    /// plane distance and aspect ratio.
    pub fn from_view_matrix(view: &Mat4, fov: f32, near_plane: f32, aspect_ratio: f32) -> Self {
        let inv_view = view.inverse();
        let right = -inv_view.x_axis.truncate();
        let up = inv_view.y_axis.truncate();
        let forward = -inv_view.z_axis.truncate();
        let position = inv_view.w_axis.truncate();

        let plane_height = near_plane * (fov * 0.5).tan() * 2.0;
        let plane_width = plane_height * aspect_ratio;

        Self {
            position,
            right,
            up,
            forward,
            bottom_left_local: Vec3::new(-plane_width / 2.0, -plane_height / 2.0, near_plane),
            plane_width,
            plane_height,
        }
    }

    /// World-space point on the near plane for normalized plane coordinates
    /// `(px, py)` in [0, 1].
    #[inline]
    pub fn plane_point(&self, px: f32, py: f32) -> Vec3 {
        let local = self.bottom_left_local
            + Vec3::new(self.plane_width * px, self.plane_height * py, 0.0);
        self.position + self.right * local.x + self.up * local.y + self.forward * local.z
    }
}
