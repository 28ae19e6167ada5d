//! Stack-based nearest-first BVH traversal.
//!
//! Children are visited in near-to-far order and pruned against both the
//! miss sentinel and the closest hit found so far, so the reported hit is
//! the global nearest over the whole hierarchy.

use smallvec::SmallVec;

use super::intersect::{ray_aabb_distance, ray_triangle, Ray, RayHit};
use super::node::Bvh;

impl Bvh {
    /// Closest hit of `ray` against the hierarchy, or `None`.
    pub fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        if self.triangles.is_empty() {
            return None;
        }
        if ray_aabb_distance(ray, &self.nodes[0].aabb()) == f32::INFINITY {
            return None;
        }

        let mut best: Option<RayHit> = None;
        let mut best_dist = f32::INFINITY;

        // scratch only; carries no state between calls
        let mut stack: SmallVec<[u32; 64]> = SmallVec::new();
        stack.push(0);

        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx as usize];
            if node.is_leaf() {
                let first = node.left_or_first as usize;
                let count = node.count as usize;
                for &tri_idx in &self.tri_indices[first..first + count] {
                    if let Some(hit) = ray_triangle(ray, &self.triangles[tri_idx as usize]) {
                        if hit.distance < best_dist {
                            best_dist = hit.distance;
                            best = Some(hit);
                        }
                    }
                }
            } else {
                let left = node.left_or_first;
                let right = left + 1;
                let d_left = ray_aabb_distance(ray, &self.nodes[left as usize].aabb());
                let d_right = ray_aabb_distance(ray, &self.nodes[right as usize].aabb());

                // children that miss or start past the current best hit are
                // skipped; when both survive, the farther one goes on the
                // stack first so the nearer is processed first
                let visit_left = d_left < best_dist;
                let visit_right = d_right < best_dist;
                if visit_left && visit_right {
                    if d_left > d_right {
                        stack.push(left);
                        stack.push(right);
                    } else {
                        stack.push(right);
                        stack.push(left);
                    }
                } else if visit_left {
                    stack.push(left);
                } else if visit_right {
                    stack.push(right);
                }
            }
        }

        best
    }
}
