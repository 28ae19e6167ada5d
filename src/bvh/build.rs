//! Midpoint-split BVH builder.
//!
//! At every node the box is split at the midpoint of its longest axis and
//! each triangle goes to whichever half-box center its centroid is closer
//! to; the child boxes are then refit to tightly enclose the full geometry
//! of their triangles, not just the centroids. A node stays a leaf when it
//! holds fewer than [`LEAF_THRESHOLD`] triangles, the depth limit is
//! reached, or the split would leave one side empty.

use crate::mesh::TriangleSoup;
use crate::util::Aabb;

use super::node::{Bvh, BvhNode, Triangle};

/// Nodes with fewer triangles than this are never split.
const LEAF_THRESHOLD: usize = 6;

impl Bvh {
    /// Build a hierarchy from a triangle soup.
    ///
    /// Triangles are copied in; the soup borrow ends with this call.
    /// Deterministic for a fixed triangle order and `max_depth`. An empty
    /// soup yields a trivial, always-missing hierarchy.
    #[tracing::instrument(skip_all, fields(tri_count = soup.triangle_count(), max_depth))]
    pub fn build(soup: &TriangleSoup, max_depth: u32) -> Bvh {
        let n = soup.triangle_count();
        let mut triangles = Vec::with_capacity(n);
        for i in 0..n {
            let (v0, v1, v2) = soup.triangle(i);
            triangles.push(Triangle::new(v0, v1, v2));
        }

        if n == 0 {
            return Bvh {
                triangles,
                nodes: vec![BvhNode::leaf(Aabb::EMPTY, 0, 0)],
                tri_indices: Vec::new(),
            };
        }

        let tri_bounds: Vec<Aabb> = triangles.iter().map(|t| t.bounds()).collect();
        let mut tri_indices: Vec<u32> = (0..n as u32).collect();
        let mut nodes: Vec<BvhNode> = Vec::with_capacity(2 * n);
        nodes.push(BvhNode::leaf(Aabb::EMPTY, 0, 0)); // root placeholder

        struct Task {
            node_idx: usize,
            start: usize,
            end: usize, // exclusive
            depth: u32,
        }

        let mut stack = vec![Task {
            node_idx: 0,
            start: 0,
            end: n,
            depth: 0,
        }];
        let mut leaf_count = 0u32;
        let mut deepest = 0u32;

        while let Some(task) = stack.pop() {
            let Task {
                node_idx,
                start,
                end,
                depth,
            } = task;
            let count = end - start;
            deepest = deepest.max(depth);

            // tight box over the full geometry of this range
            let mut node_aabb = Aabb::EMPTY;
            for &idx in &tri_indices[start..end] {
                node_aabb.grow(&tri_bounds[idx as usize]);
            }

            if count < LEAF_THRESHOLD || depth >= max_depth {
                nodes[node_idx] = BvhNode::leaf(node_aabb, start as u32, count as u32);
                leaf_count += 1;
                continue;
            }

            // split the box at the midpoint of its longest axis; triangles
            // go to the half whose center their centroid is nearest
            let axis = node_aabb.longest_axis();
            let (lower, upper) = node_aabb.split(axis, node_aabb.center()[axis]);
            let c_lower = lower.center();
            let c_upper = upper.center();

            let mid = start
                + partition(&mut tri_indices[start..end], |&idx| {
                    let c = triangles[idx as usize].centroid;
                    c.distance_squared(c_lower) < c.distance_squared(c_upper)
                });

            if mid == start || mid == end {
                // one side would be empty and the other identical to this
                // node, so it stays a leaf
                nodes[node_idx] = BvhNode::leaf(node_aabb, start as u32, count as u32);
                leaf_count += 1;
                continue;
            }

            let left_idx = nodes.len();
            nodes.push(BvhNode::leaf(Aabb::EMPTY, 0, 0));
            nodes.push(BvhNode::leaf(Aabb::EMPTY, 0, 0));
            nodes[node_idx] = BvhNode::internal(node_aabb, left_idx as u32);

            stack.push(Task {
                node_idx: left_idx + 1,
                start: mid,
                end,
                depth: depth + 1,
            });
            stack.push(Task {
                node_idx: left_idx,
                start,
                end: mid,
                depth: depth + 1,
            });
        }

        tracing::debug!(
            nodes = nodes.len(),
            leaves = leaf_count,
            depth = deepest,
            "built bvh"
        );

        Bvh {
            triangles,
            nodes,
            tri_indices,
        }
    }
}

/// Partition slice in-place. Returns count of elements where predicate is true.
fn partition<T, F>(slice: &mut [T], pred: F) -> usize
where
    F: Fn(&T) -> bool,
{
    let mut left = 0;
    let mut right = slice.len();
    while left < right {
        if pred(&slice[left]) {
            left += 1;
        } else {
            right -= 1;
            slice.swap(left, right);
        }
    }
    left
}
