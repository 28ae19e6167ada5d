//! BVH node and triangle storage.
//!
//! Flat array layout:
//! - 32-byte Pod nodes, root at index 0
//! - triangles copied out of the source soup, addressed through a
//!   reordered index array so leaves are contiguous ranges

use bytemuck::{Pod, Zeroable};

use crate::mesh::Vertex;
use crate::util::{Aabb, Vec3};

/// A triangle owned by the BVH, with its centroid cached for splitting.
#[derive(Debug, Clone)]
pub struct Triangle {
    pub v0: Vertex,
    pub v1: Vertex,
    pub v2: Vertex,
    pub centroid: Vec3,
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        let centroid = (v0.position + v1.position + v2.position) / 3.0;
        Self {
            v0,
            v1,
            v2,
            centroid,
        }
    }

    /// Bounding box over the three vertices.
    pub fn bounds(&self) -> Aabb {
        let mut bb = Aabb::EMPTY;
        bb.grow_point(self.v0.position);
        bb.grow_point(self.v1.position);
        bb.grow_point(self.v2.position);
        bb
    }
}

/// Flat BVH node (32 bytes).
///
/// Internal node: `left_or_first` = left child index (the right child is
/// always adjacent at `left_or_first + 1`), `count` = 0.
/// Leaf node: `left_or_first` = first entry in the reordered triangle index
/// array, `count` > 0.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct BvhNode {
    pub aabb_min: [f32; 3],
    pub left_or_first: u32,
    pub aabb_max: [f32; 3],
    pub count: u32,
}

impl BvhNode {
    pub(crate) fn internal(aabb: Aabb, left: u32) -> Self {
        Self {
            aabb_min: aabb.min.to_array(),
            left_or_first: left,
            aabb_max: aabb.max.to_array(),
            count: 0,
        }
    }

    pub(crate) fn leaf(aabb: Aabb, first: u32, count: u32) -> Self {
        Self {
            aabb_min: aabb.min.to_array(),
            left_or_first: first,
            aabb_max: aabb.max.to_array(),
            count,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.count > 0
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(Vec3::from(self.aabb_min), Vec3::from(self.aabb_max))
    }
}

// 8 x 4 bytes, no padding
const _: () = assert!(std::mem::size_of::<BvhNode>() == 32);

/// A built hierarchy: owns its triangles and node arena.
///
/// Non-copyable; build once per mesh at scene setup and keep it for the
/// scene's lifetime. Multiple scene objects may reference the same `Bvh`.
pub struct Bvh {
    pub(crate) triangles: Vec<Triangle>,
    pub(crate) nodes: Vec<BvhNode>,
    pub(crate) tri_indices: Vec<u32>,
}

impl Bvh {
    /// The node arena (root at index 0).
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    /// The triangles this hierarchy was built over, in source order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Bounding box of the whole hierarchy.
    pub fn bounds(&self) -> Aabb {
        self.nodes[0].aabb()
    }

    /// Number of triangles indexed.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}
