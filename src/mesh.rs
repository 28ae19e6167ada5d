//! Collaborator-facing geometry store: a triangulated vertex soup with an
//! optional index buffer, already flattened by whatever loaded or generated
//! the mesh.

use bytemuck::{Pod, Zeroable};

use crate::util::{Aabb, Error, Result, Vec2, Vec3, Vec4};

/// A single mesh vertex: position, shading normal, lightmap UV, vertex color.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub color: Vec4,
}

impl Vertex {
    pub const fn new(position: Vec3, normal: Vec3, uv: Vec2, color: Vec4) -> Self {
        Self {
            position,
            normal,
            uv,
            color,
        }
    }
}

/// Borrowed triangle soup: vertices plus an optional index buffer.
///
/// Validated once on construction; the BVH builder copies triangles out of
/// it, so the borrow only needs to live for the build call.
#[derive(Debug, Clone, Copy)]
pub struct TriangleSoup<'a> {
    vertices: &'a [Vertex],
    indices: Option<&'a [u32]>,
    bounds: Aabb,
}

impl<'a> TriangleSoup<'a> {
    /// Wrap a vertex/index buffer pair.
    ///
    /// Without indices the vertex buffer itself must be a flat triangle
    /// list. All indices must address existing vertices.
    pub fn new(vertices: &'a [Vertex], indices: Option<&'a [u32]>) -> Result<Self> {
        match indices {
            Some(idx) => {
                if idx.len() % 3 != 0 {
                    return Err(Error::IndexCountNotTriangular(idx.len()));
                }
                for &i in idx {
                    if i as usize >= vertices.len() {
                        return Err(Error::IndexOutOfBounds {
                            index: i,
                            count: vertices.len(),
                        });
                    }
                }
            }
            None => {
                if vertices.len() % 3 != 0 {
                    return Err(Error::VertexCountNotTriangular(vertices.len()));
                }
            }
        }

        let mut bounds = Aabb::EMPTY;
        for v in vertices {
            bounds.grow_point(v.position);
        }

        Ok(Self {
            vertices,
            indices,
            bounds,
        })
    }

    /// Number of triangles in the soup.
    pub fn triangle_count(&self) -> usize {
        match self.indices {
            Some(idx) => idx.len() / 3,
            None => self.vertices.len() / 3,
        }
    }

    /// Fetch the three vertices of triangle `i` (copies).
    pub fn triangle(&self, i: usize) -> (Vertex, Vertex, Vertex) {
        match self.indices {
            Some(idx) => (
                self.vertices[idx[3 * i] as usize],
                self.vertices[idx[3 * i + 1] as usize],
                self.vertices[idx[3 * i + 2] as usize],
            ),
            None => (
                self.vertices[3 * i],
                self.vertices[3 * i + 1],
                self.vertices[3 * i + 2],
            ),
        }
    }

    /// Bounding box over all vertices.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }
}

/// Generate a unit cube centered at the origin with per-face normals and
/// colors, its six faces laid out as non-overlapping tiles of a 3x2 UV
/// atlas so the mesh can be lightmapped directly.
///
/// `face_colors` order: +Z, -X, -Y, +X, +Y, -Z.
pub fn unit_cube(size: Vec3, face_colors: &[Vec4; 6]) -> (Vec<Vertex>, Vec<u32>) {
    // (normal, tangent, bitangent) per face
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    // UV tile margin keeps neighboring charts from bleeding into each other
    const MARGIN: f32 = 0.02;

    let mut verts = Vec::with_capacity(24);
    let mut inds = Vec::with_capacity(36);

    for (face, &(n, t, b)) in FACES.iter().enumerate() {
        let normal = Vec3::from(n);
        let tangent = Vec3::from(t);
        let bitangent = Vec3::from(b);
        let color = face_colors[face];

        // 3x2 atlas tile for this face
        let tile = Vec2::new((face % 3) as f32 / 3.0, (face / 3) as f32 / 2.0);
        let tile_size = Vec2::new(1.0 / 3.0, 1.0 / 2.0);

        let base = verts.len() as u32;
        for (cu, cv) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            let corner =
                (normal * 0.5 + tangent * (cu - 0.5) + bitangent * (cv - 0.5)) * size;
            let uv = tile
                + tile_size * Vec2::new(cu, cv) * (1.0 - 2.0 * MARGIN)
                + tile_size * MARGIN;
            verts.push(Vertex::new(corner, normal, uv, color));
        }
        inds.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    (verts, inds)
}

/// Single-color convenience wrapper around [`unit_cube`].
pub fn unit_cube_colored(size: Vec3, color: Vec4) -> (Vec<Vertex>, Vec<u32>) {
    unit_cube(size, &[color; 6])
}
