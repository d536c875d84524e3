//! Line-list wireframes of bounding volumes
//!
//! Output is a flat vertex buffer plus a `u16` line-list index buffer, ready
//! to be uploaded as-is by a debug renderer.

use crate::bounds::{Aabb, BoundingSphere, Frustum, OrientedBox};
use crate::config::DebugDrawConfig;
use crate::foundation::math::constants::TAU;
use crate::foundation::math::Vec3;

/// Edges between the eight corners of a box or frustum
///
/// Corner order follows [`crate::bounds::CORNER_SIGNS`]: two rings of four,
/// with corner `i` of the first ring facing corner `i + 4` of the second.
pub const BOX_EDGES: [[u16; 2]; 12] = [
    [0, 1], [1, 2], [2, 3], [3, 0],
    [4, 5], [5, 6], [6, 7], [7, 4],
    [0, 4], [1, 5], [2, 6], [3, 7],
];

/// Vertex layout of debug lines
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DebugVertex {
    /// World-space position
    pub position: [f32; 3],
    /// RGBA color
    pub color: [f32; 4],
}

impl DebugVertex {
    /// Vertex at `position` with `color`
    pub fn new(position: &Vec3, color: [f32; 4]) -> Self {
        Self { position: [position.x, position.y, position.z], color }
    }
}

/// Vertices and line-list indices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireframeMesh {
    /// Line endpoints
    pub vertices: Vec<DebugVertex>,
    /// Pairs of indices into `vertices`
    pub indices: Vec<u16>,
}

impl WireframeMesh {
    /// Twelve edges through eight corners in [`BOX_EDGES`] order
    pub fn from_corners(corners: &[Vec3; 8], color: [f32; 4]) -> Self {
        Self {
            vertices: corners.iter().map(|c| DebugVertex::new(c, color)).collect(),
            indices: BOX_EDGES.iter().flatten().copied().collect(),
        }
    }

    /// Outline of an axis-aligned box
    pub fn aabb(aabb: &Aabb, color: [f32; 4]) -> Self {
        Self::from_corners(&aabb.corners(), color)
    }

    /// Outline of an oriented box
    pub fn oriented_box(obb: &OrientedBox, color: [f32; 4]) -> Self {
        Self::from_corners(&obb.corners(), color)
    }

    /// Outline of a frustum, `None` if its planes do not close
    pub fn frustum(frustum: &Frustum, color: [f32; 4]) -> Option<Self> {
        frustum.corners().map(|corners| Self::from_corners(&corners, color))
    }

    /// Three great circles (XY, XZ and YZ planes) of `segments` points each
    ///
    /// `segments` is clamped so that all three rings stay indexable by `u16`.
    pub fn sphere(sphere: &BoundingSphere, segments: u16, color: [f32; 4]) -> Self {
        let segments = segments.clamp(3, u16::MAX / 3);
        let mut mesh = Self::default();

        for ring in 0..3_u16 {
            let base = ring * segments;
            for i in 0..segments {
                let angle = TAU * f32::from(i) / f32::from(segments);
                let (sin, cos) = angle.sin_cos();
                let offset = match ring {
                    0 => Vec3::new(cos, sin, 0.0),
                    1 => Vec3::new(cos, 0.0, sin),
                    _ => Vec3::new(0.0, cos, sin),
                };
                mesh.vertices.push(DebugVertex::new(&(sphere.center + offset * sphere.radius), color));
                mesh.indices.extend([base + i, base + (i + 1) % segments]);
            }
        }
        mesh
    }

    /// Number of line segments
    pub fn line_count(&self) -> usize {
        self.indices.len() / 2
    }

    /// Vertex buffer contents
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer contents
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Append `other`, rebasing its indices
    ///
    /// Returns `false` and leaves `self` untouched when the combined vertex
    /// count would not fit a `u16` index.
    #[must_use]
    pub fn append(&mut self, other: &Self) -> bool {
        let Ok(offset) = u16::try_from(self.vertices.len()) else { return false };
        if self.vertices.len() + other.vertices.len() > usize::from(u16::MAX) + 1 {
            return false;
        }
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + offset));
        true
    }
}

/// Collects wireframes for one frame using configured colors
#[derive(Debug, Clone, Default)]
pub struct WireframeBatch {
    config: DebugDrawConfig,
    mesh: WireframeMesh,
}

impl WireframeBatch {
    /// Empty batch drawing with `config`
    pub fn new(config: DebugDrawConfig) -> Self {
        Self { config, mesh: WireframeMesh::default() }
    }

    /// Queue an axis-aligned box
    pub fn add_aabb(&mut self, aabb: &Aabb) {
        self.push(&WireframeMesh::aabb(aabb, self.config.box_color));
    }

    /// Queue an oriented box
    pub fn add_oriented_box(&mut self, obb: &OrientedBox) {
        self.push(&WireframeMesh::oriented_box(obb, self.config.box_color));
    }

    /// Queue a sphere
    pub fn add_sphere(&mut self, sphere: &BoundingSphere) {
        self.push(&WireframeMesh::sphere(sphere, self.config.sphere_segments, self.config.sphere_color));
    }

    /// Queue a frustum
    pub fn add_frustum(&mut self, frustum: &Frustum) {
        match WireframeMesh::frustum(frustum, self.config.frustum_color) {
            Some(mesh) => self.push(&mesh),
            None => log::warn!("Skipping debug frustum: planes do not meet in eight corners"),
        }
    }

    /// The accumulated mesh
    pub fn mesh(&self) -> &WireframeMesh {
        &self.mesh
    }

    /// Hand over the accumulated mesh and start a new frame
    pub fn take(&mut self) -> WireframeMesh {
        std::mem::take(&mut self.mesh)
    }

    fn push(&mut self, mesh: &WireframeMesh) {
        if !self.mesh.append(mesh) {
            log::warn!(
                "Debug wireframe batch full ({} vertices), dropping {} more",
                self.mesh.vertices.len(),
                mesh.vertices.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::HALF_PI;
    use crate::foundation::math::{Mat4, Mat4Ext};
    use approx::assert_relative_eq;

    fn position(v: &DebugVertex) -> Vec3 {
        Vec3::new(v.position[0], v.position[1], v.position[2])
    }

    #[test]
    fn test_box_edges_have_unit_length() {
        let mesh = WireframeMesh::aabb(&Aabb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)), [1.0; 4]);
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.line_count(), 12);

        for edge in mesh.indices.chunks(2) {
            let a = position(&mesh.vertices[usize::from(edge[0])]);
            let b = position(&mesh.vertices[usize::from(edge[1])]);
            assert_relative_eq!((a - b).magnitude(), 1.0);
        }
    }

    #[test]
    fn test_sphere_rings_lie_on_surface() {
        let sphere = BoundingSphere::new(Vec3::new(1.0, 2.0, 3.0), 2.5);
        let mesh = WireframeMesh::sphere(&sphere, 16, [1.0; 4]);

        assert_eq!(mesh.vertices.len(), 48);
        assert_eq!(mesh.line_count(), 48);
        for vertex in &mesh.vertices {
            assert_relative_eq!((position(vertex) - sphere.center).magnitude(), 2.5, epsilon = 1e-5);
        }
        assert!(mesh.indices.iter().all(|i| usize::from(*i) < mesh.vertices.len()));
    }

    #[test]
    fn test_frustum_outline_uses_corners() {
        let frustum = Frustum::from_matrix(&Mat4::perspective_fov_lh(HALF_PI, 1.0, 1.0, 10.0));
        let mesh = WireframeMesh::frustum(&frustum, [1.0; 4]).unwrap();

        assert_eq!(mesh.vertices.len(), 8);
        assert_relative_eq!(position(&mesh.vertices[0]), Vec3::new(-1.0, -1.0, 1.0), epsilon = 1e-4);
        assert_relative_eq!(position(&mesh.vertices[6]), Vec3::new(10.0, 10.0, 10.0), epsilon = 1e-3);
    }

    #[test]
    fn test_buffers_cast_to_bytes() {
        let mesh = WireframeMesh::aabb(&Aabb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)), [0.5; 4]);
        assert_eq!(mesh.vertex_bytes().len(), 8 * std::mem::size_of::<DebugVertex>());
        assert_eq!(std::mem::size_of::<DebugVertex>(), 28);
        assert_eq!(mesh.index_bytes().len(), 24 * 2);
    }

    #[test]
    fn test_batch_rebases_indices_and_uses_config_colors() {
        let config = DebugDrawConfig::default();
        let mut batch = WireframeBatch::new(config);
        batch.add_aabb(&Aabb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)));
        batch.add_sphere(&BoundingSphere::new(Vec3::zeros(), 1.0));

        let mesh = batch.take();
        let segments = usize::from(config.sphere_segments);
        assert_eq!(mesh.vertices.len(), 8 + 3 * segments);
        assert_eq!(mesh.vertices[0].color, config.box_color);
        assert_eq!(mesh.vertices[8].color, config.sphere_color);
        assert_eq!(mesh.indices[24], 8);
        assert!(batch.mesh().vertices.is_empty());
    }

    #[test]
    fn test_append_refuses_index_overflow() {
        let big = WireframeMesh {
            vertices: vec![DebugVertex::new(&Vec3::zeros(), [1.0; 4]); 40_000],
            indices: Vec::new(),
        };
        let mut mesh = big.clone();
        assert!(!mesh.append(&big));
        assert_eq!(mesh.vertices.len(), 40_000);

        let obb = OrientedBox::from_aabb(&Aabb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)), &Mat4::identity());
        assert!(mesh.append(&WireframeMesh::oriented_box(&obb, [1.0; 4])));
        assert_eq!(mesh.indices[0], 40_000);
    }
}
