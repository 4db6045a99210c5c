// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshedit Contributors

//! Procedural primitive tessellation
//!
//! Each shape maps its parameters to an [`IndexedMesh`]. Cube, pyramid and
//! cylinder are closed and consistently wound outward; the sphere is a
//! latitude/longitude grid whose seam column is duplicated rather than welded
//! and whose pole rows contain zero-area triangles.

use super::IndexedMesh;
use crate::error::{MeshError, Result};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Geometric primitives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Cube {
        size: f32,
        origin: Point3<f32>,
    },
    Pyramid {
        base_size: f32,
        height: f32,
        origin: Point3<f32>,
    },
    Cylinder {
        radius: f32,
        height: f32,
        sectors: u32,
        origin: Point3<f32>,
    },
    Sphere {
        radius: f32,
        level: u32,
        origin: Point3<f32>,
    },
}

impl Primitive {
    pub fn cube(size: f32, origin: Point3<f32>) -> Self {
        Self::Cube { size, origin }
    }

    pub fn pyramid(base_size: f32, height: f32, origin: Point3<f32>) -> Self {
        Self::Pyramid {
            base_size,
            height,
            origin,
        }
    }

    pub fn cylinder(radius: f32, height: f32, sectors: u32, origin: Point3<f32>) -> Self {
        Self::Cylinder {
            radius,
            height,
            sectors,
            origin,
        }
    }

    pub fn sphere(radius: f32, level: u32, origin: Point3<f32>) -> Self {
        Self::Sphere {
            radius,
            level,
            origin,
        }
    }

    /// Number of triangles `tessellate` will produce
    pub fn expected_face_count(&self) -> usize {
        match self {
            Self::Cube { .. } => 12,
            Self::Pyramid { .. } => 6,
            Self::Cylinder { sectors, .. } => 4 * *sectors as usize,
            Self::Sphere { level, .. } => 2 * (*level as usize).pow(2),
        }
    }

    /// Generate the vertex and face arrays for this shape.
    ///
    /// Fails with [`MeshError::InvalidParameter`] before doing any work when a
    /// dimension is not strictly positive.
    pub fn tessellate(&self) -> Result<IndexedMesh> {
        self.validate()?;
        let mesh = match self {
            Self::Cube { size, origin } => generate_cube_mesh(*size, origin),
            Self::Pyramid {
                base_size,
                height,
                origin,
            } => generate_pyramid_mesh(*base_size, *height, origin),
            Self::Cylinder {
                radius,
                height,
                sectors,
                origin,
            } => generate_cylinder_mesh(*radius, *height, *sectors, origin),
            Self::Sphere {
                radius,
                level,
                origin,
            } => generate_sphere_mesh(*radius, *level, origin),
        };
        tracing::debug!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "tessellated {:?}",
            self
        );
        Ok(mesh)
    }

    fn validate(&self) -> Result<()> {
        match self {
            Self::Cube { size, .. } => positive("size", *size),
            Self::Pyramid {
                base_size, height, ..
            } => {
                positive("base_size", *base_size)?;
                positive("height", *height)
            }
            Self::Cylinder {
                radius,
                height,
                sectors,
                ..
            } => {
                positive("radius", *radius)?;
                positive("height", *height)?;
                if *sectors < 3 {
                    return Err(MeshError::invalid_param(
                        "sectors",
                        sectors,
                        "at least 3 sectors are required",
                    ));
                }
                Ok(())
            }
            Self::Sphere { radius, level, .. } => {
                positive("radius", *radius)?;
                if *level == 0 {
                    return Err(MeshError::invalid_param(
                        "level",
                        level,
                        "tessellation level must be positive",
                    ));
                }
                Ok(())
            }
        }
    }
}

fn positive(name: &'static str, value: f32) -> Result<()> {
    // NaN fails this comparison too
    if value > 0.0 {
        Ok(())
    } else {
        Err(MeshError::invalid_param(name, value, "must be positive"))
    }
}

fn generate_cube_mesh(size: f32, origin: &Point3<f32>) -> IndexedMesh {
    let corners = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ];
    let vertices = corners
        .iter()
        .map(|c| origin + Vector3::new(c[0], c[1], c[2]) * size)
        .collect();

    let faces = vec![
        // Bottom (z-)
        [0, 2, 1],
        [0, 3, 2],
        // Top (z+)
        [4, 5, 6],
        [4, 6, 7],
        // Front (y-)
        [0, 1, 5],
        [0, 5, 4],
        // Back (y+)
        [3, 7, 6],
        [3, 6, 2],
        // Left (x-)
        [0, 4, 7],
        [0, 7, 3],
        // Right (x+)
        [1, 2, 6],
        [1, 6, 5],
    ];

    IndexedMesh::new(vertices, faces)
}

fn generate_pyramid_mesh(base_size: f32, height: f32, origin: &Point3<f32>) -> IndexedMesh {
    let half = base_size / 2.0;
    let vertices = vec![
        origin + Vector3::new(-half, -half, 0.0),
        origin + Vector3::new(half, -half, 0.0),
        origin + Vector3::new(half, half, 0.0),
        origin + Vector3::new(-half, half, 0.0),
        origin + Vector3::new(0.0, 0.0, height),
    ];

    let faces = vec![
        // Base, facing down
        [0, 2, 1],
        [0, 3, 2],
        // Sides
        [0, 1, 4],
        [1, 2, 4],
        [2, 3, 4],
        [3, 0, 4],
    ];

    IndexedMesh::new(vertices, faces)
}

fn generate_cylinder_mesh(
    radius: f32,
    height: f32,
    sectors: u32,
    origin: &Point3<f32>,
) -> IndexedMesh {
    let mut mesh = IndexedMesh::with_capacity(2 * sectors as usize + 2, 4 * sectors as usize);

    // Ring vertex 2*i is on the bottom, 2*i + 1 directly above it
    for i in 0..sectors {
        let theta = 2.0 * PI * i as f32 / sectors as f32;
        let x = radius * theta.cos();
        let y = radius * theta.sin();
        mesh.add_vertex(origin + Vector3::new(x, y, 0.0));
        mesh.add_vertex(origin + Vector3::new(x, y, height));
    }
    let bottom_center = mesh.add_vertex(*origin);
    let top_center = mesh.add_vertex(origin + Vector3::new(0.0, 0.0, height));

    let bottom = |i: u32| 2 * i;
    let top = |i: u32| 2 * i + 1;

    for i in 0..sectors {
        let next = (i + 1) % sectors;
        mesh.add_face([bottom_center, bottom(next), bottom(i)]);
    }

    for i in 0..sectors {
        let next = (i + 1) % sectors;
        mesh.add_face([top_center, top(i), top(next)]);
    }

    for i in 0..sectors {
        let next = (i + 1) % sectors;
        mesh.add_face([bottom(i), bottom(next), top(i)]);
        mesh.add_face([bottom(next), top(next), top(i)]);
    }

    mesh
}

fn generate_sphere_mesh(radius: f32, level: u32, origin: &Point3<f32>) -> IndexedMesh {
    let n = level;
    let ring = n + 1;
    let mut mesh = IndexedMesh::with_capacity((ring * ring) as usize, (2 * n * n) as usize);

    for i in 0..=n {
        let phi = PI * i as f32 / n as f32;
        for j in 0..=n {
            let theta = 2.0 * PI * j as f32 / n as f32;
            let x = radius * phi.sin() * theta.cos();
            let y = radius * phi.sin() * theta.sin();
            let z = radius * phi.cos();
            mesh.add_vertex(origin + Vector3::new(x, y, z));
        }
    }

    for i in 0..n {
        for j in 0..n {
            let v0 = i * ring + j;
            let v1 = v0 + 1;
            let v2 = (i + 1) * ring + j;
            let v3 = v2 + 1;
            mesh.add_face([v0, v1, v2]);
            mesh.add_face([v1, v3, v2]);
        }
    }

    mesh
}

/// Split every triangle in two along the midpoint of its first edge.
///
/// Triangle `(v0, v1, v2)` becomes `(v0, m, v2)` and `(v1, m, v2)` where `m`
/// is the midpoint of `v0`-`v1`. Every output triangle gets three fresh
/// vertices; nothing is welded.
pub fn split_triangles(mesh: &IndexedMesh) -> Result<IndexedMesh> {
    mesh.validate()?;
    let mut out = IndexedMesh::with_capacity(6 * mesh.face_count(), 2 * mesh.face_count());

    for face in 0..mesh.face_count() {
        let [p0, p1, p2] = mesh.triangle(face);
        let mid = nalgebra::center(&p0, &p1);
        for corners in [[p0, mid, p2], [p1, mid, p2]] {
            let a = out.add_vertex(corners[0]);
            let b = out.add_vertex(corners[1]);
            let c = out.add_vertex(corners[2]);
            out.add_face([a, b, c]);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::calculate_triangle_normal;

    fn all_indices_valid(mesh: &IndexedMesh) -> bool {
        mesh.faces
            .iter()
            .flatten()
            .all(|&i| (i as usize) < mesh.vertex_count())
    }

    #[test]
    fn test_cube_generation() {
        let mesh = Primitive::cube(2.0, Point3::new(1.0, 0.0, 0.0))
            .tessellate()
            .unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 12);
        assert!(all_indices_valid(&mesh));

        let bbox = mesh.bounding_box();
        assert_eq!(bbox.min, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(bbox.max, Point3::new(3.0, 2.0, 2.0));
    }

    #[test]
    fn test_cube_winding_points_outward() {
        let mesh = Primitive::cube(1.0, Point3::origin()).tessellate().unwrap();
        let center = Point3::new(0.5, 0.5, 0.5);
        for face in 0..mesh.face_count() {
            let [a, b, c] = mesh.triangle(face);
            let normal = calculate_triangle_normal(&a, &b, &c);
            let centroid = Point3::from((a.coords + b.coords + c.coords) / 3.0);
            assert!(
                normal.dot(&(centroid - center)) > 0.0,
                "face {} winds inward",
                face
            );
        }
    }

    #[test]
    fn test_pyramid_generation() {
        let mesh = Primitive::pyramid(2.0, 3.0, Point3::origin())
            .tessellate()
            .unwrap();
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.face_count(), 6);
        assert!(all_indices_valid(&mesh));
        assert_eq!(mesh.vertices[4], Point3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_cylinder_generation() {
        let mesh = Primitive::cylinder(1.0, 2.0, 16, Point3::origin())
            .tessellate()
            .unwrap();
        assert_eq!(mesh.vertex_count(), 2 * 16 + 2);
        assert_eq!(mesh.face_count(), 4 * 16);
        assert!(all_indices_valid(&mesh));
    }

    #[test]
    fn test_cylinder_seam_wraps() {
        let sectors = 5;
        let mesh = Primitive::cylinder(1.0, 1.0, sectors, Point3::origin())
            .tessellate()
            .unwrap();
        // Last bottom fan triangle closes back to ring vertex 0
        let last_bottom = mesh.faces[(sectors - 1) as usize];
        assert_eq!(last_bottom, [2 * sectors, 0, 2 * (sectors - 1)]);
    }

    #[test]
    fn test_sphere_generation() {
        for level in [1, 2, 4, 12] {
            let mesh = Primitive::sphere(1.0, level, Point3::new(0.0, 0.0, 1.0))
                .tessellate()
                .unwrap();
            let n = level as usize;
            assert_eq!(mesh.vertex_count(), (n + 1) * (n + 1));
            assert_eq!(mesh.face_count(), 2 * n * n);
            assert!(all_indices_valid(&mesh));
        }
    }

    #[test]
    fn test_sphere_vertices_on_surface() {
        let origin = Point3::new(1.0, -2.0, 0.5);
        let mesh = Primitive::sphere(3.0, 8, origin).tessellate().unwrap();
        for v in &mesh.vertices {
            assert!(((v - origin).norm() - 3.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_expected_face_count_matches() {
        let shapes = [
            Primitive::cube(1.0, Point3::origin()),
            Primitive::pyramid(1.0, 1.0, Point3::origin()),
            Primitive::cylinder(1.0, 1.0, 7, Point3::origin()),
            Primitive::sphere(1.0, 5, Point3::origin()),
        ];
        for shape in &shapes {
            let mesh = shape.tessellate().unwrap();
            assert_eq!(mesh.face_count(), shape.expected_face_count());
        }
    }

    #[test]
    fn test_invalid_parameters() {
        let invalid = [
            Primitive::cube(0.0, Point3::origin()),
            Primitive::cube(-1.0, Point3::origin()),
            Primitive::pyramid(1.0, 0.0, Point3::origin()),
            Primitive::pyramid(-2.0, 1.0, Point3::origin()),
            Primitive::cylinder(0.0, 1.0, 8, Point3::origin()),
            Primitive::cylinder(1.0, 1.0, 2, Point3::origin()),
            Primitive::sphere(1.0, 0, Point3::origin()),
            Primitive::sphere(f32::NAN, 4, Point3::origin()),
        ];
        for shape in &invalid {
            assert!(
                matches!(shape.tessellate(), Err(MeshError::InvalidParameter { .. })),
                "{:?} should be rejected",
                shape
            );
        }
    }

    #[test]
    fn test_split_triangles() {
        let mesh = IndexedMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(0.0, 2.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let split = split_triangles(&mesh).unwrap();
        assert_eq!(split.face_count(), 2);
        assert_eq!(split.vertex_count(), 6);
        assert_eq!(split.triangle(0)[1], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(split.triangle(1)[0], Point3::new(2.0, 0.0, 0.0));
    }
}
