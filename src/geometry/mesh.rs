// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshedit Contributors

//! Indexed triangle mesh and exact-coordinate vertex welding

use super::BoundingBox;
use crate::error::{MeshError, Result};
use ahash::AHashMap;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Triangle mesh as a vertex array plus index triples.
///
/// This is the exchange format between generators, the STL codec, the
/// half-edge engine and any renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexedMesh {
    pub vertices: Vec<Point3<f32>>,
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    pub fn new(vertices: Vec<Point3<f32>>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f32>) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Add a triangle
    pub fn add_face(&mut self, face: [u32; 3]) {
        self.faces.push(face);
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get face count
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Check that every face index points into the vertex array
    pub fn validate(&self) -> Result<()> {
        let count = self.vertices.len();
        for (face, indices) in self.faces.iter().enumerate() {
            if let Some(&vertex) = indices.iter().find(|&&v| v as usize >= count) {
                return Err(MeshError::InvalidVertexIndex { face, vertex });
            }
        }
        Ok(())
    }

    /// The three corner positions of a face
    pub fn triangle(&self, face: usize) -> [Point3<f32>; 3] {
        let [a, b, c] = self.faces[face];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Flattened `x, y, z` floats for GPU upload
    pub fn vertex_buffer(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|p| [p.x, p.y, p.z])
            .collect()
    }

    /// Flattened triangle indices for GPU upload
    pub fn index_buffer(&self) -> Vec<u32> {
        self.faces.iter().flatten().copied().collect()
    }

    /// Compute bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
    }
}

/// Merges vertices whose coordinates compare exactly equal.
///
/// Keys are the `f32` bit patterns with signed zero folded to `+0.0`, so
/// `0.0` and `-0.0` weld while values one ulp apart stay distinct.
#[derive(Debug, Default)]
pub struct VertexWelder {
    lookup: AHashMap<[u32; 3], u32>,
    vertices: Vec<Point3<f32>>,
}

impl VertexWelder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index for `position`, inserting it on first sight
    pub fn insert(&mut self, position: Point3<f32>) -> u32 {
        let key = [weld_key(position.x), weld_key(position.y), weld_key(position.z)];
        let next = self.vertices.len() as u32;
        let index = *self.lookup.entry(key).or_insert(next);
        if index == next {
            self.vertices.push(position);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn into_vertices(self) -> Vec<Point3<f32>> {
        self.vertices
    }
}

fn weld_key(c: f32) -> u32 {
    // -0.0 + 0.0 == +0.0
    (c + 0.0).to_bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> IndexedMesh {
        IndexedMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn test_buffers_are_flattened() {
        let mesh = single_triangle();
        assert_eq!(
            mesh.vertex_buffer(),
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(mesh.index_buffer(), vec![0, 1, 2]);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut mesh = single_triangle();
        assert!(mesh.validate().is_ok());
        mesh.add_face([0, 1, 7]);
        match mesh.validate() {
            Err(MeshError::InvalidVertexIndex { face, vertex }) => {
                assert_eq!(face, 1);
                assert_eq!(vertex, 7);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_welder_merges_exact_duplicates() {
        let mut welder = VertexWelder::new();
        let a = welder.insert(Point3::new(1.0, 2.0, 3.0));
        let b = welder.insert(Point3::new(4.0, 5.0, 6.0));
        let c = welder.insert(Point3::new(1.0, 2.0, 3.0));
        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(c, 0);
        assert_eq!(welder.len(), 2);
    }

    #[test]
    fn test_welder_keeps_near_duplicates() {
        let mut welder = VertexWelder::new();
        welder.insert(Point3::new(1.0, 0.0, 0.0));
        welder.insert(Point3::new(1.0 + f32::EPSILON, 0.0, 0.0));
        welder.insert(Point3::new(0.0, 0.0, 1e-30));
        assert_eq!(welder.len(), 3);
    }

    #[test]
    fn test_welder_merges_signed_zero() {
        let mut welder = VertexWelder::new();
        let a = welder.insert(Point3::new(0.0, 1.0, 0.0));
        let b = welder.insert(Point3::new(-0.0, 1.0, -0.0));
        assert_eq!(a, b);
        assert_eq!(welder.len(), 1);
        // First occurrence is the stored position
        assert!(welder.into_vertices()[0].x.is_sign_positive());
    }
}
