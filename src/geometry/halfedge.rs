// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshedit Contributors

//! Half-edge mesh representation for interactive triangle editing
//!
//! Vertices, half-edges and faces live in three index-addressed arenas.
//! Cross references are plain indices: `next` and `opposite` describe the
//! topology, while `Vertex::half_edge` and `HalfEdge::face` are weak back
//! references that may point at a tombstoned record after deletions.
//!
//! Deleting a face tombstones it: the slot and its half-edges stay in the
//! arenas, so face indices handed out to callers never shift.

use super::IndexedMesh;
use crate::error::{MeshError, Result};
use crate::utils::math::{centroid, rotate_about, scale_about};
use ahash::AHashMap;
use nalgebra::{Point3, Vector3};

/// Vertex record
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    /// One outgoing half-edge, if any face used this vertex
    pub half_edge: Option<usize>,
}

/// Directed edge record, owned by exactly one face cycle
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge {
    /// Vertex this half-edge points to
    pub target: usize,
    /// Next half-edge around the face; cleared when the face is deleted
    pub next: Option<usize>,
    /// Antiparallel half-edge on the adjacent face
    pub opposite: Option<usize>,
    /// Owning face; cleared when the face is deleted
    pub face: Option<usize>,
}

/// Face record. `None` marks a deleted face.
#[derive(Debug, Clone, Copy)]
pub struct Face {
    pub half_edge: Option<usize>,
}

impl Face {
    pub fn is_active(&self) -> bool {
        self.half_edge.is_some()
    }
}

/// Optional components of a per-triangle transform.
///
/// Applied in the order translation, rotation, scale. Rotation angles are in
/// degrees about X, then Y, then Z.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TriangleTransform {
    pub translation: Option<Vector3<f32>>,
    pub rotation: Option<Vector3<f32>>,
    pub scale: Option<Vector3<f32>>,
}

impl TriangleTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(mut self, offset: Vector3<f32>) -> Self {
        self.translation = Some(offset);
        self
    }

    pub fn rotate(mut self, degrees: Vector3<f32>) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn scale(mut self, factors: Vector3<f32>) -> Self {
        self.scale = Some(factors);
        self
    }

    pub fn is_identity(&self) -> bool {
        self.translation.is_none() && self.rotation.is_none() && self.scale.is_none()
    }
}

/// Editable half-edge mesh
#[derive(Debug, Clone, Default)]
pub struct HalfEdgeMesh {
    vertices: Vec<Vertex>,
    half_edges: Vec<HalfEdge>,
    faces: Vec<Face>,
}

impl HalfEdgeMesh {
    /// Build adjacency from an indexed triangle mesh.
    ///
    /// Every face gets three half-edges `v0->v1`, `v1->v2`, `v2->v0`. A
    /// directed edge `(u, v)` is linked to an earlier unpaired `(v, u)`;
    /// edges without a partner stay on the boundary.
    pub fn from_mesh(mesh: &IndexedMesh) -> Result<Self> {
        mesh.validate()?;

        let mut he_mesh = Self {
            vertices: mesh
                .vertices
                .iter()
                .map(|&position| Vertex {
                    position,
                    half_edge: None,
                })
                .collect(),
            half_edges: Vec::with_capacity(3 * mesh.face_count()),
            faces: Vec::with_capacity(mesh.face_count()),
        };

        for (face_idx, face) in mesh.faces.iter().enumerate() {
            let base = he_mesh.half_edges.len();
            for k in 0..3 {
                let origin = face[k] as usize;
                he_mesh.half_edges.push(HalfEdge {
                    target: face[(k + 1) % 3] as usize,
                    next: Some(base + (k + 1) % 3),
                    opposite: None,
                    face: Some(face_idx),
                });
                // Last writer wins for vertices shared by several faces
                he_mesh.vertices[origin].half_edge = Some(base + k);
            }
            he_mesh.faces.push(Face {
                half_edge: Some(base),
            });
        }

        he_mesh.link_opposites(mesh);

        tracing::debug!(
            vertices = he_mesh.vertices.len(),
            faces = he_mesh.faces.len(),
            boundary = he_mesh.boundary_half_edge_count(),
            "built half-edge mesh"
        );

        Ok(he_mesh)
    }

    fn link_opposites(&mut self, mesh: &IndexedMesh) {
        // Directed (tail, head) -> half-edge still waiting for a partner
        let mut unpaired: AHashMap<(u32, u32), usize> =
            AHashMap::with_capacity(self.half_edges.len());

        for (face_idx, face) in mesh.faces.iter().enumerate() {
            for k in 0..3 {
                let he = 3 * face_idx + k;
                let tail = face[k];
                let head = face[(k + 1) % 3];

                if let Some(twin) = unpaired.remove(&(head, tail)) {
                    self.half_edges[he].opposite = Some(twin);
                    self.half_edges[twin].opposite = Some(he);
                } else {
                    unpaired.insert((tail, head), he);
                }
            }
        }
    }

    /// Flattened view of the mesh for rendering and export.
    ///
    /// All vertices are returned, including ones only used by deleted faces.
    /// Faces are re-derived from each active face's half-edge cycle, in slot
    /// order; deleted faces are skipped.
    pub fn get_vertices_faces(&self) -> IndexedMesh {
        let vertices = self.vertices.iter().map(|v| v.position).collect();
        let faces = (0..self.faces.len())
            .filter_map(|f| self.face_vertices(f))
            .map(|[a, b, c]| [a as u32, b as u32, c as u32])
            .collect();
        IndexedMesh::new(vertices, faces)
    }

    /// Vertex indices of an active face in their original winding order
    pub fn face_vertices(&self, face: usize) -> Option<[usize; 3]> {
        let h0 = self.faces.get(face)?.half_edge?;
        let h1 = self.half_edges[h0].next?;
        let h2 = self.half_edges[h1].next?;
        // h2 ends where h0 starts
        Some([
            self.half_edges[h2].target,
            self.half_edges[h0].target,
            self.half_edges[h1].target,
        ])
    }

    /// Delete a face.
    ///
    /// Out-of-range indices and already deleted faces are ignored. Returns
    /// whether a face was actually removed.
    pub fn delete_face(&mut self, face: usize) -> bool {
        let Some(entry) = self.faces.get(face).and_then(|f| f.half_edge) else {
            return false;
        };

        let mut cycle = [entry; 3];
        for k in 1..3 {
            match self.half_edges[cycle[k - 1]].next {
                Some(next) => cycle[k] = next,
                None => return false,
            }
        }

        for &he in &cycle {
            if let Some(twin) = self.half_edges[he].opposite.take() {
                self.half_edges[twin].opposite = None;
            }
        }

        for &he in &cycle {
            let record = &mut self.half_edges[he];
            record.next = None;
            record.face = None;
        }
        self.faces[face].half_edge = None;

        tracing::debug!(face, "deleted face");
        true
    }

    /// Transform the three vertices of a face in place.
    ///
    /// The pivot for rotation and scale is the triangle centroid after the
    /// translation step. Vertices are shared with neighbouring faces, so
    /// adjacent triangles move with them. Missing or deleted faces and empty
    /// transforms are ignored; returns whether anything was applied.
    pub fn transform_triangle(&mut self, face: usize, transform: &TriangleTransform) -> bool {
        if transform.is_identity() {
            return false;
        }
        let Some(corners) = self.face_vertices(face) else {
            return false;
        };

        // A degenerate face may repeat a vertex; move each vertex once
        let mut distinct: Vec<usize> = Vec::with_capacity(3);
        for v in corners {
            if !distinct.contains(&v) {
                distinct.push(v);
            }
        }

        let positions: Vec<Point3<f32>> = corners
            .iter()
            .map(|&v| self.vertices[v].position)
            .collect();
        let mut pivot = centroid(&positions);

        if let Some(offset) = transform.translation {
            for &v in &distinct {
                self.vertices[v].position += offset;
            }
            pivot += offset;
        }

        if let Some(degrees) = transform.rotation {
            for &v in &distinct {
                let p = &mut self.vertices[v].position;
                *p = rotate_about(p, &pivot, &degrees);
            }
        }

        if let Some(factors) = transform.scale {
            for &v in &distinct {
                let p = &mut self.vertices[v].position;
                *p = scale_about(p, &pivot, &factors);
            }
        }

        tracing::debug!(face, ?transform, "transformed triangle");
        true
    }

    /// Outgoing half-edge of a vertex, if it still belongs to an active face
    pub fn outgoing_half_edge(&self, vertex: usize) -> Option<usize> {
        let he = self.vertices.get(vertex)?.half_edge?;
        self.half_edges[he].face.map(|_| he)
    }

    /// Tail vertex of a half-edge that still belongs to an active face
    pub fn origin(&self, he: usize) -> Option<usize> {
        let next = self.half_edges.get(he)?.next?;
        let prev = self.half_edges[next].next?;
        Some(self.half_edges[prev].target)
    }

    pub fn vertex(&self, id: usize) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    pub fn half_edge(&self, id: usize) -> Option<&HalfEdge> {
        self.half_edges.get(id)
    }

    pub fn face(&self, id: usize) -> Option<&Face> {
        self.faces.get(id)
    }

    pub fn is_face_active(&self, face: usize) -> bool {
        self.faces.get(face).is_some_and(Face::is_active)
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of face slots, deleted ones included
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn active_face_count(&self) -> usize {
        self.faces.iter().filter(|f| f.is_active()).count()
    }

    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    /// Half-edges of active faces that have no opposite
    pub fn boundary_half_edge_count(&self) -> usize {
        self.half_edges
            .iter()
            .filter(|he| he.face.is_some() && he.opposite.is_none())
            .count()
    }

    /// Verify cycle length and opposite symmetry for every active face
    pub fn check_invariants(&self) -> Result<()> {
        for (face_idx, face) in self.faces.iter().enumerate() {
            let Some(entry) = face.half_edge else {
                continue;
            };

            let mut he = entry;
            for step in 0..3 {
                let record = &self.half_edges[he];
                if record.face != Some(face_idx) {
                    return Err(invariant_error(format!(
                        "half-edge {} of face {} points at face {:?}",
                        he, face_idx, record.face
                    )));
                }
                if let Some(twin) = record.opposite {
                    if self.half_edges[twin].opposite != Some(he) {
                        return Err(invariant_error(format!(
                            "opposite link {} -> {} is one-sided",
                            he, twin
                        )));
                    }
                }
                he = match record.next {
                    Some(next) => next,
                    None => {
                        return Err(invariant_error(format!(
                            "face {} cycle broken after {} steps",
                            face_idx,
                            step + 1
                        )))
                    }
                };
            }
            if he != entry {
                return Err(invariant_error(format!(
                    "face {} cycle does not close after 3 steps",
                    face_idx
                )));
            }
        }
        Ok(())
    }
}

fn invariant_error(message: String) -> MeshError {
    MeshError::InvalidTopology(message)
}
