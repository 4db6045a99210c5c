// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshedit Contributors

//! Editing session: the entry points a renderer or input layer calls

use crate::error::Result;
use crate::geometry::{HalfEdgeMesh, IndexedMesh, Primitive, TriangleTransform};
use crate::io::stl;
use std::path::Path;

/// Owns one editable mesh for the lifetime of an editing session.
///
/// Edits are applied immediately and are not undoable.
pub struct Editor {
    mesh: HalfEdgeMesh,
    edits: usize,
}

impl Editor {
    /// Start a session on an indexed mesh
    pub fn new(mesh: &IndexedMesh) -> Result<Self> {
        Ok(Self {
            mesh: HalfEdgeMesh::from_mesh(mesh)?,
            edits: 0,
        })
    }

    /// Start a session on a tessellated primitive
    pub fn from_primitive(primitive: &Primitive) -> Result<Self> {
        Self::new(&primitive.tessellate()?)
    }

    /// Start a session on an STL file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(&stl::load(path)?)
    }

    /// Current vertex and active-face buffers
    pub fn get_vertices_faces(&self) -> IndexedMesh {
        self.mesh.get_vertices_faces()
    }

    /// Delete a face; unknown or already deleted faces are ignored
    pub fn delete_face(&mut self, face: usize) -> bool {
        let changed = self.mesh.delete_face(face);
        self.edits += changed as usize;
        changed
    }

    /// Transform one triangle; unknown or deleted faces and empty transforms
    /// are ignored
    pub fn transform_triangle(&mut self, face: usize, transform: &TriangleTransform) -> bool {
        let changed = self.mesh.transform_triangle(face, transform);
        self.edits += changed as usize;
        changed
    }

    /// Write the active faces to an STL file
    pub fn save(&self, path: impl AsRef<Path>, binary: bool, name: &str) -> Result<()> {
        stl::save(path, &self.get_vertices_faces(), binary, name)
    }

    /// Number of edits that changed the mesh
    pub fn edit_count(&self) -> usize {
        self.edits
    }

    pub fn mesh(&self) -> &HalfEdgeMesh {
        &self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    #[test]
    fn test_editor_session() {
        let mut editor = Editor::from_primitive(&Primitive::cube(1.0, Point3::origin())).unwrap();
        assert_eq!(editor.get_vertices_faces().face_count(), 12);

        assert!(editor.delete_face(0));
        assert!(!editor.delete_face(0));
        assert!(!editor.delete_face(99));
        assert!(editor.transform_triangle(
            1,
            &TriangleTransform::new().translate(Vector3::new(0.0, 0.0, 1.0))
        ));
        assert!(!editor.transform_triangle(1, &TriangleTransform::new()));

        assert_eq!(editor.edit_count(), 2);
        assert_eq!(editor.get_vertices_faces().face_count(), 11);
        assert!(editor.mesh().check_invariants().is_ok());
    }

    #[test]
    fn test_editor_rejects_invalid_primitive() {
        assert!(Editor::from_primitive(&Primitive::sphere(1.0, 0, Point3::origin())).is_err());
    }
}
