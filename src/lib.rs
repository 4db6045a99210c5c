// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshedit Contributors

//! Meshedit
//!
//! Triangle mesh editing built on a half-edge adjacency structure, an STL
//! codec with exact-coordinate vertex welding, and procedural tessellation of
//! cubes, pyramids, cylinders and spheres.

pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod io;
pub mod utils;

pub use config::EditorConfig;
pub use editor::Editor;
pub use error::{MeshError, Result};
pub use geometry::{HalfEdgeMesh, IndexedMesh, Primitive, TriangleTransform};
pub use io::{load_stl, save_stl};

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_generate_edit_view() {
        let mesh = Primitive::cylinder(1.0, 2.0, 8, Point3::origin())
            .tessellate()
            .unwrap();
        let mut he_mesh = HalfEdgeMesh::from_mesh(&mesh).unwrap();
        assert_eq!(he_mesh.boundary_half_edge_count(), 0);

        he_mesh.delete_face(0);
        assert_eq!(he_mesh.get_vertices_faces().face_count(), 31);
    }
}
