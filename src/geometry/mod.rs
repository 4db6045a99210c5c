// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshedit Contributors

//! Geometry module - mesh representation, tessellation and editing

mod bbox;
mod halfedge;
mod mesh;
mod primitives;

pub use bbox::BoundingBox;
pub use halfedge::{Face, HalfEdge, HalfEdgeMesh, TriangleTransform, Vertex};
pub use mesh::{IndexedMesh, VertexWelder};
pub use primitives::{split_triangles, Primitive};
