// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshedit Contributors

//! Mesh statistics shown by `meshedit info`, and argument parsing helpers

use crate::geometry::{HalfEdgeMesh, IndexedMesh};
use anyhow::{bail, Result};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Counts and extent of a mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshSummary {
    pub vertices: usize,
    pub faces: usize,
    pub boundary_edges: usize,
    pub bbox_min: Option<[f32; 3]>,
    pub bbox_max: Option<[f32; 3]>,
}

impl MeshSummary {
    pub fn from_mesh(mesh: &IndexedMesh) -> Result<Self> {
        let topology = HalfEdgeMesh::from_mesh(mesh)?;
        let bbox = mesh.bounding_box();
        let (bbox_min, bbox_max) = if bbox.is_empty() {
            (None, None)
        } else {
            (
                Some([bbox.min.x, bbox.min.y, bbox.min.z]),
                Some([bbox.max.x, bbox.max.y, bbox.max.z]),
            )
        };

        Ok(Self {
            vertices: mesh.vertex_count(),
            faces: mesh.face_count(),
            boundary_edges: topology.boundary_half_edge_count(),
            bbox_min,
            bbox_max,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.faces > 0 && self.boundary_edges == 0
    }
}

/// Parse `x,y,z` into a vector
pub fn parse_vec3(text: &str) -> Result<Vector3<f32>> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        bail!("expected three comma-separated numbers, got {:?}", text);
    }
    let mut out = [0.0f32; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid number {:?} in {:?}: {}", part, text, e))?;
    }
    Ok(Vector3::new(out[0], out[1], out[2]))
}
