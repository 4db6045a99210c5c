// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshedit Contributors

//! Error types for mesh generation, STL I/O and editing

use thiserror::Error;

/// Result type alias using [`MeshError`]
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors raised by the mesh library
#[derive(Error, Debug)]
pub enum MeshError {
    /// A shape dimension, radius, sector count or tessellation level is non-positive
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    /// A binary STL is shorter than its declared triangle count implies
    #[error("truncated STL input: expected {expected} bytes, found {actual}")]
    TruncatedInput { expected: u64, actual: u64 },

    /// A face references a vertex outside the vertex array
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex { face: usize, vertex: u32 },

    /// Half-edge connectivity violates a structural invariant
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// File-system error, propagated unchanged
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshError {
    /// Create an invalid parameter error
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_message() {
        let err = MeshError::invalid_param("radius", -1.0, "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid parameter: radius = -1 (must be positive)"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: MeshError = io.into();
        assert!(matches!(err, MeshError::Io(_)));
    }
}
