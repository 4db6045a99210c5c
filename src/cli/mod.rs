// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshedit Contributors

//! CLI subsystem for the meshedit binary

pub mod reporter;
pub mod summary;

pub use reporter::Reporter;
pub use summary::{parse_vec3, MeshSummary};
