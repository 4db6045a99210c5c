// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshedit Contributors

//! I/O module - STL reading and writing

pub mod stl;

pub use stl::{load as load_stl, save as save_stl};
