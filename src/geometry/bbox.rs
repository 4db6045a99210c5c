// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshedit Contributors

//! Bounding box utilities

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl BoundingBox {
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Point3<f32>]) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox.expand_to_include(point);
        }
        bbox
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    pub fn expand_to_include(&mut self, point: &Point3<f32>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }
}
