// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshedit Contributors

//! Math utilities: triangle normals and affine transforms about a pivot

use nalgebra::{Point3, Rotation3, Vector3};

/// Calculate the unit normal of a triangle given three vertices.
///
/// Follows the right-hand rule on `(p1 - p0) x (p2 - p0)`. A degenerate
/// triangle yields the zero vector rather than NaNs.
pub fn calculate_triangle_normal(
    p0: &Point3<f32>,
    p1: &Point3<f32>,
    p2: &Point3<f32>,
) -> Vector3<f32> {
    let v1 = p1 - p0;
    let v2 = p2 - p0;
    let normal = v1.cross(&v2);
    let norm = normal.norm();
    if norm == 0.0 {
        normal
    } else {
        normal / norm
    }
}

/// Arithmetic mean of a set of points
pub fn centroid(points: &[Point3<f32>]) -> Point3<f32> {
    if points.is_empty() {
        return Point3::origin();
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len() as f32)
}

/// Rotate `point` about `pivot` by Euler angles in degrees.
///
/// The rotation is applied about X first, then Y, then Z.
pub fn rotate_about(point: &Point3<f32>, pivot: &Point3<f32>, degrees: &Vector3<f32>) -> Point3<f32> {
    let rotation = euler_rotation(degrees);
    pivot + rotation * (point - pivot)
}

/// Scale `point` component-wise about `pivot`
pub fn scale_about(point: &Point3<f32>, pivot: &Point3<f32>, factors: &Vector3<f32>) -> Point3<f32> {
    pivot + (point - pivot).component_mul(factors)
}

/// Build the X-then-Y-then-Z rotation for Euler angles given in degrees
pub fn euler_rotation(degrees: &Vector3<f32>) -> Rotation3<f32> {
    // from_euler_angles(roll, pitch, yaw) composes Rz * Ry * Rx
    Rotation3::from_euler_angles(
        deg_to_rad(degrees.x),
        deg_to_rad(degrees.y),
        deg_to_rad(degrees.z),
    )
}

/// Check if two floats are approximately equal
pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Convert degrees to radians
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * std::f32::consts::PI / 180.0
}
