//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use super::noise::noise3;
use super::vertex::Vertex;
use crate::consts::BLOB_WOBBLE_FREQ;

/// Outline of the breathing blob
///
/// Each of the `points` vertices sits at `radius` plus a noise offset in
/// `[-wobble, wobble]`, sampled on a circle in noise space so the outline
/// closes seamlessly. `phase` animates the shape over time.
pub fn blob_outline(center: Vec2, radius: f32, points: u32, wobble: f32, phase: f32) -> Vec<Vec2> {
    (0..points)
        .map(|i| {
            let a = i as f32 / points as f32 * TAU;
            let (sin, cos) = a.sin_cos();
            let n = noise3(
                cos * BLOB_WOBBLE_FREQ + 100.0,
                sin * BLOB_WOBBLE_FREQ + 100.0,
                phase,
            );
            let r = radius + (n * 2.0 - 1.0) * wobble;
            center + Vec2::new(cos, sin) * r
        })
        .collect()
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for an axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Triangle fan around the centroid; fine for star-shaped outlines
pub fn polygon_fan(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let centroid = points.iter().copied().sum::<Vec2>() / points.len() as f32;

    let mut vertices = Vec::with_capacity(points.len() * 3);
    for (i, p1) in points.iter().enumerate() {
        let p2 = points[(i + 1) % points.len()];
        vertices.push(Vertex::new(centroid.x, centroid.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }
    vertices
}
