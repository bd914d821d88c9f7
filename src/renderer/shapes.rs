//! Shape generation for 2D primitives

use super::scene::{ColoredRect, Scene};
use super::vertex::Vertex;
use crate::Rect;

/// Two triangles covering `rect`
pub fn rect(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let min = rect.min;
    let max = rect.max();
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Triangle list for every rectangle in the scene, in draw order
pub fn scene_vertices(scene: &Scene) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(scene.rects.len() * 6);
    for ColoredRect { rect: r, color } in &scene.rects {
        vertices.extend_from_slice(&rect(r, *color));
    }
    vertices
}
