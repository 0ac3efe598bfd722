//! Shape generation for 2D primitives

use super::vertex::Vertex;
use crate::sim::Rect;

/// Two triangles covering a rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    vec![
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, t, color),
        Vertex::new(rt, t, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, b, color),
    ]
}

/// Hollow frame of the given thickness drawn inside the rectangle
pub fn rect_outline(r: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(r.size.x / 2.0).min(r.size.y / 2.0);
    let inner_height = r.size.y - 2.0 * t;

    let mut vertices = Vec::with_capacity(24);
    // Top and bottom bars span the full width
    vertices.extend(rect(&Rect::new(r.left(), r.top(), r.size.x, t), color));
    vertices.extend(rect(&Rect::new(r.left(), r.bottom() - t, r.size.x, t), color));
    // Side bars fill the gap between them
    vertices.extend(rect(&Rect::new(r.left(), r.top() + t, t, inner_height), color));
    vertices.extend(rect(
        &Rect::new(r.right() - t, r.top() + t, t, inner_height),
        color,
    ));
    vertices
}
