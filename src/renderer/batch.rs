//! Vertex batch surface
//!
//! Tessellates everything drawn into one triangle list for the GPU pipeline
//! and collects text separately for the HTML overlay.

use glam::Vec2;

use super::shapes;
use super::surface::{Surface, TextLabel};
use super::vertex::Vertex;

#[derive(Debug, Clone, Default)]
pub struct VertexBatch {
    pub clear_color: [f32; 4],
    pub vertices: Vec<Vertex>,
    pub labels: Vec<TextLabel>,
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop last frame's contents, keeping allocations
    pub fn reset(&mut self) {
        self.clear_color = [0.0, 0.0, 0.0, 1.0];
        self.vertices.clear();
        self.labels.clear();
    }
}

impl Surface for VertexBatch {
    fn clear(&mut self, color: [f32; 4]) {
        self.clear_color = color;
        self.vertices.clear();
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: [f32; 4]) {
        self.vertices.extend(shapes::rect(pos, size, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.vertices
            .extend(shapes::circle(center, radius, color, shapes::segments_for(radius)));
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, color: [f32; 4]) {
        let segments = shapes::segments_for(radii.max_element());
        self.vertices
            .extend(shapes::ellipse(center, radii, rotation, color, segments));
    }

    fn text(&mut self, label: TextLabel) {
        self.labels.push(label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::Align;

    #[test]
    fn test_clear_resets_geometry_not_labels() {
        let mut batch = VertexBatch::new();
        batch.fill_rect(Vec2::ZERO, Vec2::ONE, [1.0; 4]);
        batch.text(TextLabel {
            text: "0".into(),
            pos: Vec2::ZERO,
            size: 12.0,
            align: Align::Center,
            color: [1.0; 4],
        });
        batch.clear([0.5, 0.5, 0.5, 1.0]);

        assert!(batch.vertices.is_empty());
        assert_eq!(batch.labels.len(), 1);
        assert_eq!(batch.clear_color, [0.5, 0.5, 0.5, 1.0]);

        batch.reset();
        assert!(batch.labels.is_empty());
    }
}
