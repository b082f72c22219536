//! Drawing surface abstraction
//!
//! Coordinates are logical pixels with the origin at the top-left and y
//! pointing down.

use glam::Vec2;

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A line of overlay text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub pos: Vec2,
    /// Font size in logical pixels
    pub size: f32,
    pub align: Align,
    pub color: [f32; 4],
}

/// A 2D drawing target
pub trait Surface {
    /// Fill the whole surface
    fn clear(&mut self, color: [f32; 4]);
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: [f32; 4]);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]);
    /// Ellipse with half-axes `radii`, rotated by `rotation` radians
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, color: [f32; 4]);
    fn text(&mut self, label: TextLabel);
}
