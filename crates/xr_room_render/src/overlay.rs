//! Screen-space overlay rectangles

use crate::pipeline::OverlayVertex;

/// A solid rectangle in window pixels, origin top-left
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: [f32; 4],
}

impl OverlayRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color,
        }
    }

    /// Whether a pixel position lies inside the rectangle
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// Convert pixel rectangles to two triangles each in normalized device coordinates
pub fn overlay_vertices(rects: &[OverlayRect], screen_width: u32, screen_height: u32) -> Vec<OverlayVertex> {
    if screen_width == 0 || screen_height == 0 {
        return Vec::new();
    }
    let (w, h) = (screen_width as f32, screen_height as f32);
    let to_ndc = |x: f32, y: f32| [x / w * 2.0 - 1.0, 1.0 - y / h * 2.0];

    let mut vertices = Vec::with_capacity(rects.len() * 6);
    for rect in rects.iter().filter(|r| r.width > 0.0 && r.height > 0.0) {
        let top_left = to_ndc(rect.x, rect.y);
        let top_right = to_ndc(rect.x + rect.width, rect.y);
        let bottom_left = to_ndc(rect.x, rect.y + rect.height);
        let bottom_right = to_ndc(rect.x + rect.width, rect.y + rect.height);

        for position in [top_left, bottom_left, bottom_right, top_left, bottom_right, top_right] {
            vertices.push(OverlayVertex {
                position,
                color: rect.color,
            });
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_screen_rect() {
        let rect = OverlayRect::new(0.0, 0.0, 800.0, 600.0, [1.0; 4]);
        let vertices = overlay_vertices(&[rect], 800, 600);
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[0].position, [-1.0, 1.0]);
        assert_eq!(vertices[2].position, [1.0, -1.0]);
    }

    #[test]
    fn test_empty_rects_skipped() {
        let rect = OverlayRect::new(10.0, 10.0, 0.0, 5.0, [1.0; 4]);
        assert!(overlay_vertices(&[rect], 800, 600).is_empty());
        assert!(overlay_vertices(&[], 0, 0).is_empty());
    }

    #[test]
    fn test_contains() {
        let rect = OverlayRect::new(100.0, 50.0, 20.0, 10.0, [1.0; 4]);
        assert!(rect.contains(100.0, 50.0));
        assert!(rect.contains(119.0, 59.0));
        assert!(!rect.contains(120.0, 55.0));
        assert!(!rect.contains(99.0, 55.0));
    }
}
