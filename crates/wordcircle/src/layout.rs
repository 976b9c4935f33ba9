use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use serde::Serialize;

use crate::input::gesture::TileRegions;

/// Axis-aligned tile bounds in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl TileRect {
    pub fn centered(center: Vec2, size: f32) -> Self {
        Self {
            left: center.x - size * 0.5,
            top: center.y - size * 0.5,
            width: size,
            height: size,
        }
    }

    /// Strict containment: a point on the border is outside.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.left
            && p.x < self.left + self.width
            && p.y > self.top
            && p.y < self.top + self.height
    }
}

/// Letter tiles placed evenly on a circle, tile 0 at the top and the rest
/// clockwise (y grows downward).
#[derive(Debug, Clone)]
pub struct RingLayout {
    center: Vec2,
    radius: f32,
    tile_size: f32,
    rects: Vec<TileRect>,
}

impl RingLayout {
    pub fn new(center: Vec2, radius: f32, tile_size: f32, count: usize) -> Self {
        let mut layout = Self {
            center,
            radius,
            tile_size,
            rects: Vec::new(),
        };
        layout.relayout(count);
        layout
    }

    /// Rebuild tile bounds for a new letter count.
    pub fn relayout(&mut self, count: usize) {
        self.rects = (0..count)
            .map(|i| TileRect::centered(self.tile_center_for(i, count), self.tile_size))
            .collect();
    }

    fn tile_center_for(&self, index: usize, count: usize) -> Vec2 {
        let angle = (index as f32 / count as f32) * TAU - FRAC_PI_2;
        self.center + self.radius * Vec2::new(angle.cos(), angle.sin())
    }

    pub fn tile_center(&self, index: usize) -> Vec2 {
        self.tile_center_for(index, self.rects.len())
    }

    pub fn rects(&self) -> &[TileRect] {
        &self.rects
    }
}

impl TileRegions for RingLayout {
    fn tile_count(&self) -> usize {
        self.rects.len()
    }

    fn contains(&self, index: usize, pos: Vec2) -> bool {
        self.rects.get(index).is_some_and(|r| r.contains(pos))
    }
}
