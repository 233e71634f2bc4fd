//! Entity extents and the axis-aligned bounding box built from them.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Width and height of an entity in world units.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a size; negative extents are clamped to zero.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// AABB of an entity of this size whose bottom-left corner is `position`.
    pub fn aabb(&self, position: Vec2) -> Aabb {
        Aabb::new(position, *self)
    }
}

/// Axis-aligned bounding box, y-up (`bottom <= top`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl Aabb {
    pub fn new(position: Vec2, size: Size) -> Self {
        Self {
            left: position.x,
            bottom: position.y,
            right: position.x + size.width,
            top: position.y + size.height,
        }
    }

    /// Strict overlap test: touching edges do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.bottom < other.top
            && self.top > other.bottom
    }

    /// Point containment, edges inclusive.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.bottom && point.y <= self.top
    }
}
