//! Viewport geometry and the 2D drawing seam shared by the star field and
//! the confetti layer.
//!
//! The web front-end implements [`Surface2d`] over a `CanvasRenderingContext2d`;
//! host tests use [`RecordingSurface`] to observe what would have been drawn.

use crate::color::Rgba;
use crate::constants::{MAX_PIXEL_RATIO, MIN_PIXEL_RATIO};
use glam::Vec2;

/// Logical (CSS pixel) viewport plus the device pixel ratio reported by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            device_pixel_ratio,
        }
    }

    /// Device pixel ratio clamped to [1, 2]; unknown ratios count as 1.
    #[inline]
    pub fn pixel_ratio(&self) -> f32 {
        if self.device_pixel_ratio.is_finite() {
            self.device_pixel_ratio.clamp(MIN_PIXEL_RATIO, MAX_PIXEL_RATIO)
        } else {
            MIN_PIXEL_RATIO
        }
    }

    /// Canvas backing store size in device pixels, never zero.
    pub fn backing_size(&self) -> (u32, u32) {
        let r = self.pixel_ratio();
        let w = (self.width * r).round() as u32;
        let h = (self.height * r).round() as u32;
        (w.max(1), h.max(1))
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Axis-aligned rectangle in a particle's local (translated + rotated) frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Immediate-mode 2D drawing target.
pub trait Surface2d {
    /// Resize the backing store for `viewport` and scale drawing to CSS pixels.
    fn fit(&mut self, viewport: &Viewport);
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn fill_rotated_rect(&mut self, origin: Vec2, rotation: f32, rect: LocalRect, color: Rgba);
    /// Show or hide the layer (the confetti canvas is hidden between bursts).
    fn set_visible(&mut self, visible: bool);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Fit(Viewport),
    Clear,
    Circle { center: Vec2, radius: f32, color: Rgba },
    Rect { origin: Vec2, rotation: f32, rect: LocalRect, color: Rgba },
    Visible(bool),
}

/// Surface that records every call; used by host tests and headless runs.
#[derive(Default, Debug)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
    pub visible: bool,
    pub clears: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of filled shapes recorded since the last `take_ops`.
    pub fn shapes(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. } | DrawOp::Rect { .. }))
            .count()
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }
}

impl Surface2d for RecordingSurface {
    fn fit(&mut self, viewport: &Viewport) {
        self.ops.push(DrawOp::Fit(*viewport));
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.ops.push(DrawOp::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_rotated_rect(&mut self, origin: Vec2, rotation: f32, rect: LocalRect, color: Rgba) {
        self.ops.push(DrawOp::Rect {
            origin,
            rotation,
            rect,
            color,
        });
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.ops.push(DrawOp::Visible(visible));
    }
}
