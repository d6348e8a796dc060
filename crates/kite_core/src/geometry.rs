//! Screen-space rectangles and colors.
//!
//! Rects use closed intervals on both axes: a rect covers `[x, x + w]` and
//! `[y, y + h]`, so two rects whose edges touch are considered overlapping and
//! a point on the right/bottom edge is inside.

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub w: i32,
    #[serde(default)]
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn at(x: i32, y: i32) -> Self {
        Self { x, y, w: 0, h: 0 }
    }

    /// Right edge, clamped to `i32::MAX`.
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Bottom edge, clamped to `i32::MAX`.
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    pub const fn is_negative(&self) -> bool {
        self.w < 0 || self.h < 0
    }

    /// Inclusive AABB test. Equivalent to scanning every integer point of
    /// `self` and checking containment in `other`, so a rect with a negative
    /// size never overlaps anything. Edges are computed in `i64`.
    pub const fn overlaps(&self, other: &Rect) -> bool {
        if self.is_negative() || other.is_negative() {
            return false;
        }
        (self.x as i64) <= other.x as i64 + other.w as i64
            && (other.x as i64) <= self.x as i64 + self.w as i64
            && (self.y as i64) <= other.y as i64 + other.h as i64
            && (other.y as i64) <= self.y as i64 + self.h as i64
    }

    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        let (x, y) = (x as i64, y as i64);
        (self.x as i64) <= x
            && x <= self.x as i64 + self.w as i64
            && (self.y as i64) <= y
            && y <= self.y as i64 + self.h as i64
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Normalized `[r, g, b, a]` for GPU clear colors and vertex tints.
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

const fn opaque() -> u8 {
    255
}
