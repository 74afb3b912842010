use std::fmt;

pub use kurbo::{Affine, Vec2};

/// Zero-based index of one rendered frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pixel dimensions of a render target or document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes per row for 32-bit pixels with no padding.
    pub fn stride(self) -> usize {
        self.width as usize * 4
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Every frame and picture is rendered at this size, for the whole run.
pub const FRAME_SIZE: Canvas = Canvas::new(100, 100);

/// Straight (non-premultiplied) RGBA8 color as written in documents: `[r, g, b, a]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8(pub [u8; 4]);

impl Rgba8 {
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);

    /// Scale alpha by `opacity` in `[0, 1]`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let [r, g, b, a] = self.0;
        let a = (f64::from(a) * opacity.clamp(0.0, 1.0)).round() as u8;
        Self([r, g, b, a])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Transform2D {
    pub translate: Vec2,
    pub rotation_rad: f64,
    pub scale: Vec2,  // default (1,1)
    pub anchor: Vec2, // pivot in local space
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_rad: 0.0,
            scale: Vec2::new(1.0, 1.0),
            anchor: Vec2::ZERO,
        }
    }
}

impl Transform2D {
    pub fn to_affine(self) -> Affine {
        let t_translate = Affine::translate(self.translate);
        let t_anchor = Affine::translate(self.anchor);
        let t_unanchor = Affine::translate(-self.anchor);
        let t_rotate = Affine::rotate(self.rotation_rad);
        let t_scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);

        // T(translate) * T(anchor) * R(rot) * S(scale) * T(-anchor)
        t_translate * t_anchor * t_rotate * t_scale * t_unanchor
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
