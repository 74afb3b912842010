use std::path::Path;

use crate::{
    foundation::{core::FrameIndex, error::HarnessResult},
    pixels::buffer::PixelBuffer,
    render::svg::Picture,
};

/// Loads frame-sequence documents.
pub trait AnimationEngine {
    fn load(&self, path: &Path) -> HarnessResult<Box<dyn AnimationPlayer>>;
}

/// A loaded frame-sequence document.
///
/// Rendering is synchronous and deterministic: the same frame always yields the
/// same premultiplied `[B, G, R, A]` bytes.
pub trait AnimationPlayer {
    /// Number of frames; valid indices are `0..total_frames()`.
    fn total_frames(&self) -> u64;

    /// Render `frame` into `target` at the target's size.
    fn render_sync(&mut self, frame: FrameIndex, target: &mut PixelBuffer) -> HarnessResult<()>;
}

/// A persistent single-frame render target for vector pictures.
///
/// Pictures pushed onto the canvas stay there until [`PictureCanvas::clear`].
pub trait PictureCanvas {
    /// Drop every pushed picture and reset pixels to transparent.
    fn clear(&mut self);

    fn load(&self, path: &Path) -> HarnessResult<Picture>;

    fn push(&mut self, picture: Picture);

    fn draw(&mut self) -> HarnessResult<()>;

    /// Block until drawing completes and copy the pixels into `target`.
    fn sync(&mut self, target: &mut PixelBuffer) -> HarnessResult<()>;
}
