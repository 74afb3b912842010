use std::{path::Path, sync::Arc};

use resvg::tiny_skia;

use crate::{
    foundation::{
        core::Canvas,
        error::{HarnessError, HarnessResult},
    },
    pixels::buffer::PixelBuffer,
    render::backend::PictureCanvas,
};

/// A parsed SVG document with the size it will be drawn at.
pub struct Picture {
    tree: usvg::Tree,
    width: f32,
    height: f32,
}

impl Picture {
    pub fn load(path: &Path, opts: &usvg::Options<'_>) -> HarnessResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| HarnessError::load(format!("read '{}': {e}", path.display())))?;
        Self::from_data(&bytes, opts)
            .map_err(|e| HarnessError::load(format!("'{}': {e}", path.display())))
    }

    pub fn from_data(bytes: &[u8], opts: &usvg::Options<'_>) -> HarnessResult<Self> {
        let tree = usvg::Tree::from_data(bytes, opts)
            .map_err(|e| HarnessError::load(format!("parse svg tree: {e}")))?;
        let size = tree.size();
        Ok(Self {
            width: size.width(),
            height: size.height(),
            tree,
        })
    }

    /// Draw size in pixels; the intrinsic SVG size until [`Picture::set_size`].
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Stretch the picture to exactly `size` when drawn.
    pub fn set_size(&mut self, size: Canvas) {
        self.width = size.width as f32;
        self.height = size.height as f32;
    }

    pub(crate) fn tree(&self) -> &usvg::Tree {
        &self.tree
    }

    fn transform(&self) -> tiny_skia::Transform {
        let intrinsic = self.tree.size();
        tiny_skia::Transform::from_scale(
            self.width / intrinsic.width(),
            self.height / intrinsic.height(),
        )
    }
}

/// `resvg` canvas over a persistent pixmap, reused for every picture of a run.
pub struct SvgCanvas {
    options: Arc<usvg::Options<'static>>,
    pixmap: tiny_skia::Pixmap,
    scene: Vec<Picture>,
}

impl SvgCanvas {
    pub fn new(options: Arc<usvg::Options<'static>>, size: Canvas) -> HarnessResult<Self> {
        let pixmap = tiny_skia::Pixmap::new(size.width, size.height).ok_or_else(|| {
            HarnessError::alloc(format!(
                "{}x{} canvas",
                size.width, size.height
            ))
        })?;
        Ok(Self {
            options,
            pixmap,
            scene: Vec::new(),
        })
    }

    pub fn size(&self) -> Canvas {
        Canvas::new(self.pixmap.width(), self.pixmap.height())
    }
}

impl PictureCanvas for SvgCanvas {
    fn clear(&mut self) {
        self.scene.clear();
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn load(&self, path: &Path) -> HarnessResult<Picture> {
        Picture::load(path, &self.options)
    }

    fn push(&mut self, picture: Picture) {
        self.scene.push(picture);
    }

    fn draw(&mut self) -> HarnessResult<()> {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        for picture in &self.scene {
            let (w, h) = picture.size();
            if !(w > 0.0 && h > 0.0) {
                return Err(HarnessError::render(format!(
                    "picture has degenerate size {w}x{h}"
                )));
            }
            resvg::render(picture.tree(), picture.transform(), &mut self.pixmap.as_mut());
        }
        Ok(())
    }

    fn sync(&mut self, target: &mut PixelBuffer) -> HarnessResult<()> {
        if target.size() != self.size() {
            return Err(HarnessError::render(format!(
                "canvas is {}x{}, target is {}x{}",
                self.pixmap.width(),
                self.pixmap.height(),
                target.width(),
                target.height()
            )));
        }
        target.write_premul_rgba(self.pixmap.data())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
