use std::path::PathBuf;

use crate::{
    baseline::codec::{encode_baseline, matches_baseline, picture_baseline_path},
    corpus::locator::SourcePath,
    foundation::{core::Canvas, error::HarnessResult},
    pixels::{buffer::PixelBuffer, normalize::normalize},
    render::backend::PictureCanvas,
};

/// Drives a single-frame vector canvas through the baseline protocol.
///
/// The canvas persists across files and is cleared before each one. Verification
/// only reads baselines.
pub struct StaticPictureTestRunner {
    canvas: Box<dyn PictureCanvas>,
    baseline_dir: PathBuf,
    buffer: PixelBuffer,
}

impl StaticPictureTestRunner {
    pub fn new(
        canvas: Box<dyn PictureCanvas>,
        baseline_dir: impl Into<PathBuf>,
        size: Canvas,
    ) -> HarnessResult<Self> {
        Ok(Self {
            canvas,
            baseline_dir: baseline_dir.into(),
            buffer: PixelBuffer::new(size)?,
        })
    }

    /// Render `source` and overwrite its baseline. Returns whether one was written.
    #[tracing::instrument(skip_all, fields(source = %source))]
    pub fn generate(&mut self, source: &SourcePath) -> bool {
        if let Err(err) = self.render_normalized(source) {
            tracing::debug!(%err, "skipping source that failed to render");
            return false;
        }
        let path = picture_baseline_path(&self.baseline_dir, source);
        match encode_baseline(&path, self.buffer.as_bytes(), self.buffer.size()) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(baseline = %path.display(), %err, "write failed");
                false
            }
        }
    }

    /// Render `source` and compare it with its stored baseline.
    #[tracing::instrument(skip_all, fields(source = %source))]
    pub fn verify(&mut self, source: &SourcePath) -> bool {
        if let Err(err) = self.render_normalized(source) {
            tracing::debug!(%err, "source failed to render");
            return false;
        }
        matches_baseline(
            &picture_baseline_path(&self.baseline_dir, source),
            self.buffer.as_bytes(),
            self.buffer.size(),
        )
    }

    fn render_normalized(&mut self, source: &SourcePath) -> HarnessResult<()> {
        self.canvas.clear();
        self.buffer.clear();

        let mut picture = self.canvas.load(source.as_path())?;
        picture.set_size(self.buffer.size());
        self.canvas.push(picture);
        self.canvas.draw()?;
        self.canvas.sync(&mut self.buffer)?;

        let (w, h, stride) = (
            self.buffer.width(),
            self.buffer.height(),
            self.buffer.stride(),
        );
        normalize(self.buffer.as_bytes_mut(), w, h, stride);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/harness/picture.rs"]
mod tests;
