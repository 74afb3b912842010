use std::{fmt, path::PathBuf};

use crate::{
    baseline::codec::{encode_baseline, frame_baseline_path, matches_baseline},
    corpus::locator::SourcePath,
    foundation::{
        core::{Canvas, FrameIndex},
        error::HarnessResult,
    },
    pixels::{buffer::PixelBuffer, normalize::normalize},
    render::backend::{AnimationEngine, AnimationPlayer},
};

/// One entry of an animation's failing list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailedFrame {
    /// The document did not load; stands in for every frame.
    Load,
    Frame(FrameIndex),
}

impl fmt::Display for FailedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => f.write_str("load"),
            Self::Frame(i) => write!(f, "{i}"),
        }
    }
}

/// Verification result for one animation document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnimationOutcome {
    pub failed: Vec<FailedFrame>,
}

impl AnimationOutcome {
    pub fn passed(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Drives a frame-sequence engine through the baseline protocol.
pub struct FrameAnimationTestRunner {
    engine: Box<dyn AnimationEngine>,
    baseline_dir: PathBuf,
    buffer: PixelBuffer,
}

impl FrameAnimationTestRunner {
    pub fn new(
        engine: Box<dyn AnimationEngine>,
        baseline_dir: impl Into<PathBuf>,
        size: Canvas,
    ) -> HarnessResult<Self> {
        Ok(Self {
            engine,
            baseline_dir: baseline_dir.into(),
            buffer: PixelBuffer::new(size)?,
        })
    }

    /// Render every frame of `source` and overwrite its baselines.
    ///
    /// Returns the number of baselines written; a document that fails to load
    /// writes none.
    #[tracing::instrument(skip_all, fields(source = %source))]
    pub fn generate(&mut self, source: &SourcePath) -> u64 {
        let mut player = match self.engine.load(source.as_path()) {
            Ok(player) => player,
            Err(err) => {
                tracing::debug!(%err, "skipping source that failed to load");
                return 0;
            }
        };

        let mut written = 0;
        for frame in (0..player.total_frames()).map(FrameIndex) {
            if let Err(err) = self.render_normalized(player.as_mut(), frame) {
                tracing::warn!(%frame, %err, "render failed, no baseline written");
                continue;
            }
            let path = frame_baseline_path(&self.baseline_dir, source, frame);
            match encode_baseline(&path, self.buffer.as_bytes(), self.buffer.size()) {
                Ok(()) => written += 1,
                Err(err) => tracing::warn!(baseline = %path.display(), %err, "write failed"),
            }
        }
        written
    }

    /// Render every frame of `source` and compare it with its baseline.
    #[tracing::instrument(skip_all, fields(source = %source))]
    pub fn verify(&mut self, source: &SourcePath) -> AnimationOutcome {
        let mut player = match self.engine.load(source.as_path()) {
            Ok(player) => player,
            Err(err) => {
                tracing::debug!(%err, "source failed to load");
                return AnimationOutcome {
                    failed: vec![FailedFrame::Load],
                };
            }
        };

        let mut outcome = AnimationOutcome::default();
        for frame in (0..player.total_frames()).map(FrameIndex) {
            let ok = match self.render_normalized(player.as_mut(), frame) {
                Ok(()) => matches_baseline(
                    &frame_baseline_path(&self.baseline_dir, source, frame),
                    self.buffer.as_bytes(),
                    self.buffer.size(),
                ),
                Err(err) => {
                    tracing::debug!(%frame, %err, "render failed");
                    false
                }
            };
            if !ok {
                outcome.failed.push(FailedFrame::Frame(frame));
            }
        }
        outcome
    }

    fn render_normalized(
        &mut self,
        player: &mut dyn AnimationPlayer,
        frame: FrameIndex,
    ) -> HarnessResult<()> {
        self.buffer.clear();
        player.render_sync(frame, &mut self.buffer)?;
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
#[path = "../../tests/unit/harness/animation.rs"]
mod tests;
