use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    corpus::locator::SourcePath,
    foundation::{
        core::{Canvas, FrameIndex},
        error::{HarnessError, HarnessResult},
    },
};

/// Baseline path for one animation frame: `<dir>/<basename>.<frame>.png`.
pub fn frame_baseline_path(dir: &Path, source: &SourcePath, frame: FrameIndex) -> PathBuf {
    dir.join(format!("{}.{}.png", source.basename(), frame.0))
}

/// Baseline path for a static picture: `<dir>/<basename>.png`.
pub fn picture_baseline_path(dir: &Path, source: &SourcePath) -> PathBuf {
    dir.join(format!("{}.png", source.basename()))
}

/// A baseline read back from disk.
#[derive(Clone, Debug)]
pub struct BaselineImage {
    pub width: u32,
    pub height: u32,
    /// Channel count stored in the file, before expansion to RGBA.
    pub channels: u8,
    /// Row-major RGBA8.
    pub rgba8: Vec<u8>,
}

impl BaselineImage {
    /// Exact match: same size, a 4-channel source file, identical bytes.
    pub fn matches(&self, rgba8: &[u8], size: Canvas) -> bool {
        self.width == size.width
            && self.height == size.height
            && self.channels == 4
            && self.rgba8 == rgba8
    }
}

/// Write `rgba8` as a 4-channel PNG, creating the parent directory if needed.
pub fn encode_baseline(path: &Path, rgba8: &[u8], size: Canvas) -> HarnessResult<()> {
    if rgba8.len() != size.pixel_count() * 4 {
        return Err(HarnessError::baseline(format!(
            "'{}': {} bytes do not describe a {}x{} RGBA image",
            path.display(),
            rgba8.len(),
            size.width,
            size.height
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create baseline dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        rgba8,
        size.width,
        size.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Read a baseline PNG, expanding it to RGBA8.
pub fn decode_baseline(path: &Path) -> HarnessResult<BaselineImage> {
    let reader = image::ImageReader::open(path)
        .with_context(|| format!("open baseline '{}'", path.display()))?;
    let img = reader
        .with_guessed_format()
        .with_context(|| format!("sniff baseline '{}'", path.display()))?
        .decode()
        .map_err(|e| HarnessError::baseline(format!("decode '{}': {e}", path.display())))?;

    let channels = img.color().channel_count();
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(BaselineImage {
        width,
        height,
        channels,
        rgba8: rgba.into_raw(),
    })
}

/// Compare freshly normalized pixels against the baseline at `path`.
///
/// Missing, unreadable or mismatching baselines all count as `false`.
pub fn matches_baseline(path: &Path, rgba8: &[u8], size: Canvas) -> bool {
    match decode_baseline(path) {
        Ok(baseline) => {
            let ok = baseline.matches(rgba8, size);
            if !ok {
                tracing::debug!(
                    baseline = %path.display(),
                    width = baseline.width,
                    height = baseline.height,
                    channels = baseline.channels,
                    "baseline mismatch"
                );
            }
            ok
        }
        Err(err) => {
            tracing::debug!(baseline = %path.display(), %err, "baseline unavailable");
            false
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/baseline/codec.rs"]
mod tests;
