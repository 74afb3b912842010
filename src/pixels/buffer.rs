use crate::foundation::{
    core::Canvas,
    error::{HarnessError, HarnessResult},
};

/// Fixed-size render target of 32-bit pixels, reused for every file of a run.
///
/// Bytes are row-major with a stride of `width * 4`. What the four bytes of a pixel
/// mean depends on the stage: engines write premultiplied `[B, G, R, A]`, and
/// [`normalize`](crate::normalize) rewrites them to straight `[R, G, B, A]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    size: Canvas,
    bytes: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zeroed buffer. Allocation failure is reported, not aborted on.
    pub fn new(size: Canvas) -> HarnessResult<Self> {
        if size.is_empty() {
            return Err(HarnessError::config(format!(
                "pixel buffer must be non-empty, got {}x{}",
                size.width, size.height
            )));
        }
        let len = size
            .pixel_count()
            .checked_mul(4)
            .ok_or_else(|| HarnessError::alloc("pixel buffer size overflows usize"))?;

        let mut bytes = Vec::new();
        bytes.try_reserve_exact(len).map_err(|e| {
            HarnessError::alloc(format!(
                "{}x{} pixel buffer: {e}",
                size.width, size.height
            ))
        })?;
        bytes.resize(len, 0);
        Ok(Self { size, bytes })
    }

    pub fn size(&self) -> Canvas {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn stride(&self) -> usize {
        self.size.stride()
    }

    /// Number of 32-bit pixels; always `width * height`.
    pub fn len_pixels(&self) -> usize {
        self.bytes.len() / 4
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Zero every byte (fully transparent).
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Overwrite from premultiplied RGBA8 (the `tiny_skia` layout), storing the
    /// engine-native premultiplied `[B, G, R, A]` order.
    pub fn write_premul_rgba(&mut self, rgba8_premul: &[u8]) -> HarnessResult<()> {
        if rgba8_premul.len() != self.bytes.len() {
            return Err(HarnessError::render(format!(
                "frame has {} bytes, target expects {}",
                rgba8_premul.len(),
                self.bytes.len()
            )));
        }
        for (dst, src) in self
            .bytes
            .chunks_exact_mut(4)
            .zip(rgba8_premul.chunks_exact(4))
        {
            dst[0] = src[2];
            dst[1] = src[1];
            dst[2] = src[0];
            dst[3] = src[3];
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixels/buffer.rs"]
mod tests;
