/// Convert premultiplied `[B, G, R, A]` pixels to straight-alpha `[R, G, B, A]` in place.
///
/// - `A == 0`: left untouched.
/// - `A == 255`: B and R swap places, nothing else changes.
/// - otherwise: each color channel becomes `c * 255 / A` (truncating), saturating at 255.
///
/// Only the first `width * 4` bytes of each `stride`-byte row are visited; a stride
/// shorter than that clips each row to `stride` bytes. A zero width or stride is a
/// no-op. The partial-alpha case is lossy, so a buffer must be normalized exactly once.
pub fn normalize(bytes: &mut [u8], width: u32, height: u32, stride: usize) {
    let row_bytes = width as usize * 4;
    if stride == 0 || row_bytes == 0 {
        return;
    }

    for row in bytes.chunks_mut(stride).take(height as usize) {
        let visible = row_bytes.min(row.len());
        for px in row[..visible].chunks_exact_mut(4) {
            let a = px[3];
            match a {
                0 => {}
                255 => px.swap(0, 2),
                _ => {
                    let b = unpremultiply(px[0], a);
                    let g = unpremultiply(px[1], a);
                    let r = unpremultiply(px[2], a);
                    px[0] = r;
                    px[1] = g;
                    px[2] = b;
                }
            }
        }
    }
}

fn unpremultiply(c: u8, a: u8) -> u8 {
    (u32::from(c) * 255 / u32::from(a)).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/pixels/normalize.rs"]
mod tests;
