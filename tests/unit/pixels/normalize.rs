use super::*;

fn one(px: [u8; 4]) -> [u8; 4] {
    let mut buf = px;
    normalize(&mut buf, 1, 1, 4);
    buf
}

#[test]
fn transparent_pixels_are_untouched() {
    assert_eq!(one([7, 8, 9, 0]), [7, 8, 9, 0]);
}

#[test]
fn opaque_pixels_swap_blue_and_red_only() {
    assert_eq!(one([10, 20, 30, 255]), [30, 20, 10, 255]);
}

#[test]
fn swap_is_an_involution_for_opaque_and_transparent() {
    let src = [10u8, 20, 30, 255, 1, 2, 3, 0];
    let mut buf = src;
    normalize(&mut buf, 2, 1, 8);
    normalize(&mut buf, 2, 1, 8);
    assert_eq!(buf, src);
}

#[test]
fn half_alpha_unpremultiplies_with_truncation() {
    // 64 * 255 / 128 = 127.5 -> 127
    assert_eq!(one([64, 64, 64, 128]), [127, 127, 127, 128]);
    // b=32 g=64 r=96 at alpha 128 -> r=191 g=127 b=63
    assert_eq!(one([32, 64, 96, 128]), [191, 127, 63, 128]);
}

#[test]
fn malformed_premultiplied_input_saturates() {
    assert_eq!(one([200, 0, 0, 100]), [0, 0, 255, 100]);
}

#[test]
fn partial_alpha_is_lossy() {
    let mut buf = [1u8, 1, 1, 3];
    normalize(&mut buf, 1, 1, 4);
    assert_eq!(buf, [85, 85, 85, 3]);
    normalize(&mut buf, 1, 1, 4);
    assert_ne!(buf, [85, 85, 85, 3]);
}

#[test]
fn stride_padding_is_left_alone() {
    // 1 pixel wide, 2 rows, 8-byte stride: bytes 4..8 of each row are padding.
    let mut buf = [
        1, 2, 3, 255, 0xAA, 0xAA, 0xAA, 0xAA, //
        4, 5, 6, 255, 0xBB, 0xBB, 0xBB, 0xBB,
    ];
    normalize(&mut buf, 1, 2, 8);
    assert_eq!(
        buf,
        [
            3, 2, 1, 255, 0xAA, 0xAA, 0xAA, 0xAA, //
            6, 5, 4, 255, 0xBB, 0xBB, 0xBB, 0xBB,
        ]
    );
}

#[test]
fn degenerate_geometry_is_a_no_op() {
    let src = [10u8, 20, 30, 128, 40, 50, 60, 255];
    let mut buf = src;
    normalize(&mut buf, 2, 1, 0);
    assert_eq!(buf, src);
    normalize(&mut buf, 0, 1, 8);
    assert_eq!(buf, src);
}

#[test]
fn short_stride_clips_rows_instead_of_panicking() {
    // Two 1-pixel rows of stride 4, but width claims 2 pixels per row.
    let mut buf = [10u8, 20, 30, 255, 40, 50, 60, 255];
    normalize(&mut buf, 2, 2, 4);
    assert_eq!(buf, [30, 20, 10, 255, 60, 50, 40, 255]);
}
