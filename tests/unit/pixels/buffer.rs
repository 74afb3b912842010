use super::*;

#[test]
fn new_buffer_has_fixed_length_and_stride() {
    let buf = PixelBuffer::new(Canvas::new(100, 100)).unwrap();
    assert_eq!(buf.len_pixels(), 100 * 100);
    assert_eq!(buf.as_bytes().len(), 100 * 100 * 4);
    assert_eq!(buf.stride(), 400);
    assert!(buf.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn empty_size_is_rejected() {
    assert!(PixelBuffer::new(Canvas::new(0, 10)).is_err());
}

#[test]
fn oversized_buffer_is_a_fatal_allocation_error() {
    let err = PixelBuffer::new(Canvas::new(u32::MAX, u32::MAX)).unwrap_err();
    assert!(matches!(err, HarnessError::Alloc(_)), "{err}");
    assert!(err.is_fatal());
}

#[test]
fn write_premul_rgba_swizzles_to_bgra() {
    let mut buf = PixelBuffer::new(Canvas::new(2, 1)).unwrap();
    buf.write_premul_rgba(&[1, 2, 3, 4, 10, 20, 30, 255]).unwrap();
    assert_eq!(buf.as_bytes(), &[3, 2, 1, 4, 30, 20, 10, 255]);
}

#[test]
fn write_rejects_wrong_length_and_clear_zeroes() {
    let mut buf = PixelBuffer::new(Canvas::new(1, 1)).unwrap();
    assert!(buf.write_premul_rgba(&[0; 8]).is_err());

    buf.write_premul_rgba(&[9, 9, 9, 9]).unwrap();
    buf.clear();
    assert_eq!(buf.as_bytes(), &[0, 0, 0, 0]);
    assert_eq!(buf.size(), Canvas::new(1, 1));
}
