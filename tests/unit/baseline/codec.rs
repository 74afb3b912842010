use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_codec").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn gradient(size: Canvas) -> Vec<u8> {
    (0..size.pixel_count())
        .flat_map(|i| [(i % 256) as u8, (i / 256) as u8, 7, if i % 3 == 0 { 0 } else { 255 }])
        .collect()
}

#[test]
fn baseline_keys_follow_naming_scheme() {
    let dir = Path::new("baseline");
    let src = SourcePath::new(Path::new("res").join("dots.json"));
    assert_eq!(
        frame_baseline_path(dir, &src, FrameIndex(3)),
        dir.join("dots.json.3.png")
    );
    let svg = SourcePath::new(Path::new("res").join("tiger.svg"));
    assert_eq!(picture_baseline_path(dir, &svg), dir.join("tiger.svg.png"));
}

#[test]
fn encoded_baseline_matches_source_bytes() {
    let dir = scratch_dir("roundtrip");
    let size = Canvas::new(16, 9);
    let px = gradient(size);
    let path = dir.join("nested").join("g.png");

    encode_baseline(&path, &px, size).unwrap();
    let decoded = decode_baseline(&path).unwrap();
    assert_eq!((decoded.width, decoded.height, decoded.channels), (16, 9, 4));
    assert!(decoded.matches(&px, size));
    assert!(matches_baseline(&path, &px, size));

    let mut changed = px.clone();
    changed[5] ^= 1;
    assert!(!matches_baseline(&path, &changed, size));
}

#[test]
fn missing_or_corrupt_baseline_never_matches() {
    let dir = scratch_dir("corrupt");
    let size = Canvas::new(4, 4);
    let px = gradient(size);

    assert!(decode_baseline(&dir.join("absent.png")).is_err());
    assert!(!matches_baseline(&dir.join("absent.png"), &px, size));

    let empty = dir.join("empty.png");
    std::fs::write(&empty, b"").unwrap();
    assert!(!matches_baseline(&empty, &px, size));

    let junk = dir.join("junk.png");
    std::fs::write(&junk, b"\x89PNG\r\n\x1a\nnot really").unwrap();
    assert!(!matches_baseline(&junk, &px, size));
}

#[test]
fn wrong_dimensions_never_match() {
    let dir = scratch_dir("dims");
    let stored = Canvas::new(99, 100);
    let path = dir.join("narrow.png");
    encode_baseline(&path, &vec![0u8; stored.pixel_count() * 4], stored).unwrap();

    let expected = Canvas::new(100, 100);
    assert!(!matches_baseline(&path, &vec![0u8; expected.pixel_count() * 4], expected));
}

#[test]
fn three_channel_baseline_never_matches() {
    let dir = scratch_dir("rgb");
    let size = Canvas::new(2, 2);
    let path = dir.join("rgb.png");
    image::save_buffer_with_format(
        &path,
        &[255u8; 2 * 2 * 3],
        2,
        2,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .unwrap();

    let decoded = decode_baseline(&path).unwrap();
    assert_eq!(decoded.channels, 3);
    // Same RGBA bytes after expansion, still rejected on channel count.
    assert!(!decoded.matches(&[255u8; 2 * 2 * 4], size));
}

#[test]
fn encode_rejects_mismatched_length() {
    let dir = scratch_dir("len");
    assert!(encode_baseline(&dir.join("x.png"), &[0u8; 3], Canvas::new(1, 1)).is_err());
}
