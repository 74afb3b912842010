use super::*;

fn player(json: &str) -> ScenePlayer {
    let doc = AnimationDocument::from_slice(json.as_bytes()).unwrap();
    ScenePlayer::new(doc, &usvg::Options::default()).unwrap()
}

fn render(p: &mut ScenePlayer, frame: u64, size: Canvas) -> PixelBuffer {
    let mut out = PixelBuffer::new(size).unwrap();
    p.render_sync(FrameIndex(frame), &mut out).unwrap();
    out
}

fn pixel(buf: &PixelBuffer, x: u32, y: u32) -> [u8; 4] {
    let i = (y as usize * buf.width() as usize + x as usize) * 4;
    let b = buf.as_bytes();
    [b[i], b[i + 1], b[i + 2], b[i + 3]]
}

const SLIDE: &str = r#"
{
  "canvas": { "width": 10, "height": 10 },
  "duration": 3,
  "layers": [
    {
      "shape": { "rect": { "width": 5, "height": 10, "color": [255, 0, 0, 255] } },
      "transform": { "keyframes": { "keys": [
        { "frame": 0, "value": { "translate": { "x": 0, "y": 0 } } },
        { "frame": 2, "value": { "translate": { "x": 5, "y": 0 } } }
      ] } }
    }
  ]
}
"#;

#[test]
fn reports_document_duration() {
    assert_eq!(player(SLIDE).total_frames(), 3);
}

#[test]
fn keyframed_translation_moves_the_shape() {
    let size = Canvas::new(4, 4);
    let mut p = player(SLIDE);

    let first = render(&mut p, 0, size);
    assert_eq!(pixel(&first, 0, 2), [0, 0, 255, 255]);
    assert_eq!(pixel(&first, 3, 2), [0, 0, 0, 0]);

    let last = render(&mut p, 2, size);
    assert_eq!(pixel(&last, 0, 2), [0, 0, 0, 0]);
    assert_eq!(pixel(&last, 3, 2), [0, 0, 255, 255]);
}

#[test]
fn rendering_is_deterministic() {
    let size = Canvas::new(16, 16);
    let mut a = player(SLIDE);
    let mut b = player(SLIDE);
    assert_eq!(render(&mut a, 1, size), render(&mut b, 1, size));
    assert_eq!(render(&mut a, 1, size), render(&mut a, 1, size));
}

#[test]
fn background_fills_and_hidden_layers_are_skipped() {
    let mut p = player(
        r#"{
          "canvas": { "width": 2, "height": 2 },
          "duration": 2,
          "background": [0, 255, 0, 255],
          "layers": [ { "shape": { "rect": { "width": 2, "height": 2, "color": [0, 0, 255, 255] } },
                        "range": [1, 2] } ]
        }"#,
    );
    let size = Canvas::new(2, 2);
    assert_eq!(pixel(&render(&mut p, 0, size), 1, 1), [0, 255, 0, 255]);
    assert_eq!(pixel(&render(&mut p, 1, size), 1, 1), [255, 0, 0, 255]);
}

#[test]
fn missing_background_overwrites_stale_pixels_with_transparent() {
    let mut p = player(SLIDE);
    let size = Canvas::new(10, 10);
    let mut out = PixelBuffer::new(size).unwrap();
    out.write_premul_rgba(&vec![255; size.pixel_count() * 4])
        .unwrap();

    p.render_sync(FrameIndex(0), &mut out).unwrap();
    assert_eq!(pixel(&out, 8, 5), [0, 0, 0, 0]);
    assert_eq!(pixel(&out, 2, 5), [0, 0, 255, 255]);
}

#[test]
fn translucent_layers_are_premultiplied() {
    let mut p = player(
        r#"{
          "canvas": { "width": 2, "height": 2 },
          "duration": 1,
          "layers": [ { "shape": { "rect": { "width": 2, "height": 2, "color": [255, 0, 0, 255] } },
                        "opacity": { "constant": 0.5 } } ]
        }"#,
    );
    let [b, g, r, a] = pixel(&render(&mut p, 0, Canvas::new(2, 2)), 0, 0);
    assert_eq!((b, g), (0, 0));
    assert!((127..=129).contains(&a), "alpha {a}");
    assert_eq!(r, a);
}

#[test]
fn svg_layers_render_with_and_without_opacity() {
    let json = |opacity: f64| {
        format!(
            r#"{{
              "canvas": {{ "width": 4, "height": 4 }},
              "duration": 1,
              "layers": [ {{ "shape": {{ "svg": {{ "markup": "<svg xmlns='http://www.w3.org/2000/svg' width='4' height='4'><rect width='4' height='4' fill='#ffffff'/></svg>" }} }},
                            "opacity": {{ "constant": {opacity} }} }} ]
            }}"#
        )
    };
    let size = Canvas::new(4, 4);

    let opaque = render(&mut player(&json(1.0)), 0, size);
    assert_eq!(pixel(&opaque, 2, 2), [255, 255, 255, 255]);

    let faded = render(&mut player(&json(0.25)), 0, size);
    let [_, _, _, a] = pixel(&faded, 2, 2);
    assert!((62..=66).contains(&a), "alpha {a}");
}

#[test]
fn out_of_range_frame_is_a_render_error() {
    let mut p = player(SLIDE);
    let mut out = PixelBuffer::new(Canvas::new(2, 2)).unwrap();
    assert!(matches!(
        p.render_sync(FrameIndex(3), &mut out),
        Err(HarnessError::Render(_))
    ));
}

#[test]
fn engine_load_failures_are_load_errors() {
    let dir = std::path::PathBuf::from("target").join("unit_scene");
    std::fs::create_dir_all(&dir).unwrap();
    let bad = dir.join("bad.json");
    std::fs::write(&bad, b"{ not json").unwrap();
    let bad_svg = dir.join("bad_svg.json");
    std::fs::write(
        &bad_svg,
        br#"{ "canvas": { "width": 1, "height": 1 }, "duration": 1,
              "layers": [ { "shape": { "svg": { "markup": "<svg" } } } ] }"#,
    )
    .unwrap();

    let engine = SceneEngine::new(Arc::new(usvg::Options::default()));
    for path in [bad.as_path(), bad_svg.as_path(), Path::new("target/unit_scene/absent.json")] {
        assert!(
            matches!(engine.load(path), Err(HarnessError::Load(_))),
            "{}",
            path.display()
        );
    }

    let good = dir.join("good.json");
    std::fs::write(&good, SLIDE).unwrap();
    assert_eq!(engine.load(&good).unwrap().total_frames(), 3);
}
