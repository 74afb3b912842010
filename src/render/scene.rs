use std::{path::Path, sync::Arc};

use resvg::tiny_skia;

use crate::{
    animation::document::{AnimationDocument, Shape},
    foundation::{
        core::{Affine, Canvas, FrameIndex, Rgba8},
        error::{HarnessError, HarnessResult},
    },
    pixels::buffer::PixelBuffer,
    render::{
        backend::{AnimationEngine, AnimationPlayer},
        svg::Picture,
    },
};

/// Engine for `.json` scene animation documents, rasterized with `tiny_skia`.
pub struct SceneEngine {
    svg_options: Arc<usvg::Options<'static>>,
}

impl SceneEngine {
    pub fn new(svg_options: Arc<usvg::Options<'static>>) -> Self {
        Self { svg_options }
    }
}

impl AnimationEngine for SceneEngine {
    fn load(&self, path: &Path) -> HarnessResult<Box<dyn AnimationPlayer>> {
        let bytes = std::fs::read(path)
            .map_err(|e| HarnessError::load(format!("read '{}': {e}", path.display())))?;
        let doc = AnimationDocument::from_slice(&bytes)
            .map_err(|e| HarnessError::load(format!("'{}': {e}", path.display())))?;
        Ok(Box::new(ScenePlayer::new(doc, &self.svg_options)?))
    }
}

enum PreparedShape {
    Fill {
        path: tiny_skia::Path,
        color: Rgba8,
    },
    Svg(Picture),
}

/// A loaded scene: shape geometry and SVG trees are built once, at load time.
pub struct ScenePlayer {
    doc: AnimationDocument,
    shapes: Vec<PreparedShape>,
    frame: Option<tiny_skia::Pixmap>,
    layer: Option<tiny_skia::Pixmap>,
}

impl ScenePlayer {
    pub fn new(doc: AnimationDocument, svg_options: &usvg::Options<'_>) -> HarnessResult<Self> {
        let shapes = doc
            .layers
            .iter()
            .enumerate()
            .map(|(i, layer)| {
                prepare_shape(&layer.shape, svg_options)
                    .map_err(|e| HarnessError::load(format!("layer {i}: {e}")))
            })
            .collect::<HarnessResult<Vec<_>>>()?;
        Ok(Self {
            doc,
            shapes,
            frame: None,
            layer: None,
        })
    }
}

fn prepare_shape(shape: &Shape, svg_options: &usvg::Options<'_>) -> HarnessResult<PreparedShape> {
    let bounds = |w: f64, h: f64| {
        tiny_skia::Rect::from_xywh(0.0, 0.0, w as f32, h as f32)
            .ok_or_else(|| HarnessError::load(format!("invalid shape bounds {w}x{h}")))
    };
    match shape {
        Shape::Rect {
            width,
            height,
            color,
        } => Ok(PreparedShape::Fill {
            path: tiny_skia::PathBuilder::from_rect(bounds(*width, *height)?),
            color: *color,
        }),
        Shape::Ellipse {
            width,
            height,
            color,
        } => {
            let path = tiny_skia::PathBuilder::from_oval(bounds(*width, *height)?)
                .ok_or_else(|| HarnessError::load("failed to build ellipse path"))?;
            Ok(PreparedShape::Fill {
                path,
                color: *color,
            })
        }
        Shape::Svg { markup } => Ok(PreparedShape::Svg(Picture::from_data(
            markup.as_bytes(),
            svg_options,
        )?)),
    }
}

impl AnimationPlayer for ScenePlayer {
    fn total_frames(&self) -> u64 {
        self.doc.duration
    }

    fn render_sync(&mut self, frame: FrameIndex, target: &mut PixelBuffer) -> HarnessResult<()> {
        if frame.0 >= self.doc.duration {
            return Err(HarnessError::render(format!(
                "frame {frame} out of range (duration {})",
                self.doc.duration
            )));
        }

        let size = target.size();
        let Self {
            doc,
            shapes,
            frame: frame_pixmap,
            layer: layer_pixmap,
        } = self;

        let pixmap = reuse_pixmap(frame_pixmap, size)?;
        let Rgba8([r, g, b, a]) = doc.background.unwrap_or(Rgba8::TRANSPARENT);
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));

        let fit = Affine::scale_non_uniform(
            f64::from(size.width) / f64::from(doc.canvas.width),
            f64::from(size.height) / f64::from(doc.canvas.height),
        );

        for (layer, shape) in doc.layers.iter().zip(shapes.iter()) {
            if !layer.visible_at(frame) {
                continue;
            }
            let opacity = layer.opacity.sample(frame)?.clamp(0.0, 1.0);
            if opacity <= 0.0 {
                continue;
            }
            let xform = to_skia(fit * layer.transform.sample(frame)?.to_affine());

            match shape {
                PreparedShape::Fill { path, color } => {
                    let [r, g, b, a] = color.with_opacity(opacity).0;
                    let mut paint = tiny_skia::Paint::default();
                    paint.set_color_rgba8(r, g, b, a);
                    paint.anti_alias = true;
                    pixmap.fill_path(path, &paint, tiny_skia::FillRule::Winding, xform, None);
                }
                PreparedShape::Svg(picture) if opacity >= 1.0 => {
                    resvg::render(picture.tree(), xform, &mut pixmap.as_mut());
                }
                PreparedShape::Svg(picture) => {
                    let scratch = reuse_pixmap(layer_pixmap, size)?;
                    scratch.fill(tiny_skia::Color::TRANSPARENT);
                    resvg::render(picture.tree(), xform, &mut scratch.as_mut());
                    let paint = tiny_skia::PixmapPaint {
                        opacity: opacity as f32,
                        ..tiny_skia::PixmapPaint::default()
                    };
                    pixmap.draw_pixmap(
                        0,
                        0,
                        scratch.as_ref(),
                        &paint,
                        tiny_skia::Transform::identity(),
                        None,
                    );
                }
            }
        }

        target.write_premul_rgba(pixmap.data())
    }
}

fn reuse_pixmap(
    slot: &mut Option<tiny_skia::Pixmap>,
    size: Canvas,
) -> HarnessResult<&mut tiny_skia::Pixmap> {
    let stale = slot
        .as_ref()
        .is_none_or(|p| p.width() != size.width || p.height() != size.height);
    if stale {
        let pixmap = tiny_skia::Pixmap::new(size.width, size.height).ok_or_else(|| {
            HarnessError::render(format!(
                "failed to allocate {}x{} pixmap",
                size.width, size.height
            ))
        })?;
        *slot = Some(pixmap);
    }
    slot.as_mut()
        .ok_or_else(|| HarnessError::render("pixmap slot empty after allocation"))
}

fn to_skia(affine: Affine) -> tiny_skia::Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    tiny_skia::Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
