use crate::{
    animation::anim::Anim,
    foundation::{
        core::{Canvas, FrameIndex, Rgba8, Transform2D},
        error::{HarnessError, HarnessResult},
    },
};

/// A frame-sequence scene: layers painted in order over an optional background.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationDocument {
    /// Design size; renders are scaled to the target.
    pub canvas: Canvas,
    /// Total frame count.
    pub duration: u64,
    #[serde(default)]
    pub background: Option<Rgba8>,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layer {
    pub shape: Shape,
    /// Visible frames, `[start, end)`. Always visible when absent.
    #[serde(default)]
    pub range: Option<[u64; 2]>,
    #[serde(default = "full_opacity")]
    pub opacity: Anim<f64>,
    #[serde(default = "identity_transform")]
    pub transform: Anim<Transform2D>,
}

fn full_opacity() -> Anim<f64> {
    Anim::Constant(1.0)
}

fn identity_transform() -> Anim<Transform2D> {
    Anim::Constant(Transform2D::default())
}

impl Layer {
    pub fn visible_at(&self, frame: FrameIndex) -> bool {
        match self.range {
            None => true,
            Some([start, end]) => start <= frame.0 && frame.0 < end,
        }
    }
}

/// Layer geometry in design-space units, origin at the top-left.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Rect {
        width: f64,
        height: f64,
        color: Rgba8,
    },
    Ellipse {
        width: f64,
        height: f64,
        color: Rgba8,
    },
    /// Inline SVG markup, drawn at its intrinsic size.
    Svg { markup: String },
}

impl AnimationDocument {
    /// Parse and validate a JSON document.
    pub fn from_slice(bytes: &[u8]) -> HarnessResult<Self> {
        let doc: Self = serde_json::from_slice(bytes)
            .map_err(|e| HarnessError::load(format!("parse animation document: {e}")))?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn validate(&self) -> HarnessResult<()> {
        if self.canvas.is_empty() {
            return Err(HarnessError::load(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            layer.validate().map_err(|e| match e {
                HarnessError::Load(msg) => HarnessError::load(format!("layer {i}: {msg}")),
                other => other,
            })?;
        }
        Ok(())
    }
}

impl Layer {
    fn validate(&self) -> HarnessResult<()> {
        if let Some([start, end]) = self.range
            && start >= end
        {
            return Err(HarnessError::load(format!("range [{start}, {end}) is empty")));
        }
        match &self.shape {
            Shape::Rect { width, height, .. } | Shape::Ellipse { width, height, .. } => {
                if !(width.is_finite() && height.is_finite() && *width > 0.0 && *height > 0.0) {
                    return Err(HarnessError::load("shape size must be positive"));
                }
            }
            Shape::Svg { markup } => {
                if markup.trim().is_empty() {
                    return Err(HarnessError::load("svg markup is empty"));
                }
            }
        }
        self.opacity.validate()?;
        self.transform.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/document.rs"]
mod tests;
