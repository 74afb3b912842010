use crate::foundation::{
    core::{FrameIndex, Transform2D, Vec2},
    error::{HarnessError, HarnessResult},
};

/// Easing applied from one keyframe toward the next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t).powi(2),
            Self::InOutQuad if t < 0.5 => 2.0 * t * t,
            Self::InOutQuad => 1.0 - (-2.0 * t + 2.0).powi(2) / 2.0,
            Self::InCubic => t.powi(3),
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic if t < 0.5 => 4.0 * t.powi(3),
            Self::InOutCubic => 1.0 - (-2.0 * t + 2.0).powi(3) / 2.0,
        }
    }
}

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

impl Lerp for Transform2D {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            translate: Lerp::lerp(&a.translate, &b.translate, t),
            rotation_rad: Lerp::lerp(&a.rotation_rad, &b.rotation_rad, t),
            scale: Lerp::lerp(&a.scale, &b.scale, t),
            anchor: Lerp::lerp(&a.anchor, &b.anchor, t),
        }
    }
}

/// A document property sampled per frame.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anim<T> {
    Constant(T),
    Keyframes(Keyframes<T>),
    Expr(Expr<T>),
}

impl<T> Anim<T>
where
    T: Lerp + Clone,
{
    pub fn sample(&self, frame: FrameIndex) -> HarnessResult<T> {
        match self {
            Self::Constant(v) => Ok(v.clone()),
            Self::Keyframes(kf) => kf.sample(frame),
            Self::Expr(expr) => expr.sample(frame),
        }
    }

    pub fn validate(&self) -> HarnessResult<()> {
        match self {
            Self::Constant(_) => Ok(()),
            Self::Keyframes(kf) => kf.validate(),
            Self::Expr(expr) => expr.validate(),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    pub keys: Vec<Keyframe<T>>, // sorted by frame
    #[serde(default)]
    pub mode: InterpMode,
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    pub fn validate(&self) -> HarnessResult<()> {
        if self.keys.is_empty() {
            return Err(HarnessError::load("keyframes must have at least one key"));
        }
        if !self.keys.windows(2).all(|w| w[0].frame <= w[1].frame) {
            return Err(HarnessError::load("keyframes must be sorted by frame"));
        }
        Ok(())
    }

    pub fn sample(&self, frame: FrameIndex) -> HarnessResult<T> {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return Err(HarnessError::render("keyframes have no keys"));
        };

        let f = frame.0;
        let idx = self.keys.partition_point(|k| k.frame.0 <= f);
        if idx == 0 {
            return Ok(first.value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(last.value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let span = b.frame.0 - a.frame.0;
        if span == 0 || self.mode == InterpMode::Hold {
            return Ok(a.value.clone());
        }

        let t = a.ease.apply((f - a.frame.0) as f64 / span as f64);
        Ok(T::lerp(&a.value, &b.value, t))
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    pub frame: FrameIndex,
    pub value: T,
    #[serde(default)]
    pub ease: Ease, // toward the next key
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpMode {
    Hold,
    #[default]
    Linear,
}

/// Time remapping applied before sampling the inner animation.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr<T> {
    Delay {
        inner: Box<Anim<T>>,
        by: u64,
    },
    Reverse {
        inner: Box<Anim<T>>,
        duration: u64,
    },
    Loop {
        inner: Box<Anim<T>>,
        period: u64,
        #[serde(default)]
        mode: LoopMode,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    #[default]
    Repeat,
    PingPong,
}

impl<T> Expr<T>
where
    T: Lerp + Clone,
{
    pub fn validate(&self) -> HarnessResult<()> {
        match self {
            Self::Delay { inner, .. } => inner.validate(),
            Self::Reverse { inner, duration } => {
                if *duration == 0 {
                    return Err(HarnessError::load("reverse duration must be > 0"));
                }
                inner.validate()
            }
            Self::Loop { inner, period, .. } => {
                if *period == 0 {
                    return Err(HarnessError::load("loop period must be > 0"));
                }
                inner.validate()
            }
        }
    }

    pub fn sample(&self, frame: FrameIndex) -> HarnessResult<T> {
        let f = frame.0;
        match self {
            Self::Delay { inner, by } => inner.sample(FrameIndex(f.saturating_sub(*by))),
            Self::Reverse { inner, duration } => {
                let max = duration
                    .checked_sub(1)
                    .ok_or_else(|| HarnessError::render("reverse duration must be > 0"))?;
                inner.sample(FrameIndex(max - f.min(max)))
            }
            Self::Loop {
                inner,
                period,
                mode,
            } => {
                if *period == 0 {
                    return Err(HarnessError::render("loop period must be > 0"));
                }
                let mapped = match mode {
                    LoopMode::Repeat => f % period,
                    LoopMode::PingPong if *period == 1 => 0,
                    LoopMode::PingPong => {
                        let cycle = 2 * (period - 1);
                        let pos = f % cycle;
                        if pos < *period { pos } else { cycle - pos }
                    }
                };
                inner.sample(FrameIndex(mapped))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
