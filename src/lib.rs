//! goldenframe is a golden-image regression harness for vector renderers.
//!
//! It renders a corpus of documents through an engine, then either stores the
//! frames as baseline PNGs (generate) or re-renders and compares every frame
//! byte-for-byte with the stored baseline (verify).
//!
//! # Pipeline
//!
//! 1. **Locate**: [`list_files`] lists `.json` animation and `.svg` picture sources
//!    in sorted path order.
//! 2. **Render**: an [`AnimationPlayer`] or [`PictureCanvas`] draws into the runner's
//!    fixed-size [`PixelBuffer`] (premultiplied `[B, G, R, A]`).
//! 3. **Normalize**: [`normalize`] turns that into straight-alpha RGBA.
//! 4. **Store or compare**: [`encode_baseline`] / [`matches_baseline`].
//!
//! [`TestModeController`] sequences both suites and prints the report. Failures of
//! any kind become FAIL lines, never errors.
#![forbid(unsafe_code)]

mod animation;
mod baseline;
mod corpus;
mod foundation;
mod harness;
mod pixels;
mod render;

pub use animation::anim::{Anim, Ease, Expr, InterpMode, Keyframe, Keyframes, Lerp, LoopMode};
pub use animation::document::{AnimationDocument, Layer, Shape};
pub use baseline::codec::{
    BaselineImage, decode_baseline, encode_baseline, frame_baseline_path, matches_baseline,
    picture_baseline_path,
};
pub use corpus::locator::{
    ANIMATION_DOCUMENTS, Extension, SourceFilter, SourcePath, VECTOR_DOCUMENTS, list_files,
};
pub use foundation::config::HarnessConfig;
pub use foundation::core::{Affine, Canvas, FRAME_SIZE, FrameIndex, Rgba8, Transform2D, Vec2};
pub use foundation::error::{HarnessError, HarnessResult};
pub use harness::animation::{AnimationOutcome, FailedFrame, FrameAnimationTestRunner};
pub use harness::controller::{RunSummary, Suite, TestMode, TestModeController};
pub use harness::picture::StaticPictureTestRunner;
pub use pixels::buffer::PixelBuffer;
pub use pixels::normalize::normalize;
pub use render::backend::{AnimationEngine, AnimationPlayer, PictureCanvas};
pub use render::scene::{SceneEngine, ScenePlayer};
pub use render::session::RenderSession;
pub use render::svg::{Picture, SvgCanvas};
