use std::sync::Arc;

use crate::{
    foundation::{core::Canvas, error::HarnessResult},
    render::{scene::SceneEngine, svg::SvgCanvas},
};

/// Process-scoped renderer state, acquired once at startup and released on drop.
///
/// Owns the font database shared by every SVG parse so fonts are scanned once per run.
pub struct RenderSession {
    svg_options: Arc<usvg::Options<'static>>,
    threads: usize,
}

impl RenderSession {
    /// Start the engines. `threads` is a concurrency hint for engine internals; the
    /// harness itself renders on the calling thread.
    pub fn init(threads: usize) -> Self {
        let mut opts = usvg::Options::default();
        opts.fontdb_mut().load_system_fonts();
        let threads = threads.max(1);
        tracing::info!(threads, font_faces = opts.fontdb.len(), "render session started");
        Self {
            svg_options: Arc::new(opts),
            threads,
        }
    }

    /// [`init`](Self::init) with the hardware concurrency as hint.
    pub fn with_default_threads() -> Self {
        Self::init(std::thread::available_parallelism().map_or(1, |n| n.get()))
    }

    pub fn animation_engine(&self) -> SceneEngine {
        SceneEngine::new(Arc::clone(&self.svg_options))
    }

    pub fn picture_canvas(&self, size: Canvas) -> HarnessResult<SvgCanvas> {
        SvgCanvas::new(Arc::clone(&self.svg_options), size)
    }
}

impl Drop for RenderSession {
    fn drop(&mut self) {
        tracing::info!(threads = self.threads, "render session shut down");
    }
}
