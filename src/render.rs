pub(crate) mod backend;
pub(crate) mod scene;
pub(crate) mod session;
pub(crate) mod svg;
