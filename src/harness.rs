pub(crate) mod animation;
pub(crate) mod controller;
pub(crate) mod picture;
