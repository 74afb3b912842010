pub(crate) mod locator;
