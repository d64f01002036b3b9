//! Vector shape and text rasterization.

pub(crate) mod service;
pub(crate) mod vello;
