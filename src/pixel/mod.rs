//! Pixel value types and their layout descriptors.

pub(crate) mod format;
