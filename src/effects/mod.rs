//! Compositing operations built on the pixel buffer.

pub(crate) mod composite;
pub(crate) mod outline;
pub(crate) mod shadow;
