//! The generic pixel buffer and its storage modes.

pub(crate) mod buffer;
pub(crate) mod storage;
