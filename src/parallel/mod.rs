//! Fork-join scheduling for per-row and per-pixel work.

pub(crate) mod executor;
