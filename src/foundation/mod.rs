pub(crate) mod error;
pub(crate) mod geometry;
pub(crate) mod math;
