//! Morphology and blur filters behind a swappable service trait.

pub(crate) mod cpu;
pub(crate) mod service;
