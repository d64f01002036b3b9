//! A small CPU drawing engine for 32-bit pixel buffers.
//!
//! The crate is built around [`Image`], a row-major buffer that either owns its pixels or borrows
//! them from the caller, and a fork-join [`Executor`] that splits per-row and per-pixel work across
//! a rayon pool. On top of those sit the compositing operations used by an editor's render path:
//!
//! - [`draw_image`], [`set_alpha`], [`set_color`]: per-pixel source-over compositing helpers
//! - [`border`], [`shadow`]: outline and drop-shadow effects that delegate smoothing to a
//!   [`FilterService`]
//! - [`Rasterizer`]: shapes and text rendered into fresh [`Bgra32`] images
//!
//! All pixels are straight (non-premultiplied) alpha at the API boundary. Blurs premultiply
//! internally.
//!
//! # Safety
//!
//! The only `unsafe` entry point is [`Image::from_raw`], which wraps caller-owned memory by
//! address. Every other constructor is safe.
#![deny(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

mod effects;
mod filters;
mod foundation;
mod image;
mod parallel;
mod pixel;
mod raster;

pub mod interop;

pub use crate::image::buffer::{Image, OwnedImage};
pub use crate::image::storage::Ownership;
pub use effects::composite::{StraightRgba8, draw_image, over_pixel, set_alpha, set_color};
pub use effects::outline::border;
pub use effects::shadow::shadow;
pub use filters::cpu::CpuFilters;
pub use filters::service::FilterService;
pub use foundation::error::{DrawingError, DrawingResult};
pub use foundation::geometry::{Point, Rectangle, Size};
pub use parallel::executor::{Executor, ExecutorOpts, THREADS_ENV, default_executor};
pub use pixel::format::{Bgra32, Pixel, PixelFormat, Rgba32};
pub use raster::service::{Brush, BrushStyle, FontSpec, Rasterizer};
pub use raster::vello::{VelloRasterizer, draw_path};
