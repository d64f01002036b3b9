use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Runtime tag for a pixel layout, handed to collaborators that dispatch on format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 8-bit B, G, R, A.
    Bgra32,
    /// 8-bit R, G, B, A.
    Rgba32,
}

impl PixelFormat {
    /// Number of channels per pixel.
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Bgra32 | PixelFormat::Rgba32 => 4,
        }
    }

    /// Bytes occupied by one pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Bgra32 | PixelFormat::Rgba32 => 4,
        }
    }
}

/// A fixed-layout pixel value.
///
/// `Pod` guarantees there is no padding and that any bit pattern is valid, which is what lets
/// images wrap foreign byte buffers and compute stride from `size_of::<Self>()`.
pub trait Pixel: bytemuck::Pod + Default + Debug + PartialEq + Send + Sync {
    /// Number of channels.
    const CHANNELS: usize;
    /// Runtime format tag.
    const FORMAT: PixelFormat;

    /// Channels in `[r, g, b, a]` order (straight alpha).
    fn to_rgba(self) -> [u8; 4];

    /// Build from channels in `[r, g, b, a]` order (straight alpha).
    fn from_rgba(rgba: [u8; 4]) -> Self;

    /// Alpha channel.
    fn alpha(self) -> u8 {
        self.to_rgba()[3]
    }

    /// Convert into another format by reordering channels.
    fn convert<U: Pixel>(self) -> U {
        U::from_rgba(self.to_rgba())
    }
}

/// 32-bit pixel stored as B, G, R, A.
#[repr(C)]
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
)]
pub struct Bgra32 {
    /// Blue.
    pub b: u8,
    /// Green.
    pub g: u8,
    /// Red.
    pub r: u8,
    /// Alpha.
    pub a: u8,
}

impl Bgra32 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a pixel from channels in memory order.
    pub const fn new(b: u8, g: u8, r: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }

    /// Create a pixel from channels in `r, g, b, a` order.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }
}

impl Pixel for Bgra32 {
    const CHANNELS: usize = 4;
    const FORMAT: PixelFormat = PixelFormat::Bgra32;

    fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    fn from_rgba([r, g, b, a]: [u8; 4]) -> Self {
        Self { b, g, r, a }
    }
}

/// 32-bit pixel stored as R, G, B, A.
#[repr(C)]
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
)]
pub struct Rgba32 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba32 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a pixel from channels in memory order.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Pixel for Rgba32 {
    const CHANNELS: usize = 4;
    const FORMAT: PixelFormat = PixelFormat::Rgba32;

    fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    fn from_rgba([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Rgba32> for Bgra32 {
    fn from(p: Rgba32) -> Self {
        p.convert()
    }
}

impl From<Bgra32> for Rgba32 {
    fn from(p: Bgra32) -> Self {
        p.convert()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/format.rs"]
mod tests;
