use std::ptr::NonNull;

use crate::effects::composite::over_pixel;
use crate::foundation::error::{DrawingError, DrawingResult};
use crate::foundation::geometry::{Rectangle, Size};
use crate::image::storage::{Ownership, Storage};
use crate::parallel::executor::default_executor;
use crate::pixel::format::Pixel;

/// A contiguous, row-major 2D pixel buffer.
///
/// The buffer is either allocated by the image ([`Ownership::Exclusive`]) or borrowed from the
/// caller. Width and height are fixed and non-zero for the lifetime of the instance. After
/// [`Image::dispose`] every accessor fails with [`DrawingError::Disposed`].
///
/// Region reads and writes ([`Image::get_roi`], [`Image::set_roi`]) always copy; an image never
/// aliases another image's pixels.
pub struct Image<'a, T: Pixel> {
    width: u32,
    height: u32,
    storage: Storage<'a, T>,
}

/// An image that owns its pixels.
pub type OwnedImage<T> = Image<'static, T>;

impl<T: Pixel> Image<'static, T> {
    /// Allocate a zero-initialised image.
    pub fn new(width: u32, height: u32) -> DrawingResult<Self> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            storage: Storage::Owned(vec![T::zeroed(); len].into_boxed_slice()),
        })
    }

    /// Allocate an image with every pixel set to `fill`.
    pub fn with_fill(width: u32, height: u32, fill: T) -> DrawingResult<Self> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            storage: Storage::Owned(vec![fill; len].into_boxed_slice()),
        })
    }

    /// Allocate an image of the given extent.
    pub fn with_size(size: Size) -> DrawingResult<Self> {
        Self::new(size.width, size.height)
    }
}

impl<'a, T: Pixel> Image<'a, T> {
    /// Wrap caller-owned storage. `data.len()` must be exactly `width * height`.
    pub fn from_slice(width: u32, height: u32, data: &'a mut [T]) -> DrawingResult<Self> {
        let len = pixel_count(width, height)?;
        if data.len() != len {
            return Err(DrawingError::invalid_buffer(format!(
                "expected {len} pixels for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            storage: Storage::BorrowedSlice(data),
        })
    }

    /// Wrap caller-owned memory by address. `len_bytes` is the size of the region at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads and writes of `len_bytes` bytes for as long as the returned
    /// image (and any borrow taken from it) is alive, and nothing else may access that memory
    /// during that time. The image never frees it.
    pub unsafe fn from_raw(
        width: u32,
        height: u32,
        ptr: *mut T,
        len_bytes: usize,
    ) -> DrawingResult<Self> {
        let len = pixel_count(width, height)?;
        let ptr = NonNull::new(ptr)
            .ok_or_else(|| DrawingError::invalid_buffer("pixel pointer is null"))?;
        if !ptr.as_ptr().is_aligned() {
            return Err(DrawingError::invalid_buffer(format!(
                "pixel pointer is not aligned to {} bytes",
                std::mem::align_of::<T>()
            )));
        }
        let needed = byte_len::<T>(len)?;
        if len_bytes < needed {
            return Err(DrawingError::invalid_buffer(format!(
                "buffer holds {len_bytes} bytes, {width}x{height} needs {needed}"
            )));
        }
        Ok(Self {
            width,
            height,
            storage: Storage::BorrowedRaw { ptr, len },
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> DrawingResult<u32> {
        self.ensure_alive()?;
        Ok(self.width)
    }

    /// Height in pixels.
    pub fn height(&self) -> DrawingResult<u32> {
        self.ensure_alive()?;
        Ok(self.height)
    }

    /// Extent in pixels.
    pub fn size(&self) -> DrawingResult<Size> {
        self.ensure_alive()?;
        Ok(Size::from_unsigned(self.width, self.height))
    }

    /// Bytes per row.
    pub fn stride_bytes(&self) -> DrawingResult<usize> {
        self.ensure_alive()?;
        Ok(self.width as usize * std::mem::size_of::<T>())
    }

    /// Bytes covered by all pixels.
    pub fn data_size_bytes(&self) -> DrawingResult<usize> {
        self.ensure_alive()?;
        Ok(self.stride_bytes()? * self.height as usize)
    }

    /// Ownership mode of the backing storage.
    pub fn ownership(&self) -> DrawingResult<Ownership> {
        self.storage.ownership().ok_or(DrawingError::Disposed)
    }

    /// `true` once [`Image::dispose`] has run.
    pub fn is_disposed(&self) -> bool {
        matches!(self.storage, Storage::Disposed)
    }

    /// All pixels, row-major.
    pub fn data(&self) -> DrawingResult<&[T]> {
        self.storage.as_slice().ok_or(DrawingError::Disposed)
    }

    /// All pixels, row-major, mutably.
    pub fn data_mut(&mut self) -> DrawingResult<&mut [T]> {
        self.storage.as_mut_slice().ok_or(DrawingError::Disposed)
    }

    /// Raw bytes in memory order.
    pub fn as_bytes(&self) -> DrawingResult<&[u8]> {
        Ok(bytemuck::cast_slice(self.data()?))
    }

    /// Row `y`, exactly `width` pixels long.
    pub fn row(&self, y: u32) -> DrawingResult<&[T]> {
        let range = self.row_range(y)?;
        Ok(&self.data()?[range])
    }

    /// Row `y`, mutably.
    pub fn row_mut(&mut self, y: u32) -> DrawingResult<&mut [T]> {
        let range = self.row_range(y)?;
        Ok(&mut self.data_mut()?[range])
    }

    /// Overwrite row `y`; `src` must be exactly `width` pixels long.
    pub fn set_row(&mut self, y: u32, src: &[T]) -> DrawingResult<()> {
        let row = self.row_mut(y)?;
        if src.len() != row.len() {
            return Err(DrawingError::out_of_range(format!(
                "row has {} pixels, source has {}",
                row.len(),
                src.len()
            )));
        }
        row.copy_from_slice(src);
        Ok(())
    }

    /// Pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> DrawingResult<&T> {
        self.ensure_column(x)?;
        Ok(&self.row(y)?[x as usize])
    }

    /// Pixel at `(x, y)`, mutably.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> DrawingResult<&mut T> {
        self.ensure_column(x)?;
        Ok(&mut self.row_mut(y)?[x as usize])
    }

    /// Copy the pixels inside `roi` into a new exclusive image.
    ///
    /// Fails with [`DrawingError::OutOfRange`] unless `roi` is non-empty and lies fully inside the
    /// image.
    pub fn get_roi(&self, roi: Rectangle) -> DrawingResult<OwnedImage<T>> {
        self.ensure_alive()?;
        self.ensure_inside(roi)?;

        let src = self.data()?;
        let stride = self.width as usize;
        let (x0, y0) = (roi.x as usize, roi.y as usize);
        let w = roi.width as usize;

        let mut out = Image::new(roi.width, roi.height)?;
        default_executor().for_each_row(out.data_mut()?, w, |y, row| {
            let start = (y0 + y) * stride + x0;
            row.copy_from_slice(&src[start..start + w]);
        })?;
        Ok(out)
    }

    /// Copy `source` into the area `roi`, one row per task.
    ///
    /// Each of the `roi.height` rows copies `min(roi.width, source.width)` pixels. `roi` must lie
    /// fully inside this image and `source` must have at least `roi.height` rows.
    pub fn set_roi(&mut self, roi: Rectangle, source: &Image<'_, T>) -> DrawingResult<()> {
        self.ensure_alive()?;
        source.ensure_alive()?;
        self.ensure_inside(roi)?;
        if source.height < roi.height {
            return Err(DrawingError::out_of_range(format!(
                "source has {} rows, region needs {}",
                source.height, roi.height
            )));
        }

        let src = source.data()?;
        let src_stride = source.width as usize;
        let stride = self.width as usize;
        let (x0, y0) = (roi.x as usize, roi.y as usize);
        let n = (roi.width.min(source.width)) as usize;

        let band = &mut self.data_mut()?[y0 * stride..(y0 + roi.height as usize) * stride];
        default_executor().for_each_row(band, stride, |y, row| {
            let from = y * src_stride;
            row[x0..x0 + n].copy_from_slice(&src[from..from + n]);
        })
    }

    /// Deep copy into a new exclusive image, whatever this image's ownership.
    pub fn try_clone(&self) -> DrawingResult<OwnedImage<T>> {
        let data = self.data()?;
        Ok(Image {
            width: self.width,
            height: self.height,
            storage: Storage::Owned(data.to_vec().into_boxed_slice()),
        })
    }

    /// Set every pixel to the zero value.
    pub fn clear(&mut self) -> DrawingResult<()> {
        self.data_mut()?.fill(T::zeroed());
        Ok(())
    }

    /// Set every pixel to `value`.
    pub fn fill(&mut self, value: T) -> DrawingResult<()> {
        self.data_mut()?.fill(value);
        Ok(())
    }

    /// Mirror the image in place.
    ///
    /// `horizontal` reverses every row; `vertical` swaps row `y` with row `height - 1 - y`. The
    /// two passes commute.
    pub fn flip(&mut self, horizontal: bool, vertical: bool) -> DrawingResult<()> {
        self.ensure_alive()?;
        let width = self.width as usize;
        let exec = default_executor();

        if horizontal {
            exec.for_each_row(self.data_mut()?, width, |_, row| row.reverse())?;
        }
        if vertical {
            exec.for_each_row_pair(self.data_mut()?, width, |_, top, bottom, scratch| {
                scratch.clear();
                scratch.extend_from_slice(top);
                top.copy_from_slice(bottom);
                bottom.copy_from_slice(scratch);
            })?;
        }
        Ok(())
    }

    /// New image padded with transparent pixels; this image is pasted at `(left, top)`.
    pub fn make_border(
        &self,
        top: u32,
        bottom: u32,
        left: u32,
        right: u32,
    ) -> DrawingResult<OwnedImage<T>> {
        self.ensure_alive()?;
        let grow = |base: u32, a: u32, b: u32| {
            base.checked_add(a)
                .and_then(|v| v.checked_add(b))
                .ok_or_else(|| DrawingError::invalid_dimensions("bordered size overflows u32"))
        };
        let width = grow(self.width, left, right)?;
        let height = grow(self.height, top, bottom)?;

        let x = i32::try_from(left)
            .map_err(|_| DrawingError::invalid_dimensions("left border exceeds i32"))?;
        let y = i32::try_from(top)
            .map_err(|_| DrawingError::invalid_dimensions("top border exceeds i32"))?;

        let mut out = Image::new(width, height)?;
        out.set_roi(Rectangle::new(x, y, self.width, self.height), self)?;
        Ok(out)
    }

    /// Pad symmetrically towards `target_width` x `target_height`.
    ///
    /// Margins are `(target - current) / 2` on each side, so an odd difference yields an image
    /// one pixel smaller than the target on that axis.
    pub fn make_border_to(
        &self,
        target_width: u32,
        target_height: u32,
    ) -> DrawingResult<OwnedImage<T>> {
        self.ensure_alive()?;
        if target_width < self.width || target_height < self.height {
            return Err(DrawingError::validation(format!(
                "border target {target_width}x{target_height} is smaller than {}x{}",
                self.width, self.height
            )));
        }
        let v = (target_height - self.height) / 2;
        let h = (target_width - self.width) / 2;
        self.make_border(v, v, h, h)
    }

    /// Source-over composite `src` onto this image's pixels, writing the result into `dst`.
    /// All three images must have the same extent.
    pub fn blend(&self, src: &Image<'_, T>, dst: &mut Image<'_, T>) -> DrawingResult<()> {
        let size = self.size()?;
        if src.size()? != size || dst.size()? != size {
            return Err(DrawingError::out_of_range(
                "blend expects images of identical size",
            ));
        }
        let under = self.data()?;
        let over = src.data()?;
        default_executor().for_each_pixel(dst.data_mut()?, |i, px| {
            *px = T::from_rgba(over_pixel(under[i].to_rgba(), over[i].to_rgba()));
        })
    }

    /// Source-over composite `src` onto this image in place. Extents must match.
    pub fn blend_in_place(&mut self, src: &Image<'_, T>) -> DrawingResult<()> {
        if src.size()? != self.size()? {
            return Err(DrawingError::out_of_range(
                "blend expects images of identical size",
            ));
        }
        let over = src.data()?;
        default_executor().for_each_pixel(self.data_mut()?, |i, px| {
            *px = T::from_rgba(over_pixel(px.to_rgba(), over[i].to_rgba()));
        })
    }

    /// Copy into a new exclusive image of another pixel format by reordering channels.
    pub fn convert<U: Pixel>(&self) -> DrawingResult<OwnedImage<U>> {
        let src = self.data()?;
        let mut out = Image::<U>::new(self.width, self.height)?;
        default_executor().for_each_pixel(out.data_mut()?, |i, px| *px = src[i].convert())?;
        Ok(out)
    }

    /// Release the pixels. Idempotent; borrowed storage is never freed, only detached.
    pub fn dispose(&mut self) {
        if self.storage.release() {
            tracing::trace!(width = self.width, height = self.height, "image disposed");
        }
    }

    fn ensure_alive(&self) -> DrawingResult<()> {
        if self.is_disposed() {
            return Err(DrawingError::Disposed);
        }
        Ok(())
    }

    fn ensure_column(&self, x: u32) -> DrawingResult<()> {
        self.ensure_alive()?;
        if x >= self.width {
            return Err(DrawingError::out_of_range(format!(
                "column {x} outside [0, {})",
                self.width
            )));
        }
        Ok(())
    }

    fn row_range(&self, y: u32) -> DrawingResult<std::ops::Range<usize>> {
        self.ensure_alive()?;
        if y >= self.height {
            return Err(DrawingError::out_of_range(format!(
                "row {y} outside [0, {})",
                self.height
            )));
        }
        let w = self.width as usize;
        let start = y as usize * w;
        Ok(start..start + w)
    }

    fn ensure_inside(&self, roi: Rectangle) -> DrawingResult<()> {
        let bounds = Rectangle::new(0, 0, self.width, self.height);
        if roi.is_empty() || !bounds.contains_rect(roi) {
            return Err(DrawingError::out_of_range(format!(
                "region {roi:?} outside {}x{} image",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl<T: Pixel> std::fmt::Debug for Image<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("format", &T::FORMAT)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("ownership", &self.storage.ownership())
            .finish()
    }
}

fn pixel_count(width: u32, height: u32) -> DrawingResult<usize> {
    if width == 0 || height == 0 {
        return Err(DrawingError::invalid_dimensions(format!(
            "width and height must be > 0, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| DrawingError::invalid_dimensions("pixel count overflow"))
}

fn byte_len<T>(pixels: usize) -> DrawingResult<usize> {
    pixels
        .checked_mul(std::mem::size_of::<T>())
        .ok_or_else(|| DrawingError::invalid_dimensions("buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/image/buffer.rs"]
mod tests;
