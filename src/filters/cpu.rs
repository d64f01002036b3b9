use crate::filters::service::FilterService;
use crate::foundation::error::{DrawingError, DrawingResult};
use crate::foundation::math::{premultiply, unpremultiply};
use crate::image::buffer::Image;
use crate::parallel::executor::{Executor, default_executor};
use crate::pixel::format::Pixel;

type Rgba8 = [u8; 4];

/// In-process [`FilterService`] running separable passes on the default executor.
///
/// Blurs run on premultiplied pixels so transparent neighbours do not bleed their colour.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuFilters;

impl CpuFilters {
    /// Create the filter set.
    pub fn new() -> Self {
        Self
    }
}

impl FilterService for CpuFilters {
    fn dilate<T: Pixel>(&self, image: &mut Image<'_, T>, radius: u32) -> DrawingResult<()> {
        let radius = validate_radius(radius, "dilate")?;
        run_separable(image, radius, &Reduce::Max, Alpha::Straight)
    }

    fn erode<T: Pixel>(&self, image: &mut Image<'_, T>, radius: u32) -> DrawingResult<()> {
        let radius = validate_radius(radius, "erode")?;
        run_separable(image, radius, &Reduce::Min, Alpha::Straight)
    }

    fn box_blur<T: Pixel>(&self, image: &mut Image<'_, T>, sigma: f32) -> DrawingResult<()> {
        validate_sigma(sigma)?;
        let radius = validate_radius(sigma.ceil() as u32, "box blur")?;
        let kernel = box_kernel_q16(radius);
        run_separable(image, radius, &Reduce::Weighted(&kernel), Alpha::Premultiplied)
    }

    fn gaussian_blur<T: Pixel>(
        &self,
        image: &mut Image<'_, T>,
        sigma: f32,
    ) -> DrawingResult<()> {
        validate_sigma(sigma)?;
        let radius = validate_radius((3.0 * sigma).ceil() as u32, "gaussian blur")?;
        let kernel = gaussian_kernel_q16(radius, sigma)?;
        run_separable(image, radius, &Reduce::Weighted(&kernel), Alpha::Premultiplied)
    }

    fn median_blur<T: Pixel>(&self, image: &mut Image<'_, T>, size: u32) -> DrawingResult<()> {
        if size == 0 || size % 2 == 0 {
            return Err(DrawingError::validation(format!(
                "median size must be odd and > 0, got {size}"
            )));
        }
        let radius = (size / 2) as i32;
        let exec = default_executor();
        let width = image.width()? as usize;
        let height = image.height()? as usize;
        let src = load(image, Alpha::Straight)?;

        let mut out = vec![[0u8; 4]; src.len()];
        exec.for_each_row(&mut out, width, |y, row| {
            let mut window: Vec<u8> = Vec::with_capacity((size * size) as usize);
            for (x, o) in row.iter_mut().enumerate() {
                for c in 0..4 {
                    window.clear();
                    for dy in -radius..=radius {
                        let sy = clamp_index(y as i32 + dy, height);
                        for dx in -radius..=radius {
                            let sx = clamp_index(x as i32 + dx, width);
                            window.push(src[sy * width + sx][c]);
                        }
                    }
                    let mid = window.len() / 2;
                    o[c] = *window.select_nth_unstable(mid).1;
                }
            }
        })?;
        store(exec, image, &out, Alpha::Straight)
    }
}

#[derive(Clone, Copy)]
enum Alpha {
    Straight,
    Premultiplied,
}

enum Reduce<'k> {
    Max,
    Min,
    Weighted(&'k [u32]),
}

impl Reduce<'_> {
    fn apply(&self, radius: i32, sample: impl Fn(i32) -> Rgba8) -> Rgba8 {
        match self {
            Reduce::Max => (-radius..=radius).map(sample).fold([0; 4], |acc, p| {
                [
                    acc[0].max(p[0]),
                    acc[1].max(p[1]),
                    acc[2].max(p[2]),
                    acc[3].max(p[3]),
                ]
            }),
            Reduce::Min => (-radius..=radius).map(sample).fold([255; 4], |acc, p| {
                [
                    acc[0].min(p[0]),
                    acc[1].min(p[1]),
                    acc[2].min(p[2]),
                    acc[3].min(p[3]),
                ]
            }),
            Reduce::Weighted(k) => {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let p = sample(ki as i32 - radius);
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(p[c]);
                    }
                }
                acc.map(q16_to_u8)
            }
        }
    }
}

fn run_separable<T: Pixel>(
    image: &mut Image<'_, T>,
    radius: u32,
    reduce: &Reduce<'_>,
    alpha: Alpha,
) -> DrawingResult<()> {
    let exec = default_executor();
    let width = image.width()? as usize;
    let height = image.height()? as usize;
    let r = radius as i32;
    let src = load(image, alpha)?;

    let mut tmp = vec![[0u8; 4]; src.len()];
    exec.for_each_row(&mut tmp, width, |y, row| {
        let line = &src[y * width..(y + 1) * width];
        for (x, o) in row.iter_mut().enumerate() {
            *o = reduce.apply(r, |d| line[clamp_index(x as i32 + d, width)]);
        }
    })?;

    let mut out = vec![[0u8; 4]; src.len()];
    exec.for_each_row(&mut out, width, |y, row| {
        for (x, o) in row.iter_mut().enumerate() {
            *o = reduce.apply(r, |d| tmp[clamp_index(y as i32 + d, height) * width + x]);
        }
    })?;

    store(exec, image, &out, alpha)
}

fn load<T: Pixel>(image: &Image<'_, T>, alpha: Alpha) -> DrawingResult<Vec<Rgba8>> {
    let data = image.data()?;
    Ok(match alpha {
        Alpha::Straight => data.iter().map(|p| p.to_rgba()).collect(),
        Alpha::Premultiplied => data.iter().map(|p| premultiply(p.to_rgba())).collect(),
    })
}

fn store<T: Pixel>(
    exec: &Executor,
    image: &mut Image<'_, T>,
    pixels: &[Rgba8],
    alpha: Alpha,
) -> DrawingResult<()> {
    exec.for_each_pixel(image.data_mut()?, |i, px| {
        *px = T::from_rgba(match alpha {
            Alpha::Straight => pixels[i],
            Alpha::Premultiplied => unpremultiply(pixels[i]),
        });
    })
}

fn clamp_index(i: i32, len: usize) -> usize {
    i.clamp(0, len as i32 - 1) as usize
}

fn validate_radius(radius: u32, what: &str) -> DrawingResult<u32> {
    if radius == 0 {
        return Err(DrawingError::validation(format!("{what} radius must be > 0")));
    }
    Ok(radius)
}

fn validate_sigma(sigma: f32) -> DrawingResult<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(DrawingError::validation("blur sigma must be finite and > 0"));
    }
    Ok(())
}

fn box_kernel_q16(radius: u32) -> Vec<u32> {
    let taps = 2 * radius as usize + 1;
    let each = 65536 / taps as u32;
    let mut weights = vec![each; taps];
    weights[taps / 2] += 65536 - each * taps as u32;
    weights
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> DrawingResult<Vec<u32>> {
    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(DrawingError::validation("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Push the rounding error into the centre tap so the kernel sums to exactly 1.0 in Q16.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/filters/cpu.rs"]
mod tests;
