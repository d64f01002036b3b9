use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use drawing::{
    Bgra32, Brush, CpuFilters, FontSpec, Image, Point, Rasterizer, VelloRasterizer, border,
    draw_image, interop, shadow,
};

/// Render an outlined, drop-shadowed badge to a PNG.
#[derive(Parser, Debug)]
#[command(name = "badge")]
struct Args {
    /// Output PNG path.
    #[arg(long, default_value = "target/badge.png")]
    out: PathBuf,

    /// Badge diameter in pixels.
    #[arg(long, default_value_t = 96)]
    size: u32,

    /// Optional TTF/OTF file for a caption under the badge.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Caption text.
    #[arg(long, default_value = "Drawing")]
    caption: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let filters = CpuFilters::new();
    let mut raster = VelloRasterizer::new();

    let disc = raster.ellipse(
        args.size,
        args.size,
        &Brush::fill(Bgra32::from_rgba8(255, 196, 0, 255)),
    )?;
    let ring = raster.ellipse(
        args.size,
        args.size,
        &Brush::stroke(Bgra32::from_rgba8(220, 80, 30, 255), 6.0),
    )?;

    let mut face = disc.try_clone()?;
    draw_image(&mut face, Point::ZERO, &ring)?;

    let outline = border(&face, 3, Bgra32::WHITE, &filters)?;
    let mut badge = outline.try_clone()?;
    let inset = ((outline.width()? - face.width()?) / 2) as i32;
    draw_image(&mut badge, Point::new(inset, inset), &face)?;

    if let Some(path) = &args.font {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        let label = raster.text(&args.caption, &FontSpec::new(bytes, 18.0), Bgra32::BLACK)?;
        let (bw, bh) = (badge.width()?, badge.height()?);
        let (lw, lh) = (label.width()?, label.height()?);
        let width = bw.max(lw);
        let mut tall = Image::new(width, bh + lh)?;
        draw_image(&mut tall, Point::new(((width - bw) / 2) as i32, 0), &badge)?;
        draw_image(&mut tall, Point::new(((width - lw) / 2) as i32, bh as i32), &label)?;
        badge = tall;
    }

    let out = shadow(&badge, 6, 6, 4, 0.5, Bgra32::BLACK, &filters)?;
    let rgba = interop::to_rgba_image(&out)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    rgba.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write '{}'", args.out.display()))?;

    tracing::info!(
        path = %args.out.display(),
        width = rgba.width(),
        height = rgba.height(),
        "badge written"
    );
    Ok(())
}
