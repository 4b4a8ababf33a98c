use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::info;

use rescale_image::{Image, ImageSize};
use rescale_imgproc::{interpolation::InterpolationMode, resize};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Method {
    /// Nearest neighbour interpolation
    Nearest,
    /// Bilinear interpolation
    Bilinear,
}

impl From<Method> for InterpolationMode {
    fn from(method: Method) -> Self {
        match method {
            Method::Nearest => InterpolationMode::Nearest,
            Method::Bilinear => InterpolationMode::Bilinear,
        }
    }
}

/// Resample a raster image by a pair of scale factors.
#[derive(Parser)]
#[command(name = "rescale", version)]
struct Args {
    /// Input image path (png, jpeg, ...)
    #[arg(short, long)]
    input: PathBuf,

    /// Output image path; the format is inferred from the extension
    #[arg(short, long)]
    output: PathBuf,

    /// Scale factor for the row axis (height)
    #[arg(long, default_value_t = 0.5)]
    sx: f64,

    /// Scale factor for the column axis (width)
    #[arg(long, default_value_t = 0.5)]
    sy: f64,

    /// Interpolation method
    #[arg(long, value_enum, default_value_t = Method::Bilinear)]
    method: Method,

    /// Use the SIMD backend instead of the native kernels
    #[arg(long)]
    fast: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    // decode the input into an owned HWC rgb8 buffer
    let rgb = image::open(&args.input)?.into_rgb8();
    let size = ImageSize {
        width: rgb.width() as usize,
        height: rgb.height() as usize,
    };
    let src = Image::<u8, 3>::new(size, rgb.into_raw())?;
    info!("input image: {}", src.size());

    let start = std::time::Instant::now();
    let dst = if args.fast {
        resize::resize_fast(&src, args.sx, args.sy, args.method.into())?
    } else {
        resize::resize_native(&src, args.sx, args.sy, args.method.into())?
    };
    info!("resized image: {} in {:?}", dst.size(), start.elapsed());

    if dst.is_empty() {
        return Err("scale factors produce an empty image, nothing to encode".into());
    }

    let (width, height) = (dst.width() as u32, dst.height() as u32);
    let out = image::RgbImage::from_raw(width, height, dst.into_vec())
        .ok_or("failed to build the output image buffer")?;
    out.save(&args.output)?;

    Ok(())
}
