use crate::interpolation::{interpolate_pixel, InterpolationMode};
use fast_image_resize as fir;
use fir::images::{TypedImage, TypedImageRef};
use fir::pixels::U8x3;
use rayon::prelude::*;
use rescale_image::{Image, ImageError, ImageSize};

/// Errors produced by the resize operations.
#[derive(thiserror::Error, Debug)]
pub enum ResizeError {
    /// The scale factors failed validation.
    #[error("scale factors must be finite and positive, got ({0}, {1})")]
    InvalidScale(f64, f64),

    /// The image container rejected the output shape.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The fast resize backend rejected the operation.
    #[error("fast resize backend failed: {0}")]
    Backend(String),
}

/// Compute the output size for a pair of scale factors.
///
/// `sx` scales the row axis (height) and `sy` the column axis (width). Both
/// dimensions truncate, so a small enough factor produces a zero-area size.
///
/// # Example
///
/// ```
/// use rescale_image::ImageSize;
/// use rescale_imgproc::resize::scaled_size;
///
/// let size = scaled_size(ImageSize { width: 5, height: 3 }, 0.5, 2.0);
/// assert_eq!(size.height, 1);
/// assert_eq!(size.width, 10);
/// ```
pub fn scaled_size(size: ImageSize, sx: f64, sy: f64) -> ImageSize {
    ImageSize {
        height: (size.height as f64 * sx).floor() as usize,
        width: (size.width as f64 * sy).floor() as usize,
    }
}

fn check_scale(sx: f64, sy: f64) -> Result<(), ResizeError> {
    if !(sx.is_finite() && sy.is_finite() && sx > 0.0 && sy > 0.0) {
        return Err(ResizeError::InvalidScale(sx, sy));
    }
    Ok(())
}

/// Resize an image with the hand-written interpolation kernels.
///
/// Each destination pixel `(i, j)` samples the inverse-mapped source
/// coordinate `(i / sx, j / sy)` with the selected kernel. Destination rows
/// are independent and are processed in parallel; the result is identical to
/// sequential execution since every output pixel depends only on fixed
/// source neighbours.
///
/// # Arguments
///
/// * `src` - The input image container with shape (H, W, 3).
/// * `sx` - The scale factor for the row axis (height), finite and positive.
/// * `sy` - The scale factor for the column axis (width), finite and positive.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The resized image with shape (floor(H * sx), floor(W * sy), 3). If either
/// dimension truncates to zero, a valid zero-area image is returned.
///
/// # Errors
///
/// Returns [`ResizeError::InvalidScale`] if a scale factor is non-finite,
/// zero or negative; no output is produced in that case.
pub fn resize_native(
    src: &Image<u8, 3>,
    sx: f64,
    sy: f64,
    interpolation: InterpolationMode,
) -> Result<Image<u8, 3>, ResizeError> {
    check_scale(sx, sy)?;

    let dst_size = scaled_size(src.size(), sx, sy);
    let mut dst = Image::from_size_val(dst_size, 0u8)?;
    if dst.is_empty() {
        return Ok(dst);
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_size.width * 3)
        .enumerate()
        .for_each(|(i, row)| {
            let v = i as f64 / sx;
            for (j, pixel) in row.chunks_exact_mut(3).enumerate() {
                let u = j as f64 / sy;
                pixel.copy_from_slice(&interpolate_pixel(src, u, v, interpolation));
            }
        });

    Ok(dst)
}

/// Resize an image with nearest neighbour interpolation.
///
/// Every destination pixel copies the source pixel at the truncated
/// inverse-mapped coordinate; channels are copied integer-for-integer with
/// no arithmetic blending.
///
/// # Example
///
/// ```
/// use rescale_image::{Image, ImageSize};
/// use rescale_imgproc::resize::nearest_neighbour_resize;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 4,
///     },
///     vec![0u8; 4 * 4 * 3],
/// )
/// .unwrap();
///
/// let resized = nearest_neighbour_resize(&image, 0.5, 0.5).unwrap();
///
/// assert_eq!(resized.size().width, 2);
/// assert_eq!(resized.size().height, 2);
/// ```
pub fn nearest_neighbour_resize(
    src: &Image<u8, 3>,
    sx: f64,
    sy: f64,
) -> Result<Image<u8, 3>, ResizeError> {
    resize_native(src, sx, sy, InterpolationMode::Nearest)
}

/// Resize an image with bilinear interpolation.
///
/// Every destination pixel blends up to four source neighbours around the
/// inverse-mapped coordinate, with edge-clamped sampling at the borders.
///
/// # Example
///
/// ```
/// use rescale_image::{Image, ImageSize};
/// use rescale_imgproc::resize::bilinear_resize;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 2,
///         height: 2,
///     },
///     vec![128u8; 2 * 2 * 3],
/// )
/// .unwrap();
///
/// let resized = bilinear_resize(&image, 2.0, 2.0).unwrap();
///
/// assert_eq!(resized.size().width, 4);
/// assert_eq!(resized.size().height, 4);
/// ```
pub fn bilinear_resize(src: &Image<u8, 3>, sx: f64, sy: f64) -> Result<Image<u8, 3>, ResizeError> {
    resize_native(src, sx, sy, InterpolationMode::Bilinear)
}

/// Resize an image using the [fast_image_resize](https://crates.io/crates/fast_image_resize) crate.
///
/// Same contract as [`resize_native`] but delegated to the SIMD backend. The
/// backend uses its own filter implementations, so the output is not
/// bit-compatible with the native kernels.
///
/// # Arguments
///
/// * `src` - The input image container with shape (H, W, 3).
/// * `sx` - The scale factor for the row axis (height), finite and positive.
/// * `sy` - The scale factor for the column axis (width), finite and positive.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// Returns [`ResizeError::InvalidScale`] for malformed scale factors, or
/// [`ResizeError::Backend`] if the backend rejects the buffers.
pub fn resize_fast(
    src: &Image<u8, 3>,
    sx: f64,
    sy: f64,
    interpolation: InterpolationMode,
) -> Result<Image<u8, 3>, ResizeError> {
    check_scale(sx, sy)?;

    let dst_size = scaled_size(src.size(), sx, sy);
    let mut dst = Image::from_size_val(dst_size, 0u8)?;
    if dst.is_empty() {
        return Ok(dst);
    }

    let src_view = TypedImageRef::<U8x3>::from_buffer(
        src.width() as u32,
        src.height() as u32,
        src.as_slice(),
    )
    .map_err(|e| ResizeError::Backend(e.to_string()))?;

    let mut dst_view = TypedImage::<U8x3>::from_buffer(
        dst_size.width as u32,
        dst_size.height as u32,
        dst.as_slice_mut(),
    )
    .map_err(|e| ResizeError::Backend(e.to_string()))?;

    let options = fir::ResizeOptions::new().resize_alg(match interpolation {
        InterpolationMode::Nearest => fir::ResizeAlg::Nearest,
        InterpolationMode::Bilinear => fir::ResizeAlg::Convolution(fir::FilterType::Bilinear),
    });

    let mut resizer = fir::Resizer::new();
    resizer
        .resize_typed(&src_view, &mut dst_view, &options)
        .map_err(|e| ResizeError::Backend(e.to_string()))?;

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard_2x2() -> Image<u8, 3> {
        Image::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![
                0, 0, 0, 255, 255, 255, //
                255, 255, 255, 0, 0, 0,
            ],
        )
        .unwrap()
    }

    #[test]
    fn output_dimensions() -> Result<(), ResizeError> {
        let src = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 5,
                height: 3,
            },
            0,
        )?;

        for (sx, sy) in [(1.0, 1.0), (0.5, 2.0), (1.7, 0.4), (2.5, 2.5)] {
            for resize in [nearest_neighbour_resize, bilinear_resize] {
                let dst = resize(&src, sx, sy)?;
                assert_eq!(dst.height(), (3.0 * sx).floor() as usize);
                assert_eq!(dst.width(), (5.0 * sy).floor() as usize);
            }
        }
        Ok(())
    }

    #[test]
    fn nearest_identity() -> Result<(), ResizeError> {
        let src = checkerboard_2x2();
        let dst = nearest_neighbour_resize(&src, 1.0, 1.0)?;
        assert_eq!(dst, src);
        Ok(())
    }

    #[test]
    fn bilinear_identity() -> Result<(), ResizeError> {
        // at unit scale every coordinate is integral, so no blending occurs
        let src = checkerboard_2x2();
        let dst = bilinear_resize(&src, 1.0, 1.0)?;
        assert_eq!(dst, src);
        Ok(())
    }

    #[test]
    fn nearest_downscale_black() -> Result<(), ResizeError> {
        let src = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            0,
        )?;
        let dst = nearest_neighbour_resize(&src, 0.5, 0.5)?;
        assert_eq!(dst.height(), 2);
        assert_eq!(dst.width(), 2);
        assert!(dst.as_slice().iter().all(|&x| x == 0));
        Ok(())
    }

    #[test]
    fn bilinear_upscale_corners() -> Result<(), ResizeError> {
        let src = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![
                0, 0, 0, 255, 0, 0, //
                0, 255, 0, 0, 0, 255,
            ],
        )
        .unwrap();

        let dst = bilinear_resize(&src, 2.0, 2.0)?;
        assert_eq!(dst.height(), 4);
        assert_eq!(dst.width(), 4);

        // output corners reproduce the source corners exactly
        assert_eq!(dst.get_pixel(0, 0).unwrap(), src.get_pixel(0, 0).unwrap());
        assert_eq!(dst.get_pixel(0, 3).unwrap(), src.get_pixel(0, 1).unwrap());
        assert_eq!(dst.get_pixel(3, 0).unwrap(), src.get_pixel(1, 0).unwrap());
        assert_eq!(dst.get_pixel(3, 3).unwrap(), src.get_pixel(1, 1).unwrap());

        // (1, 1) maps to (0.5, 0.5): an equal-weight blend of all four corners
        assert_eq!(dst.get_pixel(1, 1).unwrap(), &[64, 64, 64]);

        // full grid, row by row
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            0, 0, 0,    128, 0, 0,   255, 0, 0,   255, 0, 0,
            0, 128, 0,  64, 64, 64,  128, 0, 128, 128, 0, 128,
            0, 255, 0,  0, 128, 128, 0, 0, 255,   0, 0, 255,
            0, 255, 0,  0, 128, 128, 0, 0, 255,   0, 0, 255,
        ];
        assert_eq!(dst.as_slice(), expected.as_slice());
        Ok(())
    }

    #[test]
    fn degenerate_output() -> Result<(), ResizeError> {
        let src = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            50,
        )?;

        for resize in [nearest_neighbour_resize, bilinear_resize] {
            let dst = resize(&src, 0.01, 0.01)?;
            assert_eq!(dst.height(), 0);
            assert_eq!(dst.width(), 0);
            assert!(dst.is_empty());
        }

        let dst = resize_fast(&src, 0.01, 0.01, InterpolationMode::Nearest)?;
        assert!(dst.is_empty());
        Ok(())
    }

    #[test]
    fn invalid_scale_rejected() {
        let src = checkerboard_2x2();
        for (sx, sy) in [
            (0.0, 1.0),
            (1.0, 0.0),
            (-1.0, 1.0),
            (f64::NAN, 1.0),
            (1.0, f64::INFINITY),
        ] {
            for resize in [nearest_neighbour_resize, bilinear_resize] {
                assert!(matches!(
                    resize(&src, sx, sy),
                    Err(ResizeError::InvalidScale(_, _))
                ));
            }
            assert!(matches!(
                resize_fast(&src, sx, sy, InterpolationMode::Bilinear),
                Err(ResizeError::InvalidScale(_, _))
            ));
        }
    }

    #[test]
    fn nearest_monotonic_along_axis() -> Result<(), ResizeError> {
        // single-row ramp: the sampled source index is non-decreasing, so the
        // output values must be non-decreasing as well
        let ramp: Vec<u8> = (0..8u8).flat_map(|x| [x * 30, x * 30, x * 30]).collect();
        let src = Image::<u8, 3>::new(
            ImageSize {
                width: 8,
                height: 1,
            },
            ramp,
        )
        .unwrap();

        for sy in [0.3, 0.7, 1.0, 1.6, 3.1] {
            let dst = nearest_neighbour_resize(&src, 1.0, sy)?;
            let row: Vec<u8> = dst.as_slice().iter().step_by(3).copied().collect();
            assert!(row.windows(2).all(|w| w[0] <= w[1]), "sy = {sy}");
        }
        Ok(())
    }

    #[test]
    fn bilinear_bounded_by_neighbours() -> Result<(), ResizeError> {
        let src = Image::<u8, 3>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![
                10, 0, 200, 90, 30, 160, 200, 60, 120, //
                40, 90, 80, 10, 120, 40, 70, 150, 10,
            ],
        )
        .unwrap();

        let (sx, sy) = (1.5, 1.5);
        let dst = bilinear_resize(&src, sx, sy)?;

        for i in 0..dst.height() {
            for j in 0..dst.width() {
                let (v, u) = (i as f64 / sx, j as f64 / sy);
                let v0 = (v.floor() as usize).min(src.rows() - 1);
                let v1 = (v.ceil() as usize).min(src.rows() - 1);
                let u0 = (u.floor() as usize).min(src.cols() - 1);
                let u1 = (u.ceil() as usize).min(src.cols() - 1);

                let out = dst.get_pixel(i, j).unwrap();
                for k in 0..3 {
                    let neighbours = [
                        src.get_pixel(v0, u0).unwrap()[k],
                        src.get_pixel(v0, u1).unwrap()[k],
                        src.get_pixel(v1, u0).unwrap()[k],
                        src.get_pixel(v1, u1).unwrap()[k],
                    ];
                    let lo = *neighbours.iter().min().unwrap();
                    let hi = *neighbours.iter().max().unwrap();
                    assert!(
                        out[k] >= lo && out[k] <= hi,
                        "pixel ({i}, {j}) channel {k}: {} not in [{lo}, {hi}]",
                        out[k]
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    fn upscale_boundary_safety() -> Result<(), ResizeError> {
        // scale factors that make the last inverse-mapped coordinate land
        // beyond the source extent; sampling must clamp to the last row/col
        let src = checkerboard_2x2();

        for (sx, sy) in [(3.5, 3.5), (2.0, 5.0), (7.3, 1.0)] {
            let nn = nearest_neighbour_resize(&src, sx, sy)?;
            let bl = bilinear_resize(&src, sx, sy)?;

            let last = (nn.height() - 1, nn.width() - 1);
            assert_eq!(nn.get_pixel(last.0, last.1).unwrap(), &[0, 0, 0]);

            let last = (bl.height() - 1, bl.width() - 1);
            assert_eq!(bl.get_pixel(last.0, last.1).unwrap(), &[0, 0, 0]);
        }
        Ok(())
    }

    #[test]
    fn resize_fast_smoke() -> Result<(), ResizeError> {
        let src = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 4,
                height: 5,
            },
            9,
        )?;

        let dst = resize_fast(&src, 0.6, 0.5, InterpolationMode::Nearest)?;
        assert_eq!(dst.height(), 3);
        assert_eq!(dst.width(), 2);
        assert!(dst.as_slice().iter().all(|&x| x == 9));
        Ok(())
    }
}
