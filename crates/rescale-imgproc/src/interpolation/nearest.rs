use rescale_image::Image;

/// Kernel for nearest neighbour interpolation
///
/// The source index is the truncated inverse-mapped coordinate. The index is
/// clamped to the source bounds so that floating point rounding at the last
/// row or column can never read past the image.
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x (column) coordinate of the pixel to sample.
/// * `v` - The y (row) coordinate of the pixel to sample.
///
/// # Returns
///
/// The three channel values, copied unmodified.
pub(crate) fn nearest_neighbor_interpolation(image: &Image<u8, 3>, u: f64, v: f64) -> [u8; 3] {
    let (rows, cols) = (image.rows(), image.cols());

    let iu = (u.trunc() as usize).min(cols - 1);
    let iv = (v.trunc() as usize).min(rows - 1);

    let base = (iv * cols + iu) * 3;

    let mut pixel = [0u8; 3];
    pixel.copy_from_slice(&image.as_slice()[base..base + 3]);

    pixel
}
