use rescale_image::{Image, ImageDtype};

/// Kernel for bilinear interpolation
///
/// The floor and ceil neighbour indices are both clamped to the source
/// bounds, turning boundary sampling into edge-clamped behavior. The ceil
/// neighbour carries the fractional weight `frac` against `1 - frac` for the
/// floor neighbour on each axis, so a coordinate landing exactly on an
/// integer gives the ceil neighbour zero weight and samples the source pixel
/// exactly. Channels accumulate independently in f64 and are quantized once,
/// through [`ImageDtype::from_f64`].
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x (column) coordinate of the pixel to sample.
/// * `v` - The y (row) coordinate of the pixel to sample.
///
/// # Returns
///
/// The blended channel values.
pub(crate) fn bilinear_interpolation(image: &Image<u8, 3>, u: f64, v: f64) -> [u8; 3] {
    let (rows, cols) = (image.rows(), image.cols());

    let u0 = (u.floor() as usize).min(cols - 1);
    let v0 = (v.floor() as usize).min(rows - 1);
    let u1 = (u.ceil() as usize).min(cols - 1);
    let v1 = (v.ceil() as usize).min(rows - 1);

    let frac_u = u - u.floor();
    let frac_v = v - v.floor();

    let w00 = (1.0 - frac_u) * (1.0 - frac_v);
    let w01 = frac_u * (1.0 - frac_v);
    let w10 = (1.0 - frac_u) * frac_v;
    let w11 = frac_u * frac_v;

    let data = image.as_slice();

    let p00 = &data[(v0 * cols + u0) * 3..(v0 * cols + u0) * 3 + 3];
    let p01 = &data[(v0 * cols + u1) * 3..(v0 * cols + u1) * 3 + 3];
    let p10 = &data[(v1 * cols + u0) * 3..(v1 * cols + u0) * 3 + 3];
    let p11 = &data[(v1 * cols + u1) * 3..(v1 * cols + u1) * 3 + 3];

    let mut pixel = [0u8; 3];
    for k in 0..3 {
        let q = f64::from(p00[k]) * w00
            + f64::from(p01[k]) * w01
            + f64::from(p10[k]) * w10
            + f64::from(p11[k]) * w11;
        pixel[k] = u8::from_f64(q);
    }

    pixel
}
