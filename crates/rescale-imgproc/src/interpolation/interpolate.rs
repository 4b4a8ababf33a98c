use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use rescale_image::Image;

/// Interpolation mode for the resize operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    Bilinear,
    /// Nearest neighbour interpolation
    Nearest,
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, 3).
/// * `u` - The x (column) coordinate of the pixel to sample.
/// * `v` - The y (row) coordinate of the pixel to sample.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The interpolated pixel values.
pub fn interpolate_pixel(
    image: &Image<u8, 3>,
    u: f64,
    v: f64,
    interpolation: InterpolationMode,
) -> [u8; 3] {
    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v),
    }
}
