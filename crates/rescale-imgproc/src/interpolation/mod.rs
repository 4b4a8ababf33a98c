//! Pixel interpolation kernels for image resampling.
//!
//! Both kernels share the inverse coordinate mapping convention of
//! [`crate::resize`]: a destination pixel `(i, j)` samples the continuous
//! source coordinate `(i / sx, j / sy)`. The kernels receive that coordinate
//! and are responsible for clamping every source access to the image bounds,
//! so boundary sampling is defined edge-clamped behavior rather than a
//! failure mode.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: fastest, copies the truncated-nearest pixel value
//! - **Bilinear**: weighted blend of up to four neighboring pixels

mod bilinear;
mod nearest;

pub(crate) mod interpolate;

pub use interpolate::{interpolate_pixel, InterpolationMode};
