//! Viewport fitting
//!
//! The playfield is always 2:1 in logical (CSS pixel) space. Device pixel
//! density only changes the backing resolution.

use crate::consts::{MAX_VIEWPORT_WIDTH, MIN_VIEWPORT_WIDTH, VIEWPORT_ASPECT};
use crate::sim::Viewport;

/// Logical viewport plus the canvas backing size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFit {
    pub logical: Viewport,
    /// Backing width/height in device pixels
    pub backing: (u32, u32),
    pub device_pixel_ratio: f32,
}

/// Fit a 2:1 viewport into the host area, clamped to the width bounds
pub fn fit_viewport(host_width: f32, host_height: f32, device_pixel_ratio: f32) -> ViewportFit {
    let finite_or = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };

    let host_width = finite_or(host_width, MIN_VIEWPORT_WIDTH);
    let host_height = finite_or(host_height, MIN_VIEWPORT_WIDTH / VIEWPORT_ASPECT);
    let dpr = finite_or(device_pixel_ratio, 1.0);

    let width = host_width
        .min(host_height * VIEWPORT_ASPECT)
        .clamp(MIN_VIEWPORT_WIDTH, MAX_VIEWPORT_WIDTH)
        .floor();
    let height = (width / VIEWPORT_ASPECT).floor();

    let backing = (
        ((width * dpr).round() as u32).max(1),
        ((height * dpr).round() as u32).max(1),
    );

    ViewportFit {
        logical: Viewport::new(width, height),
        backing,
        device_pixel_ratio: dpr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_host_is_capped() {
        let fit = fit_viewport(2560.0, 1440.0, 1.0);
        assert_eq!(fit.logical, Viewport::new(960.0, 480.0));
        assert_eq!(fit.backing, (960, 480));
    }

    #[test]
    fn test_short_host_limits_width() {
        let fit = fit_viewport(1200.0, 300.0, 1.0);
        assert_eq!(fit.logical, Viewport::new(600.0, 300.0));
    }

    #[test]
    fn test_tiny_host_clamps_to_minimum() {
        let fit = fit_viewport(100.0, 40.0, 1.0);
        assert_eq!(fit.logical, Viewport::new(320.0, 160.0));
    }

    #[test]
    fn test_dpr_scales_backing_only() {
        let fit = fit_viewport(800.0, 800.0, 2.0);
        assert_eq!(fit.logical, Viewport::new(800.0, 400.0));
        assert_eq!(fit.backing, (1600, 800));
    }

    #[test]
    fn test_degenerate_inputs() {
        let fit = fit_viewport(0.0, f32::NAN, -3.0);
        assert_eq!(fit.logical, Viewport::new(320.0, 160.0));
        assert_eq!(fit.device_pixel_ratio, 1.0);
        assert_eq!(fit.backing, (320, 160));
    }
}
