//! Proportional fit-and-crop placement of a captured frame inside a fixed window.

use image::{imageops, Rgb, RgbImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Size the source is rendered at.
    pub size: (u32, u32),
    /// Top-left corner of the rendered source; negative on a cropped axis.
    pub offset: (i64, i64),
}

/// Computes how a `source`-sized image is placed inside a `surface`-sized window.
///
/// Only an image larger than the surface on both axes is scaled, by the larger of
/// the two axis ratios, so it fills the surface and overflows on at most one axis.
/// Anything else is drawn at its own size. Either way the result is centered.
pub fn fit_and_crop(surface: (u32, u32), source: (u32, u32)) -> Layout {
    let (window_width, window_height) = surface;
    let (image_width, image_height) = source;

    let mut size = source;
    if image_width > window_width && image_height > window_height {
        let hscale = window_width as f64 / image_width as f64;
        let vscale = window_height as f64 / image_height as f64;
        size = if hscale > vscale {
            (window_width, (image_height as f64 * hscale) as u32)
        } else {
            ((image_width as f64 * vscale) as u32, window_height)
        };
    }

    let offset = (
        (window_width as i64 - size.0 as i64) / 2,
        (window_height as i64 - size.1 as i64) / 2,
    );

    Layout { size, offset }
}

/// Renders `frame` onto a black canvas of `surface` size according to [`fit_and_crop`].
pub fn compose(surface: (u32, u32), frame: &RgbImage) -> RgbImage {
    let layout = fit_and_crop(surface, frame.dimensions());
    let mut canvas = RgbImage::from_pixel(surface.0, surface.1, Rgb([0, 0, 0]));

    if layout.size == frame.dimensions() {
        imageops::overlay(&mut canvas, frame, layout.offset.0, layout.offset.1);
    } else {
        let scaled = imageops::resize(
            frame,
            layout.size.0,
            layout.size.1,
            imageops::FilterType::Triangle,
        );
        imageops::overlay(&mut canvas, &scaled, layout.offset.0, layout.offset.1);
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_source_fills_height_and_crops_width() {
        let layout = fit_and_crop((640, 480), (1920, 1080));
        // hscale = 1/3, vscale = 4/9: vertical wins.
        assert_eq!(layout.size, (853, 480));
        assert_eq!(layout.offset, (-106, 0));
    }

    #[test]
    fn test_tall_source_fills_width_and_crops_height() {
        let layout = fit_and_crop((640, 480), (1000, 1500));
        // hscale = 0.64, vscale = 0.32: horizontal wins.
        assert_eq!(layout.size, (640, 960));
        assert_eq!(layout.offset, (0, -240));
    }

    #[test]
    fn test_equal_aspect_fills_exactly() {
        let layout = fit_and_crop((640, 480), (1280, 960));
        assert_eq!(layout.size, (640, 480));
        assert_eq!(layout.offset, (0, 0));
    }

    #[test]
    fn test_smaller_source_is_not_scaled() {
        let layout = fit_and_crop((640, 480), (320, 240));
        assert_eq!(layout.size, (320, 240));
        assert_eq!(layout.offset, (160, 120));
    }

    #[test]
    fn test_larger_on_one_axis_only_is_not_scaled() {
        let layout = fit_and_crop((640, 480), (1280, 200));
        assert_eq!(layout.size, (1280, 200));
        assert_eq!(layout.offset, (-320, 140));

        let layout = fit_and_crop((640, 480), (640, 960));
        assert_eq!(layout.size, (640, 960));
        assert_eq!(layout.offset, (0, -240));
    }

    #[test]
    fn test_odd_difference_truncates_toward_zero() {
        let layout = fit_and_crop((640, 480), (641, 200));
        assert_eq!(layout.offset, (0, 140));

        let layout = fit_and_crop((640, 480), (100, 101));
        assert_eq!(layout.offset, (270, 189));
    }

    #[test]
    fn test_scaled_axis_matches_the_larger_ratio() {
        let cases = [
            ((640, 480), (1920, 1080)),
            ((640, 480), (1000, 1500)),
            ((800, 600), (4000, 2000)),
            ((320, 240), (333, 999)),
            ((1024, 768), (2048, 1025)),
        ];

        for (surface, source) in cases {
            let layout = fit_and_crop(surface, source);
            let hscale = surface.0 as f64 / source.0 as f64;
            let vscale = surface.1 as f64 / source.1 as f64;

            if hscale > vscale {
                assert_eq!(layout.size.0, surface.0);
                assert!(layout.size.1 >= surface.1);
            } else {
                assert_eq!(layout.size.1, surface.1);
                assert!(layout.size.0 >= surface.0);
            }
        }
    }

    #[test]
    fn test_same_inputs_give_same_layout() {
        let first = fit_and_crop((640, 480), (1920, 1080));
        let second = fit_and_crop((640, 480), (1920, 1080));
        assert_eq!(first, second);
    }

    #[test]
    fn test_compose_centers_small_frame_on_black() {
        let frame = RgbImage::from_pixel(4, 2, Rgb([200, 10, 10]));
        let canvas = compose((8, 6), &frame);

        assert_eq!(canvas.dimensions(), (8, 6));
        assert_eq!(*canvas.get_pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(*canvas.get_pixel(2, 2), Rgb([200, 10, 10]));
        assert_eq!(*canvas.get_pixel(5, 3), Rgb([200, 10, 10]));
        assert_eq!(*canvas.get_pixel(6, 3), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_compose_fills_window_when_cropping() {
        let frame = RgbImage::from_pixel(1920, 1080, Rgb([1, 2, 3]));
        let canvas = compose((640, 480), &frame);

        assert_eq!(canvas.dimensions(), (640, 480));
        assert_eq!(*canvas.get_pixel(0, 0), Rgb([1, 2, 3]));
        assert_eq!(*canvas.get_pixel(639, 479), Rgb([1, 2, 3]));
    }
}
