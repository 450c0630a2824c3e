//! Layered caption text drawn over frames.

use crate::config::CaptionStyle;
use crate::error::Error;
use crate::image_classifier::interface::Prediction;
use ab_glyph::FontArc;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;

/// Draw passes in render order; the last one is the foreground.
pub const CAPTION_LAYERS: [((i32, i32), Rgb<u8>); 4] = [
    ((-1, -1), Rgb([110, 110, 240])),
    ((2, 2), Rgb([0, 0, 100])),
    ((1, 1), Rgb([100, 100, 255])),
    ((0, 0), Rgb([240, 240, 110])),
];

const FONT_NAME: &str = "Hack";

/// `"<label> (<pct>%)"` for the most confident prediction.
pub fn format_caption(predictions: &[Prediction]) -> Option<String> {
    predictions
        .first()
        .map(|top| format!("{} ({:.0}%)", top.label_name, top.confidence * 100.0))
}

pub trait TextCanvas {
    fn draw_text(&mut self, text: &str, position: (i32, i32), color: Rgb<u8>, scale: f32);
}

/// Draws every layer of `text` with its first glyph at `origin`.
pub fn draw_layers(canvas: &mut dyn TextCanvas, text: &str, origin: (i32, i32), scale: f32) {
    for ((dx, dy), color) in CAPTION_LAYERS {
        canvas.draw_text(text, (origin.0 + dx, origin.1 + dy), color, scale);
    }
}

struct GlyphCanvas<'a> {
    image: &'a mut RgbImage,
    font: &'a FontArc,
}

impl TextCanvas for GlyphCanvas<'_> {
    fn draw_text(&mut self, text: &str, position: (i32, i32), color: Rgb<u8>, scale: f32) {
        draw_text_mut(&mut *self.image, color, position.0, position.1, scale, self.font, text);
    }
}

/// Rasterises captions with the monospace face bundled in egui's default fonts.
#[derive(Clone)]
pub struct CaptionRenderer {
    font: FontArc,
}

impl CaptionRenderer {
    pub fn new() -> Result<Self, Error> {
        let fonts = egui::FontDefinitions::default();
        let data = fonts
            .font_data
            .get(FONT_NAME)
            .ok_or_else(|| Error::Font(format!("{} is not bundled", FONT_NAME)))?;

        let font = FontArc::try_from_vec(data.font.to_vec())
            .map_err(|e| Error::Font(format!("{}: {}", FONT_NAME, e)))?;

        Ok(Self { font })
    }

    pub fn render(&self, image: &mut RgbImage, text: &str, style: &CaptionStyle) {
        let origin = style.anchor.resolve(image.dimensions());
        let mut canvas = GlyphCanvas {
            image,
            font: &self.font,
        };
        draw_layers(&mut canvas, text, origin, style.scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CaptionAnchor, Config};

    #[derive(Default)]
    struct RecordingCanvas {
        calls: Vec<(String, (i32, i32), Rgb<u8>, f32)>,
    }

    impl TextCanvas for RecordingCanvas {
        fn draw_text(&mut self, text: &str, position: (i32, i32), color: Rgb<u8>, scale: f32) {
            self.calls.push((text.to_string(), position, color, scale));
        }
    }

    #[test]
    fn test_format_caption_rounds_to_whole_percent() {
        let predictions = vec![
            Prediction::new("n02123045", "cat", 0.8732),
            Prediction::new("n02085620", "dog", 0.1),
        ];
        assert_eq!(format_caption(&predictions), Some("cat (87%)".to_string()));
    }

    #[test]
    fn test_format_caption_rounds_half_to_even() {
        let low = vec![Prediction::new("x", "cat", 0.125)];
        assert_eq!(format_caption(&low), Some("cat (12%)".to_string()));

        let high = vec![Prediction::new("x", "tabby", 0.875)];
        assert_eq!(format_caption(&high), Some("tabby (88%)".to_string()));
    }

    #[test]
    fn test_format_caption_without_predictions() {
        assert_eq!(format_caption(&[]), None);
    }

    #[test]
    fn test_layers_are_drawn_in_order_around_origin() {
        let mut canvas = RecordingCanvas::default();
        draw_layers(&mut canvas, "cat (87%)", (32, 432), 24.0);

        let positions: Vec<(i32, i32)> = canvas.calls.iter().map(|c| c.1).collect();
        assert_eq!(positions, vec![(31, 431), (34, 434), (33, 433), (32, 432)]);

        let colors: Vec<Rgb<u8>> = canvas.calls.iter().map(|c| c.2).collect();
        assert_eq!(
            colors,
            vec![
                Rgb([110, 110, 240]),
                Rgb([0, 0, 100]),
                Rgb([100, 100, 255]),
                Rgb([240, 240, 110]),
            ]
        );

        assert!(canvas
            .calls
            .iter()
            .all(|c| c.0 == "cat (87%)" && c.3 == 24.0));
    }

    #[test]
    fn test_renderer_marks_pixels_near_anchor() {
        let renderer = CaptionRenderer::new().unwrap();
        let mut image = RgbImage::new(200, 60);
        let style = CaptionStyle {
            anchor: CaptionAnchor::TopLeft { x: 8, y: 8 },
            scale: 24.0,
        };

        renderer.render(&mut image, "cat (87%)", &style);

        let touched = image.pixels().filter(|p| p.0 != [0, 0, 0]).count();
        assert!(touched > 0);
        assert!(image
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0 != [0, 0, 0])
            .all(|(x, y, _)| x >= 4 && y >= 4));
    }

    #[test]
    fn test_screen_caption_uses_bottom_anchor() {
        let config = Config::default();
        let renderer = CaptionRenderer::new().unwrap();
        let mut image = RgbImage::new(640, 480);

        renderer.render(&mut image, "cat", &config.screen_caption);

        let top_half = image
            .enumerate_pixels()
            .filter(|(_, y, p)| *y < 240 && p.0 != [0, 0, 0])
            .count();
        assert_eq!(top_half, 0);
        assert!(image.pixels().any(|p| p.0 != [0, 0, 0]));
    }
}
