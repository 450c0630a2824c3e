use std::path::PathBuf;
use std::time::Duration;

/// Where a caption's first glyph is placed, relative to the surface it is drawn on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptionAnchor {
    TopLeft { x: i32, y: i32 },
    BottomLeft { x: i32, from_bottom: i32 },
}

impl CaptionAnchor {
    pub fn resolve(&self, surface_size: (u32, u32)) -> (i32, i32) {
        match *self {
            CaptionAnchor::TopLeft { x, y } => (x, y),
            CaptionAnchor::BottomLeft { x, from_bottom } => {
                (x, surface_size.1 as i32 - from_bottom)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionStyle {
    pub anchor: CaptionAnchor,
    pub scale: f32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub window_size: (u32, u32),
    pub window_title: String,
    pub camera_index: i32,
    pub camera_size: (u32, u32),
    pub camera_warmup: Duration,
    pub screen_caption: CaptionStyle,
    pub video_caption: CaptionStyle,
    pub top_n: usize,
    pub models_dir: PathBuf,
    pub fallback_fps: f64,
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_size: (640, 480),
            window_title: "Plaidvision".to_string(),
            camera_index: 0,
            camera_size: (640, 480),
            camera_warmup: Duration::from_millis(100),
            screen_caption: CaptionStyle {
                anchor: CaptionAnchor::BottomLeft {
                    x: 32,
                    from_bottom: 48,
                },
                scale: 24.0,
            },
            video_caption: CaptionStyle {
                anchor: CaptionAnchor::TopLeft { x: 8, y: 8 },
                scale: 12.0,
            },
            top_n: 5,
            models_dir: PathBuf::from("models"),
            fallback_fps: 30.0,
            verbosity: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_anchor_sits_above_the_bottom_edge() {
        let config = Config::default();
        let origin = config.screen_caption.anchor.resolve(config.window_size);
        assert_eq!(origin, (32, 432));
    }

    #[test]
    fn test_video_anchor_ignores_surface_size() {
        let config = Config::default();
        assert_eq!(config.video_caption.anchor.resolve((1920, 1080)), (8, 8));
        assert_eq!(config.video_caption.anchor.resolve((64, 48)), (8, 8));
    }
}
