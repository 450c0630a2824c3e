pub mod impl_fake;
pub mod impl_image_sequence;
#[cfg(feature = "opencv")]
pub mod impl_opencv_camera;
#[cfg(feature = "opencv")]
pub mod impl_opencv_video;
pub mod interface;
#[cfg(feature = "opencv")]
pub mod mat;

use crate::error::Error;
use interface::FrameSource;
use std::path::Path;

const IMAGE_EXTENSIONS: [&str; 5] = ["gif", "png", "jpg", "jpeg", "bmp"];

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|known| e.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// Picks a decoder for `path` by its extension.
pub fn open_path(path: &Path) -> Result<Box<dyn FrameSource>, Error> {
    if is_image_path(path) {
        return Ok(Box::new(impl_image_sequence::ImageSequenceSource::new(path)));
    }

    #[cfg(feature = "opencv")]
    {
        Ok(Box::new(impl_opencv_video::OpencvVideoSource::new(path)))
    }
    #[cfg(not(feature = "opencv"))]
    {
        Err(Error::Source(format!(
            "{}: decoding video needs the `opencv` feature",
            path.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extensions_are_recognised() {
        assert!(is_image_path(Path::new("clip.GIF")));
        assert!(is_image_path(Path::new("/tmp/photo.jpeg")));
        assert!(!is_image_path(Path::new("clip.mp4")));
        assert!(!is_image_path(Path::new("README")));
    }

    #[cfg(not(feature = "opencv"))]
    #[test]
    fn test_video_without_opencv_is_rejected() {
        assert!(matches!(
            open_path(Path::new("clip.mp4")),
            Err(Error::Source(_))
        ));
    }
}
