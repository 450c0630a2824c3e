pub mod impl_fake;
pub mod impl_gif;
#[cfg(feature = "opencv")]
pub mod impl_opencv_video;
pub mod interface;

use crate::config::Config;
use crate::error::Error;
use interface::FrameSink;
use std::path::Path;

/// `.gif` is encoded in-process; any other extension goes through OpenCV.
pub fn create_path(path: &Path, config: &Config) -> Result<Box<dyn FrameSink>, Error> {
    let is_gif = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("gif"))
        .unwrap_or(false);

    if is_gif {
        return Ok(Box::new(impl_gif::GifSink::new(path)));
    }

    #[cfg(feature = "opencv")]
    {
        Ok(Box::new(impl_opencv_video::OpencvVideoSink::new(
            path,
            config.fallback_fps,
        )))
    }
    #[cfg(not(feature = "opencv"))]
    {
        let _ = config;
        Err(Error::Sink(format!(
            "{}: encoding video needs the `opencv` feature",
            path.display()
        )))
    }
}
