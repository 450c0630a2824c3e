use crate::error::Error;
use crate::frame_source::interface::{Frame, FrameSource, SourceMetadata};
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Animated GIF frames, or a still image as a one-frame sequence.
pub struct ImageSequenceSource {
    path: PathBuf,
    frames: Vec<Frame>,
    fps: Option<f64>,
    cursor: usize,
    is_open: bool,
}

impl ImageSequenceSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            frames: Vec::new(),
            fps: None,
            cursor: 0,
            is_open: false,
        }
    }

    fn is_gif(&self) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("gif"))
            .unwrap_or(false)
    }

    fn ensure_open(&self) -> Result<(), Error> {
        if self.is_open {
            Ok(())
        } else {
            Err(Error::Source(format!("{} is not open", self.path.display())))
        }
    }

    fn decode_gif(&mut self) -> Result<(), Error> {
        let decoder = GifDecoder::new(BufReader::new(File::open(&self.path)?))?;
        let frames = decoder.into_frames().collect_frames()?;

        self.fps = frames.first().and_then(|frame| {
            let (numer, denom) = frame.delay().numer_denom_ms();
            let millis = numer as f64 / denom as f64;
            (millis > 0.0).then(|| 1000.0 / millis)
        });
        self.frames = frames
            .into_iter()
            .map(|frame| DynamicImage::ImageRgba8(frame.into_buffer()).to_rgb8())
            .collect();
        Ok(())
    }
}

impl FrameSource for ImageSequenceSource {
    fn open(&mut self) -> Result<(), Error> {
        if !self.path.exists() {
            return Err(Error::Source(format!("{} does not exist", self.path.display())));
        }

        if self.is_gif() {
            self.decode_gif()?;
        } else {
            self.frames = vec![image::open(&self.path)?.to_rgb8()];
            self.fps = None;
        }

        self.cursor = 0;
        self.is_open = true;
        Ok(())
    }

    fn poll(&mut self) -> Result<Option<Frame>, Error> {
        self.ensure_open()?;
        let frame = self.frames.get(self.cursor).cloned();
        if frame.is_some() {
            self.cursor += 1;
        }
        Ok(frame)
    }

    fn get_frame(&mut self, index: usize) -> Result<Frame, Error> {
        self.ensure_open()?;
        self.frames.get(index).cloned().ok_or_else(|| {
            Error::Source(format!(
                "frame {} out of range for {} ({} frames)",
                index,
                self.path.display(),
                self.frames.len()
            ))
        })
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            description: self.path.display().to_string(),
            size: self.frames.first().map(|f| f.dimensions()),
            fps: self.fps,
            length: self.is_open.then_some(self.frames.len()),
        }
    }

    fn close(&mut self) -> Result<(), Error> {
        self.frames.clear();
        self.is_open = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_still_image_is_one_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("still.png");
        RgbImage::from_pixel(12, 8, Rgb([9, 8, 7])).save(&path).unwrap();

        let mut source = ImageSequenceSource::new(&path);
        assert_eq!(source.length(), None);
        assert!(matches!(source.poll(), Err(Error::Source(_))));

        source.open().unwrap();
        assert_eq!(source.length(), Some(1));
        assert_eq!(source.metadata().size, Some((12, 8)));

        let frame = source.get_frame(0).unwrap();
        assert_eq!(*frame.get_pixel(3, 3), Rgb([9, 8, 7]));
        assert!(matches!(source.get_frame(1), Err(Error::Source(_))));
        assert_eq!(source.poll().unwrap().map(|f| f.dimensions()), Some((12, 8)));
        assert!(source.poll().unwrap().is_none());

        source.close().unwrap();
        assert_eq!(source.length(), None);
        assert!(matches!(source.poll(), Err(Error::Source(_))));
    }

    #[test]
    fn test_missing_file_fails_to_open() {
        let mut source = ImageSequenceSource::new(Path::new("/nonexistent/clip.gif"));
        assert!(matches!(source.open(), Err(Error::Source(_))));
    }
}
