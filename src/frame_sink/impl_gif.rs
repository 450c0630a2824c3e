use crate::error::Error;
use crate::frame_sink::interface::FrameSink;
use crate::frame_source::interface::Frame;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage};
use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

/// Encoder output staged in memory and drained to the file after every frame,
/// so write failures surface from `append_frame` and `close`.
#[derive(Clone, Default)]
struct StagedBytes(Rc<RefCell<Vec<u8>>>);

impl StagedBytes {
    fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

impl Write for StagedBytes {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes frames to an endlessly looping animated GIF.
pub struct GifSink {
    path: PathBuf,
    file: Option<File>,
    encoder: Option<GifEncoder<StagedBytes>>,
    staged: StagedBytes,
    delay: Delay,
}

impl GifSink {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            file: None,
            encoder: None,
            staged: StagedBytes::default(),
            delay: Delay::from_numer_denom_ms(100, 1),
        }
    }

    fn drain(&mut self) -> Result<(), Error> {
        let bytes = self.staged.take();
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| Error::Sink(format!("{} is not open", self.path.display())))?;

        file.write_all(&bytes)
            .and_then(|()| file.flush())
            .map_err(|e| Error::Sink(format!("{}: {}", self.path.display(), e)))
    }
}

impl FrameSink for GifSink {
    fn open(&mut self, fps: Option<f64>) -> Result<(), Error> {
        let file = File::create(&self.path)
            .map_err(|e| Error::Sink(format!("{}: {}", self.path.display(), e)))?;
        let mut encoder = GifEncoder::new(self.staged.clone());
        encoder.set_repeat(Repeat::Infinite)?;

        if let Some(frame_time) = fps
            .filter(|fps| *fps > 0.0)
            .and_then(|fps| Duration::try_from_secs_f64(1.0 / fps).ok())
        {
            self.delay = Delay::from_saturating_duration(frame_time);
        }
        self.file = Some(file);
        self.encoder = Some(encoder);
        Ok(())
    }

    fn append_frame(&mut self, frame: &Frame) -> Result<(), Error> {
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| Error::Sink(format!("{} is not open", self.path.display())))?;

        let rgba = DynamicImage::ImageRgb8(frame.clone()).to_rgba8();
        encoder.encode_frame(image::Frame::from_parts(rgba, 0, 0, self.delay))?;
        self.drain()
    }

    fn close(&mut self) -> Result<(), Error> {
        if self.file.is_none() {
            return Ok(());
        }

        // Dropping the encoder stages the trailer.
        self.encoder.take();
        let drained = self.drain();
        self.file.take();
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_source::impl_image_sequence::ImageSequenceSource;
    use crate::frame_source::interface::FrameSource;
    use image::Rgb;

    #[test]
    fn test_written_gif_reads_back_frame_by_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.gif");

        let mut sink = GifSink::new(&path);
        sink.open(Some(10.0)).unwrap();
        for level in [0u8, 255, 0] {
            sink.append_frame(&Frame::from_pixel(16, 12, Rgb([level, level, level])))
                .unwrap();
        }
        sink.close().unwrap();

        let mut source = ImageSequenceSource::new(&path);
        source.open().unwrap();

        assert_eq!(source.length(), Some(3));
        assert_eq!(source.metadata().size, Some((16, 12)));
        let fps = source.metadata().fps.unwrap();
        assert!((fps - 10.0).abs() < 0.5);

        let bright = source.get_frame(1).unwrap();
        assert!(bright.get_pixel(8, 6).0[0] > 200);
        let dark = source.get_frame(2).unwrap();
        assert!(dark.get_pixel(8, 6).0[0] < 50);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_full_device_reports_write_failure() {
        let mut sink = GifSink::new(Path::new("/dev/full"));
        sink.open(Some(10.0)).unwrap();

        let appended = sink.append_frame(&Frame::new(16, 12));
        assert!(matches!(appended, Err(Error::Sink(_))));
        assert!(sink.close().is_err());
    }

    #[test]
    fn test_tiny_fps_keeps_default_delay() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slow.gif");

        let mut sink = GifSink::new(&path);
        sink.open(Some(1e-300)).unwrap();
        assert_eq!(sink.delay, Delay::from_numer_denom_ms(100, 1));

        sink.append_frame(&Frame::new(4, 4)).unwrap();
        sink.close().unwrap();
    }

    #[test]
    fn test_append_before_open_fails() {
        let mut sink = GifSink::new(Path::new("/tmp/never.gif"));
        let frame = Frame::new(4, 4);
        assert!(matches!(sink.append_frame(&frame), Err(Error::Sink(_))));
    }
}
