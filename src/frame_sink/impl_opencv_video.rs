use crate::error::Error;
use crate::frame_sink::interface::FrameSink;
use crate::frame_source::interface::Frame;
use crate::frame_source::mat::frame_to_mat;
use opencv::{
    core::Size,
    prelude::*,
    videoio::VideoWriter,
};
use std::path::{Path, PathBuf};

/// Video file written through OpenCV; the writer is sized from the first frame.
pub struct OpencvVideoSink {
    path: PathBuf,
    fps: f64,
    writer: Option<VideoWriter>,
    is_open: bool,
}

impl OpencvVideoSink {
    pub fn new(path: &Path, fallback_fps: f64) -> Self {
        Self {
            path: path.to_path_buf(),
            fps: fallback_fps,
            writer: None,
            is_open: false,
        }
    }

    fn fourcc(&self) -> Result<i32, Error> {
        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let code = match extension.as_deref() {
            Some("avi") => VideoWriter::fourcc('M', 'J', 'P', 'G')?,
            _ => VideoWriter::fourcc('m', 'p', '4', 'v')?,
        };
        Ok(code)
    }

    fn writer_for(&mut self, frame: &Frame) -> Result<&mut VideoWriter, Error> {
        if self.writer.is_none() {
            let (width, height) = frame.dimensions();
            let path = self.path.to_string_lossy().to_string();
            let writer = VideoWriter::new(
                &path,
                self.fourcc()?,
                self.fps,
                Size::new(width as i32, height as i32),
                true,
            )?;
            if !writer.is_opened()? {
                return Err(Error::Sink(format!("failed to open video writer {}", path)));
            }
            self.writer = Some(writer);
        }

        self.writer
            .as_mut()
            .ok_or_else(|| Error::Sink("video writer missing".to_string()))
    }
}

impl FrameSink for OpencvVideoSink {
    fn open(&mut self, fps: Option<f64>) -> Result<(), Error> {
        if let Some(fps) = fps.filter(|fps| *fps > 0.0) {
            self.fps = fps;
        }
        self.is_open = true;
        Ok(())
    }

    fn append_frame(&mut self, frame: &Frame) -> Result<(), Error> {
        if !self.is_open {
            return Err(Error::Sink(format!("{} is not open", self.path.display())));
        }
        let mat = frame_to_mat(frame)?;
        self.writer_for(frame)?.write(&mat)?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        self.is_open = false;
        if let Some(mut writer) = self.writer.take() {
            writer.release()?;
        }
        Ok(())
    }
}
