use crate::error::Error;
use crate::frame_source::interface::{Frame, FrameSource, SourceMetadata};
use crate::frame_source::mat::mat_to_frame;
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{
        self, VideoCapture, CAP_PROP_FPS, CAP_PROP_FRAME_COUNT, CAP_PROP_FRAME_HEIGHT,
        CAP_PROP_FRAME_WIDTH, CAP_PROP_POS_FRAMES,
    },
};
use std::path::{Path, PathBuf};

/// Any container OpenCV can decode; random access seeks the capture.
pub struct OpencvVideoSource {
    path: PathBuf,
    capture: Option<VideoCapture>,
    metadata: SourceMetadata,
    position: usize,
}

impl OpencvVideoSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            capture: None,
            metadata: SourceMetadata {
                description: path.display().to_string(),
                ..SourceMetadata::default()
            },
            position: 0,
        }
    }

    fn capture(&mut self) -> Result<&mut VideoCapture, Error> {
        let path = &self.path;
        self.capture
            .as_mut()
            .ok_or_else(|| Error::Source(format!("{} is not open", path.display())))
    }

    fn read_next(&mut self) -> Result<Option<Frame>, Error> {
        let mut mat = Mat::default();
        let grabbed = self.capture()?.read(&mut mat)?;
        if !grabbed || mat.empty() {
            return Ok(None);
        }
        self.position += 1;
        mat_to_frame(&mat).map(Some)
    }
}

impl FrameSource for OpencvVideoSource {
    fn open(&mut self) -> Result<(), Error> {
        let path = self.path.to_string_lossy().to_string();
        let capture = VideoCapture::from_file(&path, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(Error::Source(format!("failed to open video {}", path)));
        }

        let width = capture.get(CAP_PROP_FRAME_WIDTH)?;
        let height = capture.get(CAP_PROP_FRAME_HEIGHT)?;
        let fps = capture.get(CAP_PROP_FPS)?;
        let count = capture.get(CAP_PROP_FRAME_COUNT)?;

        self.metadata = SourceMetadata {
            description: path,
            size: (width > 0.0 && height > 0.0).then_some((width as u32, height as u32)),
            fps: (fps > 0.0).then_some(fps),
            length: (count > 0.0).then_some(count as usize),
        };
        self.capture = Some(capture);
        self.position = 0;
        Ok(())
    }

    fn poll(&mut self) -> Result<Option<Frame>, Error> {
        self.read_next()
    }

    fn get_frame(&mut self, index: usize) -> Result<Frame, Error> {
        if index != self.position {
            self.capture()?.set(CAP_PROP_POS_FRAMES, index as f64)?;
            self.position = index;
        }
        self.read_next()?
            .ok_or_else(|| Error::Source(format!("no frame {} in {}", index, self.path.display())))
    }

    fn metadata(&self) -> SourceMetadata {
        self.metadata.clone()
    }

    fn close(&mut self) -> Result<(), Error> {
        if let Some(mut capture) = self.capture.take() {
            capture.release()?;
        }
        Ok(())
    }
}
