use crate::error::Error;
use crate::frame_source::interface::{Frame, FrameSource, SourceMetadata};
use crate::frame_source::mat::mat_to_frame;
use crate::library::logger::interface::Logger;
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{VideoCapture, CAP_ANY, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH},
};
use std::sync::Arc;
use std::time::Duration;

pub struct OpencvCameraConfig {
    pub index: i32,
    pub size: (u32, u32),
    pub warmup: Duration,
}

/// Live camera. Released on close and when dropped.
pub struct OpencvCameraSource {
    config: OpencvCameraConfig,
    capture: Option<VideoCapture>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl OpencvCameraSource {
    pub fn new(config: OpencvCameraConfig, logger: &dyn Logger) -> Self {
        Self {
            config,
            capture: None,
            logger: logger.with_namespace("camera"),
        }
    }

    fn read(&mut self) -> Result<Option<Frame>, Error> {
        let capture = self
            .capture
            .as_mut()
            .ok_or_else(|| Error::Source("camera is not open".to_string()))?;

        let mut mat = Mat::default();
        if !capture.read(&mut mat)? || mat.empty() {
            return Ok(None);
        }
        mat_to_frame(&mat).map(Some)
    }
}

impl FrameSource for OpencvCameraSource {
    fn open(&mut self) -> Result<(), Error> {
        self.logger.info(&format!("Starting camera {}...", self.config.index));

        let mut capture = VideoCapture::new(self.config.index, CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(Error::Source(format!(
                "failed to open camera {}",
                self.config.index
            )));
        }
        capture.set(CAP_PROP_FRAME_WIDTH, self.config.size.0 as f64)?;
        capture.set(CAP_PROP_FRAME_HEIGHT, self.config.size.1 as f64)?;

        std::thread::sleep(self.config.warmup);
        self.capture = Some(capture);

        self.logger.info("Camera started");
        Ok(())
    }

    fn poll(&mut self) -> Result<Option<Frame>, Error> {
        self.read()
    }

    /// A live feed has no history, so this is the latest frame.
    fn get_frame(&mut self, _index: usize) -> Result<Frame, Error> {
        self.read()?
            .ok_or_else(|| Error::Source("camera returned no frame".to_string()))
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            description: format!("camera {}", self.config.index),
            size: Some(self.config.size),
            fps: None,
            length: None,
        }
    }

    fn close(&mut self) -> Result<(), Error> {
        if let Some(mut capture) = self.capture.take() {
            self.logger.info("Stopping camera...");
            capture.release()?;
            self.logger.info("Camera stopped");
        }
        Ok(())
    }
}

impl Drop for OpencvCameraSource {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            self.logger.error(&format!("Failed to release camera: {}", err));
        }
    }
}
