use crate::error::Error;
use image::RgbImage;

pub type Frame = RgbImage;

/// What a source knows about itself; fields are `None` until known.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceMetadata {
    pub description: String,
    pub size: Option<(u32, u32)>,
    pub fps: Option<f64>,
    pub length: Option<usize>,
}

pub trait FrameSource {
    fn open(&mut self) -> Result<(), Error>;

    /// Next frame in stream order, `None` once the stream is exhausted.
    fn poll(&mut self) -> Result<Option<Frame>, Error>;

    fn get_frame(&mut self, index: usize) -> Result<Frame, Error>;

    fn metadata(&self) -> SourceMetadata;

    /// Number of frames, when the source can tell.
    fn length(&self) -> Option<usize> {
        self.metadata().length
    }

    fn close(&mut self) -> Result<(), Error>;
}
