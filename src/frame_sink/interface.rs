use crate::error::Error;
use crate::frame_source::interface::Frame;

pub trait FrameSink {
    /// `fps` is the playback rate of the frames about to be appended, if known.
    fn open(&mut self, fps: Option<f64>) -> Result<(), Error>;
    fn append_frame(&mut self, frame: &Frame) -> Result<(), Error>;
    fn close(&mut self) -> Result<(), Error>;
}
