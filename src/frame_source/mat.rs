//! Conversions between OpenCV's BGR `Mat` and RGB frames.

use crate::error::Error;
use crate::frame_source::interface::Frame;
use opencv::{
    core::{self, Mat, Scalar},
    imgproc,
    prelude::*,
};

pub fn mat_to_frame(mat: &Mat) -> Result<Frame, Error> {
    let mut rgb = Mat::default();
    imgproc::cvt_color(mat, &mut rgb, imgproc::COLOR_BGR2RGB, 0)?;

    let (cols, rows) = (rgb.cols(), rgb.rows());
    let data = rgb.data_bytes()?.to_vec();

    Frame::from_raw(cols as u32, rows as u32, data)
        .ok_or_else(|| Error::Source(format!("unexpected {}x{} frame layout", cols, rows)))
}

pub fn frame_to_mat(frame: &Frame) -> Result<Mat, Error> {
    let (width, height) = frame.dimensions();
    let mut rgb = Mat::new_rows_cols_with_default(
        height as i32,
        width as i32,
        core::CV_8UC3,
        Scalar::all(0.0),
    )?;
    rgb.data_bytes_mut()?.copy_from_slice(frame.as_raw());

    let mut bgr = Mat::default();
    imgproc::cvt_color(&rgb, &mut bgr, imgproc::COLOR_RGB2BGR, 0)?;
    Ok(bgr)
}
