use crate::image_classifier::network::{PreprocessMode, Preprocessing, CAFFE_BGR_MEANS};
use image::{imageops, RgbImage};
use std::borrow::Cow;
use tract_onnx::prelude::tract_ndarray::Array4;

/// Resizes to the network's input size, ignoring aspect ratio. Matching images are borrowed.
pub fn resize_to_input<'a>(image: &'a RgbImage, preprocessing: &Preprocessing) -> Cow<'a, RgbImage> {
    let (width, height) = preprocessing.input_size;
    if image.dimensions() == (width, height) {
        Cow::Borrowed(image)
    } else {
        Cow::Owned(imageops::resize(image, width, height, preprocessing.filter))
    }
}

fn normalize(rgb: [u8; 3], channel: usize, mode: PreprocessMode) -> f32 {
    match mode {
        PreprocessMode::Tf => rgb[channel] as f32 / 127.5 - 1.0,
        PreprocessMode::Caffe => rgb[2 - channel] as f32 - CAFFE_BGR_MEANS[channel],
    }
}

pub fn image_to_array(image: &RgbImage, preprocessing: &Preprocessing) -> Array4<f32> {
    let resized = resize_to_input(image, preprocessing);
    let mode = preprocessing.mode;
    let [batch, height, width, channels] = preprocessing.input_shape();

    Array4::from_shape_fn((batch, height, width, channels), |(_, y, x, c)| {
        normalize(resized.get_pixel(x as u32, y as u32).0, c, mode)
    })
}
