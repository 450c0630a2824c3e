use crate::error::Error;
use crate::image_classifier::interface::{ImageClassifier, Prediction};
use crate::image_classifier::labels::ImageNetLabels;
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::network::Preprocessing;
use crate::image_classifier::preprocess::image_to_array;
use image::RgbImage;
use opencv::{
    core::{self, Mat, Scalar},
    dnn,
    prelude::*,
};
use std::sync::Mutex;

/// Runs the ONNX export through OpenCV's DNN module on an OpenCL target.
pub struct ImageClassifierOpencvDnn {
    net: Mutex<dnn::Net>,
    preprocessing: Preprocessing,
    labels: ImageNetLabels,
    config: ModelConfig,
}

pub fn opencl_available() -> bool {
    core::have_opencl().unwrap_or(false)
}

impl ImageClassifierOpencvDnn {
    pub fn new(config: ModelConfig) -> Result<Self, Error> {
        let path = config.onnx_model_path.to_string_lossy().to_string();
        let mut net = dnn::read_net_from_onnx(&path)
            .map_err(|e| Error::ModelLoad(format!("{}: {}", path, e.message)))?;

        net.set_preferable_backend(dnn::DNN_BACKEND_OPENCV)?;
        net.set_preferable_target(dnn::DNN_TARGET_OPENCL)?;

        let labels = ImageNetLabels::load(&config.labels_path)?;

        Ok(Self {
            net: Mutex::new(net),
            preprocessing: config.network.preprocessing(),
            labels,
            config,
        })
    }
}

impl ImageClassifier for ImageClassifierOpencvDnn {
    fn classify(&self, image: &RgbImage) -> Result<Vec<Prediction>, Error> {
        let array = image_to_array(image, &self.preprocessing);
        let data = array
            .as_slice()
            .ok_or_else(|| Error::Classify("input tensor is not contiguous".to_string()))?;

        let sizes: Vec<i32> = array.shape().iter().map(|d| *d as i32).collect();
        let mut blob = Mat::new_nd_with_default(&sizes, core::CV_32F, Scalar::all(0.0))?;
        blob.data_typed_mut::<f32>()?.copy_from_slice(data);

        let mut net = self
            .net
            .lock()
            .map_err(|_| Error::Classify("network lock poisoned".to_string()))?;
        net.set_input(&blob, "", 1.0, Scalar::default())?;
        let output = net.forward_single("")?;
        let scores = output.data_typed::<f32>()?.to_vec();

        Ok(self.labels.decode(&scores, self.config.top_n))
    }
}
