use crate::error::Error;
use crate::image_classifier::interface::{ImageClassifier, Prediction};
use crate::image_classifier::labels::ImageNetLabels;
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::network::Preprocessing;
use crate::image_classifier::preprocess::image_to_array;
use image::RgbImage;
use tract_onnx::prelude::*;

pub struct ImageClassifierTractOnnx {
    model: TypedRunnableModel<TypedModel>,
    preprocessing: Preprocessing,
    labels: ImageNetLabels,
    config: ModelConfig,
}

impl ImageClassifierTractOnnx {
    pub fn new(config: ModelConfig) -> Result<Self, Error> {
        let preprocessing = config.network.preprocessing();
        let input_shape = preprocessing.input_shape();

        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)
            .and_then(|model| model.with_input_fact(0, f32::fact(input_shape).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| {
                Error::ModelLoad(format!("{}: {}", config.onnx_model_path.display(), e))
            })?;

        let labels = ImageNetLabels::load(&config.labels_path)?;

        Ok(Self {
            model,
            preprocessing,
            labels,
            config,
        })
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(&self, image: &RgbImage) -> Result<Vec<Prediction>, Error> {
        let input = image_to_array(image, &self.preprocessing).into_tensor();

        let outputs = self
            .model
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| Error::Classify(e.to_string()))?;
        let output = outputs
            .first()
            .ok_or_else(|| Error::Classify("model produced no outputs".to_string()))?;
        let scores = output
            .to_array_view::<f32>()
            .map_err(|e| Error::Classify(e.to_string()))?;
        let scores: Vec<f32> = scores.iter().copied().collect();

        Ok(self.labels.decode(&scores, self.config.top_n))
    }
}
