use crate::error::Error;
use image::RgbImage;
use serde::{Deserialize, Serialize};

/// One entry of a classifier's ranked answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label_id: String,
    pub label_name: String,
    pub confidence: f32,
}

impl Prediction {
    pub fn new(label_id: &str, label_name: &str, confidence: f32) -> Self {
        Self {
            label_id: label_id.to_string(),
            label_name: label_name.to_string(),
            confidence,
        }
    }
}

pub trait ImageClassifier {
    /// Returns predictions ordered most confident first.
    ///
    /// The image may be any size; implementations resize to their input resolution.
    fn classify(&self, image: &RgbImage) -> Result<Vec<Prediction>, Error>;
}
