use crate::error::Error;
use crate::image_classifier::interface::{ImageClassifier, Prediction};
use image::RgbImage;
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Mutex;

const OBJECTS: [&str; 18] = [
    "dog", "cat", "person", "car", "chair", "table", "bird", "tree", "bicycle", "book", "laptop",
    "phone", "cup", "bottle", "keyboard", "mouse", "plant", "clock",
];

/// Produces plausible-looking ranked predictions from a seeded generator.
pub struct ImageClassifierFake {
    rng: Mutex<StdRng>,
    top_n: usize,
}

impl ImageClassifierFake {
    pub fn new(seed: u64, top_n: usize) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            top_n: top_n.clamp(1, OBJECTS.len()),
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, _image: &RgbImage) -> Result<Vec<Prediction>, Error> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| Error::Classify("fake classifier lock poisoned".to_string()))?;

        let index_dist =
            Uniform::new(0, OBJECTS.len()).map_err(|e| Error::Classify(e.to_string()))?;
        let confidence_dist =
            Uniform::new(0.0f32, 1.0).map_err(|e| Error::Classify(e.to_string()))?;

        let first = index_dist.sample(&mut *rng);
        let mut remaining = 1.0f32;
        let mut predictions = Vec::with_capacity(self.top_n);

        for rank in 0..self.top_n {
            let index = (first + rank) % OBJECTS.len();
            let confidence = remaining * confidence_dist.sample(&mut *rng);
            remaining -= confidence;
            predictions.push(Prediction::new(
                &format!("fake{:02}", index),
                OBJECTS[index],
                confidence,
            ));
        }

        predictions.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(predictions)
    }
}
