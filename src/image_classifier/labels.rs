use crate::error::Error;
use crate::image_classifier::interface::Prediction;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Class index table in the Keras `imagenet_class_index.json` shape:
/// `{"0": ["n01440764", "tench"], ...}`.
#[derive(Debug, Clone, Default)]
pub struct ImageNetLabels {
    entries: Vec<(String, String)>,
}

impl ImageNetLabels {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let file = File::open(path)
            .map_err(|e| Error::ModelLoad(format!("{}: {}", path.display(), e)))?;
        let raw: HashMap<String, (String, String)> = serde_json::from_reader(BufReader::new(file))?;

        let mut indexed = raw
            .into_iter()
            .map(|(key, entry)| {
                key.parse::<usize>()
                    .map(|index| (index, entry))
                    .map_err(|_| Error::ModelLoad(format!("invalid class index {:?}", key)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        indexed.sort_by_key(|(index, _)| *index);

        for (expected, (index, _)) in indexed.iter().enumerate() {
            if *index != expected {
                return Err(Error::ModelLoad(format!(
                    "class index {} missing from {}",
                    expected,
                    path.display()
                )));
            }
        }

        Ok(Self::new(indexed.into_iter().map(|(_, entry)| entry).collect()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top `top_n` scores, highest first, named from the table.
    pub fn decode(&self, scores: &[f32], top_n: usize) -> Vec<Prediction> {
        let mut ranked: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(top_n);

        ranked
            .into_iter()
            .map(|(index, confidence)| match self.entries.get(index) {
                Some((label_id, label_name)) => Prediction::new(label_id, label_name, confidence),
                None => Prediction::new(&index.to_string(), &format!("class_{}", index), confidence),
            })
            .collect()
    }
}
