//! Per-frame results and the JSON document they are collected into.

use crate::caption::format_caption;
use crate::error::Error;
use crate::image_classifier::interface::Prediction;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    pub frame: usize,
    /// Seconds spent in the classifier for this frame.
    pub elapsed: f64,
    pub predictions: Vec<Prediction>,
}

impl FrameResult {
    pub fn caption(&self) -> Option<String> {
        format_caption(&self.predictions)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultDocument {
    pub results: Vec<FrameResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
}

impl ResultDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: FrameResult) {
        self.results.push(result);
    }

    pub fn record_failure(&mut self, error: &Error) {
        self.exception = Some(error.to_string());
    }

    pub fn is_failed(&self) -> bool {
        self.exception.is_some()
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), Error> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn read_json(path: &Path) -> Result<Self, Error> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> ResultDocument {
        let mut document = ResultDocument::new();
        document.push(FrameResult {
            frame: 0,
            elapsed: 0.125,
            predictions: vec![
                Prediction::new("n02123045", "tabby", 0.61),
                Prediction::new("n02124075", "Egyptian_cat", 0.22),
            ],
        });
        document.push(FrameResult {
            frame: 1,
            elapsed: 0.0931,
            predictions: vec![Prediction::new("n02085620", "Chihuahua", 0.9)],
        });
        document
    }

    #[test]
    fn test_json_shape_without_exception() {
        let document = sample_document();
        let value = serde_json::to_value(&document).unwrap();

        assert!(value.get("exception").is_none());
        assert_eq!(value["results"][1]["frame"], 1);
        assert_eq!(value["results"][0]["predictions"][1]["label_name"], "Egyptian_cat");
        assert_eq!(value["results"][0]["predictions"][0]["label_id"], "n02123045");
    }

    #[test]
    fn test_failure_is_stored_as_message() {
        let mut document = sample_document();
        document.record_failure(&Error::Classify("stub failure".to_string()));

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value["exception"], "Classification error: stub failure");
        assert!(document.is_failed());
    }

    #[test]
    fn test_written_document_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        let mut document = sample_document();
        document.record_failure(&Error::Sink("disk full".to_string()));
        document.write_json(&path).unwrap();

        let read = ResultDocument::read_json(&path).unwrap();
        assert_eq!(read.results.len(), 2);
        assert_eq!(read.exception, document.exception);
        for (expected, actual) in document.results.iter().zip(&read.results) {
            assert_eq!(expected.frame, actual.frame);
            assert!((expected.elapsed - actual.elapsed).abs() < 1e-9);
            assert_eq!(expected.predictions, actual.predictions);
        }
    }

    #[test]
    fn test_caption_comes_from_top_prediction() {
        let document = sample_document();
        assert_eq!(document.results[0].caption(), Some("tabby (61%)".to_string()));
    }
}
