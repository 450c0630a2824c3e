use crate::image_classifier::network::Network;
use std::path::{Path, PathBuf};

pub const LABELS_FILE_NAME: &str = "imagenet_class_index.json";

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub network: Network,
    pub onnx_model_path: PathBuf,
    pub labels_path: PathBuf,
    pub top_n: usize,
}

impl ModelConfig {
    /// `<models_dir>/<network>.onnx` next to the shared ImageNet class index.
    pub fn for_network(network: Network, models_dir: &Path, top_n: usize) -> Self {
        Self {
            network,
            onnx_model_path: models_dir.join(format!("{}.onnx", network.name())),
            labels_path: models_dir.join(LABELS_FILE_NAME),
            top_n,
        }
    }
}
