pub mod impl_fake;
#[cfg(feature = "opencv")]
pub mod impl_opencv_dnn;
pub mod impl_tract_onnx;
pub mod interface;
pub mod labels;
pub mod models;
pub mod network;
pub mod preprocess;

use crate::error::Error;
use crate::library::logger::interface::Logger;
use interface::ImageClassifier;
use models::model_config::ModelConfig;
use std::fmt;

/// Compute backend a classifier runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// tract on the CPU.
    Cpu,
    /// OpenCV DNN on an OpenCL device.
    Plaid,
}

impl Backend {
    pub fn plaid_available() -> bool {
        #[cfg(feature = "opencv")]
        {
            impl_opencv_dnn::opencl_available()
        }
        #[cfg(not(feature = "opencv"))]
        {
            false
        }
    }

    /// Explicit flags win; with neither, use Plaid when an OpenCL device exists.
    pub fn select(plaid: bool, no_plaid: bool) -> Self {
        if plaid {
            Backend::Plaid
        } else if no_plaid {
            Backend::Cpu
        } else if Self::plaid_available() {
            Backend::Plaid
        } else {
            Backend::Cpu
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Cpu => f.write_str("cpu (tract)"),
            Backend::Plaid => f.write_str("plaid (OpenCL)"),
        }
    }
}

pub fn create_classifier(
    config: ModelConfig,
    backend: Backend,
    logger: &dyn Logger,
) -> Result<Box<dyn ImageClassifier>, Error> {
    logger.info(&format!(
        "Loading {} from {} on {} backend",
        config.network,
        config.onnx_model_path.display(),
        backend
    ));

    match backend {
        Backend::Cpu => Ok(Box::new(impl_tract_onnx::ImageClassifierTractOnnx::new(
            config,
        )?)),
        #[cfg(feature = "opencv")]
        Backend::Plaid => Ok(Box::new(impl_opencv_dnn::ImageClassifierOpencvDnn::new(
            config,
        )?)),
        #[cfg(not(feature = "opencv"))]
        Backend::Plaid => Err(Error::BackendUnavailable(
            "the plaid backend needs the `opencv` feature".to_string(),
        )),
    }
}
