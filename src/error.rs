use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Model load error: {0}")]
    ModelLoad(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Frame source error: {0}")]
    Source(String),

    #[error("Classification error: {0}")]
    Classify(String),

    #[error("Output sink error: {0}")]
    Sink(String),

    #[error("Display error: {0}")]
    Display(String),

    #[error("Font error: {0}")]
    Font(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[cfg(feature = "opencv")]
    #[error("OpenCV error: {0}")]
    OpenCv(String),
}

#[cfg(feature = "opencv")]
impl From<opencv::Error> for Error {
    fn from(err: opencv::Error) -> Self {
        Error::OpenCv(err.message)
    }
}
