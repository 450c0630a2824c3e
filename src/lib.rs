pub mod caption;
pub mod config;
pub mod display;
pub mod error;
pub mod frame_pipeline;
pub mod frame_sink;
pub mod frame_source;
pub mod image_classifier;
pub mod interactive;
pub mod layout;
pub mod library;
pub mod report;
