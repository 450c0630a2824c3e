use crate::caption::CaptionRenderer;
use crate::config::{CaptionStyle, Config};
use crate::error::Error;
use crate::frame_sink::interface::FrameSink;
use crate::frame_source::interface::FrameSource;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use crate::report::ResultDocument;
use std::path::Path;
use std::sync::Arc;

/// Classifies every frame of a source, optionally writing captioned frames to a sink.
pub struct FramePipeline<'a> {
    pub(super) classifier: &'a dyn ImageClassifier,
    pub(super) source: &'a mut dyn FrameSource,
    pub(super) sink: Option<&'a mut dyn FrameSink>,
    pub(super) renderer: Option<CaptionRenderer>,
    pub(super) logger: Arc<dyn Logger + Send + Sync>,
    pub(super) frame_limit: Option<usize>,
    pub(super) caption_style: CaptionStyle,
    pub(super) fallback_fps: f64,
    pub(super) document: ResultDocument,
    pub(super) failure: Option<Error>,
    pub(super) source_open: bool,
    pub(super) sink_open: bool,
}

/// The document is always present; `outcome` carries the failure, if any.
pub struct PipelineRun {
    pub document: ResultDocument,
    pub outcome: Result<(), Error>,
}

impl PipelineRun {
    pub fn into_result(self) -> Result<ResultDocument, Error> {
        self.outcome.map(|()| self.document)
    }

    /// Writes the document to `json` when given, whether or not the run failed,
    /// then surfaces the run's failure.
    pub fn finish(self, json: Option<&Path>) -> Result<ResultDocument, Error> {
        if let Some(path) = json {
            self.document.write_json(path)?;
        }
        self.into_result()
    }
}

impl<'a> FramePipeline<'a> {
    pub fn new(
        config: &Config,
        logger: &dyn Logger,
        classifier: &'a dyn ImageClassifier,
        source: &'a mut dyn FrameSource,
    ) -> Self {
        Self {
            classifier,
            source,
            sink: None,
            renderer: None,
            logger: logger.with_namespace("pipeline"),
            frame_limit: None,
            caption_style: config.video_caption,
            fallback_fps: config.fallback_fps,
            document: ResultDocument::new(),
            failure: None,
            source_open: false,
            sink_open: false,
        }
    }

    pub fn with_sink(mut self, sink: &'a mut dyn FrameSink, renderer: CaptionRenderer) -> Self {
        self.sink = Some(sink);
        self.renderer = Some(renderer);
        self
    }

    /// Overrides the source-reported length. Zero means no override.
    pub fn with_frame_limit(mut self, frames: Option<usize>) -> Self {
        self.frame_limit = frames.filter(|frames| *frames > 0);
        self
    }
}
