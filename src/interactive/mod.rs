//! Live classification loop: capture, classify, caption, present.

use crate::caption::{format_caption, CaptionRenderer};
use crate::config::Config;
use crate::display::interface::DisplaySurface;
use crate::error::Error;
use crate::frame_source::interface::{Frame, FrameSource};
use crate::image_classifier::interface::ImageClassifier;
use crate::layout::compose;
use crate::library::logger::interface::Logger;
use image::RgbImage;
use std::sync::Arc;
use std::time::Instant;

pub struct InteractiveSession {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    classifier: Box<dyn ImageClassifier>,
    source: Box<dyn FrameSource>,
    renderer: CaptionRenderer,
    source_open: bool,
}

impl InteractiveSession {
    pub fn new(
        config: Config,
        logger: &dyn Logger,
        classifier: Box<dyn ImageClassifier>,
        source: Box<dyn FrameSource>,
        renderer: CaptionRenderer,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("interactive"),
            classifier,
            source,
            renderer,
            source_open: false,
        }
    }

    pub fn start(&mut self) -> Result<(), Error> {
        if !self.source_open {
            self.source.open()?;
            self.source_open = true;
            self.logger
                .info(&format!("Source ready: {:?}", self.source.metadata()));
        }
        Ok(())
    }

    /// One loop iteration. Returns `Ok(false)` once the surface asked to quit.
    pub fn step(&mut self, surface: &mut dyn DisplaySurface) -> Result<bool, Error> {
        if !surface.running() {
            return Ok(false);
        }

        if let Some(frame) = self.source.poll()? {
            let canvas = self.process(&frame)?;
            surface.present(&canvas)?;
        }

        Ok(true)
    }

    /// Lays `frame` out in the window and captions it with the top prediction.
    pub fn process(&self, frame: &Frame) -> Result<RgbImage, Error> {
        let mut canvas = compose(self.config.window_size, frame);

        let start = Instant::now();
        let predictions = self.classifier.classify(frame)?;
        let caption = format_caption(&predictions)
            .ok_or_else(|| Error::Classify("classifier returned no predictions".to_string()))?;
        self.logger.debug(&format!(
            "time: {:.3}s prediction: {}",
            start.elapsed().as_secs_f64(),
            caption
        ));

        self.renderer
            .render(&mut canvas, &caption, &self.config.screen_caption);
        Ok(canvas)
    }

    /// Releases the source. Safe to call more than once.
    pub fn stop(&mut self) -> Result<(), Error> {
        if self.source_open {
            self.source_open = false;
            self.source.close()?;
            self.logger.info("Source released");
        }
        Ok(())
    }
}

impl Drop for InteractiveSession {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            self.logger.error(&format!("Failed to release source: {}", err));
        }
    }
}

/// Runs `session` against `surface` until it quits, releasing the source on every exit path.
pub fn run(session: &mut InteractiveSession, surface: &mut dyn DisplaySurface) -> Result<(), Error> {
    session.start()?;

    let looped = loop {
        match session.step(surface) {
            Ok(true) => continue,
            Ok(false) => break Ok(()),
            Err(err) => break Err(err),
        }
    };

    let stopped = session.stop();
    looped.and(stopped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::impl_fake::DisplayFake;
    use crate::frame_source::impl_fake::FrameSourceFake;
    use crate::image_classifier::impl_fake::ImageClassifierFake;
    use crate::image_classifier::interface::Prediction;
    use crate::library::logger::impl_fake::LoggerFake;

    struct FailingClassifier;

    impl ImageClassifier for FailingClassifier {
        fn classify(&self, _image: &RgbImage) -> Result<Vec<Prediction>, Error> {
            Err(Error::Classify("device lost".to_string()))
        }
    }

    fn session(classifier: Box<dyn ImageClassifier>) -> (InteractiveSession, LoggerFake) {
        let logger = LoggerFake::new();
        let session = InteractiveSession::new(
            Config::default(),
            &logger,
            classifier,
            Box::new(FrameSourceFake::new(2, (1280, 720))),
            CaptionRenderer::new().unwrap(),
        );
        (session, logger)
    }

    #[test]
    fn test_quit_signal_ends_loop_and_releases_source() {
        let source = FrameSourceFake::new(10, (1280, 720));
        let counters = source.counters();
        let logger = LoggerFake::new();
        let mut session = InteractiveSession::new(
            Config::default(),
            &logger,
            Box::new(ImageClassifierFake::new(7, 5)),
            Box::new(source),
            CaptionRenderer::new().unwrap(),
        );
        let mut display = DisplayFake::new(3);

        run(&mut session, &mut display).unwrap();

        assert_eq!(display.presented.len(), 3);
        assert!(display
            .presented
            .iter()
            .all(|canvas| canvas.dimensions() == (640, 480)));
        assert_eq!(counters.opens(), 1);
        assert_eq!(counters.reads(), 3);
        assert_eq!(counters.closes(), 1);

        drop(session);
        assert_eq!(counters.closes(), 1);
    }

    #[test]
    fn test_exhausted_source_keeps_looping_until_quit() {
        let source = FrameSourceFake::new(1, (320, 240));
        let counters = source.counters();
        let logger = LoggerFake::new();
        let mut session = InteractiveSession::new(
            Config::default(),
            &logger,
            Box::new(ImageClassifierFake::new(1, 5)),
            Box::new(source),
            CaptionRenderer::new().unwrap(),
        );
        let mut display = DisplayFake::new(4);

        run(&mut session, &mut display).unwrap();

        assert_eq!(display.presented.len(), 1);
        assert_eq!(counters.closes(), 1);
    }

    #[test]
    fn test_classifier_failure_still_releases_source() {
        let source = FrameSourceFake::new(5, (640, 480));
        let counters = source.counters();
        let logger = LoggerFake::new();
        let mut session = InteractiveSession::new(
            Config::default(),
            &logger,
            Box::new(FailingClassifier),
            Box::new(source),
            CaptionRenderer::new().unwrap(),
        );
        let mut display = DisplayFake::new(10);

        let result = run(&mut session, &mut display);

        assert!(matches!(result, Err(Error::Classify(_))));
        assert!(display.presented.is_empty());
        assert_eq!(counters.closes(), 1);
    }

    #[test]
    fn test_drop_releases_started_session() {
        let (mut session, logger) = session(Box::new(ImageClassifierFake::new(3, 5)));
        session.start().unwrap();
        drop(session);

        assert!(logger
            .lines()
            .iter()
            .any(|l| l == "INFO interactive: Source released"));
    }

    #[test]
    fn test_process_places_frame_and_caption() {
        let (session, _logger) = session(Box::new(ImageClassifierFake::new(3, 5)));
        let frame = Frame::from_pixel(320, 240, image::Rgb([255, 255, 255]));

        let canvas = session.process(&frame).unwrap();

        assert_eq!(canvas.dimensions(), (640, 480));
        // Centered 320x240 frame leaves a black border.
        assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(canvas.get_pixel(320, 200).0, [255, 255, 255]);
        // Caption sits near the bottom left, over the black border.
        assert!(canvas
            .enumerate_pixels()
            .any(|(x, y, p)| x < 200 && y > 420 && p.0 != [0, 0, 0]));
    }
}
