use super::core::{init, transition, Effect, Event, State};
use super::main::{FramePipeline, PipelineRun};
use crate::error::Error;
use crate::report::FrameResult;
use std::time::Instant;

impl FramePipeline<'_> {
    pub fn run(mut self) -> PipelineRun {
        let (mut state, mut effects) = init();

        loop {
            let mut events = Vec::new();
            for effect in effects {
                if let Some(event) = self.run_effect(effect) {
                    events.push(event);
                }
            }

            effects = Vec::new();
            for event in events {
                let (next, next_effects) = transition(state, event);
                self.logger.debug(&format!("state: {}", next));
                state = next;
                effects.extend(next_effects);
            }

            if state.is_terminal() {
                // Terminal transitions may still carry bookkeeping effects.
                for effect in effects {
                    let _ = self.run_effect(effect);
                }
                break;
            }
            if effects.is_empty() {
                break;
            }
        }

        let outcome = match (state, self.failure.take()) {
            (State::Complete { frames }, None) => {
                self.logger.info(&format!("Processed {} frames", frames));
                Ok(())
            }
            (_, Some(err)) => Err(err),
            (state, None) => Err(Error::Source(format!("pipeline stopped in {}", state))),
        };

        PipelineRun {
            document: self.document,
            outcome,
        }
    }

    fn run_effect(&mut self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::Open => Some(Event::Opened(self.open())),
            Effect::ProcessFrame { index, limit } => {
                Some(Event::FrameDone(self.process_frame(index, limit)))
            }
            Effect::RecordFailure(err) => {
                self.logger.error(&err.to_string());
                self.document.record_failure(&err);
                if self.failure.is_none() {
                    self.failure = Some(err);
                }
                None
            }
            Effect::LogError(err) => {
                self.logger.error(&format!("Cleanup also failed: {}", err));
                None
            }
            Effect::Cleanup => Some(Event::CleanupDone(self.cleanup())),
        }
    }

    fn open(&mut self) -> Result<usize, Error> {
        self.source.open()?;
        self.source_open = true;

        let metadata = self.source.metadata();
        self.logger.info(&format!("Input metadata: {:?}", metadata));

        if let Some(sink) = self.sink.as_deref_mut() {
            let fps = metadata.fps.unwrap_or(self.fallback_fps);
            sink.open(Some(fps))?;
            self.sink_open = true;
        }

        self.frame_limit.or(metadata.length).ok_or_else(|| {
            Error::Source(format!(
                "{} does not report its length; pass a frame count",
                metadata.description
            ))
        })
    }

    fn process_frame(&mut self, index: usize, limit: usize) -> Result<(), Error> {
        let mut frame = self.source.get_frame(index)?;

        let start = Instant::now();
        let predictions = self.classifier.classify(&frame)?;
        let elapsed = start.elapsed().as_secs_f64();

        let result = FrameResult {
            frame: index,
            elapsed,
            predictions,
        };
        let caption = result
            .caption()
            .ok_or_else(|| Error::Classify(format!("no predictions for frame {}", index)))?;
        self.document.push(result);

        self.logger.info(&format!(
            "{}/{} time: {} prediction: {}",
            index + 1,
            limit,
            elapsed,
            caption
        ));

        if let (Some(sink), Some(renderer)) = (self.sink.as_deref_mut(), &self.renderer) {
            renderer.render(&mut frame, &caption, &self.caption_style);
            sink.append_frame(&frame)?;
        }

        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), Error> {
        let mut result = Ok(());

        if self.sink_open {
            self.sink_open = false;
            if let Some(sink) = self.sink.as_deref_mut() {
                result = sink.close();
            }
        }

        if self.source_open {
            self.source_open = false;
            let closed = self.source.close();
            if result.is_ok() {
                result = closed;
            }
        }

        result
    }
}
