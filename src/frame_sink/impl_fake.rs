use crate::error::Error;
use crate::frame_sink::interface::FrameSink;
use crate::frame_source::interface::Frame;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
pub struct FrameSinkRecord {
    pub opened_with: Vec<Option<f64>>,
    pub frames: Vec<Frame>,
    pub closes: usize,
}

/// Keeps appended frames in memory; can be told to fail after N appends.
#[derive(Default)]
pub struct FrameSinkFake {
    record: Arc<Mutex<FrameSinkRecord>>,
    fail_after: Option<usize>,
}

impl FrameSinkFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(appends: usize) -> Self {
        Self {
            fail_after: Some(appends),
            ..Self::default()
        }
    }

    pub fn record(&self) -> Arc<Mutex<FrameSinkRecord>> {
        self.record.clone()
    }

    fn with_record<T>(&self, f: impl FnOnce(&mut FrameSinkRecord) -> T) -> Result<T, Error> {
        let mut record = self
            .record
            .lock()
            .map_err(|_| Error::Sink("fake sink lock poisoned".to_string()))?;
        Ok(f(&mut record))
    }
}

impl FrameSink for FrameSinkFake {
    fn open(&mut self, fps: Option<f64>) -> Result<(), Error> {
        self.with_record(|r| r.opened_with.push(fps))
    }

    fn append_frame(&mut self, frame: &Frame) -> Result<(), Error> {
        let fail_after = self.fail_after;
        let appended = self.with_record(|r| {
            if fail_after.is_some_and(|limit| r.frames.len() >= limit) {
                false
            } else {
                r.frames.push(frame.clone());
                true
            }
        })?;

        if appended {
            Ok(())
        } else {
            Err(Error::Sink("fake sink is full".to_string()))
        }
    }

    fn close(&mut self) -> Result<(), Error> {
        self.with_record(|r| r.closes += 1)
    }
}
