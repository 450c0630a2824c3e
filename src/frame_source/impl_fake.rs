use crate::error::Error;
use crate::frame_source::interface::{Frame, FrameSource, SourceMetadata};
use image::Rgb;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct FrameSourceCounters {
    opens: AtomicUsize,
    closes: AtomicUsize,
    reads: AtomicUsize,
}

impl FrameSourceCounters {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

/// In-memory frames; frame `i` is filled with the gray level `i`.
pub struct FrameSourceFake {
    frames: Vec<Frame>,
    cursor: usize,
    is_open: bool,
    report_length: bool,
    fail_open: bool,
    fps: Option<f64>,
    counters: Arc<FrameSourceCounters>,
}

impl FrameSourceFake {
    pub fn new(count: usize, size: (u32, u32)) -> Self {
        let frames = (0..count)
            .map(|i| {
                let level = (i % 256) as u8;
                Frame::from_pixel(size.0, size.1, Rgb([level, level, level]))
            })
            .collect();

        Self {
            frames,
            cursor: 0,
            is_open: false,
            report_length: true,
            fail_open: false,
            fps: Some(25.0),
            counters: Arc::new(FrameSourceCounters::default()),
        }
    }

    pub fn without_length(mut self) -> Self {
        self.report_length = false;
        self
    }

    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub fn with_fps(mut self, fps: Option<f64>) -> Self {
        self.fps = fps;
        self
    }

    pub fn counters(&self) -> Arc<FrameSourceCounters> {
        self.counters.clone()
    }

    fn ensure_open(&self) -> Result<(), Error> {
        if self.is_open {
            Ok(())
        } else {
            Err(Error::Source("fake source is not open".to_string()))
        }
    }
}

impl FrameSource for FrameSourceFake {
    fn open(&mut self) -> Result<(), Error> {
        if self.fail_open {
            return Err(Error::Source("fake source refused to open".to_string()));
        }
        self.counters.opens.fetch_add(1, Ordering::SeqCst);
        self.is_open = true;
        self.cursor = 0;
        Ok(())
    }

    fn poll(&mut self) -> Result<Option<Frame>, Error> {
        self.ensure_open()?;
        let frame = self.frames.get(self.cursor).cloned();
        if frame.is_some() {
            self.cursor += 1;
            self.counters.reads.fetch_add(1, Ordering::SeqCst);
        }
        Ok(frame)
    }

    fn get_frame(&mut self, index: usize) -> Result<Frame, Error> {
        self.ensure_open()?;
        self.counters.reads.fetch_add(1, Ordering::SeqCst);
        self.frames
            .get(index)
            .cloned()
            .ok_or_else(|| Error::Source(format!("frame {} out of range", index)))
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            description: "fake".to_string(),
            size: self.frames.first().map(|f| f.dimensions()),
            fps: self.fps,
            length: self.report_length.then_some(self.frames.len()),
        }
    }

    fn close(&mut self) -> Result<(), Error> {
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
        self.is_open = false;
        Ok(())
    }
}
