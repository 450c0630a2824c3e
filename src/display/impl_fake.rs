use crate::display::interface::DisplaySurface;
use crate::error::Error;
use image::RgbImage;
use std::cell::Cell;

/// Signals quit after a fixed number of loop iterations.
pub struct DisplayFake {
    iterations: usize,
    checks: Cell<usize>,
    pub presented: Vec<RgbImage>,
}

impl DisplayFake {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            checks: Cell::new(0),
            presented: Vec::new(),
        }
    }
}

impl DisplaySurface for DisplayFake {
    fn running(&self) -> bool {
        let checks = self.checks.get();
        self.checks.set(checks + 1);
        checks < self.iterations
    }

    fn present(&mut self, canvas: &RgbImage) -> Result<(), Error> {
        self.presented.push(canvas.clone());
        Ok(())
    }
}
