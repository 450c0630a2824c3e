use crate::error::Error;
use image::RgbImage;

/// A window the interactive loop draws into.
pub trait DisplaySurface {
    /// False once the user asked to quit.
    fn running(&self) -> bool;

    fn present(&mut self, canvas: &RgbImage) -> Result<(), Error>;
}
