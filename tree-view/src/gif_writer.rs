//! Animated GIF export.
//!
//! Frames are quantized and written as soon as they are rendered, so only
//! one frame is held in memory at a time.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use gif::{Encoder, Frame, Repeat};

use crate::error::{RenderError, RenderResult};

/// Quantizer speed: 1-30, lower = better quality but slower.
const QUANTIZE_SPEED: i32 = 10;

/// GIF frame delay in centiseconds for a frame rate.
pub fn frame_delay(fps: u32) -> u16 {
    (100 / fps.max(1)).max(1) as u16
}

/// Streaming writer for a looping GIF.
pub struct GifWriter<W: Write> {
    encoder: Encoder<W>,
    width: u16,
    height: u16,
    frame_delay: u16,
    frames: usize,
}

impl GifWriter<BufWriter<File>> {
    /// Creates (or truncates) the file at `path`.
    pub fn create(path: impl AsRef<Path>, width: u32, height: u32, fps: u32) -> RenderResult<Self> {
        let file = File::create(path.as_ref())?;
        Self::new(BufWriter::new(file), width, height, fps)
    }
}

impl<W: Write> GifWriter<W> {
    /// Writes the GIF header and sets the animation to loop forever.
    ///
    /// # Arguments
    ///
    /// * `writer` - Destination of the encoded stream
    /// * `width` - Frame width in pixels
    /// * `height` - Frame height in pixels
    /// * `fps` - Frames per second (determines playback speed)
    pub fn new(writer: W, width: u32, height: u32, fps: u32) -> RenderResult<Self> {
        let invalid = || RenderError::InvalidCanvas { width, height };
        let w = u16::try_from(width).map_err(|_| invalid())?;
        let h = u16::try_from(height).map_err(|_| invalid())?;
        if w == 0 || h == 0 {
            return Err(invalid());
        }

        let mut encoder = Encoder::new(writer, w, h, &[])?;
        encoder.set_repeat(Repeat::Infinite)?;

        Ok(Self {
            encoder,
            width: w,
            height: h,
            frame_delay: frame_delay(fps),
            frames: 0,
        })
    }

    /// Appends one RGB frame of exactly `width * height * 3` bytes.
    pub fn write_rgb(&mut self, rgb: &[u8]) -> RenderResult<()> {
        let expected = self.width as usize * self.height as usize * 3;
        if rgb.len() != expected {
            return Err(RenderError::GifEncoding(format!(
                "frame has {} bytes, expected {}",
                rgb.len(),
                expected
            )));
        }

        let mut frame = Frame::from_rgb_speed(self.width, self.height, rgb, QUANTIZE_SPEED);
        frame.delay = self.frame_delay;
        self.encoder.write_frame(&frame)?;
        self.frames += 1;
        Ok(())
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// Writes the trailer and flushes the destination.
    pub fn finish(self) -> RenderResult<W> {
        let mut writer = self.encoder.into_inner()?;
        writer.flush()?;
        Ok(writer)
    }
}
