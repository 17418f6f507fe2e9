#![forbid(unsafe_code)]

//! A display held in memory, for running the gallery somewhere other than the
//! watch.

use alloc::{string::String, vec, vec::Vec};
use core::fmt::Write;

use crate::{gallery::Screen, DisplaySink, Rgb565, DISPLAY_SIZE};

/// Pixel width of one character of text, for [`Screen::fit_chars`].
pub const GLYPH_WIDTH: u32 = 12;

/// A `DISPLAY_SIZE` square panel in memory.
///
/// Pixel writes act like a panel controller's: [`set_window`](DisplaySink::set_window)
/// picks a rectangle (clipped to the panel) and each
/// [`write_line`](DisplaySink::write_line) fills the next row of it. Writes
/// past the bottom of the window are dropped.
///
/// There's no font, so text isn't rasterized. It's just kept in
/// [`labels`](Self::labels) so it can be inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
  pixels: Vec<Rgb565>,
  window: (u32, u32, u32, u32),
  cursor_row: u32,
  lines_written: usize,
  labels: Vec<(String, u32, u32)>,
}
impl Default for FrameBuffer {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}
impl FrameBuffer {
  /// A black panel.
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    let side = DISPLAY_SIZE as usize;
    Self {
      pixels: vec![Rgb565::BLACK; side * side],
      window: (0, 0, DISPLAY_SIZE, DISPLAY_SIZE),
      cursor_row: 0,
      lines_written: 0,
      labels: Vec::new(),
    }
  }

  /// Gets the pixel at the position, or `None` if it's off the panel.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<Rgb565> {
    if x < DISPLAY_SIZE && y < DISPLAY_SIZE {
      self.pixels.get((y * DISPLAY_SIZE + x) as usize).copied()
    } else {
      None
    }
  }

  /// How many rows have been written since the last fill.
  #[inline]
  #[must_use]
  pub fn lines_written(&self) -> usize {
    self.lines_written
  }

  /// Text drawn since the last fill, with where it was drawn.
  #[inline]
  #[must_use]
  pub fn labels(&self) -> &[(String, u32, u32)] {
    &self.labels
  }

  /// Renders the panel as a binary (`P6`) Netpbm file.
  #[must_use]
  pub fn to_ppm(&self) -> Vec<u8> {
    let mut header = String::new();
    // writing to a String can't fail
    let _ = write!(header, "P6\n{DISPLAY_SIZE} {DISPLAY_SIZE}\n255\n");
    let mut out = Vec::with_capacity(header.len() + self.pixels.len() * 3);
    out.extend_from_slice(header.as_bytes());
    for px in &self.pixels {
      let c = px.to_srgba();
      out.extend_from_slice(&[c.r, c.g, c.b]);
    }
    out
  }
}
impl DisplaySink for FrameBuffer {
  fn set_window(&mut self, x: u32, y: u32, width: u32, height: u32) {
    let x = x.min(DISPLAY_SIZE);
    let y = y.min(DISPLAY_SIZE);
    let width = width.min(DISPLAY_SIZE - x);
    let height = height.min(DISPLAY_SIZE - y);
    self.window = (x, y, width, height);
    self.cursor_row = 0;
  }

  fn write_line(&mut self, line: &[u8]) {
    self.lines_written += 1;
    let (x, y, width, height) = self.window;
    if self.cursor_row >= height {
      log::trace!("dropping a line written past the window");
      return;
    }
    let start = ((y + self.cursor_row) * DISPLAY_SIZE + x) as usize;
    let row = &mut self.pixels[start..start + width as usize];
    for (dst, src) in row.iter_mut().zip(line.chunks_exact(2)) {
      *dst = Rgb565::from_wire_bytes([src[0], src[1]]);
    }
    self.cursor_row += 1;
  }
}
impl Screen for FrameBuffer {
  fn fill(&mut self) {
    self.pixels.fill(Rgb565::BLACK);
    self.labels.clear();
    self.lines_written = 0;
  }

  fn draw_string(&mut self, text: &str, x: u32, y: u32, width: Option<u32>) {
    let x = match width {
      Some(w) => {
        let text_w = (text.chars().count() as u32).saturating_mul(GLYPH_WIDTH);
        x + w.saturating_sub(text_w) / 2
      }
      None => x,
    };
    self.labels.push((String::from(text), x, y));
  }

  fn fit_chars(&self, text: &str, width: u32) -> usize {
    let max_chars = (width / GLYPH_WIDTH) as usize;
    text.char_indices().nth(max_chars).map_or(text.len(), |(i, _)| i)
  }
}
