//! Streams validated bitmap rows out to a display, one line at a time.
//!
//! There's only ever one row of pixel data in memory: the [`LineBuffer`]. Each
//! row is read from the source into the buffer, byte swapped in place, and
//! handed to the [`DisplaySink`] before the next row overwrites it.

use crate::{
  bmp::{RowOrder, ValidatedImageHeader},
  DecodeError, ImageSource, DISPLAY_SIZE, MAX_DIMENSION,
};

/// Bytes needed for the widest allowed row.
pub const LINE_CAPACITY: usize = MAX_DIMENSION as usize * 2;

/// A display that's written by opening a window and then pushing whole rows.
///
/// This is the shape of most small SPI panel controllers: set the column and
/// row address range, then stream pixel data and let the controller advance
/// its own cursor.
pub trait DisplaySink {
  /// The panel's width in pixels, used to center images.
  #[inline]
  fn display_width(&self) -> u32 {
    DISPLAY_SIZE
  }

  /// Sets the region that following [`write_line`](Self::write_line) calls
  /// fill, top row first.
  fn set_window(&mut self, x: u32, y: u32, width: u32, height: u32);

  /// Writes one row of the window. `line` is exactly `2 * width` bytes of
  /// big-endian RGB565.
  fn write_line(&mut self, line: &[u8]);
}

impl<D: DisplaySink + ?Sized> DisplaySink for &mut D {
  #[inline]
  fn display_width(&self) -> u32 {
    (**self).display_width()
  }
  #[inline]
  fn set_window(&mut self, x: u32, y: u32, width: u32, height: u32) {
    (**self).set_window(x, y, width, height)
  }
  #[inline]
  fn write_line(&mut self, line: &[u8]) {
    (**self).write_line(line)
  }
}

/// The one row of pixel data held in memory during a decode.
///
/// The capacity is fixed at the widest allowed row. Each image uses the first
/// `2 * width` bytes, and every row completely overwrites those before they're
/// used, so nothing carries over between rows or images.
#[derive(Clone)]
pub struct LineBuffer {
  bytes: [u8; LINE_CAPACITY],
}
impl Default for LineBuffer {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}
impl core::fmt::Debug for LineBuffer {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("LineBuffer").field("capacity", &LINE_CAPACITY).finish()
  }
}
impl LineBuffer {
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { bytes: [0; LINE_CAPACITY] }
  }

  /// The first `len` bytes of the buffer.
  ///
  /// ## Panics
  /// * If `len` is more than [`LINE_CAPACITY`]. A validated header's row
  ///   length never is.
  #[inline]
  #[track_caller]
  pub fn row_mut(&mut self, len: usize) -> &mut [u8] {
    &mut self.bytes[..len]
  }
}

/// Swaps the two bytes of every pixel in `row`.
///
/// Bitmap files hold each RGB565 pixel little-endian, the panel wants it
/// big-endian. A trailing odd byte, if any, is left alone.
#[inline]
pub fn swap_pixel_bytes(row: &mut [u8]) {
  let even_len = row.len() & !1;
  let pixels: &mut [[u8; 2]] = bytemuck::cast_slice_mut(&mut row[..even_len]);
  for px in pixels {
    px.swap(0, 1);
  }
}

/// Owns a line buffer so it can be reused for image after image.
#[derive(Debug, Clone, Default)]
pub struct Blitter {
  line: LineBuffer,
}
impl Blitter {
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { line: LineBuffer::new() }
  }

  /// Streams the image's rows into `sink`.
  ///
  /// The window is centered horizontally at the top of the display, and rows
  /// are written top to bottom whatever order the file stores them in:
  /// * Bottom up files seek to each row, starting with the last one stored.
  /// * Top down files seek to the pixel data once and then read straight
  ///   through.
  ///
  /// A short read stops the blit with [`DecodeError::ShortRead`]. Rows already
  /// written stay on the display, there's no partial-image recovery.
  pub fn blit<S, D>(
    &mut self, source: &mut S, header: &ValidatedImageHeader, sink: &mut D,
  ) -> Result<(), DecodeError>
  where
    S: ImageSource + ?Sized,
    D: DisplaySink + ?Sized,
  {
    let width = header.width();
    let height = header.height();
    let row_len = header.bytes_per_row();
    let x = sink.display_width().saturating_sub(width) / 2;
    sink.set_window(x, 0, width, height);

    let data_offset = u64::from(header.data_offset());
    if header.row_order() == RowOrder::TopDown {
      source.seek(data_offset)?;
    }
    for y in (0..height).rev() {
      if header.row_order() == RowOrder::BottomUp {
        // row `y` counted from the start of the data is `y` up from the bottom
        source.seek(data_offset + u64::from(y) * row_len as u64)?;
      }
      let row = self.line.row_mut(row_len);
      source.read_exact(row).inspect_err(|e| log::warn!("row {y} of {height}: {e}"))?;
      swap_pixel_bytes(row);
      sink.write_line(row);
    }
    Ok(())
  }
}

/// Validated image in, display writes out, using a line buffer on the stack.
///
/// If you're showing more than one image, keep a [`Blitter`] around instead.
#[inline]
pub fn blit<S, D>(
  source: &mut S, header: &ValidatedImageHeader, sink: &mut D,
) -> Result<(), DecodeError>
where
  S: ImageSource + ?Sized,
  D: DisplaySink + ?Sized,
{
  Blitter::new().blit(source, header, sink)
}
