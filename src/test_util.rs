//! Fixtures shared by the unit tests.

use alloc::{string::String, vec::Vec};

use crate::{
  bmp::{encode_rgb565_bmp, RowOrder},
  gallery::{DirListing, ImageDirectory, Screen},
  DecodeError, DisplaySink, ImageSource, SliceSource,
};

/// Pixel width of every character, as far as [`RecordingSink`] is concerned.
pub(crate) const GLYPH_WIDTH: u32 = 10;

pub(crate) fn encode(width: u32, height: u32, order: RowOrder, pixels: &[u16]) -> Vec<u8> {
  encode_rgb565_bmp(width, height, order, pixels).unwrap()
}

/// A valid image of all black pixels.
pub(crate) fn solid(width: u32, height: u32, order: RowOrder) -> Vec<u8> {
  encode(width, height, order, &alloc::vec![0; (width * height) as usize])
}

pub(crate) fn put_u16(bytes: &mut [u8], at: usize, v: u16) {
  bytes[at..at + 2].copy_from_slice(&v.to_le_bytes());
}

pub(crate) fn put_u32(bytes: &mut [u8], at: usize, v: u32) {
  bytes[at..at + 4].copy_from_slice(&v.to_le_bytes());
}

/// Remembers everything that's sent to it since the last `fill`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RecordingSink {
  pub windows: Vec<(u32, u32, u32, u32)>,
  pub lines: Vec<Vec<u8>>,
  pub texts: Vec<(String, u32, u32, Option<u32>)>,
  pub fills: usize,
}
impl DisplaySink for RecordingSink {
  fn set_window(&mut self, x: u32, y: u32, width: u32, height: u32) {
    self.windows.push((x, y, width, height));
  }
  fn write_line(&mut self, line: &[u8]) {
    self.lines.push(line.to_vec());
  }
}
impl Screen for RecordingSink {
  fn fill(&mut self) {
    self.windows.clear();
    self.lines.clear();
    self.texts.clear();
    self.fills += 1;
  }
  fn draw_string(&mut self, text: &str, x: u32, y: u32, width: Option<u32>) {
    self.texts.push((String::from(text), x, y, width));
  }
  fn fit_chars(&self, text: &str, width: u32) -> usize {
    let mut end = text.len().min((width / GLYPH_WIDTH) as usize);
    while !text.is_char_boundary(end) {
      end -= 1;
    }
    end
  }
}

/// An image source that owns its bytes.
#[derive(Debug, Clone)]
pub(crate) struct OwnedSource {
  bytes: Vec<u8>,
  position: u64,
}
impl ImageSource for OwnedSource {
  fn seek(&mut self, offset: u64) -> Result<(), DecodeError> {
    self.position = offset;
    Ok(())
  }
  fn read(&mut self, buf: &mut [u8]) -> Result<usize, DecodeError> {
    let mut s = SliceSource::new(&self.bytes);
    s.seek(self.position)?;
    let n = s.read(buf)?;
    self.position += n as u64;
    Ok(n)
  }
}

/// A directory held in memory, counting how often files get opened.
#[derive(Debug, Clone)]
pub(crate) struct MemoryDir {
  pub listing: DirListing,
  pub files: Vec<(String, Vec<u8>)>,
  pub opened: usize,
}
impl MemoryDir {
  pub fn new(listing: DirListing) -> Self {
    Self { listing, files: Vec::new(), opened: 0 }
  }
  pub fn with_files(files: Vec<(String, Vec<u8>)>) -> Self {
    let names = files.iter().map(|(name, _)| name.clone()).collect();
    Self { listing: DirListing::Entries(names), files, opened: 0 }
  }
}
impl ImageDirectory for MemoryDir {
  type Source = OwnedSource;
  fn list(&mut self) -> DirListing {
    self.listing.clone()
  }
  fn open(&mut self, name: &str) -> Result<OwnedSource, DecodeError> {
    self.opened += 1;
    self
      .files
      .iter()
      .find(|(n, _)| n == name)
      .map(|(_, bytes)| OwnedSource { bytes: bytes.clone(), position: 0 })
      .ok_or(DecodeError::Io)
  }
}
