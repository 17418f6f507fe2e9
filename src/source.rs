//! Byte sources that images are decoded from.
//!
//! The decoder never wants the whole file at once. It only needs to jump to an
//! absolute offset and then read a fixed number of bytes, so that's all an
//! [`ImageSource`] has to do.

use crate::DecodeError;

/// A randomly seekable, readable run of bytes.
pub trait ImageSource {
  /// Moves the read position to `offset` bytes from the start.
  ///
  /// Seeking past the end is allowed, the next read will just come up short.
  fn seek(&mut self, offset: u64) -> Result<(), DecodeError>;

  /// Reads up to `buf.len()` bytes, returning how many were read.
  ///
  /// A return of 0 for a non-empty `buf` means the data is exhausted.
  fn read(&mut self, buf: &mut [u8]) -> Result<usize, DecodeError>;

  /// Fills all of `buf` or fails with [`DecodeError::ShortRead`].
  #[inline]
  fn read_exact(&mut self, mut buf: &mut [u8]) -> Result<(), DecodeError> {
    while !buf.is_empty() {
      match self.read(buf)? {
        0 => return Err(DecodeError::ShortRead),
        n => buf = &mut buf[n..],
      }
    }
    Ok(())
  }
}

impl<S: ImageSource + ?Sized> ImageSource for &mut S {
  #[inline]
  fn seek(&mut self, offset: u64) -> Result<(), DecodeError> {
    (**self).seek(offset)
  }
  #[inline]
  fn read(&mut self, buf: &mut [u8]) -> Result<usize, DecodeError> {
    (**self).read(buf)
  }
}

/// An image that's already addressable as a byte slice (eg: memory mapped
/// flash, or an `include_bytes!`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceSource<'a> {
  bytes: &'a [u8],
  position: usize,
}
impl<'a> SliceSource<'a> {
  /// Starts reading at the beginning of `bytes`.
  #[inline]
  #[must_use]
  pub const fn new(bytes: &'a [u8]) -> Self {
    Self { bytes, position: 0 }
  }

  /// The current read position.
  #[inline]
  #[must_use]
  pub const fn position(&self) -> usize {
    self.position
  }
}
impl ImageSource for SliceSource<'_> {
  #[inline]
  fn seek(&mut self, offset: u64) -> Result<(), DecodeError> {
    // anything that doesn't fit in a usize is past the end anyway
    self.position = usize::try_from(offset).unwrap_or(usize::MAX);
    Ok(())
  }

  #[inline]
  fn read(&mut self, buf: &mut [u8]) -> Result<usize, DecodeError> {
    let rest = self.bytes.get(self.position..).unwrap_or_default();
    let count = rest.len().min(buf.len());
    buf[..count].copy_from_slice(&rest[..count]);
    self.position += count;
    Ok(count)
  }
}

/// Adapts any `std::io` reader that can also seek, such as a `File`.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSource<R>(pub R);

#[cfg(feature = "std")]
impl<R: std::io::Read + std::io::Seek> ImageSource for IoSource<R> {
  #[inline]
  fn seek(&mut self, offset: u64) -> Result<(), DecodeError> {
    std::io::Seek::seek(&mut self.0, std::io::SeekFrom::Start(offset))?;
    Ok(())
  }

  #[inline]
  fn read(&mut self, buf: &mut [u8]) -> Result<usize, DecodeError> {
    loop {
      match std::io::Read::read(&mut self.0, buf) {
        Ok(n) => return Ok(n),
        Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
        Err(e) => return Err(e.into()),
      }
    }
  }
}
