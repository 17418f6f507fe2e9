use core::{fmt, num::TryFromIntError};

/// Why an image couldn't be decoded.
///
/// Every kind is terminal for the image at hand: the data either is the one
/// supported BMP subtype or it isn't, and reading it again won't change that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DecodeError {
  /// The file doesn't start with `BM`.
  BadMagic,

  /// The info header isn't the 124 byte `BITMAPV5HEADER`.
  UnsupportedHeaderVersion,

  /// The width or height is zero, negative, or bigger than the display.
  OversizedImage,

  /// The bits per pixel isn't 16.
  UnsupportedBitDepth,

  /// The compression isn't `BI_BITFIELDS`.
  UnsupportedCompression,

  /// The channel masks aren't RGB565 with red in the high bits.
  UnsupportedBitmask,

  /// The data ran out before a header field or pixel row was complete.
  ShortRead,

  /// The source failed for some reason other than running out of data.
  Io,
}
impl DecodeError {
  /// A short message suitable for drawing on the display.
  #[inline]
  #[must_use]
  pub const fn message(self) -> &'static str {
    match self {
      Self::BadMagic => "not a BMP file",
      Self::UnsupportedHeaderVersion => "needs a V5 header",
      Self::OversizedImage => "bad image size",
      Self::UnsupportedBitDepth => "needs 16 bpp",
      Self::UnsupportedCompression => "needs bitfields",
      Self::UnsupportedBitmask => "needs RGB565",
      Self::ShortRead => "file is truncated",
      Self::Io => "read error",
    }
  }
}
impl fmt::Display for DecodeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.message())
  }
}
impl From<TryFromIntError> for DecodeError {
  #[inline]
  fn from(_: TryFromIntError) -> Self {
    Self::OversizedImage
  }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for DecodeError {
  #[inline]
  fn from(e: std::io::Error) -> Self {
    match e.kind() {
      std::io::ErrorKind::UnexpectedEof => Self::ShortRead,
      _ => {
        log::warn!("image source failed: {e}");
        Self::Io
      }
    }
  }
}

#[test]
fn test_io_errors_map_to_kinds() {
  #[cfg(feature = "std")]
  {
    use std::io::{Error, ErrorKind};
    assert_eq!(DecodeError::from(Error::from(ErrorKind::UnexpectedEof)), DecodeError::ShortRead);
    assert_eq!(DecodeError::from(Error::from(ErrorKind::PermissionDenied)), DecodeError::Io);
  }
  assert_eq!(DecodeError::from(u8::try_from(300_u32).unwrap_err()), DecodeError::OversizedImage);
}
