use super::raw_headers::*;
use crate::{
  ascii_array::AsciiArray,
  parser_helpers::{try_pull_pod, try_pull_pod_at},
  DecodeError, ImageSource, MAX_DIMENSION,
};
use pack1::{U16LE, U32LE};

/// RGB565 with red in the high bits, the only channel layout accepted.
const RGB565_MASKS: [u32; 3] = [0x0000_F800, 0x0000_07E0, 0x0000_001F];

/// The order that rows are stored in within the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RowOrder {
  /// The first stored row is the top of the image (negative file height).
  TopDown,
  /// The first stored row is the bottom of the image (positive file height).
  BottomUp,
}

/// A bitmap header that passed every check.
///
/// The only way to get one is [`validate`], so holding one means the pixel
/// data is 16bpp RGB565 and the image fits on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidatedImageHeader {
  data_offset: u32,
  width: u32,
  height: u32,
  row_order: RowOrder,
}
impl ValidatedImageHeader {
  /// Absolute byte offset of the pixel data.
  #[inline]
  #[must_use]
  pub const fn data_offset(&self) -> u32 {
    self.data_offset
  }

  /// Image width in pixels, `1..=MAX_DIMENSION`.
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }

  /// Image height in pixels, `1..=MAX_DIMENSION`.
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }

  /// How the rows are stored in the file.
  #[inline]
  #[must_use]
  pub const fn row_order(&self) -> RowOrder {
    self.row_order
  }

  /// Bytes in one row of pixel data (rows aren't padded).
  #[inline]
  #[must_use]
  pub const fn bytes_per_row(&self) -> usize {
    (self.width as usize) * 2
  }
}

/// Splits the raw height field into a magnitude and row order.
///
/// The field is signed in the file, but it's taken as a `u32` here: anything
/// at or above `2**31` is a negative height, with magnitude `2**32 - raw`.
#[inline]
#[must_use]
pub(crate) const fn height_magnitude_and_order(raw: u32) -> (u64, RowOrder) {
  const SIGN: u64 = 1 << 31;
  const WRAP: u64 = 1 << 32;
  let raw = raw as u64;
  if raw >= SIGN {
    (WRAP - raw, RowOrder::TopDown)
  } else {
    (raw, RowOrder::BottomUp)
  }
}

/// Checks the header of a bitmap file and pulls out what the blitter needs.
///
/// Checks happen in file order and the first failure is returned:
/// * The tag must be `BM` ([`DecodeError::BadMagic`]). Only the two tag bytes
///   are read before this check.
/// * The info header must be 124 bytes ([`DecodeError::UnsupportedHeaderVersion`]).
/// * Width must be `1..=240`, as must the height's magnitude
///   ([`DecodeError::OversizedImage`]).
/// * 16 bits per pixel ([`DecodeError::UnsupportedBitDepth`]).
/// * `BI_BITFIELDS` compression ([`DecodeError::UnsupportedCompression`]).
/// * RGB565 channel masks ([`DecodeError::UnsupportedBitmask`]).
///
/// Each field is read right before its own check, so a bad field is reported
/// even when the data ends just after it. If the data ends before a field you
/// get [`DecodeError::ShortRead`].
pub fn validate<S: ImageSource + ?Sized>(
  source: &mut S,
) -> Result<ValidatedImageHeader, DecodeError> {
  let tag: AsciiArray<2> = try_pull_pod_at(source, 0)?;
  if tag != BMP_TAG {
    log::debug!("rejecting file tag {tag:?}");
    return Err(DecodeError::BadMagic);
  }
  let file_header: FileHeaderTail = try_pull_pod(source)?;
  let data_offset = file_header.bitmap_offset.get();

  let info_header_size: U32LE = try_pull_pod_at(source, OFFSET_INFO_HEADER)?;
  if info_header_size.get() != V5_HEADER_SIZE {
    log::debug!("rejecting info header of size {}", info_header_size.get());
    return Err(DecodeError::UnsupportedHeaderVersion);
  }

  let dims: Dimensions = try_pull_pod_at(source, OFFSET_DIMENSIONS)?;
  let width = dims.width.get();
  if width <= 0 || width > MAX_DIMENSION as i32 {
    log::debug!("rejecting width {width}");
    return Err(DecodeError::OversizedImage);
  }
  let (height, row_order) = height_magnitude_and_order(dims.height.get());
  if height == 0 || height > u64::from(MAX_DIMENSION) {
    log::debug!("rejecting height {height}");
    return Err(DecodeError::OversizedImage);
  }

  let bits_per_pixel: U16LE = try_pull_pod_at(source, OFFSET_BITS_PER_PIXEL)?;
  if bits_per_pixel.get() != 16 {
    log::debug!("rejecting {} bits per pixel", bits_per_pixel.get());
    return Err(DecodeError::UnsupportedBitDepth);
  }

  let compression: U32LE = try_pull_pod_at(source, OFFSET_COMPRESSION)?;
  if compression.get() != BI_BITFIELDS {
    log::debug!("rejecting compression {}", compression.get());
    return Err(DecodeError::UnsupportedCompression);
  }

  let m: ChannelMasks = try_pull_pod_at(source, OFFSET_CHANNEL_MASKS)?;
  let masks = [m.r_mask.get(), m.g_mask.get(), m.b_mask.get()];
  if masks != RGB565_MASKS {
    log::debug!("rejecting channel masks {masks:08X?}");
    return Err(DecodeError::UnsupportedBitmask);
  }

  let header = ValidatedImageHeader {
    data_offset,
    width: width.try_into()?,
    height: height.try_into()?,
    row_order,
  };
  log::debug!("{header:?}");
  Ok(header)
}
