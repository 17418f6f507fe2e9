use alloc::vec::Vec;

use super::{raw_headers::*, RowOrder};
use crate::{DecodeError, MAX_DIMENSION};

/// Where [`encode_rgb565_bmp`] puts the pixel data: right after the 14 byte
/// file header and the 124 byte info header.
pub const ENCODED_DATA_OFFSET: u32 = 14 + V5_HEADER_SIZE;

/// `LCS_sRGB`
const LCS_SRGB: u32 = 0x7352_4742;
/// `LCS_GM_IMAGES`
const LCS_GM_IMAGES: u32 = 0x0000_0004;

/// Writes RGB565 pixels out as a bitmap file that [`validate`](super::validate)
/// accepts.
///
/// * `pixels` are given row by row from the top of the image, `width * height`
///   of them. Each is stored as a little-endian `u16`.
/// * `row_order` picks how the rows are laid out in the file.
///
/// Rows are packed with no padding. With an even width that's the same as the
/// usual 4 byte row alignment, with an odd width only this crate will read the
/// file correctly.
///
/// Errors with [`DecodeError::OversizedImage`] if the dimensions aren't in
/// `1..=MAX_DIMENSION` or don't match the pixel count.
pub fn encode_rgb565_bmp(
  width: u32, height: u32, row_order: RowOrder, pixels: &[u16],
) -> Result<Vec<u8>, DecodeError> {
  if !(1..=MAX_DIMENSION).contains(&width) || !(1..=MAX_DIMENSION).contains(&height) {
    return Err(DecodeError::OversizedImage);
  }
  let w = usize::try_from(width)?;
  let h = usize::try_from(height)?;
  if pixels.len() != w * h {
    return Err(DecodeError::OversizedImage);
  }
  let image_size = width * height * 2;
  let file_size = ENCODED_DATA_OFFSET + image_size;
  let file_height: i32 = match row_order {
    RowOrder::TopDown => -(height as i32),
    RowOrder::BottomUp => height as i32,
  };

  let mut out = Vec::with_capacity(file_size as usize);
  // file header
  out.extend_from_slice(&BMP_TAG.0);
  out.extend_from_slice(&file_size.to_le_bytes());
  out.extend_from_slice(&[0; 4]);
  out.extend_from_slice(&ENCODED_DATA_OFFSET.to_le_bytes());
  // info header
  out.extend_from_slice(&V5_HEADER_SIZE.to_le_bytes());
  out.extend_from_slice(&(width as i32).to_le_bytes());
  out.extend_from_slice(&file_height.to_le_bytes());
  out.extend_from_slice(&1_u16.to_le_bytes());
  out.extend_from_slice(&16_u16.to_le_bytes());
  out.extend_from_slice(&BI_BITFIELDS.to_le_bytes());
  out.extend_from_slice(&image_size.to_le_bytes());
  // 2835 pixels per meter is 72 dpi
  out.extend_from_slice(&2835_i32.to_le_bytes());
  out.extend_from_slice(&2835_i32.to_le_bytes());
  out.extend_from_slice(&0_u32.to_le_bytes());
  out.extend_from_slice(&0_u32.to_le_bytes());
  for mask in [0xF800_u32, 0x07E0, 0x001F, 0] {
    out.extend_from_slice(&mask.to_le_bytes());
  }
  out.extend_from_slice(&LCS_SRGB.to_le_bytes());
  // endpoints and gamma are unused with sRGB
  out.extend_from_slice(&[0; 36 + 12]);
  out.extend_from_slice(&LCS_GM_IMAGES.to_le_bytes());
  // profile data, profile size, reserved
  out.extend_from_slice(&[0; 12]);
  debug_assert_eq!(out.len(), ENCODED_DATA_OFFSET as usize);

  let mut push_row = |row: &[u16]| {
    for px in row {
      out.extend_from_slice(&px.to_le_bytes());
    }
  };
  match row_order {
    RowOrder::TopDown => pixels.chunks_exact(w).for_each(&mut push_row),
    RowOrder::BottomUp => pixels.chunks_exact(w).rev().for_each(&mut push_row),
  }
  Ok(out)
}

#[test]
fn test_encode_layout() {
  let bmp = encode_rgb565_bmp(2, 2, RowOrder::BottomUp, &[0x0102, 0x0304, 0x0506, 0x0708])
    .unwrap();
  assert_eq!(bmp.len(), 138 + 8);
  assert_eq!(&bmp[0..2], b"BM");
  assert_eq!(&bmp[0x02..0x06], &146_u32.to_le_bytes());
  assert_eq!(&bmp[0x0A..0x0E], &138_u32.to_le_bytes());
  assert_eq!(&bmp[0x16..0x1A], &2_i32.to_le_bytes());
  // bottom row first, little-endian pixels
  assert_eq!(&bmp[138..], &[0x06, 0x05, 0x08, 0x07, 0x02, 0x01, 0x04, 0x03]);

  let bmp = encode_rgb565_bmp(2, 1, RowOrder::TopDown, &[0x0102, 0x0304]).unwrap();
  assert_eq!(&bmp[0x16..0x1A], &(-1_i32).to_le_bytes());
  assert_eq!(&bmp[138..], &[0x02, 0x01, 0x04, 0x03]);
}

#[test]
fn test_encode_rejects_bad_dimensions() {
  assert_eq!(encode_rgb565_bmp(0, 1, RowOrder::TopDown, &[]), Err(DecodeError::OversizedImage));
  assert_eq!(
    encode_rgb565_bmp(241, 1, RowOrder::TopDown, &[0; 241]),
    Err(DecodeError::OversizedImage)
  );
  assert_eq!(encode_rgb565_bmp(2, 2, RowOrder::TopDown, &[0; 3]), Err(DecodeError::OversizedImage));
}
