#![allow(dead_code)]

//! Byte-for-byte views of the parts of a bitmap file that get validated.
//!
//! These keep the file's little-endian layout, so they can be read straight
//! out of the source with [`try_pull_pod`](crate::parser_helpers::try_pull_pod).

use crate::ascii_array::AsciiArray;
use pack1::*;

pub(crate) const BI_BITFIELDS: u32 = 3;

/// The tag every supported file starts with.
pub(crate) const BMP_TAG: AsciiArray<2> = AsciiArray(*b"BM");

/// Size of `BITMAPV5HEADER`.
pub(crate) const V5_HEADER_SIZE: u32 = 124;

/// Where the info header starts (and so where its `size` field is).
pub(crate) const OFFSET_INFO_HEADER: u64 = 0x0E;

/// The file header fields that come after the tag.
///
/// Only `bitmap_offset` gets used, the rest is just here so that the struct
/// lines up with the file.
#[derive(Debug, Clone, Copy, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub(crate) struct FileHeaderTail {
  pub file_size: U32LE,
  pub reserved1: U16LE,
  pub reserved2: U16LE,
  pub bitmap_offset: U32LE,
}

/// Where the width and height are.
pub(crate) const OFFSET_DIMENSIONS: u64 = 0x12;

/// Where the bits per pixel field is.
pub(crate) const OFFSET_BITS_PER_PIXEL: u64 = 0x1C;

/// Where the compression field is.
pub(crate) const OFFSET_COMPRESSION: u64 = 0x1E;

/// Where the channel masks are. With a V5 header the masks are always here,
/// which is why nothing else is accepted.
pub(crate) const OFFSET_CHANNEL_MASKS: u64 = 0x36;

/// The image size fields of a `BITMAPV5HEADER`.
#[derive(Debug, Clone, Copy, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub(crate) struct Dimensions {
  /// width in pixels, signed in the file.
  pub width: I32LE,

  /// height in pixels. The file calls this signed (negative means top down),
  /// but it's kept raw here and the sign is worked out by hand.
  pub height: U32LE,
}

/// The red, green, and blue masks of a `BITMAPV5HEADER`.
#[derive(Debug, Clone, Copy, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub(crate) struct ChannelMasks {
  pub r_mask: U32LE,
  pub g_mask: U32LE,
  pub b_mask: U32LE,
}

#[test]
fn test_raw_header_layouts() {
  use core::mem::size_of;
  assert_eq!(size_of::<FileHeaderTail>(), 12);
  assert_eq!(OFFSET_INFO_HEADER + 4, OFFSET_DIMENSIONS);
  assert_eq!(OFFSET_DIMENSIONS + size_of::<Dimensions>() as u64, 0x1A);
  // the masks end at 0x42
  assert_eq!(OFFSET_CHANNEL_MASKS + size_of::<ChannelMasks>() as u64, 0x42);
}
