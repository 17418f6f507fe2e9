//! Module for pixel formats.
//!
//! The panel this crate drives takes RGB565: 5 bits of red, 6 of green, and 5
//! of blue packed into a `u16`, sent over the wire high byte first.
//!
//! Bitmap files store that same `u16` little-endian, so the only work the
//! blitter does on pixel data is to swap the two bytes of each pixel. Nothing
//! in the decode path ever looks at the channels. This module is for the code
//! around the edges (host previews, tests) that does want to see colors.
//!
//! ## Widening Channels
//! Going from 5 or 6 bits up to 8 uses bit replication: the current bit
//! pattern becomes the top bits, and is then copied down to fill the rest. This
//! maps 0 to 0 and the channel max to 255, with even steps between.

use bitfrob::u8_replicate_bits;
use bytemuck::{Pod, Zeroable};
use pixel_formats::r8g8b8a8_Srgb;

/// An RGB565 pixel, red in the high bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct Rgb565(pub u16);
impl Rgb565 {
  pub const BLACK: Self = Self(0x0000);
  pub const WHITE: Self = Self(0xFFFF);
  pub const RED: Self = Self(0xF800);
  pub const GREEN: Self = Self(0x07E0);
  pub const BLUE: Self = Self(0x001F);

  /// Builds a pixel from channel values, each masked to its bit width.
  #[inline]
  #[must_use]
  pub const fn new(r5: u8, g6: u8, b5: u8) -> Self {
    Self(((r5 as u16 & 0x1F) << 11) | ((g6 as u16 & 0x3F) << 5) | (b5 as u16 & 0x1F))
  }

  /// The pixel as it's sent to the panel (big-endian).
  #[inline]
  #[must_use]
  pub const fn from_wire_bytes(bytes: [u8; 2]) -> Self {
    Self(u16::from_be_bytes(bytes))
  }

  #[inline]
  #[must_use]
  pub const fn to_wire_bytes(self) -> [u8; 2] {
    self.0.to_be_bytes()
  }

  /// The pixel as it's stored in a bitmap file (little-endian).
  #[inline]
  #[must_use]
  pub const fn from_file_bytes(bytes: [u8; 2]) -> Self {
    Self(u16::from_le_bytes(bytes))
  }

  #[inline]
  #[must_use]
  pub const fn r5(self) -> u8 {
    (self.0 >> 11) as u8
  }

  #[inline]
  #[must_use]
  pub const fn g6(self) -> u8 {
    ((self.0 >> 5) & 0x3F) as u8
  }

  #[inline]
  #[must_use]
  pub const fn b5(self) -> u8 {
    (self.0 & 0x1F) as u8
  }

  /// Widens to 8 bits per channel, fully opaque.
  #[inline]
  #[must_use]
  pub fn to_srgba(self) -> r8g8b8a8_Srgb {
    r8g8b8a8_Srgb {
      r: u8_replicate_bits(5, self.r5()),
      g: u8_replicate_bits(6, self.g6()),
      b: u8_replicate_bits(5, self.b5()),
      a: 0xFF,
    }
  }
}

#[test]
fn test_rgb565_channels() {
  assert_eq!(Rgb565::RED, Rgb565::new(0x1F, 0, 0));
  assert_eq!(Rgb565::GREEN, Rgb565::new(0, 0x3F, 0));
  assert_eq!(Rgb565::BLUE, Rgb565::new(0, 0, 0x1F));
  let p = Rgb565::new(0b10101, 0b110011, 0b01110);
  assert_eq!((p.r5(), p.g6(), p.b5()), (0b10101, 0b110011, 0b01110));
  assert_eq!(Rgb565::from_wire_bytes(p.to_wire_bytes()), p);
  assert_eq!(Rgb565::from_file_bytes([0x00, 0xF8]), Rgb565::RED);
  assert_eq!(Rgb565::from_wire_bytes([0xF8, 0x00]), Rgb565::RED);
}

#[test]
fn test_rgb565_widening_hits_the_ends() {
  let white = Rgb565::WHITE.to_srgba();
  assert_eq!((white.r, white.g, white.b, white.a), (0xFF, 0xFF, 0xFF, 0xFF));
  let black = Rgb565::BLACK.to_srgba();
  assert_eq!((black.r, black.g, black.b, black.a), (0, 0, 0, 0xFF));
  let red = Rgb565::RED.to_srgba();
  assert_eq!((red.r, red.g, red.b), (0xFF, 0, 0));
}
