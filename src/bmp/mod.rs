#![forbid(unsafe_code)]

//! Module for the one kind of Windows Bitmap (BMP) file this crate displays.
//!
//! ## The Supported Subset
//!
//! Note: All multi-byte values in BMP are little-endian encoded.
//!
//! * The file starts with the 14 byte "file header": the `BM` tag, the total
//!   file size, 4 reserved bytes, and the offset of the pixel data.
//! * Next is the "info header". Its first 4 bytes are its own size, which
//!   picks the header version. Only the 124 byte `BITMAPV5HEADER` is accepted,
//!   because that version always has the channel bitmasks at a fixed position
//!   (`0x36` from the start of the file).
//! * The image must be 16 bits per pixel, use `BI_BITFIELDS` compression, and
//!   have the RGB565 masks (`0xF800`, `0x07E0`, `0x001F`).
//! * Width and height must both fit within the display, `1..=240`. A negative
//!   height means the rows are stored top down, otherwise they're bottom up.
//! * The pixel data is `width * 2` bytes per row, rows not padded.
//!
//! Anything else is rejected with a [`DecodeError`](crate::DecodeError) naming
//! the first check that failed. Nothing past the headers is read until the
//! [blitter](crate::blit) streams the rows out.

mod raw_headers;

mod header;
pub use header::*;

#[cfg(feature = "alloc")]
mod encode;
#[cfg(feature = "alloc")]
pub use encode::*;
