#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
//#![warn(missing_docs)]

//! Shows RGB565 bitmaps on a small display without ever holding a whole image
//! in memory.
//!
//! Decoding happens in two steps:
//! * [`bmp::validate`] reads just the header fields that matter, and rejects
//!   anything that isn't exactly a 16bpp, RGB565, V5-header bitmap that fits
//!   on the display.
//! * [`blit`] then streams the pixel rows, one at a time through a single
//!   [`LineBuffer`], to a [`DisplaySink`].
//!
//! The [`gallery`] module wraps that up into a small image viewer app, and with
//! the `std` feature [`fs::FsDirectory`] feeds it from a real directory.

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

/// Width and height of the display, in pixels.
pub const DISPLAY_SIZE: u32 = 240;

/// The largest width or height an image can have.
pub const MAX_DIMENSION: u32 = DISPLAY_SIZE;

/// The directory the gallery reads images from.
pub const GALLERY_DIR: &str = "gallery";

mod error;
pub use error::*;

pub mod ascii_array;
pub use ascii_array::*;

pub mod pixel_formats;
pub use pixel_formats::*;

mod parser_helpers;

mod source;
pub use source::*;

pub mod bmp;

pub mod blit;
pub use blit::*;

#[cfg(feature = "alloc")]
pub mod gallery;

#[cfg(feature = "alloc")]
pub mod framebuffer;

#[cfg(feature = "std")]
pub mod fs;

#[cfg(all(test, feature = "alloc"))]
mod test_util;
