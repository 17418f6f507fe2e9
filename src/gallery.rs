//! An image gallery app: a list of files, an index, and swipes to move it.
//!
//! The app is driven by its host the same way as any other watch app:
//! [`foreground`](Gallery::foreground) when it's opened,
//! [`swipe`](Gallery::swipe) for each left/right gesture, and
//! [`background`](Gallery::background) when something else takes over. Every
//! draw finishes before the call returns, so a swipe can never land in the
//! middle of a decode.

use alloc::{string::String, vec::Vec};

use crate::{
  bmp::validate, Blitter, DecodeError, DisplaySink, ImageSource, DISPLAY_SIZE, GALLERY_DIR,
};

/// A left or right gesture (or anything else, which is ignored).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Swipe {
  /// Finger moved right to left: go to the next image.
  Left,
  /// Finger moved left to right: go to the previous image.
  Right,
  Other,
}
impl Swipe {
  #[inline]
  #[must_use]
  pub const fn delta(self) -> isize {
    match self {
      Self::Left => 1,
      Self::Right => -1,
      Self::Other => 0,
    }
  }
}

/// The file names and which one is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryState {
  files: Vec<String>,
  index: usize,
}
impl GalleryState {
  /// Starts at the first file.
  #[inline]
  #[must_use]
  pub fn new(files: Vec<String>) -> Self {
    Self { files, index: 0 }
  }

  #[inline]
  #[must_use]
  pub fn files(&self) -> &[String] {
    &self.files
  }

  #[inline]
  #[must_use]
  pub fn index(&self) -> usize {
    self.index
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }

  /// The file that should be showing, if there are any files.
  #[inline]
  #[must_use]
  pub fn current(&self) -> Option<&str> {
    self.files.get(self.index).map(String::as_str)
  }

  /// Moves the index by `delta`, wrapping at both ends. Does nothing when
  /// there are no files.
  #[inline]
  pub fn navigate(&mut self, delta: isize) {
    let Ok(len) = isize::try_from(self.files.len()) else { return };
    if len == 0 {
      return;
    }
    // index < len, so this fits
    let index = self.index as isize;
    self.index = (index + delta).rem_euclid(len) as usize;
  }

  /// Drops the file list, leaving an empty gallery.
  #[inline]
  pub fn clear(&mut self) {
    self.files = Vec::new();
    self.index = 0;
  }
}

/// What listing the image directory found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirListing {
  /// There's no image directory. That's fine, it's just an empty gallery.
  Missing,
  /// The names of the files in the directory.
  Entries(Vec<String>),
}
impl DirListing {
  /// The file names, with a missing directory giving none.
  #[inline]
  #[must_use]
  pub fn into_files(self) -> Vec<String> {
    match self {
      Self::Missing => Vec::new(),
      Self::Entries(files) => files,
    }
  }
}

/// Where the gallery's images come from.
pub trait ImageDirectory {
  type Source: ImageSource;

  /// Lists the image file names.
  fn list(&mut self) -> DirListing;

  /// Opens one of the listed files for reading.
  fn open(&mut self, name: &str) -> Result<Self::Source, DecodeError>;
}

/// A display that can also be cleared and have text drawn on it.
///
/// Text layout is the host's business, the gallery only asks where to cut a
/// string so it fits.
pub trait Screen: DisplaySink {
  /// Clears the whole display to the background color.
  fn fill(&mut self);

  /// Draws `text` with its top left at `(x, y)`. With a `width` the text is
  /// centered within that many pixels.
  fn draw_string(&mut self, text: &str, x: u32, y: u32, width: Option<u32>);

  /// How many bytes from the start of `text` fit in `width` pixels. Must land
  /// on a `char` boundary.
  fn fit_chars(&self, text: &str, width: u32) -> usize;
}

/// What a draw ended up showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
  /// The "no files" message.
  NoFiles,
  /// The named image.
  Shown(String),
  /// An error message in place of the named image.
  Failed(String, DecodeError),
}

/// Baseline of the first line of centered messages.
const MESSAGE_Y: u32 = 60;
/// Baseline of the second line of centered messages.
const MESSAGE_Y2: u32 = 98;
/// The file name goes near the bottom, so it's visible until the image (which
/// starts at the top) has been drawn over it.
const LABEL_Y: u32 = 200;

/// The gallery app.
#[derive(Debug)]
pub struct Gallery<D> {
  dir: D,
  state: GalleryState,
  blitter: Blitter,
}
impl<D: ImageDirectory> Gallery<D> {
  /// A gallery with no files until it's brought to the foreground.
  #[inline]
  #[must_use]
  pub fn new(dir: D) -> Self {
    Self { dir, state: GalleryState::default(), blitter: Blitter::new() }
  }

  #[inline]
  #[must_use]
  pub fn state(&self) -> &GalleryState {
    &self.state
  }

  /// Re-reads the directory and shows the first image.
  ///
  /// The index always starts over, since files might have been removed while
  /// the app was in the background.
  pub fn foreground<S: Screen + ?Sized>(&mut self, screen: &mut S) -> DrawOutcome {
    self.state = GalleryState::new(self.dir.list().into_files());
    log::debug!("gallery has {} files", self.state.files().len());
    self.draw(screen)
  }

  /// Forgets the file list to free up memory. It's read again on the next
  /// [`foreground`](Self::foreground).
  #[inline]
  pub fn background(&mut self) {
    self.state.clear();
  }

  /// Moves to the next/previous image and draws it.
  pub fn swipe<S: Screen + ?Sized>(&mut self, swipe: Swipe, screen: &mut S) -> DrawOutcome {
    self.state.navigate(swipe.delta());
    self.draw(screen)
  }

  /// Redraws the whole screen for the current state.
  pub fn draw<S: Screen + ?Sized>(&mut self, screen: &mut S) -> DrawOutcome {
    screen.fill();
    let Some(name) = self.state.current() else {
      screen.draw_string("No files", 0, MESSAGE_Y, Some(DISPLAY_SIZE));
      screen.draw_string(&alloc::format!("in {GALLERY_DIR}/"), 0, MESSAGE_Y2, Some(DISPLAY_SIZE));
      return DrawOutcome::NoFiles;
    };
    let name = String::from(name);
    draw_label(screen, &name);
    match show_image(&mut self.dir, &mut self.blitter, &name, screen) {
      Ok(()) => DrawOutcome::Shown(name),
      Err(e) => {
        log::warn!("can't show {name}: {e}");
        screen.fill();
        screen.draw_string("Can't show", 0, MESSAGE_Y, Some(DISPLAY_SIZE));
        screen.draw_string(e.message(), 0, MESSAGE_Y2, Some(DISPLAY_SIZE));
        draw_label(screen, &name);
        DrawOutcome::Failed(name, e)
      }
    }
  }
}

fn draw_label<S: Screen + ?Sized>(screen: &mut S, name: &str) {
  let fits = screen.fit_chars(name, DISPLAY_SIZE);
  screen.draw_string(name.get(..fits).unwrap_or(name), 0, LABEL_Y, None);
}

fn show_image<D: ImageDirectory, S: Screen + ?Sized>(
  dir: &mut D, blitter: &mut Blitter, name: &str, screen: &mut S,
) -> Result<(), DecodeError> {
  let mut source = dir.open(name)?;
  let header = validate(&mut source)?;
  blitter.blit(&mut source, &header, screen)
}
