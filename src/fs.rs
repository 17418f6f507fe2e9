//! The gallery directory on a real filesystem.

use std::{
  fs::File,
  io::{BufReader, ErrorKind},
  path::PathBuf,
  string::String,
  vec::Vec,
};

use walkdir::WalkDir;

use crate::{
  gallery::{DirListing, ImageDirectory},
  DecodeError, IoSource,
};

/// A directory of image files.
///
/// Only regular files directly inside the directory are listed, sorted by
/// name. Names that aren't valid UTF-8 are skipped.
#[derive(Debug, Clone)]
pub struct FsDirectory {
  root: PathBuf,
}
impl FsDirectory {
  #[inline]
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }
}
impl ImageDirectory for FsDirectory {
  type Source = IoSource<BufReader<File>>;

  fn list(&mut self) -> DirListing {
    if !self.root.is_dir() {
      log::debug!("no image directory at {}", self.root.display());
      return DirListing::Missing;
    }
    let mut names: Vec<String> = Vec::new();
    let walker = WalkDir::new(&self.root).min_depth(1).max_depth(1).sort_by_file_name();
    for entry in walker {
      match entry {
        Ok(entry) if entry.file_type().is_file() => match entry.file_name().to_str() {
          Some(name) => names.push(String::from(name)),
          None => log::warn!("skipping non UTF-8 name {:?}", entry.file_name()),
        },
        Ok(_) => (),
        Err(e) if e.io_error().map(|io| io.kind()) == Some(ErrorKind::NotFound) => {
          // removed out from under us
          return DirListing::Missing;
        }
        Err(e) => log::warn!("can't list {}: {e}", self.root.display()),
      }
    }
    DirListing::Entries(names)
  }

  fn open(&mut self, name: &str) -> Result<Self::Source, DecodeError> {
    let file = File::open(self.root.join(name))?;
    Ok(IoSource(BufReader::new(file)))
  }
}
