use bytemuck::{bytes_of_mut, Pod};

use crate::{DecodeError, ImageSource};

/// Reads a whole `T` from the source's current position.
///
/// If the source runs out first you get [`DecodeError::ShortRead`].
#[inline]
pub(crate) fn try_pull_pod<T: Pod, S: ImageSource + ?Sized>(
  source: &mut S,
) -> Result<T, DecodeError> {
  let mut t = T::zeroed();
  source.read_exact(bytes_of_mut(&mut t))?;
  Ok(t)
}

/// Seeks and then reads a whole `T`.
#[inline]
pub(crate) fn try_pull_pod_at<T: Pod, S: ImageSource + ?Sized>(
  source: &mut S, offset: u64,
) -> Result<T, DecodeError> {
  source.seek(offset)?;
  try_pull_pod(source)
}
