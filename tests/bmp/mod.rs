use gallery565::{
  blit,
  bmp::{validate, RowOrder},
  Blitter, DecodeError, IoSource, SliceSource,
};

use super::{encode, rand_bytes, CountingSource, Recorder};

#[test]
fn test_bad_magic_reads_only_the_tag() {
  let mut bmp = encode(4, 4, RowOrder::BottomUp, &[0; 16]);
  for tag in [*b"BA", *b"MB", *b"\0\0", *b"\x89P"] {
    bmp[0..2].copy_from_slice(&tag);
    let mut source = CountingSource { inner: SliceSource::new(&bmp), bytes_read: 0 };
    assert_eq!(validate(&mut source), Err(DecodeError::BadMagic));
    assert_eq!(source.bytes_read, 2);
  }
}

#[test]
fn test_validation_never_reads_pixels() {
  let bmp = encode(10, 10, RowOrder::BottomUp, &[0; 100]);
  let mut source = CountingSource { inner: SliceSource::new(&bmp), bytes_read: 0 };
  validate(&mut source).unwrap();
  // tag, file header, info size, dimensions, depth, compression, masks
  assert_eq!(source.bytes_read, 2 + 12 + 4 + 8 + 2 + 4 + 12);
  // the masks end the header reads
  assert_eq!(source.inner.position(), 0x42);
}

#[test]
fn test_round_trip_bottom_up() {
  let (w, h) = (7_u32, 5_u32);
  let pixels: Vec<u16> = (0..w * h).map(|i| (i as u16).wrapping_mul(0x1F3D)).collect();
  let bmp = encode(w, h, RowOrder::BottomUp, &pixels);
  let mut source = SliceSource::new(&bmp);
  let header = validate(&mut source).unwrap();
  assert!(header.width() > 0 && header.width() <= 240);
  assert!(header.height() > 0 && header.height() <= 240);

  let mut sink = Recorder::default();
  blit(&mut source, &header, &mut sink).unwrap();
  assert_eq!(sink.windows, [((240 - w) / 2, 0, w, h)]);
  assert_eq!(sink.lines.len(), h as usize);
  for (y, line) in sink.lines.iter().enumerate() {
    assert_eq!(line.len(), 2 * w as usize);
    // top of the display first, each stored pixel's bytes swapped
    let stored_row = h as usize - 1 - y;
    let start = 138 + stored_row * 2 * w as usize;
    let stored = &bmp[start..start + 2 * w as usize];
    for (out, inp) in line.chunks_exact(2).zip(stored.chunks_exact(2)) {
      assert_eq!(out, [inp[1], inp[0]]);
    }
  }
}

#[test]
fn test_blitting_twice_gives_the_same_writes() {
  let pixels: Vec<u16> = rand_bytes(2 * 30 * 20)
    .chunks_exact(2)
    .map(|c| u16::from_le_bytes([c[0], c[1]]))
    .collect();
  let bmp = encode(30, 20, RowOrder::BottomUp, &pixels);
  let mut blitter = Blitter::new();
  let mut runs = Vec::new();
  for _ in 0..2 {
    let mut source = SliceSource::new(&bmp);
    let header = validate(&mut source).unwrap();
    let mut sink = Recorder::default();
    blitter.blit(&mut source, &header, &mut sink).unwrap();
    runs.push(sink);
  }
  assert_eq!(runs[0], runs[1]);
}

#[test]
fn test_top_down_and_bottom_up_look_the_same() {
  let pixels: Vec<u16> = (0..12 * 9).map(|i| i * 601).collect();
  let mut outputs = Vec::new();
  for order in [RowOrder::TopDown, RowOrder::BottomUp] {
    let bmp = encode(12, 9, order, &pixels);
    let mut source = SliceSource::new(&bmp);
    let header = validate(&mut source).unwrap();
    assert_eq!(header.row_order(), order);
    let mut sink = Recorder::default();
    blit(&mut source, &header, &mut sink).unwrap();
    outputs.push(sink);
  }
  assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn test_pixel_data_at_a_later_offset() {
  // move the pixel data back by 6 bytes of junk
  let bmp = encode(2, 2, RowOrder::TopDown, &[0x0102, 0x0304, 0x0506, 0x0708]);
  let mut moved = bmp[..138].to_vec();
  moved.extend_from_slice(&[0xEE; 6]);
  moved.extend_from_slice(&bmp[138..]);
  moved[0x0A..0x0E].copy_from_slice(&144_u32.to_le_bytes());
  let mut source = SliceSource::new(&moved);
  let header = validate(&mut source).unwrap();
  let mut sink = Recorder::default();
  blit(&mut source, &header, &mut sink).unwrap();
  assert_eq!(sink.lines, [vec![1, 2, 3, 4], vec![5, 6, 7, 8]]);
}

#[test]
fn test_huge_data_offset_is_a_short_read() {
  let mut bmp = encode(2, 2, RowOrder::BottomUp, &[0; 4]);
  bmp[0x0A..0x0E].copy_from_slice(&u32::MAX.to_le_bytes());
  let mut source = SliceSource::new(&bmp);
  let header = validate(&mut source).unwrap();
  let mut sink = Recorder::default();
  assert_eq!(blit(&mut source, &header, &mut sink), Err(DecodeError::ShortRead));
  assert!(sink.lines.is_empty());
}

#[test]
fn test_io_source_from_a_file() {
  let dir = super::temp_dir("io-source");
  let path = dir.join("one.bmp");
  std::fs::write(&path, encode(1, 2, RowOrder::BottomUp, &[0xABCD, 0x1234])).unwrap();
  let mut source = IoSource(std::fs::File::open(&path).unwrap());
  let header = validate(&mut source).unwrap();
  let mut sink = Recorder::default();
  blit(&mut source, &header, &mut sink).unwrap();
  assert_eq!(sink.lines, [vec![0xAB, 0xCD], vec![0x12, 0x34]]);
  let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_hostile_input_does_not_panic() {
  // even totally random data should never panic the decoder
  for _ in 0..200 {
    let v = rand_bytes(256);
    let mut source = SliceSource::new(&v);
    if let Ok(header) = validate(&mut source) {
      let _ = blit(&mut source, &header, &mut Recorder::default());
    }
  }
  // random data behind a valid looking header
  let header_bytes = encode(240, 240, RowOrder::TopDown, &vec![0; 240 * 240]);
  for _ in 0..50 {
    let mut v = header_bytes[..0x42].to_vec();
    v.extend(rand_bytes(1024));
    v[0x0A..0x0E].copy_from_slice(&rand_bytes(4));
    let mut source = SliceSource::new(&v);
    let header = validate(&mut source).unwrap();
    assert_eq!(blit(&mut source, &header, &mut Recorder::default()), Err(DecodeError::ShortRead));
  }
}

#[test]
fn test_boundary_sizes() {
  for (w, h, ok) in [(240, 240, true), (241, 1, false), (1, 241, false), (240, 1, true)] {
    let mut bmp = encode(1, 1, RowOrder::BottomUp, &[0]);
    bmp[0x12..0x16].copy_from_slice(&(w as i32).to_le_bytes());
    bmp[0x16..0x1A].copy_from_slice(&(h as i32).to_le_bytes());
    let result = validate(&mut SliceSource::new(&bmp));
    if ok {
      let header = result.unwrap();
      assert_eq!((header.width(), header.height()), (w, h));
    } else {
      assert_eq!(result, Err(DecodeError::OversizedImage), "{w}x{h}");
    }
  }
}
