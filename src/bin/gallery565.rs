use clap::Parser;
use gallery565::{
  framebuffer::FrameBuffer,
  fs::FsDirectory,
  gallery::{DrawOutcome, Gallery, Swipe},
  GALLERY_DIR,
};
use std::path::PathBuf;

/// Runs the image gallery against a directory, drawing into a framebuffer in
/// memory instead of a watch display.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
  /// Directory to read images from.
  #[arg(short, long, default_value = GALLERY_DIR)]
  dir: PathBuf,

  /// Swipes to apply after opening, one letter each: `L` goes to the next
  /// image, `R` to the previous one, anything else stays put.
  #[arg(short, long, default_value = "")]
  swipes: String,

  /// Write what's on the display at the end to this file, as a PPM image.
  #[arg(short, long)]
  out: Option<PathBuf>,

  /// More logging, can be repeated.
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

struct StderrLogger;

impl log::Log for StderrLogger {
  fn enabled(&self, metadata: &log::Metadata) -> bool {
    metadata.level() <= log::max_level()
  }

  fn log(&self, record: &log::Record) {
    if self.enabled(record.metadata()) {
      eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
    }
  }

  fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logger(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
  log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

fn swipe_for(ch: char) -> Swipe {
  match ch.to_ascii_uppercase() {
    'L' => Swipe::Left,
    'R' => Swipe::Right,
    _ => Swipe::Other,
  }
}

fn report(outcome: &DrawOutcome) {
  match outcome {
    DrawOutcome::NoFiles => log::info!("no files to show"),
    DrawOutcome::Shown(name) => log::info!("showing {name}"),
    DrawOutcome::Failed(name, e) => log::info!("can't show {name}: {e}"),
  }
}

fn main() -> std::io::Result<()> {
  let args = Args::parse();
  let level = match args.verbose {
    0 => log::LevelFilter::Info,
    1 => log::LevelFilter::Debug,
    _ => log::LevelFilter::Trace,
  };
  if let Err(e) = init_logger(level) {
    eprintln!("can't set up logging: {e}");
  }

  let mut screen = FrameBuffer::new();
  let mut gallery = Gallery::new(FsDirectory::new(&args.dir));
  report(&gallery.foreground(&mut screen));
  for ch in args.swipes.chars() {
    report(&gallery.swipe(swipe_for(ch), &mut screen));
  }

  if let Some(out) = &args.out {
    std::fs::write(out, screen.to_ppm())?;
    log::info!("wrote {}", out.display());
  }
  Ok(())
}

#[test]
fn test_swipe_letters() {
  assert_eq!(swipe_for('L'), Swipe::Left);
  assert_eq!(swipe_for('l'), Swipe::Left);
  assert_eq!(swipe_for('R'), Swipe::Right);
  assert_eq!(swipe_for('r'), Swipe::Right);
  for ch in ['x', ' ', '.', 'é'] {
    assert_eq!(swipe_for(ch), Swipe::Other, "{ch:?}");
  }
}
