//! Point-to-point progress host: steps a progress bar from stdin commands
//! and writes a PNG frame after every change.

mod button;
mod input;
mod screen;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use point_progress::{HostScreen, ProgressBar, ProgressBarConfig, SkiaSurface};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::input::{Command, CommandReader};
use crate::screen::{Click, FrameLayout};

#[derive(Parser, Debug)]
#[command(name = "point-progress-host", about = "Step through a point-to-point progress bar")]
struct Args {
    /// JSON widget configuration; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Frame width in pixels
    #[arg(long, default_value_t = 480)]
    width: u32,

    /// Directory that receives frame-NNNN.png files
    #[arg(short, long, default_value = "frames")]
    out: PathBuf,

    /// Log layout and stage changes
    #[arg(short, long)]
    verbose: bool,
}

struct Host {
    screen: HostScreen,
    layout: FrameLayout,
    surface: SkiaSurface,
    out: PathBuf,
    frame: u32,
}

impl Host {
    fn new(config: ProgressBarConfig, width: u32, out: PathBuf) -> Result<Self> {
        let bar = ProgressBar::new(config).context("invalid progress bar configuration")?;
        let mut screen = HostScreen::new(bar);
        let layout = FrameLayout::new(&screen, width);
        screen.resize(layout.bar_size.x, layout.bar_size.y);

        let surface = SkiaSurface::new(width, layout.frame_height())?;
        std::fs::create_dir_all(&out)
            .with_context(|| format!("creating output directory {}", out.display()))?;

        Ok(Self {
            screen,
            layout,
            surface,
            out,
            frame: 0,
        })
    }

    /// Redraws and writes a frame if anything changed.
    fn present(&mut self) -> Result<()> {
        if !self.screen.take_redraw() {
            return Ok(());
        }
        screen::draw(&self.screen, &self.layout, &mut self.surface);
        let path = frame_path(&self.out, self.frame);
        self.surface.save_png(&path)?;
        info!(stage = self.screen.stage(), path = %path.display(), "frame written");
        self.frame += 1;
        Ok(())
    }

    /// Applies one command. Returns false when the host should exit.
    fn handle(&mut self, command: Command) -> Result<bool> {
        let result = match command {
            Command::Next => self.screen.next(),
            Command::Previous => self.screen.previous(),
            Command::Stage(stage) => self.screen.go_to(stage),
            Command::Click { x, y } => {
                match screen::click(&mut self.screen, &self.layout, Vec2::new(x, y)) {
                    Click::Stage(result) => result,
                    Click::Missed => {
                        info!(x, y, "click hit nothing");
                        return Ok(true);
                    }
                }
            }
            Command::Save => {
                let state = serde_json::to_string(&self.screen.bar().serialize_state())?;
                println!("{state}");
                return Ok(true);
            }
            Command::Quit => return Ok(false),
            Command::Unknown => {
                warn!("unknown command, expected next, prev, <stage>, click <x> <y>, save or quit");
                return Ok(true);
            }
        };

        if let Err(e) = result {
            warn!("rejected: {}", e);
        }
        Ok(true)
    }
}

fn frame_path(dir: &Path, frame: u32) -> PathBuf {
    dir.join(format!("frame-{frame:04}.png"))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => ProgressBarConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ProgressBarConfig::default(),
    };

    let mut host = Host::new(config, args.width, args.out)?;
    info!(
        stages = host.screen.bar().maximum_stages(),
        width = args.width,
        "host screen ready"
    );
    host.present()?;

    let stdin = std::io::stdin();
    let mut reader = CommandReader::new(stdin.lock());
    while let Some(command) = reader.next_command()? {
        if !host.handle(command)? {
            break;
        }
        host.present()?;
    }

    info!(frames = host.frame, "exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn frames_are_written_only_on_change() {
        let dir = tempfile::tempdir().unwrap();
        let mut host =
            Host::new(ProgressBarConfig::default(), 348, dir.path().to_path_buf()).unwrap();

        host.present().unwrap();
        assert!(frame_path(dir.path(), 0).exists());

        assert!(host.handle(Command::Previous).unwrap());
        host.present().unwrap();
        assert_eq!(host.frame, 1, "rejected move should not redraw");

        assert!(host.handle(Command::Next).unwrap());
        host.present().unwrap();
        assert!(frame_path(dir.path(), 1).exists());
        assert_eq!(host.screen.stage(), 2);

        assert!(host.handle(Command::Click { x: 24.0 + 290.0, y: 32.0 }).unwrap());
        assert_eq!(host.screen.stage(), 4);

        assert!(!host.handle(Command::Quit).unwrap());
    }

    #[test]
    fn invalid_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProgressBarConfig {
            maximum_stages: 1,
            ..Default::default()
        };
        let err = Host::new(config, 348, dir.path().to_path_buf()).err().unwrap();
        assert!(err.to_string().contains("invalid progress bar configuration"));
    }

    #[test]
    fn frame_names_are_zero_padded() {
        assert_eq!(frame_path(Path::new("out"), 7), PathBuf::from("out/frame-0007.png"));
    }
}
