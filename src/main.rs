//! knn-cloud entry point
//!
//! Headless driver: runs the simulation loop against the system clock with a
//! scripted pointer that circles the cloud, and renders into a line batch.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use glam::Vec2;

use knn_cloud::platform::{Clock, SystemClock};
use knn_cloud::renderer::LineBatch;
use knn_cloud::sim::InputEvent;
use knn_cloud::{App, Settings, polar_offset};

#[derive(Parser)]
#[command(name = "knn-cloud")]
#[command(about = "Animated point cloud with k-nearest-neighbor queries", long_about = None)]
struct Cli {
    /// Path to a JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the effective settings to this path and exit
    #[arg(long)]
    write_settings: Option<PathBuf>,

    /// Frames to run before closing
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Frame rate to pace the loop at (0 runs unpaced)
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
}

/// Scripted pointer: press, orbit the origin, bump k, then close
struct ScriptedInput {
    frame: u64,
    frames: u64,
    width: f64,
    height: f64,
}

impl ScriptedInput {
    fn new(frames: u64, width: u32, height: u32) -> Self {
        Self {
            frame: 0,
            frames,
            width: width as f64,
            height: height as f64,
        }
    }

    /// Pixel position of the pointer on its orbit
    fn pointer(&self) -> (f64, f64) {
        let theta = self.frame as f32 * 0.02;
        let p = polar_offset(Vec2::new(0.5, 0.5), 0.3, theta);
        (p.x as f64 * self.width, p.y as f64 * self.height)
    }

    fn poll(&mut self, events: &mut VecDeque<InputEvent>) {
        self.frame += 1;
        let (x, y) = self.pointer();

        if self.frame == 1 {
            events.push_back(InputEvent::PointerPressed { x, y });
        } else {
            events.push_back(InputEvent::PointerMoved { x, y });
        }

        // Grow k for a while, then shrink it back past the floor
        match self.frame % 120 {
            30 | 40 | 50 | 60 => events.push_back(InputEvent::IncrementK),
            90 | 95 | 100 | 105 | 110 | 115 => events.push_back(InputEvent::DecrementK),
            _ => {}
        }

        if self.frame == self.frames / 2 {
            events.push_back(InputEvent::PointerReleased);
        }
        if self.frame >= self.frames {
            events.push_back(InputEvent::CloseRequested);
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = Settings::load_or_default(cli.settings.as_deref());
    if let Some(seed) = cli.seed {
        settings.seed = seed;
    }

    if let Some(path) = cli.write_settings {
        return match settings.save_to(&path) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{e}");
                ExitCode::FAILURE
            }
        };
    }

    log::info!("knn-cloud (headless) starting...");

    let clock = SystemClock::new();
    let mut input = ScriptedInput::new(
        cli.frames.max(1),
        settings.window_width,
        settings.window_height,
    );
    let mut renderer = LineBatch::new(settings.circle_segments);
    let pace = (cli.fps > 0.0).then(|| Duration::from_secs_f64(1.0 / cli.fps));

    let mut app = App::new(settings, clock.now());
    let mut poll = |events: &mut VecDeque<InputEvent>| {
        input.poll(events);
        if let Some(pace) = pace {
            std::thread::sleep(pace);
        }
    };
    let stats = app.run(&clock, &mut poll, &mut renderer);

    log::info!(
        "Finished: {} frames, {} ticks, k = {}, last frame {} vertices ({} bytes), {} neighbors within {:.4}",
        stats.frames,
        stats.ticks,
        app.state().k(),
        renderer.vertices().len(),
        renderer.as_bytes().len(),
        stats.neighbors,
        stats.max_dist
    );

    ExitCode::SUCCESS
}
