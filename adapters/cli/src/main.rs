#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line launcher that opens the Game of Life widget in a desktop window.

use anyhow::{Context, Result};
use clap::Parser;
use life_core::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};
use life_rendering::{CELL_PIXELS, FRAMES_PER_SECOND};
use life_rendering_macroquad::{MacroquadBackend, Session};
use life_widget::GameOptions;

/// Largest window edge requested at launch, in logical pixels.
const MAX_WINDOW_EDGE: u32 = 1000;

/// Command-line arguments accepted by the launcher.
#[derive(Debug, Parser)]
#[command(name = "game-of-life", about = "Conway's Game of Life in a desktop window")]
struct Cli {
    /// Number of grid columns.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,
    /// Number of grid rows.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,
    /// Seed for the randomize shortcut; drawn from entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long)]
    vsync: bool,
    /// Randomize the grid before the first frame.
    #[arg(long)]
    randomize: bool,
    /// Start the simulation immediately.
    #[arg(long)]
    autostart: bool,
}

impl Cli {
    fn session(&self) -> Session {
        Session {
            game: GameOptions {
                width: self.width,
                height: self.height,
                seed: self.seed,
                frames_per_second: FRAMES_PER_SECOND,
            },
            randomize: self.randomize,
            autostart: self.autostart,
        }
    }

    fn window_size(&self) -> (i32, i32) {
        let surface_width = self.width.saturating_mul(CELL_PIXELS);
        let surface_height = self.height.saturating_mul(CELL_PIXELS);
        let longest = surface_width.max(surface_height);
        let scale = if longest > MAX_WINDOW_EDGE {
            MAX_WINDOW_EDGE as f32 / longest as f32
        } else {
            1.0
        };

        (
            ((surface_width as f32 * scale).round() as i32).max(1),
            ((surface_height as f32 * scale).round() as i32).max(1),
        )
    }
}

/// Entry point for the Game of Life command-line interface.
fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("launching with {cli:?}");

    let (window_width, window_height) = cli.window_size();
    MacroquadBackend::new()
        .with_vsync(cli.vsync)
        .with_window_size(window_width, window_height)
        .run(cli.session())
        .context("game of life window exited with an error")
}
