#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad desktop host for the Game of Life widget.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The window acts as the widget's container. Frames painted by the render
//! worker arrive over a channel and are uploaded into a texture drawn at the
//! fitted display size, centred in the window.

mod host;

use anyhow::{Context, Result};
use glam::Vec2;
use life_rendering::Frame;
use life_widget::{ContainerRef, Game, GameOptions, Host, Outcome};
use macroquad::math::Vec2 as MacroquadVec2;
use macroquad::{
    color::{Color as MacroquadColor, WHITE},
    input::{is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton},
    texture::{draw_texture_ex, DrawTextureParams, FilterMode, Image, Texture2D},
    window::{clear_background, next_frame, screen_height, screen_width},
};
use std::sync::mpsc;

pub use host::{WindowHost, WINDOW_CONTAINER_ID};

const WINDOW_BACKGROUND: MacroquadColor = MacroquadColor {
    r: 0.12,
    g: 0.12,
    b: 0.12,
    a: 1.0,
};

/// What happens right after the widget is mounted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Session {
    /// Options forwarded to [`Game::create`].
    pub game: GameOptions,
    /// Randomize the grid before the first frame.
    pub randomize: bool,
    /// Start the simulation before the first frame.
    pub autostart: bool,
}

/// Edge-triggered input observed during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct FrameInput {
    /// Left click position in window coordinates.
    click: Option<Vec2>,
    /// `R` randomizes the grid.
    randomize: bool,
    /// `Space` or `Enter` starts the simulation.
    start: bool,
    /// `Escape` disposes the widget and closes the window.
    quit: bool,
}

impl FrameInput {
    fn poll() -> Self {
        let click = is_mouse_button_pressed(MouseButton::Left).then(|| {
            let (x, y) = mouse_position();
            Vec2::new(x, y)
        });

        Self {
            click,
            randomize: is_key_pressed(KeyCode::R),
            start: is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Enter),
            quit: is_key_pressed(KeyCode::Escape),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Desktop backend running the widget inside a macroquad window.
#[derive(Clone, Debug)]
pub struct MacroquadBackend {
    window_title: String,
    window_size: (i32, i32),
    swap_interval: Option<i32>,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            window_title: "Game of Life".to_owned(),
            window_size: (1000, 1000),
            swap_interval: None,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Sets the initial window size in logical pixels.
    #[must_use]
    pub fn with_window_size(mut self, width: i32, height: i32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Sets the window title.
    #[must_use]
    pub fn with_window_title<T>(mut self, title: T) -> Self
    where
        T: Into<String>,
    {
        self.window_title = title.into();
        self
    }

    /// Opens the window and runs the widget until it is disposed or the window closes.
    pub fn run(self, session: Session) -> Result<()> {
        let Self {
            window_title,
            window_size: (window_width, window_height),
            swap_interval,
        } = self;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (init_sender, init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let host = WindowHost::new(Vec2::new(screen_width(), screen_height()));
            let created = Game::create(
                host,
                ContainerRef::Element(WindowHost::container()),
                session.game,
            )
            .context("failed to mount the game in the window");
            let mut game = match created {
                Ok(game) => {
                    let _ = init_sender.send(Ok(()));
                    game
                }
                Err(error) => {
                    let _ = init_sender.send(Err(error));
                    return;
                }
            };

            if session.randomize {
                let _ = game.randomize();
            }
            if session.autostart {
                let _ = game.start();
            }

            let mut texture: Option<Texture2D> = None;
            loop {
                let window = Vec2::new(screen_width(), screen_height());
                if game.host_mut().set_window_size(window) {
                    let _ = game.resize();
                }

                if apply_input(&mut game, FrameInput::poll(), window) == Flow::Exit {
                    game.dispose();
                    break;
                }
                let _ = game.pump();

                if let Some(frame) = game.host().take_latest_frame() {
                    upload_frame(&mut texture, frame);
                }

                clear_background(WINDOW_BACKGROUND);
                if let (Some(texture), Some(displayed)) = (texture, game.host().display_size()) {
                    let origin = surface_origin(window, displayed);
                    draw_texture_ex(
                        texture,
                        origin.x,
                        origin.y,
                        WHITE,
                        DrawTextureParams {
                            dest_size: Some(MacroquadVec2::new(displayed.x, displayed.y)),
                            ..DrawTextureParams::default()
                        },
                    );
                }

                next_frame().await;
            }
        });

        init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

fn apply_input<H: Host>(game: &mut Game<H>, input: FrameInput, window: Vec2) -> Flow {
    if input.quit {
        return Flow::Exit;
    }

    if let Some(click) = input.click {
        let origin = surface_origin(window, game.displayed_size());
        if let Outcome::Ignored(reason) = game.click(click - origin) {
            log::debug!("click at {click} ignored: {reason:?}");
        }
    }
    if input.randomize {
        let _ = game.randomize();
    }
    if input.start {
        let _ = game.start();
    }

    Flow::Continue
}

fn surface_origin(window: Vec2, displayed: Vec2) -> Vec2 {
    ((window - displayed) * 0.5).max(Vec2::ZERO)
}

fn upload_frame(texture: &mut Option<Texture2D>, frame: Frame) {
    let (Ok(width), Ok(height)) = (
        u16::try_from(frame.dimensions.width()),
        u16::try_from(frame.dimensions.height()),
    ) else {
        log::error!(
            "frame of {}x{} pixels exceeds texture limits",
            frame.dimensions.width(),
            frame.dimensions.height()
        );
        return;
    };

    match texture {
        Some(texture) => texture.update(&Image {
            bytes: frame.pixels,
            width,
            height,
        }),
        None => {
            let created = Texture2D::from_rgba8(width, height, &frame.pixels);
            created.set_filter(FilterMode::Nearest);
            *texture = Some(created);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_core::CellCoord;
    use life_widget::{HeadlessHost, IgnoreReason, Lifecycle};

    fn game(container: Vec2) -> Game<HeadlessHost> {
        let host = HeadlessHost::new().with_div("board", container);
        Game::create(
            host,
            ContainerRef::from("board"),
            GameOptions {
                width: 10,
                height: 10,
                seed: Some(5),
                ..GameOptions::default()
            },
        )
        .unwrap_or_else(|error| panic!("game mounts: {error}"))
    }

    #[test]
    fn surface_is_centred_in_the_window() {
        assert_eq!(
            surface_origin(Vec2::new(800.0, 600.0), Vec2::new(600.0, 600.0)),
            Vec2::new(100.0, 0.0)
        );
        assert_eq!(
            surface_origin(Vec2::new(300.0, 300.0), Vec2::new(400.0, 400.0)),
            Vec2::ZERO,
            "oversized surfaces are anchored at the top-left corner",
        );
    }

    #[test]
    fn clicks_are_translated_by_the_surface_origin() {
        let mut game = game(Vec2::new(200.0, 100.0));
        assert_eq!(game.displayed_size(), Vec2::new(100.0, 100.0));
        let window = Vec2::new(200.0, 100.0);

        let input = FrameInput {
            click: Some(Vec2::new(55.0, 5.0)),
            ..FrameInput::default()
        };
        assert_eq!(apply_input(&mut game, input, window), Flow::Continue);

        let live: Vec<CellCoord> = game.change_set().live_cells().collect();
        assert_eq!(live, vec![CellCoord::new(0, 0)]);

        let margin = FrameInput {
            click: Some(Vec2::new(10.0, 5.0)),
            ..FrameInput::default()
        };
        let _ = apply_input(&mut game, margin, window);
        assert_eq!(game.change_set().len(), 1, "clicks in the margin are ignored");
    }

    #[test]
    fn start_key_blocks_later_edits() {
        let mut game = game(Vec2::new(100.0, 200.0));
        let window = Vec2::new(100.0, 200.0);

        let start = FrameInput {
            start: true,
            ..FrameInput::default()
        };
        let _ = apply_input(&mut game, start, window);

        assert_eq!(game.lifecycle(), Lifecycle::Running);
        assert_eq!(
            game.randomize(),
            Outcome::Ignored(IgnoreReason::Running)
        );
    }

    #[test]
    fn quit_requests_exit_before_other_actions() {
        let mut game = game(Vec2::new(100.0, 200.0));
        let input = FrameInput {
            quit: true,
            randomize: true,
            ..FrameInput::default()
        };

        assert_eq!(
            apply_input(&mut game, input, Vec2::new(100.0, 200.0)),
            Flow::Exit
        );
        assert!(game.change_set().is_empty());
    }
}
