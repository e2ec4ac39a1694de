use std::sync::mpsc::{self, Receiver};

use glam::Vec2;
use life_controller::{
    Controller, ControllerConfig, IgnoreReason, IntervalTimer, Lifecycle, Outcome, Publisher,
    TICK_INTERVAL,
};
use life_core::{
    ChangeSet, GridSize, InvalidArgument, LifeError, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH,
};
use life_rendering::{
    fit_surface, pointer_to_cell, RenderingError, SurfaceDimensions, SurfaceSender, SurfaceWorker,
    FRAMES_PER_SECOND,
};
use thiserror::Error;

use crate::{normalize_selector, ContainerHandle, ContainerRef, ElementKind, Host, CONTAINER_CLASS};

/// Signals posted to the widget's owning thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostEvent {
    /// The periodic generation timer fired.
    Tick,
}

/// Options accepted by [`Game::create`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOptions {
    /// Number of grid columns.
    pub width: u32,
    /// Number of grid rows.
    pub height: u32,
    /// Seed used by randomize; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Upper bound on painted frames per second.
    pub frames_per_second: u32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            seed: None,
            frames_per_second: FRAMES_PER_SECOND,
        }
    }
}

/// Errors raised while creating a widget.
#[derive(Debug, Error)]
pub enum GameError {
    /// A constructor argument or the container reference was rejected.
    #[error(transparent)]
    Life(#[from] LifeError),
    /// The render surface could not be set up.
    #[error(transparent)]
    Rendering(#[from] RenderingError),
}

#[derive(Debug)]
struct SurfacePublisher<C> {
    surface: SurfaceSender<C>,
}

impl<C> Publisher for SurfacePublisher<C> {
    fn publish(&mut self, change_set: ChangeSet) {
        if !self.surface.update(change_set) {
            log::debug!("render worker gone; dropping change-set");
        }
    }

    fn close(&mut self) {
        let _ = self.surface.shutdown();
    }
}

type GameController<C> = Controller<SurfacePublisher<C>, IntervalTimer<HostEvent>>;

/// Game of Life widget mounted inside a host container.
///
/// The widget owns the controller, the tick timer and the render worker. Timer
/// signals are queued on a channel and applied when the owner calls
/// [`Game::pump`], so every mutation happens on the owning thread.
pub struct Game<H: Host> {
    host: H,
    container: ContainerHandle,
    controller: GameController<H::Canvas>,
    worker: SurfaceWorker<H::Canvas>,
    signals: Receiver<HostEvent>,
    displayed: Vec2,
    disposed: bool,
}

impl<H: Host> Game<H> {
    /// Mounts a widget inside `container`.
    ///
    /// Fails without touching the host when the dimensions are zero, the
    /// container reference is empty, the selector does not resolve, or the
    /// handle is not a block container.
    pub fn create(
        mut host: H,
        container: ContainerRef,
        options: GameOptions,
    ) -> Result<Self, GameError> {
        let size = GridSize::new(options.width, options.height)?;
        let container = resolve_container(&host, container)?;

        let worker = SurfaceWorker::spawn_with_rate(options.frames_per_second)?;
        let (events, signals) = mpsc::channel();
        let controller = Controller::new(
            ControllerConfig {
                width: size.width(),
                height: size.height(),
                tick_interval: TICK_INTERVAL,
                seed: options.seed,
            },
            SurfacePublisher {
                surface: worker.sender(),
            },
            IntervalTimer::new(events, HostEvent::Tick),
        )?;

        host.add_class(&container, CONTAINER_CLASS);
        let dimensions = SurfaceDimensions::for_grid(size);
        let canvas = host.attach_surface(&container, dimensions);
        if !worker.sender().init(canvas, dimensions) {
            log::warn!("render worker exited before receiving its surface");
        }

        log::info!(
            "mounted {}x{} game in {}",
            size.width(),
            size.height(),
            container.id()
        );

        let mut game = Self {
            host,
            container,
            controller,
            worker,
            signals,
            displayed: Vec2::new(dimensions.width() as f32, dimensions.height() as f32),
            disposed: false,
        };
        let _ = game.resize();
        Ok(game)
    }

    /// Dimensions of the simulated grid.
    #[must_use]
    pub fn size(&self) -> GridSize {
        self.controller.size()
    }

    /// Current lifecycle stage.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.controller.lifecycle()
    }

    /// Complete set of live cells.
    #[must_use]
    pub fn change_set(&self) -> ChangeSet {
        self.controller.change_set()
    }

    /// Size the surface is currently displayed at.
    #[must_use]
    pub fn displayed_size(&self) -> Vec2 {
        self.displayed
    }

    /// Container the widget is mounted in.
    #[must_use]
    pub fn container(&self) -> &ContainerHandle {
        &self.container
    }

    /// Read-only access to the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, for feeding it environment changes.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Toggles the cell under a pointer position relative to the displayed surface.
    pub fn click(&mut self, position: Vec2) -> Outcome {
        match pointer_to_cell(position, self.displayed, self.size()) {
            Some(cell) => self.controller.toggle_cell(cell),
            None => {
                log::debug!("ignoring click outside the surface at {position}");
                Outcome::Ignored(IgnoreReason::OutOfBounds)
            }
        }
    }

    /// Replaces the grid with a random population while paused.
    pub fn randomize(&mut self) -> Outcome {
        self.controller.randomize()
    }

    /// Starts the periodic generation timer.
    pub fn start(&mut self) -> Outcome {
        self.controller.start()
    }

    /// Advances the simulation by one generation immediately.
    pub fn tick(&mut self) -> Outcome {
        self.controller.tick()
    }

    /// Applies every queued timer signal, returning how many generations ran.
    pub fn pump(&mut self) -> usize {
        let mut ticks = 0;
        while let Ok(HostEvent::Tick) = self.signals.try_recv() {
            if self.controller.tick() == Outcome::Applied {
                ticks += 1;
            }
        }
        ticks
    }

    /// Refits the displayed surface to the container's current size.
    ///
    /// Returns the new displayed size, or `None` when it was left unchanged.
    pub fn resize(&mut self) -> Option<Vec2> {
        if self.disposed {
            return None;
        }

        let container = self.host.container_size(&self.container);
        let fitted = fit_surface(self.size(), container)?;
        self.host.set_display_size(&self.container, fitted);
        self.displayed = fitted;
        log::trace!("surface displayed at {fitted} inside {container}");
        Some(fitted)
    }

    /// Stops the timer and the render worker, then unmounts from the container.
    ///
    /// Disposing twice has no further effect.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        self.controller.dispose();
        let painted = self.worker.shutdown();
        while self.signals.try_recv().is_ok() {}

        self.host.detach_surface(&self.container);
        self.host.remove_class(&self.container, CONTAINER_CLASS);
        self.host.clear_container(&self.container);
        log::info!(
            "unmounted game from {} after {painted} frames",
            self.container.id()
        );
    }
}

impl<H: Host> Drop for Game<H> {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn resolve_container<H: Host>(
    host: &H,
    container: ContainerRef,
) -> Result<ContainerHandle, LifeError> {
    match container {
        ContainerRef::Selector(selector) => {
            if selector.is_empty() {
                return Err(InvalidArgument::EmptyContainer.into());
            }
            let selector = normalize_selector(&selector);
            match host.resolve(&selector) {
                Some(handle) => Ok(handle),
                None => Err(LifeError::ElementNotFound { selector }),
            }
        }
        ContainerRef::Element(handle) => match handle.kind() {
            ElementKind::Div => Ok(handle),
            ElementKind::Other(kind) => Err(InvalidArgument::UnsupportedContainer {
                kind: kind.clone(),
            }
            .into()),
        },
    }
}
