#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Simulation controller for the Game of Life widget.
//!
//! The controller owns the authoritative [`World`], runs the generation and
//! seeding systems against it, and publishes the complete live-cell set after
//! every mutation. It is single threaded: periodic ticks are requested through
//! a [`Scheduler`], and whoever receives the timer signals calls
//! [`Controller::tick`] on the controller's own thread.

mod timer;

use std::{sync::mpsc, time::Duration};

use life_core::{CellCoord, ChangeSet, Command, Event, GridSize, LifeError};
use life_system_generation::Generation;
use life_system_seeding::Seeding;
use life_world::{apply, query, World};

pub use timer::{IntervalTimer, ManualScheduler, Scheduler};

/// Interval between generations while the simulation runs.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Lifecycle stages of a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Paused; cells may be toggled and the grid randomized.
    Created,
    /// Ticking periodically; user edits are ignored.
    Running,
    /// Torn down; every further call is ignored.
    Disposed,
}

/// Result of a controller operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The operation mutated state and a change-set was published.
    Applied,
    /// The operation was ignored without touching state.
    Ignored(IgnoreReason),
}

/// Why a controller operation was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// Edits are not accepted while the simulation runs.
    Running,
    /// The controller has been disposed.
    Disposed,
    /// The requested cell lies outside the grid.
    OutOfBounds,
}

/// Construction parameters for a [`Controller`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Number of grid columns.
    pub width: u32,
    /// Number of grid rows.
    pub height: u32,
    /// Interval requested from the scheduler on start.
    pub tick_interval: Duration,
    /// Seed for randomize; `None` draws from operating-system entropy.
    pub seed: Option<u64>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        let size = GridSize::default();
        Self {
            width: size.width(),
            height: size.height(),
            tick_interval: TICK_INTERVAL,
            seed: None,
        }
    }
}

/// Receives the change-sets published by a controller.
pub trait Publisher {
    /// Delivers the complete live-cell set after a mutation.
    fn publish(&mut self, change_set: ChangeSet);

    /// Releases whatever consumes the change-sets. Called once on dispose.
    fn close(&mut self) {}
}

impl Publisher for Vec<ChangeSet> {
    fn publish(&mut self, change_set: ChangeSet) {
        self.push(change_set);
    }
}

impl Publisher for mpsc::Sender<ChangeSet> {
    fn publish(&mut self, change_set: ChangeSet) {
        if self.send(change_set).is_err() {
            log::debug!("change-set receiver hung up; dropping update");
        }
    }
}

/// Owns the simulation state and drives it through its lifecycle.
#[derive(Debug)]
pub struct Controller<P, S> {
    world: World,
    generation: Generation,
    seeding: Seeding,
    publisher: P,
    scheduler: S,
    lifecycle: Lifecycle,
    tick_interval: Duration,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl<P, S> Controller<P, S>
where
    P: Publisher,
    S: Scheduler,
{
    /// Creates a paused controller with an all-dead grid.
    ///
    /// Fails with [`LifeError::InvalidArgument`] when either dimension is zero.
    pub fn new(config: ControllerConfig, publisher: P, scheduler: S) -> Result<Self, LifeError> {
        let size = GridSize::new(config.width, config.height)?;
        let seeding = config
            .seed
            .map_or_else(Seeding::from_entropy, Seeding::from_seed);

        log::debug!(
            "created {}x{} controller ticking every {:?}",
            size.width(),
            size.height(),
            config.tick_interval
        );

        Ok(Self {
            world: World::new(size),
            generation: Generation::new(),
            seeding,
            publisher,
            scheduler,
            lifecycle: Lifecycle::Created,
            tick_interval: config.tick_interval,
            commands: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Current lifecycle stage.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Dimensions of the simulated grid.
    #[must_use]
    pub fn size(&self) -> GridSize {
        query::size(&self.world)
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Change-set describing the current live cells.
    #[must_use]
    pub fn change_set(&self) -> ChangeSet {
        query::change_set(&self.world)
    }

    /// Read-only access to the publisher.
    #[must_use]
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Read-only access to the scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Flips a single cell while the simulation is paused.
    pub fn toggle_cell(&mut self, cell: CellCoord) -> Outcome {
        if let Some(reason) = self.edit_blocker() {
            log::debug!("ignoring toggle at {cell:?}: {reason:?}");
            return Outcome::Ignored(reason);
        }
        if !self.size().contains(cell) {
            log::debug!("ignoring toggle outside the grid at {cell:?}");
            return Outcome::Ignored(IgnoreReason::OutOfBounds);
        }

        self.commands.push(Command::ToggleCell { cell });
        self.execute();
        Outcome::Applied
    }

    /// Replaces the grid with a random population while paused.
    pub fn randomize(&mut self) -> Outcome {
        if let Some(reason) = self.edit_blocker() {
            log::debug!("ignoring randomize: {reason:?}");
            return Outcome::Ignored(reason);
        }

        let size = self.size();
        self.seeding.handle(size, &mut self.commands);
        self.execute();
        Outcome::Applied
    }

    /// Enters the running stage and arms the periodic tick.
    ///
    /// Starting a running controller re-arms the scheduler.
    pub fn start(&mut self) -> Outcome {
        if self.lifecycle == Lifecycle::Disposed {
            return Outcome::Ignored(IgnoreReason::Disposed);
        }

        self.lifecycle = Lifecycle::Running;
        self.scheduler.arm(self.tick_interval);
        log::info!("simulation started");
        Outcome::Applied
    }

    /// Advances the simulation by one generation.
    ///
    /// Usually invoked once per scheduler signal, but may be called directly
    /// while paused.
    pub fn tick(&mut self) -> Outcome {
        if self.lifecycle == Lifecycle::Disposed {
            return Outcome::Ignored(IgnoreReason::Disposed);
        }

        self.generation
            .handle(query::grid_view(&self.world), &mut self.commands);
        self.execute();
        Outcome::Applied
    }

    /// Cancels the tick, releases the publisher, and makes the controller inert.
    pub fn dispose(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }

        self.scheduler.cancel();
        self.publisher.close();
        self.lifecycle = Lifecycle::Disposed;
        log::info!(
            "simulation disposed after {} generations",
            query::generation(&self.world)
        );
    }

    fn edit_blocker(&self) -> Option<IgnoreReason> {
        match self.lifecycle {
            Lifecycle::Created => None,
            Lifecycle::Running => Some(IgnoreReason::Running),
            Lifecycle::Disposed => Some(IgnoreReason::Disposed),
        }
    }

    fn execute(&mut self) {
        for command in self.commands.drain(..) {
            apply(&mut self.world, command, &mut self.events);
        }
        for event in self.events.drain(..) {
            log::trace!("{event:?}");
        }

        self.publisher.publish(query::change_set(&self.world));
    }
}
