#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure generation system applying the B3/S23 rule to grid snapshots.
//!
//! Every decision is computed from an immutable [`GridView`], so a whole
//! generation is planned before any cell changes. The resulting births and
//! deaths are handed to the world as a single [`Command::ApplyGeneration`].

use life_core::{CellCoord, Command, GridView};

const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (1, 1),
    (1, 0),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (0, -1),
    (1, -1),
    (-1, 1),
];

/// Live neighbors required for a dead cell to come alive.
pub const BIRTH_COUNT: u8 = 3;

/// Fewest live neighbors that keep a live cell alive.
pub const SURVIVAL_MIN: u8 = 2;

/// Most live neighbors that keep a live cell alive.
pub const SURVIVAL_MAX: u8 = 3;

/// Counts the live neighbors of `cell`.
///
/// A neighbor at `(nx, ny)` only counts when `0 < nx < width` and
/// `0 < ny < height`. The grid does not wrap, and cells on column 0 or row 0
/// are never counted as anybody's neighbor.
#[must_use]
pub fn neighbor_count(view: &GridView<'_>, cell: CellCoord) -> u8 {
    let width = i64::from(view.size().width());
    let height = i64::from(view.size().height());
    let column = i64::from(cell.column());
    let row = i64::from(cell.row());

    let count = NEIGHBOR_OFFSETS
        .iter()
        .map(|(dx, dy)| (column + dx, row + dy))
        .filter(|&(nx, ny)| nx > 0 && nx < width && ny > 0 && ny < height)
        .filter(|&(nx, ny)| view.is_alive_at(nx, ny))
        .count();

    count as u8
}

/// Liveness of a cell in the next generation under B3/S23.
#[must_use]
pub const fn next_liveness(alive: bool, neighbors: u8) -> bool {
    if alive {
        neighbors >= SURVIVAL_MIN && neighbors <= SURVIVAL_MAX
    } else {
        neighbors == BIRTH_COUNT
    }
}

/// Births and deaths computed for one generation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationPlan {
    /// Dead cells that come alive.
    pub births: Vec<CellCoord>,
    /// Live cells that die.
    pub deaths: Vec<CellCoord>,
}

impl GenerationPlan {
    /// Reports whether the generation leaves the grid unchanged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.births.is_empty() && self.deaths.is_empty()
    }

    /// Converts the plan into the command that applies it.
    #[must_use]
    pub fn into_command(self) -> Command {
        Command::ApplyGeneration {
            births: self.births,
            deaths: self.deaths,
        }
    }
}

/// Plans the next generation by scanning every cell of the snapshot.
#[must_use]
pub fn plan_generation(view: &GridView<'_>) -> GenerationPlan {
    let mut plan = GenerationPlan::default();

    for (cell, alive) in view.iter() {
        let neighbors = neighbor_count(view, cell);
        match (alive, next_liveness(alive, neighbors)) {
            (false, true) => plan.births.push(cell),
            (true, false) => plan.deaths.push(cell),
            _ => {}
        }
    }

    plan
}

/// Generation system that turns grid snapshots into transition commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct Generation;

impl Generation {
    /// Creates a new generation system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits exactly one [`Command::ApplyGeneration`] for the snapshot.
    ///
    /// The command is emitted even when nothing changes so the world still
    /// advances its generation counter.
    pub fn handle(&mut self, view: GridView<'_>, out: &mut Vec<Command>) {
        out.push(plan_generation(&view).into_command());
    }
}
