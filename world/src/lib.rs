#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the Game of Life widget.

use std::collections::BTreeSet;

use life_core::{CellCoord, Command, Event, GridSize};

/// Represents the authoritative simulation state.
///
/// The dense grid is the source of truth for liveness. The live-cell index
/// shadows it so change-sets can be produced without scanning every cell, and
/// contains a coordinate exactly when the dense grid marks it live.
#[derive(Debug)]
pub struct World {
    size: GridSize,
    cells: Vec<bool>,
    live: BTreeSet<CellCoord>,
    generation: u64,
}

impl World {
    /// Creates a world whose cells all start dead.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![false; size.cell_count()],
            live: BTreeSet::new(),
            generation: 0,
        }
    }

    fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = false);
        self.live.clear();
    }

    /// Marks the cell live. Returns `false` when it already was.
    fn revive(&mut self, cell: CellCoord) -> bool {
        let Some(index) = self.size.index(cell) else {
            return false;
        };
        if self.cells[index] {
            return false;
        }

        self.cells[index] = true;
        let _ = self.live.insert(cell);
        true
    }

    /// Marks the cell dead. Returns `false` when it was not live.
    fn kill(&mut self, cell: CellCoord) -> bool {
        let Some(index) = self.size.index(cell) else {
            return false;
        };
        if !self.cells[index] {
            return false;
        }

        self.cells[index] = false;
        let _ = self.live.remove(&cell);
        true
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ToggleCell { cell } => {
            let Some(index) = world.size.index(cell) else {
                out_events.push(Event::ToggleRejected { cell });
                return;
            };

            let alive = !world.cells[index];
            let _ = if alive {
                world.revive(cell)
            } else {
                world.kill(cell)
            };
            out_events.push(Event::CellToggled { cell, alive });
        }
        Command::Reseed { cells } => {
            world.clear();
            world.generation = 0;

            let picks = cells.len();
            for cell in cells {
                if !world.size.contains(cell) {
                    log::warn!("ignoring seed outside the grid at {cell:?}");
                    continue;
                }
                let _ = world.revive(cell);
            }

            out_events.push(Event::Reseeded {
                picks,
                population: world.live.len(),
            });
        }
        Command::ApplyGeneration { births, deaths } => {
            let mut died = 0;
            for cell in deaths {
                if world.kill(cell) {
                    died += 1;
                } else {
                    log::warn!("death scheduled for {cell:?} which is not live; ignoring");
                }
            }

            let mut born = 0;
            for cell in births {
                if world.revive(cell) {
                    born += 1;
                } else {
                    log::warn!("birth scheduled for {cell:?} which is already live; ignoring");
                }
            }

            world.generation = world.generation.saturating_add(1);
            out_events.push(Event::GenerationAdvanced {
                generation: world.generation,
                births: born,
                deaths: died,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use life_core::{CellCoord, ChangeSet, GridSize, GridView};

    use super::World;

    /// Dimensions the world was created with.
    #[must_use]
    pub fn size(world: &World) -> GridSize {
        world.size
    }

    /// Reports whether the cell is live in the dense grid.
    #[must_use]
    pub fn is_alive(world: &World, cell: CellCoord) -> bool {
        world
            .size
            .index(cell)
            .map_or(false, |index| world.cells[index])
    }

    /// Number of generations applied since the last reseed.
    #[must_use]
    pub fn generation(world: &World) -> u64 {
        world.generation
    }

    /// Number of entries in the live-cell index.
    #[must_use]
    pub fn population(world: &World) -> usize {
        world.live.len()
    }

    /// Iterates the live-cell index in deterministic order.
    pub fn live_cells(world: &World) -> impl Iterator<Item = CellCoord> + '_ {
        world.live.iter().copied()
    }

    /// Captures a read-only view of the dense grid.
    #[must_use]
    pub fn grid_view(world: &World) -> GridView<'_> {
        GridView::new(&world.cells, world.size)
    }

    /// Builds the complete change-set describing the current live cells.
    #[must_use]
    pub fn change_set(world: &World) -> ChangeSet {
        ChangeSet::from_live_cells(live_cells(world))
    }
}
