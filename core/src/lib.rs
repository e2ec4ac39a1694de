#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Game of Life widget.
//!
//! This crate defines the message surface that connects the controller, the
//! authoritative world, and pure systems. The controller submits [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then reports [`Event`] values describing what
//! actually changed. Systems query immutable [`GridView`] snapshots and respond
//! exclusively with new command batches. After every mutation the controller
//! publishes a [`ChangeSet`] carrying the complete live-cell set.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of columns used when the host does not request a width.
pub const DEFAULT_GRID_WIDTH: u32 = 100;

/// Number of rows used when the host does not request a height.
pub const DEFAULT_GRID_HEIGHT: u32 = 100;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Flips the liveness of a single cell.
    ToggleCell {
        /// Cell whose liveness should be inverted.
        cell: CellCoord,
    },
    /// Clears the grid and marks every listed cell live.
    ///
    /// Duplicate coordinates collapse into a single live cell.
    Reseed {
        /// Picks produced by the seeding system, possibly with repeats.
        cells: Vec<CellCoord>,
    },
    /// Applies one generation worth of births and deaths in a single step.
    ApplyGeneration {
        /// Dead cells that come alive in this generation.
        births: Vec<CellCoord>,
        /// Live cells that die in this generation.
        deaths: Vec<CellCoord>,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a cell flipped its liveness.
    CellToggled {
        /// Cell that changed.
        cell: CellCoord,
        /// Liveness of the cell after the toggle.
        alive: bool,
    },
    /// Reports that a toggle targeted a cell outside the grid.
    ToggleRejected {
        /// Coordinate supplied with the rejected toggle.
        cell: CellCoord,
    },
    /// Confirms that the grid was cleared and seeded with new cells.
    Reseeded {
        /// Number of picks supplied with the command, including repeats.
        picks: usize,
        /// Number of distinct cells that ended up live.
        population: usize,
    },
    /// Announces that a generation transition was applied.
    GenerationAdvanced {
        /// Generation counter after the transition.
        generation: u64,
        /// Number of cells that came alive.
        births: usize,
        /// Number of cells that died.
        deaths: usize,
    },
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Validated dimensions of the simulation grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Creates a grid size, rejecting dimensions without any area.
    pub fn new(width: u32, height: u32) -> Result<Self, LifeError> {
        if width == 0 || height == 0 {
            return Err(InvalidArgument::NonPositiveDimensions { width, height }.into());
        }

        Ok(Self { width, height })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells contained in the grid.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reports whether the cell lies within the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Row-major index of the cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }

        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        Some(row * width + column)
    }

    /// Inverse of [`GridSize::index`].
    #[must_use]
    pub fn coord_at(&self, index: usize) -> Option<CellCoord> {
        if index >= self.cell_count() {
            return None;
        }

        let width = self.width as usize;
        let column = u32::try_from(index % width).ok()?;
        let row = u32::try_from(index / width).ok()?;
        Some(CellCoord::new(column, row))
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Liveness of a single cell as carried by a change-set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellState {
    /// Coordinate of the cell.
    pub cell: CellCoord,
    /// Whether the renderer should draw the cell as live.
    pub alive: bool,
}

impl CellState {
    /// Creates a live cell entry.
    #[must_use]
    pub const fn live(cell: CellCoord) -> Self {
        Self { cell, alive: true }
    }
}

/// Complete snapshot of the live cells published after every mutation.
///
/// A change-set is never a delta: receivers replace whatever they displayed
/// before with the contents of the most recent change-set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    cells: Vec<CellState>,
}

impl ChangeSet {
    /// Builds a change-set from live cells, sorted into deterministic order.
    #[must_use]
    pub fn from_live_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = CellCoord>,
    {
        let mut cells: Vec<CellState> = cells.into_iter().map(CellState::live).collect();
        cells.sort();
        cells.dedup();
        Self { cells }
    }

    /// Entries carried by the change-set in deterministic order.
    #[must_use]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Iterator over the coordinates flagged live.
    pub fn live_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells
            .iter()
            .filter(|state| state.alive)
            .map(|state| state.cell)
    }

    /// Number of entries in the change-set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the change-set carries no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Read-only view into the dense liveness grid.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [bool],
    size: GridSize,
}

impl<'a> GridView<'a> {
    /// Captures a new grid view backed by the provided row-major cell slice.
    #[must_use]
    pub fn new(cells: &'a [bool], size: GridSize) -> Self {
        debug_assert_eq!(cells.len(), size.cell_count());
        Self { cells, size }
    }

    /// Dimensions of the underlying grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Reports whether the cell is live. Cells outside the grid are dead.
    #[must_use]
    pub fn is_alive(&self, cell: CellCoord) -> bool {
        self.size
            .index(cell)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(false)
    }

    /// Signed variant of [`GridView::is_alive`] for neighbor arithmetic.
    #[must_use]
    pub fn is_alive_at(&self, column: i64, row: i64) -> bool {
        match (u32::try_from(column), u32::try_from(row)) {
            (Ok(column), Ok(row)) => self.is_alive(CellCoord::new(column, row)),
            _ => false,
        }
    }

    /// Iterates every cell in row-major order alongside its liveness.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, bool)> + 'a {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(index, alive)| size.coord_at(index).map(|cell| (cell, *alive)))
    }

    /// Number of live cells in the grid.
    #[must_use]
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|alive| **alive).count()
    }
}

/// Errors surfaced synchronously while constructing a widget.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LifeError {
    /// A constructor parameter was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
    /// The container selector did not resolve to an element.
    #[error("failed to find element {selector}")]
    ElementNotFound {
        /// Normalized selector that failed to resolve.
        selector: String,
    },
}

/// Specific reasons a constructor argument was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    /// Width or height was not positive.
    #[error("grid dimensions must be positive (received {width}x{height})")]
    NonPositiveDimensions {
        /// Requested column count.
        width: u32,
        /// Requested row count.
        height: u32,
    },
    /// No container reference was supplied.
    #[error("required container reference is empty")]
    EmptyContainer,
    /// The supplied container handle cannot host a surface.
    #[error("invalid container kind {kind}")]
    UnsupportedContainer {
        /// Kind reported by the rejected handle.
        kind: String,
    },
}
