use life_core::{CellCoord, GridSize, GridView};
use life_system_generation::{neighbor_count, plan_generation, Generation, GenerationPlan};
use life_world::{apply, query, World};

const CENTER_NEIGHBORS: [(u32, u32); 8] = [
    (1, 1),
    (2, 1),
    (3, 1),
    (1, 2),
    (3, 2),
    (1, 3),
    (2, 3),
    (3, 3),
];

fn grid(width: u32, height: u32, live: &[(u32, u32)]) -> (GridSize, Vec<bool>) {
    let size = GridSize::new(width, height).expect("valid size");
    let mut cells = vec![false; size.cell_count()];
    for &(column, row) in live {
        let index = size
            .index(CellCoord::new(column, row))
            .expect("live cell inside grid");
        cells[index] = true;
    }
    (size, cells)
}

fn world_with(width: u32, height: u32, live: &[(u32, u32)]) -> World {
    let mut world = World::new(GridSize::new(width, height).expect("valid size"));
    let mut events = Vec::new();
    for &(column, row) in live {
        apply(
            &mut world,
            life_core::Command::ToggleCell {
                cell: CellCoord::new(column, row),
            },
            &mut events,
        );
    }
    world
}

fn step(world: &mut World) {
    let mut generation = Generation::new();
    let mut commands = Vec::new();
    generation.handle(query::grid_view(world), &mut commands);

    let mut events = Vec::new();
    for command in commands {
        apply(world, command, &mut events);
    }
}

fn live(world: &World) -> Vec<CellCoord> {
    query::live_cells(world).collect()
}

fn coords(cells: &[(u32, u32)]) -> Vec<CellCoord> {
    let mut coords: Vec<CellCoord> = cells
        .iter()
        .map(|&(column, row)| CellCoord::new(column, row))
        .collect();
    coords.sort();
    coords
}

#[test]
fn dead_cell_with_three_neighbors_is_born() {
    let (size, cells) = grid(5, 5, &CENTER_NEIGHBORS[..3]);
    let view = GridView::new(&cells, size);

    let plan = plan_generation(&view);

    assert!(
        plan.births.contains(&CellCoord::new(2, 2)),
        "the center cell has exactly three live neighbors and must be born",
    );
}

#[test]
fn live_cell_survives_only_with_two_or_three_neighbors() {
    for neighbors in 0..=8usize {
        let mut live_cells = vec![(2, 2)];
        live_cells.extend_from_slice(&CENTER_NEIGHBORS[..neighbors]);
        let (size, cells) = grid(5, 5, &live_cells);
        let view = GridView::new(&cells, size);

        assert_eq!(
            usize::from(neighbor_count(&view, CellCoord::new(2, 2))),
            neighbors
        );

        let plan = plan_generation(&view);
        let dies = plan.deaths.contains(&CellCoord::new(2, 2));
        assert_eq!(
            dies,
            !(neighbors == 2 || neighbors == 3),
            "center cell with {neighbors} neighbors has the wrong fate",
        );
    }
}

#[test]
fn neighbors_on_first_row_and_column_are_never_counted() {
    let (size, cells) = grid(5, 5, &[(0, 0), (1, 0), (2, 0), (0, 1), (0, 2)]);
    let view = GridView::new(&cells, size);

    assert_eq!(neighbor_count(&view, CellCoord::new(1, 1)), 0);
    assert_eq!(neighbor_count(&view, CellCoord::new(0, 0)), 0);
}

#[test]
fn neighbors_on_last_row_and_column_are_counted() {
    let (size, cells) = grid(5, 5, &[(3, 3), (4, 3), (3, 4), (4, 4)]);
    let view = GridView::new(&cells, size);

    assert_eq!(neighbor_count(&view, CellCoord::new(4, 4)), 3);
    assert_eq!(neighbor_count(&view, CellCoord::new(3, 3)), 3);
}

#[test]
fn corner_cell_only_sees_inset_neighbors() {
    let (size, cells) = grid(4, 4, &[(1, 0), (0, 1), (1, 1)]);
    let view = GridView::new(&cells, size);

    assert_eq!(
        neighbor_count(&view, CellCoord::new(0, 0)),
        1,
        "only (1, 1) lies strictly inside the counted region",
    );
}

#[test]
fn boundary_quirk_changes_outcome_near_first_column() {
    // (0, 1), (0, 2) and (0, 3) would give (1, 2) three neighbors without
    // the inset rule; with it the cell stays dead.
    let (size, cells) = grid(5, 5, &[(0, 1), (0, 2), (0, 3)]);
    let view = GridView::new(&cells, size);

    let plan = plan_generation(&view);

    assert!(plan.births.is_empty());
    assert_eq!(plan.deaths.len(), 3, "the column-0 cells have no counted neighbors");
}

#[test]
fn empty_grid_plans_nothing() {
    let (size, cells) = grid(6, 4, &[]);
    let view = GridView::new(&cells, size);

    assert_eq!(plan_generation(&view), GenerationPlan::default());
}

#[test]
fn blinker_oscillates_without_order_dependence() {
    let vertical = [(2, 1), (2, 2), (2, 3)];
    let horizontal = [(1, 2), (2, 2), (3, 2)];
    let mut world = world_with(5, 5, &vertical);

    for generation in 1..=10 {
        step(&mut world);
        let expected = if generation % 2 == 1 {
            coords(&horizontal)
        } else {
            coords(&vertical)
        };
        assert_eq!(live(&world), expected, "generation {generation} diverged");
    }

    assert_eq!(query::generation(&world), 10);
}

#[test]
fn block_is_a_still_life() {
    let block = [(2, 2), (3, 2), (2, 3), (3, 3)];
    let mut world = world_with(6, 6, &block);

    step(&mut world);
    step(&mut world);

    assert_eq!(live(&world), coords(&block));
}

#[test]
fn generation_system_emits_one_command_even_when_stable() {
    let (size, cells) = grid(3, 3, &[]);
    let mut generation = Generation::new();
    let mut commands = Vec::new();

    generation.handle(GridView::new(&cells, size), &mut commands);

    assert_eq!(
        commands,
        vec![life_core::Command::ApplyGeneration {
            births: Vec::new(),
            deaths: Vec::new(),
        }]
    );
}
