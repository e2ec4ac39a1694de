use std::{collections::BTreeSet, time::Duration};

use life_controller::{
    Controller, ControllerConfig, IgnoreReason, Lifecycle, ManualScheduler, Outcome, Publisher,
    TICK_INTERVAL,
};
use life_core::{CellCoord, ChangeSet, InvalidArgument, LifeError};
use life_world::query;

#[derive(Debug, Default)]
struct RecordingPublisher {
    published: Vec<ChangeSet>,
    closed: u32,
}

impl RecordingPublisher {
    fn last(&self) -> &ChangeSet {
        self.published.last().expect("a change-set was published")
    }
}

impl Publisher for RecordingPublisher {
    fn publish(&mut self, change_set: ChangeSet) {
        self.published.push(change_set);
    }

    fn close(&mut self) {
        self.closed += 1;
    }
}

type TestController = Controller<RecordingPublisher, ManualScheduler>;

fn controller(width: u32, height: u32) -> TestController {
    let config = ControllerConfig {
        width,
        height,
        seed: Some(0x11fe),
        ..ControllerConfig::default()
    };
    Controller::new(config, RecordingPublisher::default(), ManualScheduler::new())
        .expect("valid controller")
}

fn cell(column: u32, row: u32) -> CellCoord {
    CellCoord::new(column, row)
}

fn published_live(controller: &TestController) -> BTreeSet<CellCoord> {
    controller.publisher().last().live_cells().collect()
}

fn dense_live(controller: &TestController) -> BTreeSet<CellCoord> {
    query::grid_view(controller.world())
        .iter()
        .filter(|(_, alive)| *alive)
        .map(|(cell, _)| cell)
        .collect()
}

#[test]
fn construction_rejects_zero_dimensions() {
    let config = ControllerConfig {
        width: 0,
        height: 10,
        ..ControllerConfig::default()
    };
    let error = Controller::new(config, Vec::<ChangeSet>::new(), ManualScheduler::new())
        .expect_err("zero width must be rejected");

    assert_eq!(
        error,
        LifeError::InvalidArgument(InvalidArgument::NonPositiveDimensions {
            width: 0,
            height: 10
        })
    );
}

#[test]
fn default_configuration_matches_widget_defaults() {
    let config = ControllerConfig::default();

    assert_eq!((config.width, config.height), (100, 100));
    assert_eq!(config.tick_interval, Duration::from_millis(100));
}

#[test]
fn new_controller_is_paused_and_empty() {
    let controller = controller(4, 4);

    assert_eq!(controller.lifecycle(), Lifecycle::Created);
    assert!(controller.change_set().is_empty());
    assert!(controller.publisher().published.is_empty());
    assert_eq!(controller.scheduler().armed(), None);
}

#[test]
fn vertical_blinker_flips_to_horizontal_after_one_tick() {
    let mut controller = controller(5, 5);
    for toggled in [cell(2, 1), cell(2, 2), cell(2, 3)] {
        assert_eq!(controller.toggle_cell(toggled), Outcome::Applied);
    }

    assert_eq!(controller.tick(), Outcome::Applied);

    let expected: BTreeSet<CellCoord> = [cell(1, 2), cell(2, 2), cell(3, 2)].into_iter().collect();
    assert_eq!(published_live(&controller), expected);
    assert_eq!(dense_live(&controller), expected);
    assert_eq!(controller.publisher().published.len(), 4);
}

#[test]
fn toggling_twice_restores_grid_and_index() {
    let mut controller = controller(6, 6);
    let _ = controller.toggle_cell(cell(4, 4));
    let before = controller.change_set();

    let _ = controller.toggle_cell(cell(1, 3));
    let _ = controller.toggle_cell(cell(1, 3));

    assert_eq!(controller.change_set(), before);
    assert!(!query::is_alive(controller.world(), cell(1, 3)));
    assert!(query::is_alive(controller.world(), cell(4, 4)));
}

#[test]
fn every_mutation_publishes_the_exact_live_set() {
    let mut controller = controller(8, 8);

    let _ = controller.toggle_cell(cell(3, 3));
    assert_eq!(published_live(&controller), dense_live(&controller));

    let _ = controller.randomize();
    assert_eq!(published_live(&controller), dense_live(&controller));

    for _ in 0..5 {
        let _ = controller.tick();
        assert_eq!(published_live(&controller), dense_live(&controller));
        assert_eq!(
            query::population(controller.world()),
            dense_live(&controller).len()
        );
    }
}

#[test]
fn randomize_is_reproducible_for_a_seed() {
    let mut first = controller(20, 10);
    let mut second = controller(20, 10);

    let _ = first.randomize();
    let _ = second.randomize();

    assert_eq!(first.change_set(), second.change_set());
    assert!(first.change_set().len() < 200);
}

#[test]
fn randomize_replaces_manual_edits() {
    let mut controller = controller(1, 1);
    let _ = controller.toggle_cell(cell(0, 0));

    assert_eq!(controller.randomize(), Outcome::Applied);

    assert!(
        controller.change_set().is_empty(),
        "a 1x1 grid always draws zero picks",
    );
}

#[test]
fn out_of_bounds_toggle_is_ignored_without_publishing() {
    let mut controller = controller(3, 3);

    assert_eq!(
        controller.toggle_cell(cell(3, 1)),
        Outcome::Ignored(IgnoreReason::OutOfBounds)
    );
    assert!(controller.publisher().published.is_empty());
}

#[test]
fn start_arms_the_scheduler_and_blocks_edits() {
    let mut controller = controller(5, 5);

    assert_eq!(controller.start(), Outcome::Applied);
    assert_eq!(controller.lifecycle(), Lifecycle::Running);
    assert_eq!(controller.scheduler().armed(), Some(TICK_INTERVAL));

    assert_eq!(
        controller.toggle_cell(cell(1, 1)),
        Outcome::Ignored(IgnoreReason::Running)
    );
    assert_eq!(
        controller.randomize(),
        Outcome::Ignored(IgnoreReason::Running)
    );
    assert!(controller.change_set().is_empty());
    assert!(controller.publisher().published.is_empty());
}

#[test]
fn starting_twice_rearms_without_corrupting_state() {
    let mut controller = controller(5, 5);
    for toggled in [cell(2, 1), cell(2, 2), cell(2, 3)] {
        let _ = controller.toggle_cell(toggled);
    }

    let _ = controller.start();
    let _ = controller.tick();
    let _ = controller.start();

    assert_eq!(controller.scheduler().arm_count(), 2);
    assert_eq!(controller.lifecycle(), Lifecycle::Running);
    let _ = controller.tick();
    let expected: BTreeSet<CellCoord> = [cell(2, 1), cell(2, 2), cell(2, 3)].into_iter().collect();
    assert_eq!(published_live(&controller), expected);
}

#[test]
fn dispose_is_terminal_and_idempotent() {
    let mut controller = controller(5, 5);
    let _ = controller.start();

    controller.dispose();
    controller.dispose();

    assert_eq!(controller.lifecycle(), Lifecycle::Disposed);
    assert_eq!(controller.scheduler().armed(), None);
    assert_eq!(controller.publisher().closed, 1);

    let published = controller.publisher().published.len();
    assert_eq!(controller.tick(), Outcome::Ignored(IgnoreReason::Disposed));
    assert_eq!(controller.start(), Outcome::Ignored(IgnoreReason::Disposed));
    assert_eq!(
        controller.toggle_cell(cell(1, 1)),
        Outcome::Ignored(IgnoreReason::Disposed)
    );
    assert_eq!(
        controller.randomize(),
        Outcome::Ignored(IgnoreReason::Disposed)
    );
    assert_eq!(controller.publisher().published.len(), published);
}

#[test]
fn channel_publisher_forwards_change_sets() {
    let (sender, receiver) = std::sync::mpsc::channel();
    let config = ControllerConfig {
        width: 4,
        height: 4,
        seed: Some(1),
        ..ControllerConfig::default()
    };
    let mut controller =
        Controller::new(config, sender, ManualScheduler::new()).expect("valid controller");

    let _ = controller.toggle_cell(cell(2, 2));

    let received = receiver.try_recv().expect("toggle publishes");
    assert_eq!(received.live_cells().collect::<Vec<_>>(), vec![cell(2, 2)]);
}
